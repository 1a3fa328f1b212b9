//! Notification administration: targeted and bulk sends

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    listing::{count_of_type, NotificationQuery},
    models::{Member, Notification, NotificationType},
};

use super::{load_error, Outcome, Page, PageContext};

pub struct AdminNotificationsPage {
    ctx: PageContext,
    pub notifications: Vec<Notification>,
    pub members: Vec<Member>,
    pub query: NotificationQuery,
    pub error: Option<String>,
}

impl AdminNotificationsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            notifications: Vec::new(),
            members: Vec::new(),
            query: NotificationQuery::default(),
            error: None,
        }
    }

    pub fn visible(&self) -> Vec<Notification> {
        self.query.apply(&self.notifications)
    }

    /// Suggested message when a type is picked in the send form
    pub fn template(ntf_type: &NotificationType) -> &'static str {
        ntf_type.template()
    }

    /// Send one notification of `ntf_type` to a member.
    ///
    /// Overdue and reminder notices are built from the member's own borrows.
    pub async fn send(
        &mut self,
        member_id: i64,
        ntf_type: NotificationType,
        message: &str,
    ) -> AppResult<()> {
        if message.trim().is_empty() {
            let text = "Please select a member and enter a message.";
            self.ctx.prompt.alert(text);
            return Err(AppError::field("message", text));
        }

        match self.dispatch(member_id, &ntf_type, message).await {
            Ok(()) => {
                tracing::info!("Sent {} notification to member {}", ntf_type, member_id);
                self.reload().await;
                self.ctx.prompt.alert("Notification sent successfully!");
                Ok(())
            }
            Err(e) => {
                self.ctx.alert_failure("Failed to send notification", &e);
                Err(e)
            }
        }
    }

    async fn dispatch(&self, member_id: i64, ntf_type: &NotificationType, message: &str) -> AppResult<()> {
        let member = self
            .members
            .iter()
            .find(|m| m.member_id == member_id)
            .ok_or_else(|| AppError::NotFound("Selected member not found".to_string()))?;
        let services = &self.ctx.services;

        match ntf_type {
            NotificationType::Welcome => {
                services
                    .notifications
                    .send_welcome(member_id, &member.full_name())
                    .await
            }
            NotificationType::Overdue => {
                let overdue = services.borrows.overdue_by_member(member_id).await?;
                let borrow = overdue.first().ok_or_else(|| {
                    AppError::NotFound(format!("{} has no overdue books", member.full_name()))
                })?;
                services
                    .notifications
                    .send_overdue(
                        member_id,
                        borrow.book_title_or_default(),
                        borrow.days_overdue(self.ctx.today()),
                    )
                    .await
            }
            NotificationType::Reminder => {
                let active = services.borrows.active_by_member(member_id).await?;
                let borrow = active
                    .iter()
                    .min_by_key(|b| b.due_date)
                    .ok_or_else(|| {
                        AppError::NotFound(format!("{} has no active borrows", member.full_name()))
                    })?;
                services
                    .notifications
                    .send_reminder(member_id, borrow.book_title_or_default(), borrow.due_date)
                    .await
            }
            _ => services.notifications.send_general(member_id, message).await,
        }
    }

    /// Send a message to every active member after confirmation
    pub async fn send_bulk(&mut self, message: &str) -> AppResult<Outcome> {
        if message.trim().is_empty() {
            let text = "Please enter a message for the bulk notification.";
            self.ctx.prompt.alert(text);
            return Err(AppError::field("message", text));
        }

        let question = format!(
            "Are you sure you want to send this notification to all active members?\n\n\"{}\"",
            message
        );
        let outcome = self
            .ctx
            .act(
                Some(&question),
                "Bulk notification sent successfully to all active members!",
                "Failed to send bulk notification",
                self.ctx
                    .services
                    .notifications
                    .send_bulk(NotificationType::General, message),
            )
            .await?;
        if outcome == Outcome::Done {
            self.reload().await;
        }
        Ok(outcome)
    }

    pub async fn delete(&mut self, notification_id: i64) -> AppResult<Outcome> {
        let outcome = self
            .ctx
            .act(
                Some("Are you sure you want to delete this notification?"),
                "Notification deleted successfully!",
                "Failed to delete notification",
                self.ctx.services.notifications.delete(notification_id),
            )
            .await?;
        if outcome == Outcome::Done {
            self.notifications.retain(|n| n.notification_id != notification_id);
        }
        Ok(outcome)
    }
}

#[async_trait]
impl Page for AdminNotificationsPage {
    async fn load(&mut self) -> AppResult<()> {
        let services = &self.ctx.services;
        match futures::try_join!(services.notifications.list(), services.members.list()) {
            Ok((notifications, members)) => {
                self.notifications = notifications;
                self.members = members;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(load_error("notifications", &e));
                Err(e)
            }
        }
    }

    fn render(&self) -> String {
        let mut out = format!("Manage Notifications\n\nTotal: {}\n", self.notifications.len());
        for ntf_type in NotificationType::KNOWN.iter() {
            let count = count_of_type(&self.notifications, ntf_type);
            if count > 0 {
                out.push_str(&format!("  {}: {}\n", ntf_type, count));
            }
        }
        out.push('\n');

        for n in self.visible() {
            let sent = n
                .ntf_sent_date
                .map(|d| d.format("%b %e %H:%M").to_string())
                .unwrap_or_default();
            out.push_str(&format!(
                "[{}] {} -> {} {}\n    {}\n",
                n.notification_id,
                n.ntf_type,
                n.member_name.as_deref().unwrap_or("Unknown member"),
                sent,
                n.ntf_message
            ));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
