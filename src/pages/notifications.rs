//! Member inbox

use async_trait::async_trait;

use crate::{
    error::AppResult,
    listing::{count_of_type, NotificationQuery},
    models::{Notification, NotificationType},
};

use super::{load_error, Page, PageContext};

pub struct NotificationsPage {
    ctx: PageContext,
    pub notifications: Vec<Notification>,
    pub query: NotificationQuery,
    pub error: Option<String>,
}

impl NotificationsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            notifications: Vec::new(),
            query: NotificationQuery::default(),
            error: None,
        }
    }

    /// Show only one type; `None` shows all
    pub fn filter(&mut self, ntf_type: Option<NotificationType>) {
        self.query.ntf_type = ntf_type;
    }

    pub fn visible(&self) -> Vec<Notification> {
        self.query.apply(&self.notifications)
    }

    pub fn count(&self, ntf_type: &NotificationType) -> usize {
        count_of_type(&self.notifications, ntf_type)
    }

    pub async fn delete(&mut self, notification_id: i64) -> AppResult<()> {
        match self.ctx.services.notifications.delete(notification_id).await {
            Ok(()) => {
                self.notifications.retain(|n| n.notification_id != notification_id);
                Ok(())
            }
            Err(e) => {
                self.ctx.alert_failure("Failed to delete notification", &e);
                Err(e)
            }
        }
    }
}

fn icon(ntf_type: &NotificationType) -> &'static str {
    match ntf_type {
        NotificationType::Overdue => "!",
        NotificationType::Reminder => "~",
        NotificationType::General => "*",
        NotificationType::Welcome => "+",
        _ => "-",
    }
}

#[async_trait]
impl Page for NotificationsPage {
    async fn load(&mut self) -> AppResult<()> {
        let member = self.ctx.user()?;
        match self.ctx.services.notifications.by_member(member.id).await {
            Ok(notifications) => {
                self.notifications = notifications;
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
        let mut out = format!("My Notifications ({})\n", self.notifications.len());
        for ntf_type in [
            NotificationType::Overdue,
            NotificationType::Reminder,
            NotificationType::General,
            NotificationType::Welcome,
        ] {
            out.push_str(&format!("  {}: {}\n", ntf_type, self.count(&ntf_type)));
        }
        out.push('\n');

        let visible = self.visible();
        if visible.is_empty() {
            out.push_str("No notifications.\n");
        }
        for n in &visible {
            let sent = n
                .ntf_sent_date
                .map(|d| d.format("%b %e, %Y %H:%M").to_string())
                .unwrap_or_default();
            out.push_str(&format!(
                "{} [{}] {} {}\n    {}\n",
                icon(&n.ntf_type),
                n.notification_id,
                n.ntf_type,
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
