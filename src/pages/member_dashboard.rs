//! Member home: current loans, latest notifications and borrow figures

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Borrow, BorrowStats, DueStatus, Notification},
};

use super::{
    borrowing::{self, Outcome},
    load_error, Page, PageContext,
};

const RECENT_NOTIFICATIONS: usize = 5;
const FEATURED_COUNT: u32 = 4;

pub struct MemberDashboardPage {
    ctx: PageContext,
    pub active_borrows: Vec<Borrow>,
    pub notifications: Vec<Notification>,
    pub stats: BorrowStats,
    pub featured: Vec<Book>,
    pub error: Option<String>,
}

impl MemberDashboardPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            active_borrows: Vec::new(),
            notifications: Vec::new(),
            stats: BorrowStats::default(),
            featured: Vec::new(),
            error: None,
        }
    }

    pub fn due_status(&self, borrow: &Borrow) -> DueStatus {
        DueStatus::from_days(borrow.days_until_due(self.ctx.today()))
    }

    /// Return one of the member's active borrows, then refresh the list
    pub async fn return_book(&mut self, borrow_id: i64) -> AppResult<Outcome> {
        let borrow = self
            .active_borrows
            .iter()
            .find(|b| b.borrow_id == borrow_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Borrow {}", borrow_id)))?;

        let outcome = borrowing::return_book(&self.ctx, &borrow).await?;
        if outcome == Outcome::Done {
            let member = self.ctx.user()?;
            match self.ctx.services.borrows.active_by_member(member.id).await {
                Ok(active) => self.active_borrows = active,
                Err(e) => {
                    tracing::warn!("Refresh after return failed: {}", e);
                    self.error = Some(load_error("active borrows", &e));
                }
            }
        }
        Ok(outcome)
    }

    async fn fetch(&mut self) -> AppResult<()> {
        let member = self.ctx.user()?;
        let services = &self.ctx.services;

        let (active, notifications, stats, featured) = futures::try_join!(
            services.borrows.active_by_member(member.id),
            services.notifications.by_member(member.id),
            services.borrows.member_stats(member.id),
            services.books.list(0, FEATURED_COUNT),
        )?;

        self.active_borrows = active;
        self.notifications = notifications.into_iter().take(RECENT_NOTIFICATIONS).collect();
        self.stats = stats;
        self.featured = featured;
        Ok(())
    }
}

#[async_trait]
impl Page for MemberDashboardPage {
    async fn load(&mut self) -> AppResult<()> {
        match self.fetch().await {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(load_error("dashboard data", &e));
                Err(e)
            }
        }
    }

    fn render(&self) -> String {
        let name = self
            .ctx
            .auth
            .user()
            .map(|u| u.display_name().to_string())
            .unwrap_or_default();
        let mut out = format!("Welcome back, {}!\n\n", name);

        out.push_str(&format!(
            "Total borrowed: {} | Active: {} | Overdue: {}\n",
            self.stats.total_borrows.unwrap_or(0),
            self.stats.active_borrows.unwrap_or(self.active_borrows.len() as i64),
            self.stats.overdue_borrows.unwrap_or(0)
        ));

        out.push_str("\nCurrently Borrowed\n");
        if self.active_borrows.is_empty() {
            out.push_str("  You have no borrowed books.\n");
        }
        for borrow in &self.active_borrows {
            out.push_str(&format!(
                "  [{}] {} - due {} ({})\n",
                borrow.borrow_id,
                borrow.book_title_or_default(),
                borrow.due_date,
                self.due_status(borrow).label()
            ));
        }

        out.push_str("\nRecent Notifications\n");
        for notification in &self.notifications {
            out.push_str(&format!("  [{}] {}\n", notification.ntf_type, notification.ntf_message));
        }

        out.push_str("\nRecommended Books\n");
        for book in &self.featured {
            out.push_str(&format!("  [{}] {} by {}\n", book.book_id, book.title, book.author));
        }

        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
