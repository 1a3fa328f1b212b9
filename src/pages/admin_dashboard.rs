//! Administrator overview

use async_trait::async_trait;

use crate::{
    error::AppResult,
    listing::{sort_by_key, SortOrder, SortValue},
    models::{Borrow, BorrowStatus, MemberStatus},
    services::books::FULL_LIST_SIZE,
};

use super::{load_error, Page, PageContext};

const RECENT_BORROWS: usize = 10;
const OVERDUE_SHOWN: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_books: usize,
    pub total_members: usize,
    pub total_libraries: usize,
    pub active_borrows: usize,
    pub overdue_borrows: usize,
    pub pending_members: usize,
    /// Newest first
    pub recent_borrows: Vec<Borrow>,
    pub overdue_books: Vec<Borrow>,
}

pub struct AdminDashboardPage {
    ctx: PageContext,
    pub summary: DashboardSummary,
    pub error: Option<String>,
}

impl AdminDashboardPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            summary: DashboardSummary::default(),
            error: None,
        }
    }

    async fn fetch(&self) -> AppResult<DashboardSummary> {
        let services = &self.ctx.services;
        let (books, members, libraries, mut borrows, overdue, pending) = futures::try_join!(
            services.books.list(0, FULL_LIST_SIZE),
            services.members.list(),
            services.libraries.list(),
            services.borrows.list(),
            services.borrows.overdue(),
            services.members.by_status(MemberStatus::Pending),
        )?;

        let active_borrows = borrows
            .iter()
            .filter(|b| b.status == BorrowStatus::Active)
            .count();
        sort_by_key(&mut borrows, SortOrder::Desc, |b| SortValue::Date(b.borrow_date));
        borrows.truncate(RECENT_BORROWS);

        Ok(DashboardSummary {
            total_books: books.len(),
            total_members: members.len(),
            total_libraries: libraries.len(),
            active_borrows,
            overdue_borrows: overdue.len(),
            pending_members: pending.len(),
            recent_borrows: borrows,
            overdue_books: overdue.into_iter().take(OVERDUE_SHOWN).collect(),
        })
    }
}

#[async_trait]
impl Page for AdminDashboardPage {
    async fn load(&mut self) -> AppResult<()> {
        match self.fetch().await {
            Ok(summary) => {
                self.summary = summary;
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
        if let Some(error) = &self.error {
            return format!("Admin Dashboard\n\n{}\n", error);
        }

        let s = &self.summary;
        let name = self
            .ctx
            .auth
            .user()
            .and_then(|u| u.full_name)
            .unwrap_or_else(|| "Administrator".to_string());
        let mut out = format!(
            "Admin Dashboard\nWelcome back, {}\n\nTotal Books: {}\nTotal Members: {}\nLibraries: {}\nActive Borrows: {}\n",
            name, s.total_books, s.total_members, s.total_libraries, s.active_borrows
        );

        if s.overdue_borrows > 0 {
            out.push_str(&format!(
                "\n{} books are overdue and need immediate attention.\n",
                s.overdue_borrows
            ));
        }
        if s.pending_members > 0 {
            out.push_str(&format!(
                "{} members are waiting for approval (/admin/members).\n",
                s.pending_members
            ));
        }

        out.push_str("\nRecent Borrows\n");
        for b in &s.recent_borrows {
            out.push_str(&format!(
                "  {} | {} | {} | {}\n",
                b.member_name.as_deref().unwrap_or("-"),
                b.book_title_or_default(),
                b.borrow_date,
                b.status
            ));
        }

        out.push_str("\nOverdue Books\n");
        let today = self.ctx.today();
        for b in &s.overdue_books {
            out.push_str(&format!(
                "  {} | {} | due {} ({} days)\n",
                b.member_name.as_deref().unwrap_or("-"),
                b.book_title_or_default(),
                b.due_date,
                b.days_overdue(today)
            ));
        }
        out
    }
}
