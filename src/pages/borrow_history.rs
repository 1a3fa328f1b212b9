//! Member borrow history with filtering, sorting and renewal

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    listing::{BorrowFilter, BorrowQuery},
    models::{Borrow, BorrowStatus},
};

use super::{
    borrowing::{self, Outcome},
    load_error, Page, PageContext,
};

pub struct BorrowHistoryPage {
    ctx: PageContext,
    pub history: Vec<Borrow>,
    pub query: BorrowQuery,
    pub error: Option<String>,
}

impl BorrowHistoryPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            history: Vec::new(),
            query: BorrowQuery::default(),
            error: None,
        }
    }

    pub fn visible(&self) -> Vec<Borrow> {
        self.query.apply(&self.history)
    }

    pub fn count(&self, status: BorrowStatus) -> usize {
        self.history.iter().filter(|b| b.status == status).count()
    }

    /// Borrows the member has to return before borrowing again
    pub fn overdue(&self) -> Vec<&Borrow> {
        self.history
            .iter()
            .filter(|b| b.status == BorrowStatus::Overdue)
            .collect()
    }

    pub async fn renew(&mut self, borrow_id: i64) -> AppResult<Outcome> {
        let borrow = self
            .history
            .iter()
            .find(|b| b.borrow_id == borrow_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Borrow {}", borrow_id)))?;

        let outcome = borrowing::renew(&self.ctx, &borrow).await?;
        if outcome == Outcome::Done {
            self.reload().await;
        }
        Ok(outcome)
    }
}

#[async_trait]
impl Page for BorrowHistoryPage {
    async fn load(&mut self) -> AppResult<()> {
        let member = self.ctx.user()?;
        match self.ctx.services.borrows.by_member(member.id).await {
            Ok(history) => {
                self.history = history;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(load_error("borrow history", &e));
                Err(e)
            }
        }
    }

    fn render(&self) -> String {
        let today = self.ctx.today();
        let mut out = String::from("My Borrowed Books\n\n");

        let overdue = self.overdue();
        if !overdue.is_empty() {
            out.push_str(&format!(
                "You have {} overdue book(s). Return them before borrowing more.\n\n",
                overdue.len()
            ));
        }

        let filter = match self.query.filter {
            BorrowFilter::All => "ALL".to_string(),
            BorrowFilter::Only(status) => status.to_string(),
        };
        out.push_str(&format!(
            "Total: {} | Active: {} | Returned: {} | Overdue: {} | Filter: {}\n\n",
            self.history.len(),
            self.count(BorrowStatus::Active),
            self.count(BorrowStatus::Returned),
            self.count(BorrowStatus::Overdue),
            filter
        ));

        let visible = self.visible();
        if visible.is_empty() {
            out.push_str("No borrowing history found.\n");
        }
        for borrow in &visible {
            out.push_str(&format!(
                "[{}] {} ({})\n    borrowed {} | due {}",
                borrow.borrow_id,
                borrow.book_title_or_default(),
                borrow.status,
                borrow.borrow_date,
                borrow.due_date
            ));
            if let Some(returned) = borrow.return_date {
                out.push_str(&format!(" | returned {}", returned));
            } else if borrow.days_overdue(today) > 0 {
                out.push_str(&format!(" | {} days overdue", borrow.days_overdue(today)));
            }
            if let Some(fine) = borrow.outstanding_fine() {
                out.push_str(&format!(" | fine ${:.2}", fine));
            }
            out.push('\n');
        }

        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
