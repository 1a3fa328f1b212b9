//! Book catalog with per-library availability and borrowing

use async_trait::async_trait;
use futures::future::join_all;

use crate::{
    error::{AppError, AppResult},
    listing::CatalogQuery,
    models::{CatalogBook, Library},
};

use super::{
    borrowing::{self, Outcome},
    load_error, Page, PageContext,
};

const CATALOG_PAGE_SIZE: u32 = 100;

pub struct CatalogPage {
    ctx: PageContext,
    pub books: Vec<CatalogBook>,
    pub categories: Vec<String>,
    pub libraries: Vec<Library>,
    pub query: CatalogQuery,
    pub error: Option<String>,
}

impl CatalogPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            books: Vec::new(),
            categories: Vec::new(),
            libraries: Vec::new(),
            query: CatalogQuery::default(),
            error: None,
        }
    }

    /// Books and their copies; a book whose copies cannot be fetched shows none
    async fn fetch_books(&self) -> AppResult<Vec<CatalogBook>> {
        let books = self.ctx.services.books.list(0, CATALOG_PAGE_SIZE).await?;

        let lookups = books.iter().map(|b| self.ctx.services.books.instances(b.book_id));
        let instances = join_all(lookups).await;

        Ok(books
            .into_iter()
            .zip(instances)
            .map(|(book, result)| {
                let copies = result.unwrap_or_else(|e| {
                    tracing::warn!("Error fetching instances for book {}: {}", book.book_id, e);
                    Vec::new()
                });
                CatalogBook::new(book, copies)
            })
            .collect())
    }

    /// Books passing the current filters
    pub fn visible(&self) -> Vec<CatalogBook> {
        self.query.apply(&self.books)
    }

    /// Borrow a copy of `book_id` held by `library_id`.
    ///
    /// Failures are shown to the user before being returned.
    pub async fn borrow(&mut self, book_id: i64, library_id: i64) -> AppResult<Outcome> {
        match self.try_borrow(book_id, library_id).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                borrowing::report_borrow_failure(&self.ctx, &e);
                Err(e)
            }
        }
    }

    async fn try_borrow(&mut self, book_id: i64, library_id: i64) -> AppResult<Outcome> {
        let member = self.ctx.member()?;

        let entry = self
            .books
            .iter()
            .find(|b| b.book.book_id == book_id)
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        let holding = entry
            .holding(library_id)
            .filter(|h| h.available_copies > 0)
            .ok_or(AppError::NoAvailableCopies)?;
        let instance = holding.first_available().ok_or(AppError::NoAvailableCopies)?;

        let library_name = holding
            .library_name
            .clone()
            .unwrap_or_else(|| format!("library {}", library_id));
        let title = entry.book.title.clone();
        let instance_id = instance.bk_instance_id;

        let outcome =
            borrowing::borrow_copy(&self.ctx, &member, &title, &library_name, instance_id).await?;
        if outcome == Outcome::Done {
            self.ctx
                .prompt
                .alert(&format!("Book borrowed successfully from {}!", library_name));
            self.reload().await;
        }
        Ok(outcome)
    }
}

#[async_trait]
impl Page for CatalogPage {
    async fn load(&mut self) -> AppResult<()> {
        let books = self.fetch_books();
        let categories = self.ctx.services.books.categories();
        let libraries = self.ctx.services.libraries.list();
        let (books, categories, libraries) = futures::join!(books, categories, libraries);

        self.categories = categories.unwrap_or_else(|e| {
            tracing::warn!("Error fetching categories: {}", e);
            Vec::new()
        });
        self.libraries = libraries.unwrap_or_else(|e| {
            tracing::warn!("Error fetching libraries: {}", e);
            Vec::new()
        });

        match books {
            Ok(books) => {
                self.books = books;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(load_error("books", &e));
                Err(e)
            }
        }
    }

    fn render(&self) -> String {
        let visible = self.visible();
        let mut out = format!("Book Catalog\n\nShowing {} of {} books", visible.len(), self.books.len());
        if let Some(name) = self
            .query
            .library_id
            .and_then(|id| self.libraries.iter().find(|l| l.library_id == id))
            .map(|l| l.library_name.as_str())
        {
            out.push_str(&format!(" available at {}", name));
        }
        out.push('\n');

        for entry in &visible {
            let book = &entry.book;
            out.push_str(&format!(
                "\n[{}] {} by {}\n    {} | {}/{} available\n",
                book.book_id,
                book.title,
                book.author,
                book.category.as_deref().unwrap_or("Uncategorized"),
                book.available_copies,
                book.total_copies
            ));
            for holding in &entry.holdings {
                out.push_str(&format!(
                    "    - {} [{}]: {} of {} available\n",
                    holding.library_name.as_deref().unwrap_or("Unknown library"),
                    holding.library_id,
                    holding.available_copies,
                    holding.total_copies
                ));
            }
        }

        if visible.is_empty() {
            out.push_str("\nNo books found matching your criteria.\n");
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
