//! Book management

use async_trait::async_trait;

use crate::{
    error::AppResult,
    listing::{categories, BookQuery},
    models::{Book, BookForm, Library},
    services::books::FULL_LIST_SIZE,
};

use super::{load_error, or_dash, Outcome, Page, PageContext};

pub struct AdminBooksPage {
    ctx: PageContext,
    pub books: Vec<Book>,
    pub libraries: Vec<Library>,
    pub query: BookQuery,
    pub error: Option<String>,
}

impl AdminBooksPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            books: Vec::new(),
            libraries: Vec::new(),
            query: BookQuery::default(),
            error: None,
        }
    }

    pub fn visible(&self) -> Vec<Book> {
        self.query.apply(&self.books)
    }

    /// Categories offered by the filter, taken from the loaded books
    pub fn categories(&self) -> Vec<String> {
        categories(&self.books)
    }

    pub async fn create(&mut self, form: &BookForm) -> AppResult<Outcome> {
        let books = &self.ctx.services.books;
        let outcome = self
            .ctx
            .act(None, "Book added successfully!", "Failed to add book", async {
                books.create(form).await.map(|_| ())
            })
            .await?;
        self.reload().await;
        Ok(outcome)
    }

    pub async fn update(&mut self, book_id: i64, form: &BookForm) -> AppResult<Outcome> {
        let books = &self.ctx.services.books;
        let outcome = self
            .ctx
            .act(None, "Book updated successfully!", "Failed to update book", async {
                books.update(book_id, form).await.map(|_| ())
            })
            .await?;
        self.reload().await;
        Ok(outcome)
    }

    pub async fn delete(&mut self, book_id: i64) -> AppResult<Outcome> {
        let outcome = self
            .ctx
            .act(
                Some("Are you sure you want to delete this book?"),
                "Book deleted successfully!",
                "Failed to delete book",
                self.ctx.services.books.delete(book_id),
            )
            .await?;
        if outcome == Outcome::Done {
            self.reload().await;
        }
        Ok(outcome)
    }
}

#[async_trait]
impl Page for AdminBooksPage {
    async fn load(&mut self) -> AppResult<()> {
        let services = &self.ctx.services;
        let (books, libraries) = futures::join!(
            services.books.list(0, FULL_LIST_SIZE),
            services.libraries.list()
        );

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
        let mut out = format!(
            "Manage Books\n\n{} books | sort: {} {}\n\n",
            visible.len(),
            self.query.sort.as_str(),
            self.query.order.as_str()
        );
        for book in &visible {
            let year = book.year_of_published.map(|y| y.to_string());
            out.push_str(&format!(
                "[{}] {} | {} | {} | {} | {} | {}/{}\n",
                book.book_id,
                book.title,
                book.author,
                or_dash(book.isbn.as_deref()),
                or_dash(book.category.as_deref()),
                or_dash(year.as_deref()),
                book.available_copies,
                book.total_copies
            ));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
