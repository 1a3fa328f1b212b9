//! Single book view

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

use super::{
    borrowing::{self, Outcome},
    load_error, or_dash, Page, PageContext,
};

pub struct BookDetailsPage {
    ctx: PageContext,
    pub book_id: i64,
    pub book: Option<Book>,
    pub error: Option<String>,
}

impl BookDetailsPage {
    pub fn new(ctx: PageContext, book_id: i64) -> Self {
        Self {
            ctx,
            book_id,
            book: None,
            error: None,
        }
    }

    /// Borrow the first copy on the shelf. Guests are sent to the login page.
    pub async fn borrow(&mut self) -> AppResult<Outcome> {
        match self.try_borrow().await {
            Ok(outcome) => Ok(outcome),
            Err(AppError::LoginRequired) => {
                self.ctx.navigator.redirect("/login");
                Err(AppError::LoginRequired)
            }
            Err(e) => {
                borrowing::report_borrow_failure(&self.ctx, &e);
                Err(e)
            }
        }
    }

    async fn try_borrow(&mut self) -> AppResult<Outcome> {
        let member = self.ctx.member()?;
        let title = self
            .book
            .as_ref()
            .map(|b| b.title.clone())
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        let available = self.ctx.services.books.available_instances(self.book_id).await?;
        let instance = available.first().ok_or(AppError::NoAvailableCopies)?;
        let library_name = instance
            .library_name
            .clone()
            .unwrap_or_else(|| "the library".to_string());

        let outcome = borrowing::borrow_copy(
            &self.ctx,
            &member,
            &title,
            &library_name,
            instance.bk_instance_id,
        )
        .await?;

        if outcome == Outcome::Done {
            self.ctx.prompt.alert("Book borrowed successfully!");
            self.reload().await;
        }
        Ok(outcome)
    }
}

#[async_trait]
impl Page for BookDetailsPage {
    async fn load(&mut self) -> AppResult<()> {
        match self.ctx.services.books.get(self.book_id).await {
            Ok(book) => {
                self.book = Some(book);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.book = None;
                self.error = Some(load_error("book details", &e));
                Err(e)
            }
        }
    }

    fn render(&self) -> String {
        let Some(book) = &self.book else {
            return self
                .error
                .clone()
                .unwrap_or_else(|| "Book not found".to_string());
        };

        let year = book.year_of_published.map(|y| y.to_string());
        format!(
            "{}\nby {}\n\nISBN: {}\nCategory: {}\nLanguage: {}\nPublisher: {}\nYear: {}\n\n{} of {} copies available\n",
            book.title,
            book.author,
            or_dash(book.isbn.as_deref()),
            or_dash(book.category.as_deref()),
            or_dash(book.language.as_deref()),
            or_dash(book.publisher.as_deref()),
            or_dash(year.as_deref()),
            book.available_copies,
            book.total_copies
        )
    }
}
