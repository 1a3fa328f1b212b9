//! Library branch management

use async_trait::async_trait;

use crate::{
    error::AppResult,
    listing::LibraryQuery,
    models::{Library, LibraryForm},
};

use super::{load_error, or_dash, Outcome, Page, PageContext};

pub struct AdminLibrariesPage {
    ctx: PageContext,
    pub libraries: Vec<Library>,
    pub query: LibraryQuery,
    pub error: Option<String>,
}

impl AdminLibrariesPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            libraries: Vec::new(),
            query: LibraryQuery::default(),
            error: None,
        }
    }

    pub fn visible(&self) -> Vec<Library> {
        self.query.apply(&self.libraries)
    }

    pub async fn create(&mut self, form: &LibraryForm) -> AppResult<Outcome> {
        let libraries = &self.ctx.services.libraries;
        let outcome = self
            .ctx
            .act(None, "Library added successfully!", "Failed to add library", async {
                libraries.create(form).await.map(|_| ())
            })
            .await?;
        self.reload().await;
        Ok(outcome)
    }

    pub async fn update(&mut self, library_id: i64, form: &LibraryForm) -> AppResult<Outcome> {
        let libraries = &self.ctx.services.libraries;
        let outcome = self
            .ctx
            .act(None, "Library updated successfully!", "Failed to update library", async {
                libraries.update(library_id, form).await.map(|_| ())
            })
            .await?;
        self.reload().await;
        Ok(outcome)
    }

    pub async fn delete(&mut self, library_id: i64) -> AppResult<Outcome> {
        let outcome = self
            .ctx
            .act(
                Some("Are you sure you want to delete this library? This action cannot be undone."),
                "Library deleted successfully!",
                "Failed to delete library",
                self.ctx.services.libraries.delete(library_id),
            )
            .await?;
        if outcome == Outcome::Done {
            self.reload().await;
        }
        Ok(outcome)
    }
}

#[async_trait]
impl Page for AdminLibrariesPage {
    async fn load(&mut self) -> AppResult<()> {
        match self.ctx.services.libraries.list().await {
            Ok(libraries) => {
                self.libraries = libraries;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(load_error("libraries", &e));
                Err(e)
            }
        }
    }

    fn render(&self) -> String {
        let visible = self.visible();
        let mut out = format!("Manage Libraries\n\n{} libraries\n\n", visible.len());
        for library in &visible {
            out.push_str(&format!(
                "[{}] {}\n    {} | {} | {}\n    books: {} total, {} available\n",
                library.library_id,
                library.library_name,
                or_dash(library.lb_address.as_deref()),
                or_dash(library.lb_phone.as_deref()),
                or_dash(library.lb_operating_hour.as_deref()),
                library.total_books.unwrap_or(0),
                library.available_books.unwrap_or(0)
            ));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
