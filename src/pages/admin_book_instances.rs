//! Physical copy management, including transfers between libraries

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    listing::InstanceQuery,
    models::{Book, BookInstance, BookInstanceForm, Library},
    services::books::FULL_LIST_SIZE,
};

use super::{load_error, Outcome, Page, PageContext};

pub struct AdminBookInstancesPage {
    ctx: PageContext,
    pub instances: Vec<BookInstance>,
    pub books: Vec<Book>,
    pub libraries: Vec<Library>,
    pub query: InstanceQuery,
    /// Instance ids ticked for transfer, in selection order
    pub selected: Vec<i64>,
    pub error: Option<String>,
}

impl AdminBookInstancesPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            instances: Vec::new(),
            books: Vec::new(),
            libraries: Vec::new(),
            query: InstanceQuery::default(),
            selected: Vec::new(),
            error: None,
        }
    }

    pub fn visible(&self) -> Vec<BookInstance> {
        self.query.apply(&self.instances)
    }

    pub fn toggle(&mut self, instance_id: i64) {
        if let Some(pos) = self.selected.iter().position(|id| *id == instance_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(instance_id);
        }
    }

    /// Select every visible instance, or clear the selection if that is already the case
    pub fn toggle_all(&mut self) {
        let visible: Vec<i64> = self.visible().iter().map(|i| i.bk_instance_id).collect();
        if self.selected.len() == visible.len() {
            self.selected.clear();
        } else {
            self.selected = visible;
        }
    }

    pub async fn create(&mut self, form: &BookInstanceForm) -> AppResult<Outcome> {
        let service = &self.ctx.services.book_instances;
        let outcome = self
            .ctx
            .act(
                None,
                "Book instance added successfully!",
                "Failed to add book instance",
                async { service.create(form).await.map(|_| ()) },
            )
            .await?;
        self.reload().await;
        Ok(outcome)
    }

    pub async fn update(&mut self, instance_id: i64, form: &BookInstanceForm) -> AppResult<Outcome> {
        let service = &self.ctx.services.book_instances;
        let outcome = self
            .ctx
            .act(
                None,
                "Book instance updated successfully!",
                "Failed to update book instance",
                async { service.update(instance_id, form).await.map(|_| ()) },
            )
            .await?;
        self.reload().await;
        Ok(outcome)
    }

    pub async fn delete(&mut self, instance_id: i64) -> AppResult<Outcome> {
        let outcome = self
            .ctx
            .act(
                Some("Are you sure you want to delete this book instance?"),
                "Book instance deleted successfully!",
                "Failed to delete book instance",
                self.ctx.services.book_instances.delete(instance_id),
            )
            .await?;
        if outcome == Outcome::Done {
            self.reload().await;
        }
        Ok(outcome)
    }

    /// Move the selected instances; one id uses the single-copy endpoint
    pub async fn transfer_selected(&mut self, new_library_id: i64) -> AppResult<Outcome> {
        if self.selected.is_empty() {
            let message = "Please select at least one book instance to transfer.";
            self.ctx.prompt.alert(message);
            return Err(AppError::field("selection", message));
        }

        let service = &self.ctx.services.book_instances;
        let ids = self.selected.clone();
        let success = format!("{} book instance(s) transferred successfully!", ids.len());
        let outcome = self
            .ctx
            .act(None, &success, "Failed to transfer book instances", async {
                match ids.as_slice() {
                    [id] => service.transfer(*id, new_library_id).await,
                    many => service.transfer_many(many, new_library_id).await,
                }
            })
            .await?;

        self.selected.clear();
        self.reload().await;
        Ok(outcome)
    }

    fn book_title<'a>(&'a self, instance: &'a BookInstance) -> &'a str {
        instance
            .book_title
            .as_deref()
            .or_else(|| {
                self.books
                    .iter()
                    .find(|b| b.book_id == instance.book_id)
                    .map(|b| b.title.as_str())
            })
            .unwrap_or("Unknown book")
    }
}

#[async_trait]
impl Page for AdminBookInstancesPage {
    async fn load(&mut self) -> AppResult<()> {
        let services = &self.ctx.services;
        let loaded = futures::try_join!(
            services.book_instances.list(),
            services.books.list(0, FULL_LIST_SIZE),
            services.libraries.list(),
        );

        match loaded {
            Ok((instances, books, libraries)) => {
                self.instances = instances;
                self.books = books;
                self.libraries = libraries;
                self.selected
                    .retain(|id| self.instances.iter().any(|i| i.bk_instance_id == *id));
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(load_error("data", &e));
                Err(e)
            }
        }
    }

    fn render(&self) -> String {
        let visible = self.visible();
        let mut out = format!(
            "Manage Book Instances\n\n{} instances | {} selected\n\n",
            visible.len(),
            self.selected.len()
        );
        for instance in &visible {
            let mark = if self.selected.contains(&instance.bk_instance_id) {
                "[x]"
            } else {
                "[ ]"
            };
            out.push_str(&format!(
                "{} #{} {} | {} | {} | {}\n",
                mark,
                instance.bk_instance_id,
                self.book_title(instance),
                instance.library_name.as_deref().unwrap_or("Unknown library"),
                instance.bk_status,
                instance.bk_condition
            ));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
