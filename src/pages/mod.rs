//! Routed screens.
//!
//! Every page is a view-model: it owns the data of one screen, loads it
//! through the services and exposes the screen's actions as methods.
//! Load failures land in the page's `error`; action failures are both
//! returned and shown through the [`Prompt`].

pub mod admin_administrators;
pub mod admin_book_instances;
pub mod admin_books;
pub mod admin_dashboard;
pub mod admin_libraries;
pub mod admin_members;
pub mod admin_notifications;
pub mod book_details;
pub mod borrow_history;
pub mod borrowing;
pub mod catalog;
pub mod home;
pub mod login;
pub mod member_dashboard;
pub mod not_found;
pub mod notifications;
pub mod profile;
pub mod register;

use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::SessionUser,
    router::{Navigator, Route},
    services::Services,
    session::AuthSession,
    ui::Prompt,
};

/// Everything a page needs to talk to the backend and the user
#[derive(Clone)]
pub struct PageContext {
    pub services: Services,
    pub auth: AuthSession,
    pub prompt: Arc<dyn Prompt>,
    pub navigator: Arc<Navigator>,
}

impl PageContext {
    pub fn new(
        services: Services,
        auth: AuthSession,
        prompt: Arc<dyn Prompt>,
        navigator: Arc<Navigator>,
    ) -> Self {
        Self {
            services,
            auth,
            prompt,
            navigator,
        }
    }

    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    /// Logged-in user of any kind
    pub fn user(&self) -> AppResult<SessionUser> {
        self.auth.user().ok_or(AppError::Unauthorized)
    }

    /// Logged-in member; borrowing is refused to guests and administrators
    pub fn member(&self) -> AppResult<SessionUser> {
        let user = self.auth.user().ok_or(AppError::LoginRequired)?;
        if !user.is_member() {
            return Err(AppError::MembersOnly);
        }
        Ok(user)
    }

    /// Show an action failure, prefixed the way each screen words it
    pub fn alert_failure(&self, prefix: &str, err: &AppError) {
        tracing::error!("{}: {}", prefix, err);
        match err {
            AppError::Validation(_) | AppError::Unauthorized => self.prompt.alert(&err.user_message()),
            _ => self.prompt.alert(&format!("{}: {}", prefix, err.user_message())),
        }
    }

    /// Run an action that may need confirming and reports its result.
    ///
    /// `action` is only awaited once the user agreed.
    pub async fn act<F>(
        &self,
        confirmation: Option<&str>,
        success: &str,
        failure: &str,
        action: F,
    ) -> AppResult<Outcome>
    where
        F: Future<Output = AppResult<()>>,
    {
        if let Some(question) = confirmation {
            if !self.prompt.confirm(question) {
                return Ok(Outcome::Cancelled);
            }
        }
        match action.await {
            Ok(()) => {
                tracing::info!("{}", success);
                self.prompt.alert(success);
                Ok(Outcome::Done)
            }
            Err(e) => {
                self.alert_failure(failure, &e);
                Err(e)
            }
        }
    }
}

/// How a confirmed action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The user declined the confirmation; nothing was sent
    Cancelled,
}

#[async_trait]
pub trait Page: Send {
    /// Fetch the screen's data
    async fn load(&mut self) -> AppResult<()>;

    /// Text rendering of the current state
    fn render(&self) -> String;

    /// Refresh after an action the server already accepted.
    ///
    /// A failed refresh only lands in the page's error state.
    async fn reload(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!("Refresh after action failed: {}", e);
        }
    }
}

/// Build the page for a route that the router agreed to render
pub fn open(route: &Route, ctx: PageContext) -> Box<dyn Page> {
    match route {
        Route::Home => Box::new(home::HomePage::new(ctx)),
        Route::Catalog => Box::new(catalog::CatalogPage::new(ctx)),
        Route::BookDetails(id) => Box::new(book_details::BookDetailsPage::new(ctx, *id)),
        Route::Login => Box::new(login::LoginPage::new(ctx)),
        Route::Register => Box::new(register::RegisterPage::new(ctx)),
        Route::Dashboard => Box::new(member_dashboard::MemberDashboardPage::new(ctx)),
        Route::BorrowHistory => Box::new(borrow_history::BorrowHistoryPage::new(ctx)),
        Route::Notifications => Box::new(notifications::NotificationsPage::new(ctx)),
        Route::Profile => Box::new(profile::ProfilePage::new(ctx)),
        Route::AdminDashboard => Box::new(admin_dashboard::AdminDashboardPage::new(ctx)),
        Route::AdminBooks => Box::new(admin_books::AdminBooksPage::new(ctx)),
        Route::AdminMembers => Box::new(admin_members::AdminMembersPage::new(ctx)),
        Route::AdminLibraries => Box::new(admin_libraries::AdminLibrariesPage::new(ctx)),
        Route::AdminBookInstances => {
            Box::new(admin_book_instances::AdminBookInstancesPage::new(ctx))
        }
        Route::AdminAdministrators => {
            Box::new(admin_administrators::AdminAdministratorsPage::new(ctx))
        }
        Route::AdminNotifications => {
            Box::new(admin_notifications::AdminNotificationsPage::new(ctx))
        }
        Route::NotFound => Box::new(not_found::NotFoundPage::new(ctx)),
    }
}

/// Record a load failure on the page and log it
pub(crate) fn load_error(what: &str, err: &AppError) -> String {
    tracing::error!("Error fetching {}: {}", what, err);
    format!("Failed to load {}: {}", what, err.user_message())
}

pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::{
        api::ApiClient,
        config::ApiConfig,
        session::{MemorySessionStore, SessionStore},
        ui::prompt::MockPrompt,
    };

    fn context_with(prompt: MockPrompt) -> PageContext {
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let navigator = Arc::new(Navigator::default());
        let client = ApiClient::new(&ApiConfig::default(), store.clone(), navigator.clone()).unwrap();
        let services = Services::new(client);
        let auth = AuthSession::new(services.auth.clone(), store);
        PageContext::new(services, auth, Arc::new(prompt), navigator)
    }

    #[tokio::test]
    async fn test_declined_action_is_never_run() {
        let mut prompt = MockPrompt::new();
        prompt
            .expect_confirm()
            .withf(|question: &str| question == "Delete this book?")
            .times(1)
            .returning(|_| false);
        prompt.expect_alert().never();
        let ctx = context_with(prompt);

        let ran = AtomicBool::new(false);
        let outcome = ctx
            .act(Some("Delete this book?"), "Book deleted", "Failed to delete book", async {
                ran.store(true, Ordering::SeqCst);
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_confirmed_action_alerts_success() {
        let mut prompt = MockPrompt::new();
        prompt.expect_confirm().times(1).returning(|_| true);
        prompt
            .expect_alert()
            .withf(|message: &str| message == "Book deleted")
            .times(1)
            .returning(|_| ());
        let ctx = context_with(prompt);

        let outcome = ctx
            .act(Some("Delete this book?"), "Book deleted", "Failed to delete book", async { Ok(()) })
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Done);
    }

    #[tokio::test]
    async fn test_failed_action_alerts_prefixed_message() {
        let mut prompt = MockPrompt::new();
        prompt.expect_confirm().never();
        prompt
            .expect_alert()
            .withf(|message: &str| message.starts_with("Failed to delete book: "))
            .times(1)
            .returning(|_| ());
        let ctx = context_with(prompt);

        let result = ctx
            .act(None, "Book deleted", "Failed to delete book", async {
                Err(AppError::Api {
                    status: 409,
                    message: "Book has active borrows".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(AppError::Api { status: 409, .. })));
    }

    struct BrokenPage {
        loads: usize,
    }

    #[async_trait]
    impl Page for BrokenPage {
        async fn load(&mut self) -> AppResult<()> {
            self.loads += 1;
            Err(AppError::NotFound("gone".to_string()))
        }

        fn render(&self) -> String {
            String::new()
        }
    }

    #[tokio::test]
    async fn test_reload_swallows_load_failure() {
        let mut page = BrokenPage { loads: 0 };
        page.reload().await;
        assert_eq!(page.loads, 1);
    }
}
