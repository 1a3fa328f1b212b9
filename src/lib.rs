//! Library Management client
//!
//! Talks to the library management REST API: book catalog and availability,
//! borrowing, member and administrator accounts, and notifications. Screens
//! are modelled as view-models in [`pages`] and rendered as text by the
//! `library-client` binary.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod listing;
pub mod models;
pub mod pages;
pub mod router;
pub mod services;
pub mod session;
pub mod ui;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use api::ApiClient;
use pages::{Page, PageContext};
use router::{Navigator, Resolution, Route};
use services::Services;
use session::{AuthSession, SessionStore};
use ui::Prompt;

/// Redirect hops followed while opening a path
const MAX_REDIRECTS: usize = 4;

/// Application state shared by every page
#[derive(Clone)]
pub struct App {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn SessionStore>,
    pub navigator: Arc<Navigator>,
    pub services: Services,
    pub auth: AuthSession,
}

impl App {
    pub fn new(config: AppConfig, store: Arc<dyn SessionStore>) -> AppResult<Self> {
        let navigator = Arc::new(Navigator::default());
        let client = ApiClient::new(&config.api, store.clone(), navigator.clone())?;
        let services = Services::new(client);
        let auth = AuthSession::new(services.auth.clone(), store.clone());

        Ok(Self {
            config: Arc::new(config),
            store,
            navigator,
            services,
            auth,
        })
    }

    pub fn context(&self, prompt: Arc<dyn Prompt>) -> PageContext {
        PageContext::new(
            self.services.clone(),
            self.auth.clone(),
            prompt,
            self.navigator.clone(),
        )
    }

    /// Resolve `path`, follow guard redirects and load the page that renders.
    ///
    /// A page whose load ends in a navigation (an expired session sends the
    /// user to `/login`) is replaced by the page it navigated to.
    pub async fn open(&self, path: &str, prompt: Arc<dyn Prompt>) -> (Route, Box<dyn Page>) {
        let mut path = path.to_string();

        for _ in 0..MAX_REDIRECTS {
            let user = self.auth.user();
            let route = match router::resolve(&path, user.as_ref()) {
                Resolution::Render(route) => route,
                Resolution::Redirect(to) => {
                    tracing::debug!("Redirecting {} to {}", path, to);
                    path = to;
                    continue;
                }
            };

            let target = route.path();
            self.navigator.redirect(&target);
            let mut page = pages::open(&route, self.context(prompt.clone()));
            if let Err(e) = page.load().await {
                tracing::warn!("Loading {} failed: {}", target, e);
            }

            let location = self.navigator.current();
            if location == target {
                return (route, page);
            }
            path = location;
        }

        tracing::warn!("Too many redirects, giving up on {}", path);
        let route = Route::NotFound;
        (route.clone(), pages::open(&route, self.context(prompt)))
    }
}
