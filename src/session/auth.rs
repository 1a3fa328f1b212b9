//! Authentication state shared by every page

use std::sync::{Arc, RwLock};

use crate::{
    error::{AppError, AppResult},
    models::{
        auth::{LoginResponse, RegisterRequest, RegistrationForm},
        SessionUser, SessionUserUpdate,
    },
    services::auth::AuthService,
};

use super::store::SessionStore;

#[derive(Debug, Clone, Default)]
struct AuthState {
    user: Option<SessionUser>,
    is_authenticated: bool,
    loading: bool,
}

/// Holds who is logged in and keeps the session store in step with it
#[derive(Clone)]
pub struct AuthSession {
    auth: AuthService,
    store: Arc<dyn SessionStore>,
    state: Arc<RwLock<AuthState>>,
}

impl AuthSession {
    pub fn new(auth: AuthService, store: Arc<dyn SessionStore>) -> Self {
        Self {
            auth,
            store,
            state: Arc::new(RwLock::new(AuthState {
                loading: true,
                ..AuthState::default()
            })),
        }
    }

    fn set_state(&self, user: Option<SessionUser>) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.is_authenticated = user.is_some();
        state.user = user;
    }

    /// Restore a stored session after checking the token with the server.
    ///
    /// Any failure drops the stored token and user.
    pub async fn initialize(&self) {
        if self.store.token().is_some() {
            match self.verify().await {
                Ok(user) => {
                    tracing::info!("Restored session for {}", user.username);
                    self.set_state(Some(user));
                }
                Err(e) => {
                    tracing::warn!("Auth check failed: {}", e);
                    if let Err(e) = self.store.clear() {
                        tracing::error!("Failed to clear session: {}", e);
                    }
                    self.set_state(None);
                }
            }
        }

        self.state.write().unwrap_or_else(|e| e.into_inner()).loading = false;
    }

    /// `/auth/me` payload, or the stored record when the payload lacks user fields
    async fn verify(&self) -> AppResult<SessionUser> {
        let me = self.auth.current_user().await?;
        match serde_json::from_value::<SessionUser>(me) {
            Ok(user) => Ok(user),
            Err(e) => self.store.user().ok_or(AppError::Serialization(e)),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let response = self
            .auth
            .login(username, password)
            .await
            .map_err(classify_login_error)?;

        let user = SessionUser::from(&response);
        self.store.save_session(&response.token, &user)?;
        tracing::info!("Logged in as {} ({})", user.username, user.user_type);
        self.set_state(Some(user));

        Ok(response)
    }

    pub async fn register(&self, form: &RegistrationForm) -> AppResult<()> {
        self.auth
            .register(&RegisterRequest::from(form))
            .await
            .map_err(classify_register_error)?;
        tracing::info!("Registered account {}", form.username);
        Ok(())
    }

    /// Log out on the server; the local session is cleared whatever it answers
    pub async fn logout(&self) -> AppResult<()> {
        if let Err(e) = self.auth.logout().await {
            tracing::warn!("Logout error: {}", e);
        }
        self.set_state(None);
        self.store.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Merge profile changes into the local user and persist them
    pub fn update_user(&self, update: SessionUserUpdate) -> AppResult<()> {
        let updated = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            match state.user.as_mut() {
                Some(user) => {
                    user.merge(update);
                    user.clone()
                }
                None => return Ok(()),
            }
        };
        self.store.save_user(&updated)
    }

    /// Current user; a session dropped by the HTTP client reads as logged out
    pub fn user(&self) -> Option<SessionUser> {
        if self.store.token().is_none() {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            if state.is_authenticated {
                state.user = None;
                state.is_authenticated = false;
            }
            return None;
        }
        self.state.read().unwrap_or_else(|e| e.into_inner()).user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user().map_or(false, |u| u.is_admin())
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap_or_else(|e| e.into_inner()).loading
    }
}

/// Map login rejections onto the messages the login page shows
pub fn classify_login_error(err: AppError) -> AppError {
    let AppError::Api { message, .. } = &err else {
        return err;
    };
    let lower = message.to_lowercase();

    if lower.contains("invalid username or password") {
        AppError::InvalidCredentials
    } else if lower.contains("account is not active") {
        AppError::AccountNotActive
    } else if lower.contains("status: pending") {
        AppError::AccountPending
    } else {
        err
    }
}

pub fn classify_register_error(err: AppError) -> AppError {
    let AppError::Api { message, .. } = &err else {
        return err;
    };
    let lower = message.to_lowercase();

    if lower.contains("username already exists") {
        AppError::UsernameTaken
    } else if lower.contains("email already exists") {
        AppError::EmailTaken
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(message: &str) -> AppError {
        AppError::Api {
            status: 400,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_login_classification() {
        assert!(matches!(
            classify_login_error(api("Invalid username or password")),
            AppError::InvalidCredentials
        ));
        assert!(matches!(
            classify_login_error(api("Login failed: Account is not active")),
            AppError::AccountNotActive
        ));
        assert!(matches!(
            classify_login_error(api("Account status: PENDING")),
            AppError::AccountPending
        ));
        let other = classify_login_error(api("Server exploded"));
        assert_eq!(other.user_message(), "Server exploded");
    }

    #[test]
    fn test_register_classification() {
        assert!(matches!(
            classify_register_error(api("Username already exists: bob")),
            AppError::UsernameTaken
        ));
        assert!(matches!(
            classify_register_error(api("EMAIL ALREADY EXISTS")),
            AppError::EmailTaken
        ));
        assert!(matches!(classify_register_error(AppError::Unauthorized), AppError::Unauthorized));
    }
}
