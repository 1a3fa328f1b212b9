//! Error types for the library client

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Fallback used when a failed response carries no readable message
pub const GENERIC_FAILURE: &str = "Request failed";

/// Inline form errors keyed by field name (`firstName`, `email`, ...)
pub type FieldErrors = BTreeMap<String, String>;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response; `message` is what the backend said
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Your session has expired. Please log in again.")]
    Unauthorized,

    #[error("Please correct the highlighted fields")]
    Validation(FieldErrors),

    #[error("Invalid username or password. Please check your credentials and try again.")]
    InvalidCredentials,

    #[error("Your account is not active. Please contact an administrator.")]
    AccountNotActive,

    #[error("Your account is pending approval. Please wait for an administrator to activate your account.")]
    AccountPending,

    #[error("This username is already taken. Please choose a different username.")]
    UsernameTaken,

    #[error("This email address is already registered. Please use a different email or try signing in.")]
    EmailTaken,

    #[error("Please login to borrow books")]
    LoginRequired,

    #[error("Only members can borrow books")]
    MembersOnly,

    #[error("No available copies of this book at the selected library")]
    NoAvailableCopies,

    /// Borrow refused by the backend because the member has overdue items
    #[error("{0}")]
    OverdueBlocked(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Status code of a backend rejection, if this error is one
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Unauthorized => Some(401),
            AppError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text a page shows in its alert or error banner
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Field errors carried by a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Build a single-field validation error
    pub fn field(name: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(name.to_string(), message.to_string());
        AppError::Validation(errors)
    }
}

/// Pull a human readable message out of an error response body.
///
/// The backend is not consistent: bodies arrive as plain text, as a JSON
/// string, as `{"message": ...}` or as `{"error": ...}`. Anything else
/// yields `fallback`.
pub fn extract_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(s)) if !s.trim().is_empty() => s,
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .find(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
        Ok(_) => fallback.to_string(),
        // Not JSON at all: the body is the message
        Err(_) => trimmed.to_string(),
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
