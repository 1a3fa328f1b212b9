//! Authentication payloads and the persisted session user

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::UserType;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub user_name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub user_type: UserType,
}

/// Self-registration form, as entered on the register page
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct RegistrationForm {
    #[validate(length(max = 100, message = "First name must be less than 100 characters"))]
    pub first_name: String,
    #[validate(length(max = 100, message = "Last name must be less than 100 characters"))]
    pub last_name: String,
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(length(max = 255, message = "Email must be less than 255 characters"))]
    pub email: String,
    #[validate(length(max = 15, message = "Phone number must be less than 15 characters"))]
    pub phone: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub confirm_password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl From<&RegistrationForm> for RegisterRequest {
    fn from(form: &RegistrationForm) -> Self {
        Self {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            user_name: form.username.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            phone: form.phone.clone(),
        }
    }
}

/// Result of `/auth/status/{username}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationStatus {
    pub user_name: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
}

/// Authenticated user kept in the session store under `user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(alias = "userId")]
    pub id: i64,
    #[serde(alias = "userName")]
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub user_type: UserType,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    pub fn is_member(&self) -> bool {
        self.user_type == UserType::Member
    }

    /// Name shown in greetings; falls back to the username
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }

    /// Apply the non-empty fields of `update`
    pub fn merge(&mut self, update: SessionUserUpdate) {
        if let Some(username) = update.username.filter(|s| !s.trim().is_empty()) {
            self.username = username;
        }
        if let Some(full_name) = update.full_name.filter(|s| !s.trim().is_empty()) {
            self.full_name = Some(full_name);
        }
    }
}

impl From<&LoginResponse> for SessionUser {
    fn from(response: &LoginResponse) -> Self {
        Self {
            id: response.user_id,
            username: response.user_name.clone(),
            full_name: response.full_name.clone(),
            user_type: response.user_type,
        }
    }
}

/// Partial user update, e.g. after a profile edit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionUserUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
}
