//! Authentication endpoints

use serde_json::Value;

use crate::{
    api::ApiClient,
    error::AppResult,
    models::auth::{LoginRequest, LoginResponse, RegisterRequest, RegistrationStatus},
};

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let request = LoginRequest {
            user_name: username.to_string(),
            password: password.to_string(),
        };
        self.client.post("/auth/login", &request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> AppResult<()> {
        self.client.post_unit("/auth/register", request).await
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.client.post_empty("/auth/logout").await
    }

    /// Profile behind the stored token, as the server sees it
    pub async fn current_user(&self) -> AppResult<Value> {
        self.client.get("/auth/me").await
    }

    pub async fn registration_status(&self, username: &str) -> AppResult<RegistrationStatus> {
        self.client.get(&format!("/auth/status/{}", username)).await
    }

    pub async fn health(&self) -> AppResult<Value> {
        self.client.get("/auth/health").await
    }
}
