//! Administrator account endpoints

use crate::{
    api::ApiClient,
    error::AppResult,
    models::{
        admin::{AdminStats, Administrator, AdministratorForm, CreateAdministrator, ResetPassword},
        member::ChangePassword,
    },
};

#[derive(Clone)]
pub struct AdminsService {
    client: ApiClient,
}

impl AdminsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: i64) -> AppResult<Administrator> {
        self.client.get(&format!("/administrators/{}", id)).await
    }

    pub async fn update(&self, id: i64, form: &AdministratorForm) -> AppResult<Administrator> {
        self.client.put(&format!("/administrators/{}", id), form).await
    }

    pub async fn change_password(&self, id: i64, request: &ChangePassword) -> AppResult<()> {
        self.client
            .put_unit(&format!("/administrators/{}/change-password", id), request)
            .await
    }

    pub async fn list(&self) -> AppResult<Vec<Administrator>> {
        self.client.get("/administrators").await
    }

    pub async fn create(&self, form: &AdministratorForm, temporary_password: &str) -> AppResult<Administrator> {
        let request = CreateAdministrator {
            administrator: form.clone(),
            temporary_password: temporary_password.to_string(),
        };
        self.client.post("/administrators", &request).await
    }

    /// Create an administrator and let the server pick the password
    pub async fn create_with_auto_password(&self, form: &AdministratorForm) -> AppResult<Administrator> {
        self.client.post("/administrators/auto-password", form).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/administrators/{}", id)).await
    }

    pub async fn search(&self, name: &str) -> AppResult<Vec<Administrator>> {
        self.client
            .get_query("/administrators/search", &[("name", name)])
            .await
    }

    pub async fn reset_password(&self, id: i64, new_password: &str) -> AppResult<()> {
        let request = ResetPassword {
            new_password: new_password.to_string(),
        };
        self.client
            .put_unit(&format!("/administrators/{}/reset-password", id), &request)
            .await
    }

    pub async fn stats(&self) -> AppResult<AdminStats> {
        self.client.get("/administrators/stats").await
    }
}
