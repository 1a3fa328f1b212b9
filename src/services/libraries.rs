//! Library (branch) endpoints

use crate::{
    api::ApiClient,
    error::AppResult,
    models::{Library, LibraryForm, LibraryStats},
};

#[derive(Clone)]
pub struct LibrariesService {
    client: ApiClient,
}

impl LibrariesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// All libraries; this listing does not require a login
    pub async fn list(&self) -> AppResult<Vec<Library>> {
        self.client.get("/libraries/public").await
    }

    pub async fn get(&self, id: i64) -> AppResult<Library> {
        self.client.get(&format!("/libraries/{}", id)).await
    }

    pub async fn stats(&self, id: i64) -> AppResult<LibraryStats> {
        self.client.get(&format!("/libraries/{}/stats", id)).await
    }

    pub async fn search(&self, name: &str) -> AppResult<Vec<Library>> {
        self.client
            .get_query("/libraries/search", &[("name", name)])
            .await
    }

    pub async fn create(&self, form: &LibraryForm) -> AppResult<Library> {
        self.client.post("/libraries", form).await
    }

    pub async fn update(&self, id: i64, form: &LibraryForm) -> AppResult<Library> {
        self.client.put(&format!("/libraries/{}", id), form).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/libraries/{}", id)).await
    }
}
