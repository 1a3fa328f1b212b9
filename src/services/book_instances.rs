//! Book instance (physical copy) endpoints

use crate::{
    api::ApiClient,
    error::AppResult,
    models::book_instance::{BookInstance, BookInstanceForm, BulkTransferRequest, TransferRequest},
};

#[derive(Clone)]
pub struct BookInstancesService {
    client: ApiClient,
}

impl BookInstancesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        self.client.get("/book-instances").await
    }

    pub async fn get(&self, id: i64) -> AppResult<BookInstance> {
        self.client.get(&format!("/book-instances/{}", id)).await
    }

    pub async fn by_book(&self, book_id: i64) -> AppResult<Vec<BookInstance>> {
        self.client
            .get(&format!("/book-instances/book/{}", book_id))
            .await
    }

    pub async fn available_by_book(&self, book_id: i64) -> AppResult<Vec<BookInstance>> {
        self.client
            .get(&format!("/book-instances/book/{}/available", book_id))
            .await
    }

    pub async fn by_library(&self, library_id: i64) -> AppResult<Vec<BookInstance>> {
        self.client
            .get(&format!("/book-instances/library/{}", library_id))
            .await
    }

    pub async fn create(&self, form: &BookInstanceForm) -> AppResult<BookInstance> {
        self.client.post("/book-instances", form).await
    }

    pub async fn update(&self, id: i64, form: &BookInstanceForm) -> AppResult<BookInstance> {
        self.client.put(&format!("/book-instances/{}", id), form).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/book-instances/{}", id)).await
    }

    /// Move one copy to another library
    pub async fn transfer(&self, id: i64, new_library_id: i64) -> AppResult<()> {
        self.client
            .put_unit(
                &format!("/book-instances/{}/transfer", id),
                &TransferRequest { new_library_id },
            )
            .await
    }

    pub async fn transfer_many(&self, ids: &[i64], new_library_id: i64) -> AppResult<()> {
        let request = BulkTransferRequest {
            book_instance_ids: ids.to_vec(),
            new_library_id,
        };
        self.client
            .put_unit("/book-instances/transfer-multiple", &request)
            .await
    }
}
