//! Borrow (lending) endpoints

use crate::{
    api::ApiClient,
    error::AppResult,
    models::borrow::{Borrow, BorrowStats, UpdateBorrow},
};

#[derive(Clone)]
pub struct BorrowsService {
    client: ApiClient,
}

impl BorrowsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lend a copy to a member; parameters travel in the query string
    pub async fn borrow(&self, member_id: i64, book_instance_id: i64) -> AppResult<()> {
        tracing::info!("Borrowing instance {} for member {}", book_instance_id, member_id);
        self.client
            .post_query(
                "/borrows/borrow",
                &[("memberId", member_id), ("bookInstanceId", book_instance_id)],
            )
            .await
    }

    pub async fn return_book(&self, borrow_id: i64) -> AppResult<()> {
        self.client
            .put_empty(&format!("/borrows/{}/return", borrow_id))
            .await
    }

    pub async fn renew(&self, borrow_id: i64) -> AppResult<()> {
        self.client
            .put_empty(&format!("/borrows/{}/renew", borrow_id))
            .await
    }

    pub async fn list(&self) -> AppResult<Vec<Borrow>> {
        self.client.get("/borrows").await
    }

    pub async fn get(&self, id: i64) -> AppResult<Borrow> {
        self.client.get(&format!("/borrows/{}", id)).await
    }

    pub async fn by_member(&self, member_id: i64) -> AppResult<Vec<Borrow>> {
        self.client
            .get(&format!("/borrows/member/{}", member_id))
            .await
    }

    pub async fn active_by_member(&self, member_id: i64) -> AppResult<Vec<Borrow>> {
        self.client
            .get(&format!("/borrows/member/{}/active", member_id))
            .await
    }

    pub async fn overdue_by_member(&self, member_id: i64) -> AppResult<Vec<Borrow>> {
        self.client
            .get(&format!("/borrows/member/{}/overdue", member_id))
            .await
    }

    pub async fn member_stats(&self, member_id: i64) -> AppResult<BorrowStats> {
        self.client
            .get(&format!("/borrows/member/{}/stats", member_id))
            .await
    }

    pub async fn overdue(&self) -> AppResult<Vec<Borrow>> {
        self.client.get("/borrows/overdue").await
    }

    pub async fn update(&self, id: i64, update: &UpdateBorrow) -> AppResult<Borrow> {
        self.client.put(&format!("/borrows/{}", id), update).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/borrows/{}", id)).await
    }
}
