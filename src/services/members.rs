//! Member account endpoints

use crate::{
    api::ApiClient,
    error::AppResult,
    models::{
        member::{BorrowingEligibility, ChangePassword, CreateMember, Member, MemberStats, UpdateMember},
        MemberStatus,
    },
};

#[derive(Clone)]
pub struct MembersService {
    client: ApiClient,
}

impl MembersService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Member>> {
        self.client.get("/members").await
    }

    pub async fn get(&self, id: i64) -> AppResult<Member> {
        self.client.get(&format!("/members/{}", id)).await
    }

    /// Admin-side creation; the account starts out active
    pub async fn create(&self, member: &CreateMember) -> AppResult<Member> {
        self.client.post("/members/admin/create", member).await
    }

    pub async fn update(&self, id: i64, member: &UpdateMember) -> AppResult<Member> {
        self.client.put(&format!("/members/{}", id), member).await
    }

    pub async fn change_password(&self, id: i64, request: &ChangePassword) -> AppResult<()> {
        self.client
            .put_unit(&format!("/members/{}/change-password", id), request)
            .await
    }

    pub async fn search(&self, name: &str) -> AppResult<Vec<Member>> {
        self.client
            .get_query("/members/search", &[("name", name)])
            .await
    }

    pub async fn by_status(&self, status: MemberStatus) -> AppResult<Vec<Member>> {
        self.client
            .get(&format!("/members/status/{}", status))
            .await
    }

    pub async fn approve(&self, id: i64) -> AppResult<()> {
        self.client.put_empty(&format!("/members/{}/approve", id)).await
    }

    pub async fn suspend(&self, id: i64) -> AppResult<()> {
        self.client.put_empty(&format!("/members/{}/suspend", id)).await
    }

    pub async fn activate(&self, id: i64) -> AppResult<()> {
        self.client.put_empty(&format!("/members/{}/activate", id)).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/members/{}", id)).await
    }

    pub async fn eligibility(&self, id: i64) -> AppResult<BorrowingEligibility> {
        self.client.get(&format!("/members/{}/eligibility", id)).await
    }

    pub async fn stats(&self, id: i64) -> AppResult<MemberStats> {
        self.client.get(&format!("/members/{}/stats", id)).await
    }
}
