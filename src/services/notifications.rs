//! Notification endpoints

use chrono::NaiveDate;
use serde_json::Value;

use crate::{
    api::ApiClient,
    error::AppResult,
    models::{
        notification::{
            BulkRequest, GeneralRequest, Notification, NotificationForm, OverdueRequest,
            ReminderRequest, WelcomeRequest,
        },
        NotificationType,
    },
};

#[derive(Clone)]
pub struct NotificationsService {
    client: ApiClient,
}

impl NotificationsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Notification>> {
        self.client.get("/notifications").await
    }

    pub async fn by_member(&self, member_id: i64) -> AppResult<Vec<Notification>> {
        self.client
            .get(&format!("/notifications/member/{}", member_id))
            .await
    }

    pub async fn get(&self, id: i64) -> AppResult<Notification> {
        self.client.get(&format!("/notifications/{}", id)).await
    }

    pub async fn create(&self, form: &NotificationForm) -> AppResult<Notification> {
        self.client.post("/notifications", form).await
    }

    pub async fn update(&self, id: i64, form: &NotificationForm) -> AppResult<Notification> {
        self.client.put(&format!("/notifications/{}", id), form).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/notifications/{}", id)).await
    }

    pub async fn send_welcome(&self, member_id: i64, member_name: &str) -> AppResult<()> {
        let request = WelcomeRequest {
            member_id,
            member_name: member_name.to_string(),
        };
        self.client.post_unit("/notifications/welcome", &request).await
    }

    pub async fn send_overdue(&self, member_id: i64, book_title: &str, days_overdue: i64) -> AppResult<()> {
        let request = OverdueRequest {
            member_id,
            book_title: book_title.to_string(),
            days_overdue,
        };
        self.client.post_unit("/notifications/overdue", &request).await
    }

    pub async fn send_reminder(&self, member_id: i64, book_title: &str, due_date: NaiveDate) -> AppResult<()> {
        let request = ReminderRequest {
            member_id,
            book_title: book_title.to_string(),
            due_date,
        };
        self.client.post_unit("/notifications/reminder", &request).await
    }

    pub async fn send_general(&self, member_id: i64, message: &str) -> AppResult<()> {
        let request = GeneralRequest {
            member_id,
            message: message.to_string(),
        };
        self.client.post_unit("/notifications/general", &request).await
    }

    /// Broadcast to all active members
    pub async fn send_bulk(&self, ntf_type: NotificationType, message: &str) -> AppResult<()> {
        let request = BulkRequest {
            ntf_type,
            message: message.to_string(),
        };
        self.client.post_unit("/notifications/bulk", &request).await
    }

    pub async fn recent(&self, limit: usize) -> AppResult<Vec<Notification>> {
        self.client
            .get_query("/notifications/recent", &[("limit", limit)])
            .await
    }

    pub async fn mark_as_read(&self, id: i64) -> AppResult<()> {
        self.client
            .put_empty(&format!("/notifications/{}/read", id))
            .await
    }

    /// Unread count; the server answers with a bare number or a small object
    pub async fn unread_count(&self, member_id: i64) -> AppResult<i64> {
        let value: Value = self
            .client
            .get(&format!("/notifications/member/{}/unread-count", member_id))
            .await?;

        Ok(match &value {
            Value::Number(n) => n.as_i64().unwrap_or_default(),
            Value::Object(map) => map
                .get("unreadCount")
                .or_else(|| map.get("count"))
                .and_then(Value::as_i64)
                .unwrap_or_default(),
            _ => 0,
        })
    }
}
