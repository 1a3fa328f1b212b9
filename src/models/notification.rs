//! Notification model and the send requests used by administrators

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::dates;
use super::enums::NotificationType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_id: i64,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub ntf_type: NotificationType,
    #[serde(default)]
    pub ntf_message: String,
    #[serde(default, deserialize_with = "dates::optional_timestamp")]
    pub ntf_sent_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_read: Option<bool>,
}

/// Generic create/update body for `/notifications`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationForm {
    pub member_id: i64,
    pub ntf_type: NotificationType,
    pub ntf_message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeRequest {
    pub member_id: i64,
    pub member_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueRequest {
    pub member_id: i64,
    pub book_title: String,
    pub days_overdue: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub member_id: i64,
    pub book_title: String,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralRequest {
    pub member_id: i64,
    pub message: String,
}

/// Broadcast to every active member
#[derive(Debug, Clone, Serialize)]
pub struct BulkRequest {
    #[serde(rename = "type")]
    pub ntf_type: NotificationType,
    pub message: String,
}
