//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates;
use super::enums::{BookCondition, BookStatus};

/// One physical copy of a book, held by a library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInstance {
    pub bk_instance_id: i64,
    pub book_id: i64,
    #[serde(default)]
    pub book_title: Option<String>,
    pub library_id: i64,
    #[serde(default)]
    pub library_name: Option<String>,
    pub bk_status: BookStatus,
    pub bk_condition: BookCondition,
    #[serde(default, deserialize_with = "dates::optional_day")]
    pub acquisition_date: Option<NaiveDate>,
}

/// Create/update instance request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInstanceForm {
    pub book_id: i64,
    pub library_id: i64,
    pub bk_status: BookStatus,
    pub bk_condition: BookCondition,
    pub acquisition_date: NaiveDate,
}

impl BookInstanceForm {
    /// New copies default to available and in new condition
    pub fn new(book_id: i64, library_id: i64, acquired: NaiveDate) -> Self {
        Self {
            book_id,
            library_id,
            bk_status: BookStatus::default(),
            bk_condition: BookCondition::default(),
            acquisition_date: acquired,
        }
    }

    /// Pre-filled edit form; a missing acquisition date becomes `today`
    pub fn from_instance(instance: &BookInstance, today: NaiveDate) -> Self {
        Self {
            book_id: instance.book_id,
            library_id: instance.library_id,
            bk_status: instance.bk_status,
            bk_condition: instance.bk_condition,
            acquisition_date: instance.acquisition_date.unwrap_or(today),
        }
    }
}

/// Transfer request for a single instance
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub new_library_id: i64,
}

/// Transfer request for several instances at once
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTransferRequest {
    pub book_instance_ids: Vec<i64>,
    pub new_library_id: i64,
}
