//! Borrow (lending record) model

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::dates;
use super::enums::BorrowStatus;

/// Loan duration the backend applies to new borrows and renewals
pub const LOAN_PERIOD_DAYS: i64 = 21;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    pub borrow_id: i64,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub bk_instance_id: Option<i64>,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub library_name: Option<String>,
    #[serde(deserialize_with = "dates::day")]
    pub borrow_date: NaiveDate,
    #[serde(deserialize_with = "dates::day")]
    pub due_date: NaiveDate,
    #[serde(default, deserialize_with = "dates::optional_day")]
    pub return_date: Option<NaiveDate>,
    pub status: BorrowStatus,
    #[serde(default, deserialize_with = "amount")]
    pub fine: Option<f64>,
}

impl Borrow {
    /// Whole days until the due date; negative once overdue
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        (-self.days_until_due(today)).max(0)
    }

    /// Fine worth showing (present and above zero)
    pub fn outstanding_fine(&self) -> Option<f64> {
        self.fine.filter(|f| *f > 0.0)
    }

    pub fn book_title_or_default(&self) -> &str {
        self.book_title.as_deref().unwrap_or("this book")
    }
}

/// Badge shown next to an active borrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    DueSoon,
    OnTime,
}

impl DueStatus {
    pub fn from_days(days_until_due: i64) -> Self {
        if days_until_due < 0 {
            DueStatus::Overdue
        } else if days_until_due <= 3 {
            DueStatus::DueSoon
        } else {
            DueStatus::OnTime
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Overdue => "Overdue",
            DueStatus::DueSoon => "Due Soon",
            DueStatus::OnTime => "On Time",
        }
    }
}

/// Admin-side borrow correction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBorrow {
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    pub status: BorrowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine: Option<f64>,
}

/// Counters from `/borrows/member/{id}/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorrowStats {
    pub total_borrows: Option<i64>,
    pub active_borrows: Option<i64>,
    pub returned_borrows: Option<i64>,
    pub overdue_borrows: Option<i64>,
    #[serde(deserialize_with = "amount")]
    pub total_fines: Option<f64>,
}

/// Money amounts come back as numbers or as decimal strings
fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {}", s))),
        Some(other) => Err(serde::de::Error::custom(format!("invalid amount: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_borrow() {
        let borrow: Borrow = serde_json::from_value(serde_json::json!({
            "borrowId": 5,
            "memberId": 2,
            "bookTitle": "Emma",
            "borrowDate": "2024-05-01",
            "dueDate": "2024-05-22",
            "returnDate": "2024-05-20T10:15:00",
            "status": "RETURNED",
            "fine": "0.00"
        }))
        .unwrap();

        assert_eq!(borrow.status, BorrowStatus::Returned);
        assert_eq!(borrow.return_date, Some(day(2024, 5, 20)));
        assert_eq!(borrow.fine, Some(0.0));
        assert_eq!(borrow.outstanding_fine(), None);
        assert_eq!(borrow.library_name, None);
    }

    #[test]
    fn test_due_status_thresholds() {
        assert_eq!(DueStatus::from_days(-1), DueStatus::Overdue);
        assert_eq!(DueStatus::from_days(0), DueStatus::DueSoon);
        assert_eq!(DueStatus::from_days(3), DueStatus::DueSoon);
        assert_eq!(DueStatus::from_days(4), DueStatus::OnTime);
    }

    #[test]
    fn test_days_overdue() {
        let borrow: Borrow = serde_json::from_value(serde_json::json!({
            "borrowId": 1,
            "borrowDate": "2024-01-01",
            "dueDate": "2024-01-22",
            "status": "OVERDUE",
            "fine": 2.5
        }))
        .unwrap();

        assert_eq!(borrow.days_until_due(day(2024, 1, 25)), -3);
        assert_eq!(borrow.days_overdue(day(2024, 1, 25)), 3);
        assert_eq!(borrow.days_overdue(day(2024, 1, 10)), 0);
        assert_eq!(borrow.outstanding_fine(), Some(2.5));
    }
}
