//! Member (borrower account) model and related types

use serde::{Deserialize, Serialize};

use super::enums::MemberStatus;

/// Member as returned by `/members`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub member_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub member_status: MemberStatus,
    #[serde(default)]
    pub active_borrow_count: Option<i64>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Admin-side member creation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMember {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Member update request, used both by admins and by members editing their profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMember {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_status: Option<MemberStatus>,
}

impl From<&Member> for UpdateMember {
    fn from(member: &Member) -> Self {
        Self {
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            user_name: member.user_name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone().unwrap_or_default(),
            member_status: Some(member.member_status),
        }
    }
}

/// Password change request (members and administrators)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub old_password: String,
    pub new_password: String,
}

/// Result of `/members/{id}/eligibility`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorrowingEligibility {
    pub eligible: bool,
    pub reason: Option<String>,
    pub active_borrows: Option<i64>,
    pub overdue_borrows: Option<i64>,
}

/// Counters from `/members/{id}/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberStats {
    pub total_borrows: Option<i64>,
    pub active_borrows: Option<i64>,
    pub overdue_borrows: Option<i64>,
    pub total_fines: Option<f64>,
}
