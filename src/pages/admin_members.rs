//! Member administration: approval workflow, details and editing

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult, FieldErrors},
    listing::{status_counts, MemberQuery},
    models::{
        member::{CreateMember, UpdateMember},
        Borrow, Member, MemberStatus,
    },
    validation,
};

use super::{load_error, or_dash, Outcome, Page, PageContext};

/// Borrows listed in the member details panel
const DETAIL_BORROWS: usize = 10;

/// Member opened in the details panel, with their borrows
#[derive(Debug, Clone)]
pub struct MemberDetails {
    pub member: Member,
    pub borrows: Vec<Borrow>,
}

pub struct AdminMembersPage {
    ctx: PageContext,
    pub members: Vec<Member>,
    pub query: MemberQuery,
    pub details: Option<MemberDetails>,
    pub errors: FieldErrors,
    pub error: Option<String>,
}

impl AdminMembersPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            members: Vec::new(),
            query: MemberQuery::default(),
            details: None,
            errors: FieldErrors::new(),
            error: None,
        }
    }

    pub fn visible(&self) -> Vec<Member> {
        self.query.apply(&self.members)
    }

    pub fn status_counts(&self) -> BTreeMap<MemberStatus, usize> {
        status_counts(&self.members)
    }

    /// Keep field errors from a failed form submission
    fn form_failure(&mut self, err: AppError, prefix: &str) -> AppError {
        let err = validation::duplicate_field_error(err, "userName");
        self.errors = match err.field_errors() {
            Some(errors) => errors.clone(),
            None => {
                let mut errors = FieldErrors::new();
                errors.insert("general".to_string(), format!("{}: {}", prefix, err.user_message()));
                errors
            }
        };
        err
    }

    pub async fn create(&mut self, form: &CreateMember) -> AppResult<()> {
        self.errors.clear();
        if let Err(e) = validation::validate_member_create(form) {
            return Err(self.form_failure(e, "Failed to create member"));
        }

        match self.ctx.services.members.create(form).await {
            Ok(member) => {
                tracing::info!("Created member {}", member.member_id);
                self.reload().await;
                self.ctx.prompt.alert("Member created successfully!");
                Ok(())
            }
            Err(e) => Err(self.form_failure(e, "Failed to create member")),
        }
    }

    pub async fn update(&mut self, member_id: i64, form: &UpdateMember) -> AppResult<()> {
        self.errors.clear();
        if let Err(e) = validation::validate_member_edit(form) {
            return Err(self.form_failure(e, "Failed to update member"));
        }

        match self.ctx.services.members.update(member_id, form).await {
            Ok(_) => {
                self.reload().await;
                self.ctx.prompt.alert("Member updated successfully!");
                Ok(())
            }
            Err(e) => Err(self.form_failure(e, "Failed to update member")),
        }
    }

    pub async fn approve(&mut self, member_id: i64) -> AppResult<Outcome> {
        let outcome = self
            .ctx
            .act(
                None,
                "Member approved successfully!",
                "Failed to approve member",
                self.ctx.services.members.approve(member_id),
            )
            .await?;
        self.reload().await;
        Ok(outcome)
    }

    pub async fn suspend(&mut self, member_id: i64) -> AppResult<Outcome> {
        let outcome = self
            .ctx
            .act(
                Some("Are you sure you want to suspend this member?"),
                "Member suspended successfully!",
                "Failed to suspend member",
                self.ctx.services.members.suspend(member_id),
            )
            .await?;
        if outcome == Outcome::Done {
            self.reload().await;
        }
        Ok(outcome)
    }

    pub async fn activate(&mut self, member_id: i64) -> AppResult<Outcome> {
        let outcome = self
            .ctx
            .act(
                None,
                "Member activated successfully!",
                "Failed to activate member",
                self.ctx.services.members.activate(member_id),
            )
            .await?;
        self.reload().await;
        Ok(outcome)
    }

    pub async fn delete(&mut self, member_id: i64) -> AppResult<Outcome> {
        let outcome = self
            .ctx
            .act(
                Some("Are you sure you want to delete this member? This action cannot be undone."),
                "Member deleted successfully!",
                "Failed to delete member",
                self.ctx.services.members.delete(member_id),
            )
            .await?;
        if outcome == Outcome::Done {
            self.reload().await;
        }
        Ok(outcome)
    }

    /// Open the details panel for a member
    pub async fn view_details(&mut self, member_id: i64) -> AppResult<()> {
        let member = self
            .members
            .iter()
            .find(|m| m.member_id == member_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Member {}", member_id)))?;

        match self.ctx.services.borrows.by_member(member_id).await {
            Ok(borrows) => {
                self.details = Some(MemberDetails { member, borrows });
                Ok(())
            }
            Err(e) => {
                self.ctx.alert_failure("Failed to load member details", &e);
                Err(e)
            }
        }
    }

    fn render_details(&self, details: &MemberDetails, out: &mut String) {
        let m = &details.member;
        out.push_str(&format!(
            "\nMember Details\n  {} ({})\n  {} | {} | {}\n  Borrow history:\n",
            m.full_name(),
            m.user_name,
            m.email,
            or_dash(m.phone.as_deref()),
            m.member_status
        ));
        if details.borrows.is_empty() {
            out.push_str("    No borrowing history\n");
        }
        for b in details.borrows.iter().take(DETAIL_BORROWS) {
            out.push_str(&format!(
                "    {} | {} | due {} | {}\n",
                b.book_title_or_default(),
                b.borrow_date,
                b.due_date,
                b.status
            ));
        }
        if details.borrows.len() > DETAIL_BORROWS {
            out.push_str(&format!(
                "    And {} more...\n",
                details.borrows.len() - DETAIL_BORROWS
            ));
        }
    }
}

#[async_trait]
impl Page for AdminMembersPage {
    async fn load(&mut self) -> AppResult<()> {
        match self.ctx.services.members.list().await {
            Ok(members) => {
                self.members = members;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(load_error("members", &e));
                Err(e)
            }
        }
    }

    fn render(&self) -> String {
        let counts = self.status_counts();
        let count = |s: MemberStatus| counts.get(&s).copied().unwrap_or(0);
        let mut out = format!(
            "Manage Members\n\nTotal: {} | Active: {} | Pending: {} | Suspended: {}\n\n",
            self.members.len(),
            count(MemberStatus::Active),
            count(MemberStatus::Pending),
            count(MemberStatus::Suspended)
        );

        let visible = self.visible();
        if visible.is_empty() {
            out.push_str("No members found.\n");
        }
        for m in &visible {
            out.push_str(&format!(
                "[{}] {} | {} | {} | {}\n",
                m.member_id,
                m.full_name(),
                m.user_name,
                m.email,
                m.member_status
            ));
        }

        for (field, message) in &self.errors {
            out.push_str(&format!("  {}: {}\n", field, message));
        }
        if let Some(details) = &self.details {
            self.render_details(details, &mut out);
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
