//! Administrator accounts

use async_trait::async_trait;

use crate::{
    error::{AppResult, FieldErrors},
    listing::AdminQuery,
    models::{AdminStats, Administrator, AdministratorForm},
    validation,
};

use super::{load_error, or_dash, Outcome, Page, PageContext};

pub const RESET_PROMPT: &str = "Enter new temporary password (minimum 8 characters):";

pub struct AdminAdministratorsPage {
    ctx: PageContext,
    pub admins: Vec<Administrator>,
    pub stats: AdminStats,
    pub query: AdminQuery,
    pub errors: FieldErrors,
    pub error: Option<String>,
}

impl AdminAdministratorsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            admins: Vec::new(),
            stats: AdminStats::default(),
            query: AdminQuery::default(),
            errors: FieldErrors::new(),
            error: None,
        }
    }

    pub fn visible(&self) -> Vec<Administrator> {
        self.query.apply(&self.admins)
    }

    pub async fn create(
        &mut self,
        form: &AdministratorForm,
        temporary_password: &str,
    ) -> AppResult<()> {
        self.errors.clear();
        if let Err(e) = validation::validate_admin_create(form, temporary_password) {
            if let Some(errors) = e.field_errors() {
                self.errors = errors.clone();
            }
            return Err(e);
        }

        let request = AdministratorForm {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            user_name: form.user_name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.clone(),
        };

        match self.ctx.services.admins.create(&request, temporary_password).await {
            Ok(admin) => {
                tracing::info!("Created administrator {}", admin.admin_id);
                self.ctx.prompt.alert("Administrator created successfully!");
                self.reload().await;
                Ok(())
            }
            Err(e) => {
                let e = validation::duplicate_field_error(e, "userName");
                match e.field_errors() {
                    Some(errors) => self.errors = errors.clone(),
                    None => self.ctx.alert_failure("Error creating administrator", &e),
                }
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, admin_id: i64) -> AppResult<Outcome> {
        let outcome = self
            .ctx
            .act(
                Some("Are you sure you want to delete this administrator?"),
                "Administrator deleted successfully!",
                "Failed to delete administrator",
                self.ctx.services.admins.delete(admin_id),
            )
            .await?;
        if outcome == Outcome::Done {
            self.reload().await;
        }
        Ok(outcome)
    }

    /// Ask for a new temporary password and set it
    pub async fn reset_password(&mut self, admin_id: i64) -> AppResult<Outcome> {
        let Some(password) = self.ctx.prompt.input(RESET_PROMPT) else {
            return Ok(Outcome::Cancelled);
        };
        if let Err(e) = validation::validate_reset_password(&password) {
            self.ctx.prompt.alert("Password must be at least 8 characters long");
            return Err(e);
        }

        self.ctx
            .act(
                None,
                "Password reset successfully!",
                "Failed to reset password",
                self.ctx.services.admins.reset_password(admin_id, &password),
            )
            .await
    }
}

#[async_trait]
impl Page for AdminAdministratorsPage {
    async fn load(&mut self) -> AppResult<()> {
        let services = &self.ctx.services;
        let (admins, stats) = futures::join!(services.admins.list(), services.admins.stats());

        let admins = match admins {
            Ok(admins) => admins,
            Err(e) => {
                self.error = Some(load_error("administrators", &e));
                return Err(e);
            }
        };

        self.stats = stats.unwrap_or_else(|e| {
            tracing::warn!("Administrator stats unavailable: {}", e);
            let total = admins.len() as i64;
            AdminStats {
                total_admins: total,
                active_admins: total,
                recent_admins: total,
            }
        });
        self.admins = admins;
        self.error = None;
        Ok(())
    }

    fn render(&self) -> String {
        let mut out = format!(
            "Administrators\n\nTotal: {} | Active: {} | Recent: {}\n\n",
            self.stats.total_admins, self.stats.active_admins, self.stats.recent_admins
        );
        for admin in self.visible() {
            out.push_str(&format!(
                "[{}] {} {} | {} | {} | {}\n",
                admin.admin_id,
                admin.first_name.as_deref().unwrap_or(""),
                admin.last_name.as_deref().unwrap_or(""),
                or_dash(admin.user_name.as_deref()),
                or_dash(admin.email.as_deref()),
                or_dash(admin.phone.as_deref())
            ));
        }
        for (field, message) in &self.errors {
            out.push_str(&format!("  {}: {}\n", field, message));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
