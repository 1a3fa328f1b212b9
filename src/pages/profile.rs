//! Own profile: details and password, for members and administrators

use async_trait::async_trait;

use crate::{
    error::{AppResult, FieldErrors},
    models::{
        member::{ChangePassword, UpdateMember},
        AdministratorForm, SessionUserUpdate,
    },
    validation::{self, PasswordForm, ProfileForm},
};

use super::{load_error, Page, PageContext};

pub struct ProfilePage {
    ctx: PageContext,
    pub profile: ProfileForm,
    pub user_name: String,
    pub passwords: PasswordForm,
    pub errors: FieldErrors,
    pub error: Option<String>,
}

impl ProfilePage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            profile: ProfileForm::default(),
            user_name: String::new(),
            passwords: PasswordForm::default(),
            errors: FieldErrors::new(),
            error: None,
        }
    }

    async fn fetch(&mut self) -> AppResult<()> {
        let user = self.ctx.user()?;

        if user.is_admin() {
            let admin = self.ctx.services.admins.get(user.id).await?;
            self.profile = ProfileForm {
                first_name: admin.first_name.unwrap_or_default(),
                last_name: admin.last_name.unwrap_or_default(),
                email: admin.email.unwrap_or_default(),
                phone: admin.phone.unwrap_or_default(),
            };
            self.user_name = admin.user_name.unwrap_or(user.username);
        } else {
            let member = self.ctx.services.members.get(user.id).await?;
            self.profile = ProfileForm {
                first_name: member.first_name,
                last_name: member.last_name,
                email: member.email,
                phone: member.phone.unwrap_or_default(),
            };
            self.user_name = if member.user_name.is_empty() {
                user.username
            } else {
                member.user_name
            };
        }
        Ok(())
    }

    fn set_field_errors(&mut self, result: &AppResult<()>) {
        if let Err(e) = result {
            if let Some(errors) = e.field_errors() {
                self.errors = errors.clone();
            }
        }
    }

    /// Save name, email and phone; the session's display name follows
    pub async fn update_profile(&mut self) -> AppResult<()> {
        self.errors.clear();
        let checked = validation::validate_profile(&self.profile);
        self.set_field_errors(&checked);
        checked?;

        let user = self.ctx.user()?;
        let form = &self.profile;
        let user_name = if self.user_name.is_empty() {
            user.username.clone()
        } else {
            self.user_name.clone()
        };

        let saved = if user.is_admin() {
            let request = AdministratorForm {
                first_name: form.first_name.trim().to_string(),
                last_name: form.last_name.trim().to_string(),
                user_name,
                email: form.email.trim().to_string(),
                phone: Some(form.phone.trim().to_string()),
            };
            self.ctx
                .services
                .admins
                .update(user.id, &request)
                .await
                .map(|a| {
                    format!(
                        "{} {}",
                        a.first_name.unwrap_or_default(),
                        a.last_name.unwrap_or_default()
                    )
                })
        } else {
            let request = UpdateMember {
                first_name: form.first_name.trim().to_string(),
                last_name: form.last_name.trim().to_string(),
                user_name,
                email: form.email.trim().to_string(),
                phone: form.phone.trim().to_string(),
                member_status: None,
            };
            self.ctx
                .services
                .members
                .update(user.id, &request)
                .await
                .map(|m| m.full_name())
        };

        match saved {
            Ok(full_name) => {
                self.ctx.auth.update_user(SessionUserUpdate {
                    username: None,
                    full_name: Some(full_name),
                })?;
                self.ctx
                    .prompt
                    .alert("Your profile information has been updated successfully!");
                Ok(())
            }
            Err(e) => {
                self.ctx.alert_failure("Failed to update profile", &e);
                Err(e)
            }
        }
    }

    pub async fn change_password(&mut self) -> AppResult<()> {
        self.errors.clear();
        let checked = validation::validate_password_change(&self.passwords);
        self.set_field_errors(&checked);
        checked?;

        let user = self.ctx.user()?;
        let request = ChangePassword {
            old_password: self.passwords.current_password.clone(),
            new_password: self.passwords.new_password.clone(),
        };

        let result = if user.is_admin() {
            self.ctx.services.admins.change_password(user.id, &request).await
        } else {
            self.ctx.services.members.change_password(user.id, &request).await
        };

        match result {
            Ok(()) => {
                self.passwords = PasswordForm::default();
                self.ctx
                    .prompt
                    .alert("Your password has been changed successfully!");
                Ok(())
            }
            Err(e) => {
                self.ctx.alert_failure("Failed to change password", &e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Page for ProfilePage {
    async fn load(&mut self) -> AppResult<()> {
        match self.fetch().await {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(load_error("profile data", &e));
                Err(e)
            }
        }
    }

    fn render(&self) -> String {
        let mut out = format!(
            "My Profile\n\nUsername: {}\nFirst name: {}\nLast name: {}\nEmail: {}\nPhone: {}\n",
            self.user_name,
            self.profile.first_name,
            self.profile.last_name,
            self.profile.email,
            self.profile.phone
        );
        for (field, message) in &self.errors {
            out.push_str(&format!("  {}: {}\n", field, message));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", error));
        }
        out
    }
}
