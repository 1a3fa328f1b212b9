//! Sign-in form

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult, FieldErrors},
    router::landing_path,
    validation,
};

use super::{Page, PageContext};

pub struct LoginPage {
    ctx: PageContext,
    pub username: String,
    pub password: String,
    pub errors: FieldErrors,
    /// Form-level message (bad credentials, pending account, ...)
    pub general: Option<String>,
}

impl LoginPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            username: String::new(),
            password: String::new(),
            errors: FieldErrors::new(),
            general: None,
        }
    }

    /// Validate, sign in and move to the user's landing page
    pub async fn submit(&mut self) -> AppResult<()> {
        self.errors.clear();
        self.general = None;

        if let Err(e) = validation::validate_login(&self.username, &self.password) {
            if let Some(errors) = e.field_errors() {
                self.errors = errors.clone();
            }
            return Err(e);
        }

        match self.ctx.auth.login(self.username.trim(), &self.password).await {
            Ok(_) => {
                if let Some(user) = self.ctx.auth.user() {
                    self.ctx.navigator.redirect(landing_path(&user));
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!("Login error: {}", e);
                self.general = Some(match &e {
                    AppError::Api { message, .. } => message.clone(),
                    other => other.user_message(),
                });
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Page for LoginPage {
    async fn load(&mut self) -> AppResult<()> {
        Ok(())
    }

    fn render(&self) -> String {
        let mut out = String::from("Login\n\nSign in to your library account.\n");
        if let Some(general) = &self.general {
            out.push_str(&format!("\n{}\n", general));
        }
        for (field, message) in &self.errors {
            out.push_str(&format!("  {}: {}\n", field, message));
        }
        out.push_str("\nDon't have an account? Register at /register\n");
        out
    }
}
