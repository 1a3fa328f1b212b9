//! Account registration form

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult, FieldErrors},
    models::auth::RegistrationForm,
    validation,
};

use super::{Page, PageContext};

pub const REGISTERED_MESSAGE: &str =
    "Your account has been created and is pending approval from the library administrator.";

pub struct RegisterPage {
    ctx: PageContext,
    pub form: RegistrationForm,
    pub errors: FieldErrors,
    pub success: bool,
}

impl RegisterPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            form: RegistrationForm::default(),
            errors: FieldErrors::new(),
            success: false,
        }
    }

    pub async fn submit(&mut self) -> AppResult<()> {
        self.errors.clear();

        if let Err(e) = validation::validate_registration(&self.form) {
            if let Some(errors) = e.field_errors() {
                self.errors = errors.clone();
            }
            return Err(e);
        }

        match self.ctx.auth.register(&self.form).await {
            Ok(()) => {
                self.success = true;
                self.ctx.prompt.alert(REGISTERED_MESSAGE);
                self.ctx.navigator.redirect("/login");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Registration error: {}", e);
                let title = match &e {
                    AppError::UsernameTaken => "Username Taken",
                    AppError::EmailTaken => "Email Already Registered",
                    AppError::Http(_) => "Connection Error",
                    _ => "Registration Failed",
                };
                let message = match &e {
                    AppError::Http(_) => "Unable to connect to the server. Please check your internet connection and try again.".to_string(),
                    other => other.user_message(),
                };
                self.ctx.prompt.alert(&format!("{}\n\n{}", title, message));
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Page for RegisterPage {
    async fn load(&mut self) -> AppResult<()> {
        Ok(())
    }

    fn render(&self) -> String {
        if self.success {
            return format!("Registration Successful!\n\n{}\nGo to /login to sign in.\n", REGISTERED_MESSAGE);
        }
        let mut out = String::from("Create Account\n\nJoin the library to borrow books.\n");
        for (field, message) in &self.errors {
            out.push_str(&format!("  {}: {}\n", field, message));
        }
        out.push_str("\nAlready have an account? Sign in at /login\n");
        out
    }
}
