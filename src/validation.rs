//! Form validation.
//!
//! Errors are keyed by the form's field name (`firstName`, `email`, ...)
//! and only the first failing rule of a field is reported. Presence checks
//! run first, then the email pattern, then the length rules declared with
//! `validator` on the form types.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationErrors};

use crate::{
    error::{AppError, AppResult, FieldErrors},
    models::{
        auth::RegistrationForm,
        member::{CreateMember, UpdateMember},
        AdministratorForm,
    },
};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Collects the first error of each field
#[derive(Debug, Default)]
struct Checker {
    errors: FieldErrors,
}

impl Checker {
    fn fail(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    fn check(&mut self, field: &str, failed: bool, message: &str) {
        if failed {
            self.fail(field, message);
        }
    }

    fn required(&mut self, field: &str, value: &str, message: &str) {
        self.check(field, value.trim().is_empty(), message);
    }

    fn email(&mut self, field: &str, value: &str) {
        self.check(field, !is_valid_email(value), "Please enter a valid email address");
    }

    /// Fold in `validator` errors, renaming fields to their camelCase form
    fn rules(&mut self, result: Result<(), ValidationErrors>) {
        let Err(errors) = result else {
            return;
        };
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                self.fail(&camel_case(&field.to_string()), &message);
            }
        }
    }

    fn finish(self) -> AppResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn validate_login(username: &str, password: &str) -> AppResult<()> {
    let mut checker = Checker::default();
    checker.required("username", username, "Username is required");
    checker.check("password", password.is_empty(), "Password is required");
    checker.finish()
}

pub fn validate_registration(form: &RegistrationForm) -> AppResult<()> {
    let mut checker = Checker::default();
    checker.required("firstName", &form.first_name, "First name is required");
    checker.required("lastName", &form.last_name, "Last name is required");
    checker.required("username", &form.username, "Username is required");
    checker.required("email", &form.email, "Email is required");
    checker.email("email", &form.email);
    checker.check("password", form.password.is_empty(), "Password is required");
    checker.check(
        "confirmPassword",
        form.confirm_password.is_empty(),
        "Please confirm your password",
    );
    checker.check(
        "confirmPassword",
        form.password != form.confirm_password,
        "Passwords do not match",
    );
    checker.rules(form.validate());
    checker.finish()
}

pub fn validate_member_create(form: &CreateMember) -> AppResult<()> {
    let mut checker = Checker::default();
    checker.required("firstName", &form.first_name, "First name is required");
    checker.required("lastName", &form.last_name, "Last name is required");
    checker.required("userName", &form.user_name, "Username is required");
    checker.required("email", &form.email, "Email is required");
    checker.required("password", &form.password, "Password is required");
    checker.email("email", &form.email);
    checker.finish()
}

pub fn validate_member_edit(form: &UpdateMember) -> AppResult<()> {
    let mut checker = Checker::default();
    checker.required("firstName", &form.first_name, "First name is required");
    checker.required("lastName", &form.last_name, "Last name is required");
    checker.required("userName", &form.user_name, "Username is required");
    checker.required("email", &form.email, "Email is required");
    checker.check("memberStatus", form.member_status.is_none(), "Status is required");
    checker.email("email", &form.email);
    checker.finish()
}

pub fn validate_admin_create(form: &AdministratorForm, temporary_password: &str) -> AppResult<()> {
    let mut checker = Checker::default();
    checker.required("firstName", &form.first_name, "First name is required");
    checker.required("lastName", &form.last_name, "Last name is required");
    checker.required("userName", &form.user_name, "Username is required");
    checker.required("email", &form.email, "Email is required");
    checker.required(
        "temporaryPassword",
        temporary_password,
        "Temporary password is required",
    );
    checker.email("email", &form.email);
    checker.check(
        "temporaryPassword",
        temporary_password.chars().count() < MIN_PASSWORD_LEN,
        "Password must be at least 8 characters long",
    );
    checker.finish()
}

/// Editable profile fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

pub fn validate_profile(form: &ProfileForm) -> AppResult<()> {
    let mut checker = Checker::default();
    checker.required("firstName", &form.first_name, "First name is required");
    checker.required("lastName", &form.last_name, "Last name is required");
    checker.required("email", &form.email, "Email is required");
    checker.email("email", &form.email);
    checker.finish()
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct PasswordForm {
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
    pub confirm_password: String,
}

pub fn validate_password_change(form: &PasswordForm) -> AppResult<()> {
    let mut checker = Checker::default();
    checker.check(
        "currentPassword",
        form.current_password.is_empty(),
        "Current password is required",
    );
    checker.check("newPassword", form.new_password.is_empty(), "New password is required");
    checker.check(
        "confirmPassword",
        form.confirm_password.is_empty(),
        "Please confirm your new password",
    );
    checker.check(
        "confirmPassword",
        form.new_password != form.confirm_password,
        "Passwords do not match",
    );
    checker.rules(form.validate());
    checker.finish()
}

/// Admin-side password reset
pub fn validate_reset_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::field(
            "newPassword",
            "Password must be at least 8 characters long",
        ));
    }
    Ok(())
}

fn mentions_duplicate(message: &str, subject: &str) -> bool {
    let message = message.to_lowercase();
    message.contains(subject)
        && ["already exists", "already taken", "already registered"]
            .iter()
            .any(|phrase| message.contains(phrase))
}

/// Attach a duplicate-account rejection to the field it concerns
pub fn duplicate_field_error(err: AppError, username_field: &str) -> AppError {
    match &err {
        AppError::UsernameTaken => AppError::field(username_field, "Username is already taken"),
        AppError::EmailTaken => AppError::field("email", "Email is already registered"),
        AppError::Api { message, .. } if mentions_duplicate(message, "username") => {
            AppError::field(username_field, "Username is already taken")
        }
        AppError::Api { message, .. } if mentions_duplicate(message, "email") => {
            AppError::field("email", "Email is already registered")
        }
        _ => err,
    }
}
