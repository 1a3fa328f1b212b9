//! Borrow, renew and return flows shared by the member-facing pages

use crate::{
    error::{AppError, AppResult},
    models::{borrow::LOAN_PERIOD_DAYS, Borrow, SessionUser},
};

pub use super::Outcome;
use super::PageContext;

pub fn borrow_confirmation(title: &str, library_name: &str) -> String {
    format!(
        "Are you sure you want to borrow \"{}\" from {}?\n\n\
         This book will be due in {} days and you will be responsible for returning it on time to the library.",
        title, library_name, LOAN_PERIOD_DAYS
    )
}

pub fn renew_confirmation(title: &str) -> String {
    format!(
        "Are you sure you want to renew \"{}\"?\n\nThis will extend your due date by another {} days.",
        title, LOAN_PERIOD_DAYS
    )
}

pub fn return_confirmation(title: &str) -> String {
    format!(
        "Are you sure you want to return \"{}\"?\n\n\
         Please make sure you have the physical book with you to return to the library.",
        title
    )
}

/// Rejections mentioning overdue items become [`AppError::OverdueBlocked`]
pub fn classify_borrow_error(err: AppError) -> AppError {
    match err {
        AppError::Api { message, .. } if message.to_lowercase().contains("overdue") => {
            AppError::OverdueBlocked(message)
        }
        other => other,
    }
}

/// Drop the backend's "Book renewal failed: " prefix
pub fn renewal_error_text(message: &str) -> String {
    message.replacen("Book renewal failed: ", "", 1)
}

/// Ask, then borrow one copy for `member`
pub async fn borrow_copy(
    ctx: &PageContext,
    member: &SessionUser,
    title: &str,
    library_name: &str,
    instance_id: i64,
) -> AppResult<Outcome> {
    if !ctx.prompt.confirm(&borrow_confirmation(title, library_name)) {
        tracing::debug!("Borrow of instance {} cancelled", instance_id);
        return Ok(Outcome::Cancelled);
    }

    ctx.services
        .borrows
        .borrow(member.id, instance_id)
        .await
        .map_err(classify_borrow_error)?;

    tracing::info!("Member {} borrowed instance {}", member.id, instance_id);
    Ok(Outcome::Done)
}

/// Tell the user why a borrow failed; overdue blocks offer the history page
pub fn report_borrow_failure(ctx: &PageContext, err: &AppError) {
    match err {
        AppError::OverdueBlocked(message) => {
            tracing::warn!("Borrow blocked: {}", message);
            let view_history = ctx.prompt.confirm(&format!(
                "{}\n\nWould you like to view your borrowing history to see which books are overdue?",
                message
            ));
            if view_history {
                ctx.navigator.redirect("/borrow-history");
            }
        }
        AppError::LoginRequired | AppError::MembersOnly | AppError::NoAvailableCopies => {
            ctx.prompt.alert(&err.user_message());
        }
        _ => ctx.alert_failure("Failed to borrow book", err),
    }
}

pub async fn renew(ctx: &PageContext, borrow: &Borrow) -> AppResult<Outcome> {
    if !ctx.prompt.confirm(&renew_confirmation(borrow.book_title_or_default())) {
        return Ok(Outcome::Cancelled);
    }

    match ctx.services.borrows.renew(borrow.borrow_id).await {
        Ok(()) => {
            tracing::info!("Renewed borrow {}", borrow.borrow_id);
            ctx.prompt.alert("Book renewed successfully!");
            Ok(Outcome::Done)
        }
        Err(AppError::Api { status, message }) => {
            let message = renewal_error_text(&message);
            tracing::error!("Error renewing book: {}", message);
            ctx.prompt.alert(&message);
            Err(AppError::Api { status, message })
        }
        Err(e) => {
            ctx.alert_failure("Failed to renew book", &e);
            Err(e)
        }
    }
}

pub async fn return_book(ctx: &PageContext, borrow: &Borrow) -> AppResult<Outcome> {
    if !ctx.prompt.confirm(&return_confirmation(borrow.book_title_or_default())) {
        return Ok(Outcome::Cancelled);
    }

    match ctx.services.borrows.return_book(borrow.borrow_id).await {
        Ok(()) => {
            tracing::info!("Returned borrow {}", borrow.borrow_id);
            Ok(Outcome::Done)
        }
        Err(e) => {
            ctx.alert_failure("Failed to return book", &e);
            Err(e)
        }
    }
}
