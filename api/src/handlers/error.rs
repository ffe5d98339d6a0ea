//! Domain error to HTTP response mapping

use actix_web::HttpResponse;
use std::collections::HashMap;

use mv_core::errors::{DomainError, ResetError};
use mv_shared::types::response::ErrorResponse;

/// Convert a domain error into the appropriate HTTP response
///
/// Every error carries a stable machine-readable code alongside a
/// human-readable message. Internal detail never leaks to the client.
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Reset(reset_error) => reset_error_response(reset_error),
        DomainError::Validation { message } => HttpResponse::BadRequest().json(
            ErrorResponse::new("validation_error".to_string(), message.clone()),
        ),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(
            ErrorResponse::new("not_found".to_string(), format!("{} not found", resource)),
        ),
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error".to_string(),
                "An internal server error occurred".to_string(),
            ))
        }
    }
}

fn reset_error_response(error: &ResetError) -> HttpResponse {
    let code = error.error_code().to_string();

    match error {
        ResetError::InvalidInput { .. } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(code, error.to_string()))
        }
        ResetError::Throttled { seconds_remaining } => {
            let mut details = HashMap::new();
            details.insert(
                "cooldown".to_string(),
                serde_json::json!(seconds_remaining),
            );
            HttpResponse::TooManyRequests()
                .json(ErrorResponse::new(code, error.to_string()).with_details(details))
        }
        ResetError::CodeInvalid | ResetError::CodeExpired => {
            HttpResponse::BadRequest().json(ErrorResponse::new(code, error.to_string()))
        }
        ResetError::CodeIncorrect { remaining_attempts } => {
            let mut details = HashMap::new();
            details.insert(
                "remaining_attempts".to_string(),
                serde_json::json!(remaining_attempts),
            );
            HttpResponse::BadRequest()
                .json(ErrorResponse::new(code, error.to_string()).with_details(details))
        }
        ResetError::TooManyAttempts => {
            HttpResponse::TooManyRequests().json(ErrorResponse::new(code, error.to_string()))
        }
        ResetError::UserNotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new(code, error.to_string()))
        }
        ResetError::UpdateFailed | ResetError::NotifyFailed => {
            HttpResponse::InternalServerError().json(ErrorResponse::new(code, error.to_string()))
        }
        ResetError::ServiceUnavailable => {
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(code, error.to_string()))
        }
    }
}
