//! Domain-specific error types for the password reset flow
//!
//! Every failure the reset flow can report to a caller is a variant
//! here; presentation concerns (HTTP status, payload shape) live in
//! the API layer keyed off `error_code`.

use thiserror::Error;

/// Password-reset errors
#[derive(Error, Debug)]
pub enum ResetError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Please wait {seconds_remaining} seconds before requesting a new code")]
    Throttled { seconds_remaining: i64 },

    #[error("Invalid or unknown code")]
    CodeInvalid,

    #[error("Code expired")]
    CodeExpired,

    #[error("Incorrect code. {remaining_attempts} attempt(s) remaining")]
    CodeIncorrect { remaining_attempts: i32 },

    #[error("Too many attempts")]
    TooManyAttempts,

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to update password")]
    UpdateFailed,

    #[error("Failed to send code email")]
    NotifyFailed,

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,
}

impl ResetError {
    /// Stable snake_case code for API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            ResetError::InvalidInput { .. } => "invalid_input",
            ResetError::Throttled { .. } => "throttled",
            ResetError::CodeInvalid => "code_invalid",
            ResetError::CodeExpired => "code_expired",
            ResetError::CodeIncorrect { .. } => "code_incorrect",
            ResetError::TooManyAttempts => "too_many_attempts",
            ResetError::UserNotFound => "user_not_found",
            ResetError::UpdateFailed => "update_failed",
            ResetError::NotifyFailed => "notify_failed",
            ResetError::ServiceUnavailable => "service_unavailable",
        }
    }
}
