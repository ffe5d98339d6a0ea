use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestCodeRequest {
    /// Email address of the account to reset
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyResetRequest {
    /// Email address of the account to reset
    #[validate(email)]
    pub email: String,

    /// 6-digit passcode from the reset email
    #[validate(length(equal = 6))]
    pub code: String,

    /// Replacement password, at least 8 characters
    #[validate(length(min = 8))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCodeResponse {
    pub ok: bool,
    pub message: String,
    pub resend_after: i64, // seconds until a new code can be requested
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResetResponse {
    pub ok: bool,
    pub message: String,
}
