//! Password reset service module
//!
//! This module provides the complete passcode workflow:
//! - Code generation and email dispatch with resend cooldown
//! - Code verification with attempt tracking and expiry
//! - Password rotation through the user directory
//! - Single-use enforcement across outstanding codes

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::ResetServiceConfig;
pub use service::{PasswordResetService, MIN_PASSWORD_LENGTH};
pub use traits::Mailer;
pub use types::RequestCodeResult;
