//! Password reset route handlers
//!
//! This module contains the password reset endpoints:
//! - Requesting a reset code by email
//! - Verifying the code and applying a new password

pub mod request;
pub mod verify;

pub use request::AppState;
