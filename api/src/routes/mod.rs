//! HTTP route handlers

pub mod password_reset;

pub use password_reset::AppState;
