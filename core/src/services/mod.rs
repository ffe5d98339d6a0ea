//! Business services containing domain logic and use cases.

pub mod reset;

// Re-export commonly used types
pub use reset::{
    Mailer, PasswordResetService, RequestCodeResult, ResetServiceConfig,
    MIN_PASSWORD_LENGTH,
};
