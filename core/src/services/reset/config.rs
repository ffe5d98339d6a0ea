//! Configuration for the password reset service

use crate::domain::entities::passcode::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the password reset service
#[derive(Debug, Clone)]
pub struct ResetServiceConfig {
    /// Minimum seconds between code emails to the same address
    pub resend_cooldown_seconds: i64,
    /// Number of minutes before a passcode expires
    pub code_expiration_minutes: i64,
    /// Maximum number of failed verification attempts allowed
    pub max_attempts: i32,
    /// bcrypt cost used for hashing codes and passwords
    pub hash_cost: u32,
}

impl Default for ResetServiceConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_seconds: 30,
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}
