//! One-time passcode policy configuration

use serde::{Deserialize, Serialize};

/// Policy settings for passcode issuance and verification
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasscodeConfig {
    /// Minimum seconds between two code emails to the same address
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: i64,

    /// Minutes until an issued code expires
    #[serde(default = "default_expiration_minutes")]
    pub code_expiration_minutes: i64,

    /// Failed verification attempts allowed per code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,

    /// bcrypt cost for hashing codes and passwords
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
}

impl Default for PasscodeConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_seconds: default_resend_cooldown(),
            code_expiration_minutes: default_expiration_minutes(),
            max_attempts: default_max_attempts(),
            hash_cost: default_hash_cost(),
        }
    }
}

impl PasscodeConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let resend_cooldown_seconds = std::env::var("PASSCODE_RESEND_COOLDOWN_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_resend_cooldown);
        let code_expiration_minutes = std::env::var("PASSCODE_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_expiration_minutes);
        let max_attempts = std::env::var("PASSCODE_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_attempts);

        Self {
            resend_cooldown_seconds,
            code_expiration_minutes,
            max_attempts,
            ..Default::default()
        }
    }
}

fn default_resend_cooldown() -> i64 {
    30
}

fn default_expiration_minutes() -> i64 {
    10
}

fn default_max_attempts() -> i32 {
    5
}

fn default_hash_cost() -> u32 {
    12  // bcrypt DEFAULT_COST
}
