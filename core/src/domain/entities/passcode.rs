//! Passcode record entity for email-based password reset.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of failed verification attempts allowed per code
pub const MAX_ATTEMPTS: i32 = 5;

/// Length of the passcode
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for passcodes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Purpose of an issued passcode
///
/// Stored as a string column so additional purposes (email change,
/// account deletion confirmation) can be added without a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    PasswordReset,
}

impl CodePurpose {
    /// Stable string form used in storage and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::PasswordReset => "password_reset",
        }
    }
}

impl std::fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password_reset" => Ok(CodePurpose::PasswordReset),
            _ => Err(format!("Unknown passcode purpose: {}", s)),
        }
    }
}

/// Derived lifecycle state of a passcode record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasscodeStatus {
    /// Still eligible for verification
    Active,
    /// Consumed by a successful reset (or superseded)
    Used,
    /// Past its expiry timestamp
    Expired,
    /// Failed attempt cap reached
    Exhausted,
}

/// Passcode record entity
///
/// Only the bcrypt hash of the code is ever stored; the plaintext code
/// exists in memory just long enough to be emailed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasscodeRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Normalized (trimmed, lowercased) email the code was sent to
    pub email: String,

    /// Purpose the code was issued for
    pub purpose: CodePurpose,

    /// bcrypt hash of the 6-digit code
    pub code_hash: String,

    /// Number of failed verification attempts made
    pub attempts: i32,

    /// Whether the code has been consumed
    pub used: bool,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the code email was last dispatched
    pub last_sent_at: DateTime<Utc>,
}

impl PasscodeRecord {
    /// Creates a new passcode record from a pre-hashed code
    ///
    /// # Arguments
    ///
    /// * `email` - Normalized recipient address
    /// * `purpose` - Purpose the code is issued for
    /// * `code_hash` - bcrypt hash of the plaintext code
    /// * `expiration_minutes` - Number of minutes until the code expires
    pub fn new(
        email: String,
        purpose: CodePurpose,
        code_hash: String,
        expiration_minutes: i64,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            purpose,
            code_hash,
            attempts: 0,
            used: false,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            last_sent_at: now,
        }
    }

    /// Checks whether the code is expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks whether the code is expired now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Derives the lifecycle status at the given instant
    ///
    /// Precedence: a consumed record is `Used` even if it has also
    /// expired; expiry takes precedence over attempt exhaustion.
    pub fn status_at(&self, now: DateTime<Utc>) -> PasscodeStatus {
        if self.used {
            PasscodeStatus::Used
        } else if self.is_expired_at(now) {
            PasscodeStatus::Expired
        } else if self.attempts >= MAX_ATTEMPTS {
            PasscodeStatus::Exhausted
        } else {
            PasscodeStatus::Active
        }
    }

    /// Seconds left in the resend cooldown window, if any
    ///
    /// Rounds up so a caller never sees 0 while the window is still
    /// open.
    pub fn cooldown_remaining(
        &self,
        cooldown_seconds: i64,
        now: DateTime<Utc>,
    ) -> Option<i64> {
        let window_end = self.last_sent_at + Duration::seconds(cooldown_seconds);
        let remaining = window_end - now;
        if remaining > Duration::zero() {
            Some((remaining.num_milliseconds() + 999) / 1000)
        } else {
            None
        }
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempts).max(0)
    }
}
