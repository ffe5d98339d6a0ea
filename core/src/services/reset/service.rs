//! Main password reset service implementation

use chrono::{Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use std::sync::Arc;

use mv_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::passcode::{CodePurpose, PasscodeRecord, CODE_LENGTH};
use crate::errors::{DomainError, DomainResult, ResetError};
use crate::repositories::{PasscodeStore, UserDirectory};

use super::config::ResetServiceConfig;
use super::traits::Mailer;
use super::types::RequestCodeResult;

/// Minimum length for a new password
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password reset service handling passcode issuance and verification
pub struct PasswordResetService<P: PasscodeStore, D: UserDirectory, M: Mailer> {
    /// Passcode persistence
    store: Arc<P>,
    /// Account lookups and credential rotation
    directory: Arc<D>,
    /// Outbound mail delivery
    mailer: Arc<M>,
    /// Service configuration
    config: ResetServiceConfig,
}

impl<P: PasscodeStore, D: UserDirectory, M: Mailer> PasswordResetService<P, D, M> {
    /// Create a new password reset service
    pub fn new(
        store: Arc<P>,
        directory: Arc<D>,
        mailer: Arc<M>,
        config: ResetServiceConfig,
    ) -> Self {
        Self {
            store,
            directory,
            mailer,
            config,
        }
    }

    /// Issue a passcode and email it to the given address
    ///
    /// This method:
    /// 1. Normalizes and validates the email address
    /// 2. Enforces the resend cooldown against the latest record
    /// 3. Generates a fresh code from a CSPRNG and stores its bcrypt hash
    /// 4. Dispatches the code email
    ///
    /// The record is persisted before the email is sent, so a delivery
    /// failure still counts against the cooldown window.
    pub async fn request_code(&self, email: &str) -> DomainResult<RequestCodeResult> {
        let email = normalize_email(email);
        if email.is_empty() || !is_valid_email(&email) {
            return Err(ResetError::InvalidInput {
                message: "A valid email address is required".to_string(),
            }
            .into());
        }

        let purpose = CodePurpose::PasswordReset;
        let now = Utc::now();

        // Cooldown applies to the newest record regardless of used state
        if let Some(latest) = self.store.find_latest(&email, purpose).await? {
            if let Some(seconds_remaining) =
                latest.cooldown_remaining(self.config.resend_cooldown_seconds, now)
            {
                tracing::warn!(
                    email = %mask_email(&email),
                    seconds_remaining = seconds_remaining,
                    event = "resend_throttled",
                    "Passcode request inside resend cooldown"
                );
                return Err(ResetError::Throttled { seconds_remaining }.into());
            }
        }

        let code = Self::generate_secure_code();
        let code_hash = bcrypt::hash(&code, self.config.hash_cost).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to hash passcode: {}", e),
            }
        })?;

        let record = PasscodeRecord::new(
            email.clone(),
            purpose,
            code_hash,
            self.config.code_expiration_minutes,
        );
        let record = self.store.insert(record).await?;

        tracing::info!(
            email = %mask_email(&email),
            record_id = %record.id,
            event = "passcode_issued",
            "Issued new password reset code"
        );

        let message_id = self
            .mailer
            .send_passcode(&email, &code, self.config.code_expiration_minutes)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&email),
                    record_id = %record.id,
                    error = %e,
                    event = "passcode_email_failed",
                    "Failed to dispatch passcode email"
                );
                DomainError::Reset(ResetError::NotifyFailed)
            })?;

        let next_resend_at =
            record.last_sent_at + Duration::seconds(self.config.resend_cooldown_seconds);

        Ok(RequestCodeResult {
            record,
            message_id,
            next_resend_at,
        })
    }

    /// Verify a passcode and set a new password
    ///
    /// This method:
    /// 1. Validates email, code shape, and password length (no storage
    ///    access happens before these checks pass)
    /// 2. Loads the newest unused record and enforces expiry and the
    ///    attempt cap
    /// 3. Compares the code against the stored bcrypt hash; mismatches
    ///    increment the attempt counter atomically
    /// 4. Rotates the account password, then consumes this record and
    ///    every other outstanding record for the address
    ///
    /// A failed password update leaves the record unused so the same
    /// code may be retried.
    pub async fn verify_and_reset(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let email = normalize_email(email);
        if email.is_empty() || !is_valid_email(&email) {
            return Err(ResetError::InvalidInput {
                message: "A valid email address is required".to_string(),
            }
            .into());
        }
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ResetError::InvalidInput {
                message: format!("Code must be {} digits", CODE_LENGTH),
            }
            .into());
        }
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ResetError::InvalidInput {
                message: format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LENGTH
                ),
            }
            .into());
        }

        let purpose = CodePurpose::PasswordReset;
        let record = self
            .store
            .find_latest_unused(&email, purpose)
            .await?
            .ok_or(ResetError::CodeInvalid)?;

        let now = Utc::now();
        if record.is_expired_at(now) {
            tracing::warn!(
                email = %mask_email(&email),
                record_id = %record.id,
                event = "passcode_expired",
                "Verification attempted against expired code"
            );
            return Err(ResetError::CodeExpired.into());
        }
        if record.attempts >= self.config.max_attempts {
            return Err(ResetError::TooManyAttempts.into());
        }

        let matches = bcrypt::verify(code, &record.code_hash).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to verify passcode hash: {}", e),
            }
        })?;

        if !matches {
            let attempts = self
                .store
                .increment_attempts(record.id, self.config.max_attempts)
                .await?;
            tracing::warn!(
                email = %mask_email(&email),
                record_id = %record.id,
                attempts = attempts,
                event = "passcode_mismatch",
                "Incorrect password reset code"
            );
            if attempts >= self.config.max_attempts {
                return Err(ResetError::TooManyAttempts.into());
            }
            return Err(ResetError::CodeIncorrect {
                remaining_attempts: self.config.max_attempts - attempts,
            }
            .into());
        }

        let account = self
            .directory
            .find_by_email(&email)
            .await?
            .ok_or(ResetError::UserNotFound)?;

        let password_hash =
            bcrypt::hash(new_password, self.config.hash_cost).map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to hash password: {}", e),
                }
            })?;

        if let Err(e) = self
            .directory
            .update_password(account.id, &password_hash)
            .await
        {
            tracing::error!(
                email = %mask_email(&email),
                record_id = %record.id,
                error = %e,
                event = "password_update_failed",
                "Failed to update account password"
            );
            return Err(ResetError::UpdateFailed.into());
        }

        // Conditioned update; losing the race means another request
        // already consumed this code.
        let consumed = self.store.mark_used(record.id).await?;
        if !consumed {
            return Err(ResetError::CodeInvalid.into());
        }

        let invalidated = self
            .store
            .mark_all_used_except(&email, purpose, record.id)
            .await?;

        tracing::info!(
            email = %mask_email(&email),
            record_id = %record.id,
            invalidated = invalidated,
            event = "password_reset_complete",
            "Password reset completed"
        );

        Ok(())
    }

    /// Generate a cryptographically secure random passcode
    ///
    /// Uses OsRng (OS-provided CSPRNG). The modulo reduction carries a
    /// negligible bias for 6-digit codes.
    pub fn generate_secure_code() -> String {
        let mut rng = OsRng;
        let mut bytes = [0u8; 4];
        rng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes);
        let code = num % 1_000_000;
        format!("{:06}", code)
    }
}
