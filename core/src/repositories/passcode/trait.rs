//! Passcode store trait defining the interface for passcode persistence.
//!
//! This module defines the repository pattern interface for
//! `PasscodeRecord` entities. The trait is async-first and uses Result
//! types for proper error handling.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::passcode::{CodePurpose, PasscodeRecord};
use crate::errors::DomainError;

/// Repository trait for passcode record persistence operations
///
/// Implementations handle the actual database operations while
/// maintaining the abstraction boundary between domain and
/// infrastructure layers. The conditioned operations
/// (`increment_attempts`, `mark_used`) must be atomic at the storage
/// level: concurrent verifications against the same record may not
/// both observe the pre-update state.
#[async_trait]
pub trait PasscodeStore: Send + Sync {
    /// Persist a new passcode record
    ///
    /// # Returns
    /// * `Ok(PasscodeRecord)` - The stored record
    /// * `Err(DomainError)` - Storage error occurred
    async fn insert(&self, record: PasscodeRecord) -> Result<PasscodeRecord, DomainError>;

    /// Find the most recently created record for an email and purpose,
    /// regardless of used state
    ///
    /// Used for cooldown checks at issuance time.
    async fn find_latest(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<Option<PasscodeRecord>, DomainError>;

    /// Find the most recently created UNUSED record for an email and
    /// purpose
    ///
    /// Ordering is by `created_at` descending; only the newest unused
    /// record is a verification candidate.
    async fn find_latest_unused(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<Option<PasscodeRecord>, DomainError>;

    /// Atomically increment the attempt counter of a record, capped
    ///
    /// The increment only applies while `attempts < max_attempts`.
    ///
    /// # Returns
    /// * `Ok(attempts)` - The attempt count after the operation
    /// * `Err(DomainError)` - Record missing or storage error
    async fn increment_attempts(
        &self,
        id: Uuid,
        max_attempts: i32,
    ) -> Result<i32, DomainError>;

    /// Atomically mark a record as used
    ///
    /// # Returns
    /// * `Ok(true)` - This call consumed the record
    /// * `Ok(false)` - The record was already used (lost the race)
    /// * `Err(DomainError)` - Storage error occurred
    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Mark every unused record for an email and purpose as used,
    /// except the given record
    ///
    /// Called after a successful reset so stale codes cannot be
    /// replayed.
    ///
    /// # Returns
    /// * `Ok(count)` - Number of records invalidated
    async fn mark_all_used_except(
        &self,
        email: &str,
        purpose: CodePurpose,
        except_id: Uuid,
    ) -> Result<u64, DomainError>;
}
