//! In-memory implementation of PasscodeStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::passcode::{CodePurpose, PasscodeRecord};
use crate::errors::DomainError;

use super::trait_::PasscodeStore;

/// Mock passcode store for testing
pub struct MockPasscodeStore {
    records: Arc<RwLock<HashMap<Uuid, PasscodeRecord>>>,
    fail_next: AtomicBool,
}

impl MockPasscodeStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Make the next store call fail with an internal error
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of records currently stored
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Fetch a record by id, for assertions
    pub async fn get(&self, id: Uuid) -> Option<PasscodeRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Overwrite a record, for crafting expired or exhausted states
    pub async fn put(&self, record: PasscodeRecord) {
        self.records.write().await.insert(record.id, record);
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Simulated store failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockPasscodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasscodeStore for MockPasscodeStore {
    async fn insert(&self, record: PasscodeRecord) -> Result<PasscodeRecord, DomainError> {
        self.check_failure()?;
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_latest(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<Option<PasscodeRecord>, DomainError> {
        self.check_failure()?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.email == email && r.purpose == purpose)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn find_latest_unused(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<Option<PasscodeRecord>, DomainError> {
        self.check_failure()?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.email == email && r.purpose == purpose && !r.used)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn increment_attempts(
        &self,
        id: Uuid,
        max_attempts: i32,
    ) -> Result<i32, DomainError> {
        self.check_failure()?;
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "PasscodeRecord".to_string(),
        })?;
        if record.attempts < max_attempts {
            record.attempts += 1;
        }
        Ok(record.attempts)
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "PasscodeRecord".to_string(),
        })?;
        if record.used {
            Ok(false)
        } else {
            record.used = true;
            Ok(true)
        }
    }

    async fn mark_all_used_except(
        &self,
        email: &str,
        purpose: CodePurpose,
        except_id: Uuid,
    ) -> Result<u64, DomainError> {
        self.check_failure()?;
        let mut records = self.records.write().await;
        let mut count = 0;
        for record in records.values_mut() {
            if record.email == email
                && record.purpose == purpose
                && record.id != except_id
                && !record.used
            {
                record.used = true;
                count += 1;
            }
        }
        Ok(count)
    }
}
