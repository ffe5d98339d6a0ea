//! In-memory implementation of UserDirectory for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

use super::trait_::UserDirectory;

/// Mock user directory for testing
pub struct MockUserDirectory {
    accounts: Arc<RwLock<HashMap<Uuid, UserAccount>>>,
    password_hashes: Arc<RwLock<HashMap<Uuid, String>>>,
    fail_password_update: AtomicBool,
    update_calls: AtomicU32,
}

impl MockUserDirectory {
    /// Create a new mock directory
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            password_hashes: Arc::new(RwLock::new(HashMap::new())),
            fail_password_update: AtomicBool::new(false),
            update_calls: AtomicU32::new(0),
        }
    }

    /// Register an account and return it
    pub async fn add_account(&self, email: &str) -> UserAccount {
        let account = UserAccount::new(email.to_string());
        self.accounts
            .write()
            .await
            .insert(account.id, account.clone());
        account
    }

    /// Make password updates fail until cleared
    pub fn fail_password_updates(&self, fail: bool) {
        self.fail_password_update.store(fail, Ordering::SeqCst);
    }

    /// Number of times update_password was invoked
    pub fn update_call_count(&self) -> u32 {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Stored password hash for an account, for assertions
    pub async fn password_hash(&self, id: Uuid) -> Option<String> {
        self.password_hashes.read().await.get(&id).cloned()
    }
}

impl Default for MockUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_password_update.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Simulated directory failure".to_string(),
            });
        }

        let accounts = self.accounts.read().await;
        if !accounts.contains_key(&id) {
            return Err(DomainError::NotFound {
                resource: "UserAccount".to_string(),
            });
        }
        drop(accounts);

        self.password_hashes
            .write()
            .await
            .insert(id, password_hash.to_string());
        Ok(())
    }
}
