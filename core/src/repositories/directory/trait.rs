//! User directory trait defining the interface for account lookups.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

/// Repository trait for looking up accounts and rotating credentials
///
/// The password reset flow only touches the directory after a code has
/// been verified, so the surface is deliberately small.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find an account by its normalized email address
    ///
    /// # Returns
    /// * `Ok(Some(UserAccount))` - Account found
    /// * `Ok(None)` - No account with this email
    /// * `Err(DomainError)` - Directory error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Replace the stored password hash for an account
    ///
    /// # Arguments
    /// * `id` - Account identifier
    /// * `password_hash` - bcrypt hash of the new password
    ///
    /// # Returns
    /// * `Ok(())` - Password updated
    /// * `Err(DomainError)` - Account missing or directory error
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError>;
}
