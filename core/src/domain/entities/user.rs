//! User account entity as seen by the password reset flow.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account
///
/// The reset flow only needs identity and address; profile data lives
/// with the main account service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalized email address
    pub email: String,
}

impl UserAccount {
    /// Creates a new UserAccount instance
    pub fn new(email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = UserAccount::new("alice@example.com".to_string());
        assert_eq!(account.email, "alice@example.com");
        assert!(!account.id.is_nil());
    }
}
