//! MySQL-backed user directory
//!
//! Looks up accounts in the `users` table and applies password
//! updates. Only the bcrypt hash of a password ever reaches this
//! module.

use async_trait::async_trait;
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error, info};
use uuid::Uuid;

use mv_core::domain::entities::user::UserAccount;
use mv_core::errors::{DomainError, ResetError};
use mv_core::repositories::UserDirectory;
use mv_shared::utils::email::mask_email;

/// MySQL implementation of the user directory
pub struct MySqlUserDirectory {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlUserDirectory {
    /// Create a new user directory
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for MySqlUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let row = sqlx::query("SELECT id, email FROM users WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to look up user by email"
                );
                map_db_error("Failed to look up user by email", e)
            })?;

        let Some(row) = row else {
            debug!(email = %mask_email(email), "No user found for email");
            return Ok(None);
        };

        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;
        let email: String = row.try_get("email").map_err(|e| DomainError::Internal {
            message: format!("Failed to get email: {}", e),
        })?;

        Ok(Some(UserAccount {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Malformed user id: {}", e),
            })?,
            email,
        }))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, updated_at = NOW() WHERE id = ?",
        )
        .bind(password_hash)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(user_id = %id, error = %e, "Failed to update user password");
            map_db_error("Failed to update user password", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "UserAccount".to_string(),
            });
        }

        info!(user_id = %id, "Updated user password");
        Ok(())
    }
}

fn map_db_error(context: &str, e: sqlx::Error) -> DomainError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            DomainError::Reset(ResetError::ServiceUnavailable)
        }
        e => DomainError::Internal {
            message: format!("{}: {}", context, e),
        },
    }
}
