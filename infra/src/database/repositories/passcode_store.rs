//! MySQL-backed passcode store
//!
//! Persists passcode records in the `email_passcode` table. The
//! conditioned UPDATE statements give the store its atomicity
//! guarantees: the attempt counter can never pass the cap and a record
//! can only be consumed once, even under concurrent verification.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error, info};
use uuid::Uuid;

use mv_core::domain::entities::passcode::{CodePurpose, PasscodeRecord};
use mv_core::errors::{DomainError, ResetError};
use mv_core::repositories::PasscodeStore;
use mv_shared::utils::email::mask_email;

/// MySQL implementation of the passcode store
pub struct MySqlPasscodeStore {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlPasscodeStore {
    /// Create a new passcode store
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    /// Delete expired records (maintenance task)
    pub async fn cleanup_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM email_passcode WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to clean up expired passcodes", e))?;

        let deleted_count = result.rows_affected();
        if deleted_count > 0 {
            info!(
                deleted_count = deleted_count,
                "Cleaned up expired passcodes"
            );
        }
        Ok(deleted_count)
    }

    fn record_from_row(row: &sqlx::mysql::MySqlRow) -> Result<PasscodeRecord, DomainError> {
        let id: String = try_column(row, "id")?;
        let purpose: String = try_column(row, "purpose")?;

        Ok(PasscodeRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Malformed record id: {}", e),
            })?,
            email: try_column(row, "email")?,
            purpose: purpose.parse::<CodePurpose>().map_err(|e| {
                DomainError::Internal {
                    message: format!("Malformed record purpose: {}", e),
                }
            })?,
            code_hash: try_column(row, "code_hash")?,
            attempts: try_column(row, "attempts")?,
            used: try_column(row, "used")?,
            created_at: try_column::<DateTime<Utc>>(row, "created_at")?,
            expires_at: try_column::<DateTime<Utc>>(row, "expires_at")?,
            last_sent_at: try_column::<DateTime<Utc>>(row, "last_sent_at")?,
        })
    }
}

#[async_trait]
impl PasscodeStore for MySqlPasscodeStore {
    async fn insert(&self, record: PasscodeRecord) -> Result<PasscodeRecord, DomainError> {
        let query = r#"
            INSERT INTO email_passcode (
                id, email, purpose, code_hash, attempts, used,
                created_at, expires_at, last_sent_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.email)
            .bind(record.purpose.as_str())
            .bind(&record.code_hash)
            .bind(record.attempts)
            .bind(record.used)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.last_sent_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(&record.email),
                    error = %e,
                    "Failed to store passcode record"
                );
                map_db_error("Failed to store passcode record", e)
            })?;

        debug!(
            email = %mask_email(&record.email),
            record_id = %record.id,
            "Stored passcode record"
        );

        Ok(record)
    }

    async fn find_latest(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<Option<PasscodeRecord>, DomainError> {
        let query = r#"
            SELECT id, email, purpose, code_hash, attempts, used,
                   created_at, expires_at, last_sent_at
            FROM email_passcode
            WHERE email = ? AND purpose = ?
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(purpose.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to fetch latest passcode record", e))?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn find_latest_unused(
        &self,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<Option<PasscodeRecord>, DomainError> {
        let query = r#"
            SELECT id, email, purpose, code_hash, attempts, used,
                   created_at, expires_at, last_sent_at
            FROM email_passcode
            WHERE email = ? AND purpose = ? AND used = FALSE
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(purpose.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to fetch latest unused passcode record", e))?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn increment_attempts(
        &self,
        id: Uuid,
        max_attempts: i32,
    ) -> Result<i32, DomainError> {
        // Conditioned increment; a concurrent caller cannot push the
        // counter past the cap.
        let query = r#"
            UPDATE email_passcode
            SET attempts = attempts + 1
            WHERE id = ? AND attempts < ?
        "#;

        sqlx::query(query)
            .bind(id.to_string())
            .bind(max_attempts)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to increment passcode attempts", e))?;

        let attempts: i32 = sqlx::query("SELECT attempts FROM email_passcode WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to read passcode attempts", e))?
            .ok_or_else(|| DomainError::NotFound {
                resource: "PasscodeRecord".to_string(),
            })?
            .try_get("attempts")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get attempts: {}", e),
            })?;

        debug!(
            record_id = %id,
            attempts = attempts,
            "Incremented passcode attempt count"
        );

        Ok(attempts)
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError> {
        // Conditioned update; rows_affected is 0 when another
        // verification already consumed the record.
        let result = sqlx::query(
            "UPDATE email_passcode SET used = TRUE WHERE id = ? AND used = FALSE",
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to mark passcode record used", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn mark_all_used_except(
        &self,
        email: &str,
        purpose: CodePurpose,
        except_id: Uuid,
    ) -> Result<u64, DomainError> {
        let query = r#"
            UPDATE email_passcode
            SET used = TRUE
            WHERE email = ? AND purpose = ? AND id <> ? AND used = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .bind(purpose.as_str())
            .bind(except_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to invalidate outstanding passcodes", e))?;

        let invalidated = result.rows_affected();
        if invalidated > 0 {
            debug!(
                email = %mask_email(email),
                invalidated = invalidated,
                "Invalidated outstanding passcode records"
            );
        }
        Ok(invalidated)
    }
}

fn try_column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

/// Map connectivity failures to ServiceUnavailable so callers can
/// distinguish them from data errors.
fn map_db_error(context: &str, e: sqlx::Error) -> DomainError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            error!(error = %e, "{} (database unavailable)", context);
            DomainError::Reset(ResetError::ServiceUnavailable)
        }
        e => DomainError::Internal {
            message: format!("{}: {}", context, e),
        },
    }
}
