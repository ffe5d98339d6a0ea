//! Integration tests for the MySQL passcode store
//!
//! These tests require a running MySQL instance with the migrations
//! applied and DATABASE_URL set. Run with `cargo test -- --ignored`.

use mv_core::domain::entities::passcode::{CodePurpose, PasscodeRecord, MAX_ATTEMPTS};
use mv_core::repositories::PasscodeStore;
use mv_infra::database::{DatabasePool, MySqlPasscodeStore};
use mv_shared::config::DatabaseConfig;
use uuid::Uuid;

async fn connect() -> MySqlPasscodeStore {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = DatabaseConfig::from_env();
    let pool = DatabasePool::new(&config).await.unwrap();
    MySqlPasscodeStore::new(pool.get_pool().clone())
}

fn fresh_record(email: &str) -> PasscodeRecord {
    let code_hash = bcrypt::hash("123456", 4).unwrap();
    PasscodeRecord::new(
        email.to_string(),
        CodePurpose::PasswordReset,
        code_hash,
        10,
    )
}

fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4())
}

#[tokio::test]
#[ignore]
async fn test_insert_and_find_latest_unused() {
    let store = connect().await;
    let email = unique_email();

    let record = store.insert(fresh_record(&email)).await.unwrap();

    let found = store
        .find_latest_unused(&email, CodePurpose::PasswordReset)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.id, record.id);
    assert_eq!(found.email, email);
    assert_eq!(found.attempts, 0);
    assert!(!found.used);
}

#[tokio::test]
#[ignore]
async fn test_increment_attempts_caps_at_max() {
    let store = connect().await;
    let email = unique_email();
    let record = store.insert(fresh_record(&email)).await.unwrap();

    for expected in 1..=MAX_ATTEMPTS {
        let count = store
            .increment_attempts(record.id, MAX_ATTEMPTS)
            .await
            .unwrap();
        assert_eq!(count, expected);
    }

    // Further increments are no-ops once the cap is reached
    let count = store
        .increment_attempts(record.id, MAX_ATTEMPTS)
        .await
        .unwrap();
    assert_eq!(count, MAX_ATTEMPTS);
}

#[tokio::test]
#[ignore]
async fn test_mark_used_is_single_shot() {
    let store = connect().await;
    let email = unique_email();
    let record = store.insert(fresh_record(&email)).await.unwrap();

    assert!(store.mark_used(record.id).await.unwrap());
    assert!(!store.mark_used(record.id).await.unwrap());

    let found = store
        .find_latest_unused(&email, CodePurpose::PasswordReset)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[ignore]
async fn test_mark_all_used_except_spares_the_winner() {
    let store = connect().await;
    let email = unique_email();

    let older = store.insert(fresh_record(&email)).await.unwrap();
    let winner = store.insert(fresh_record(&email)).await.unwrap();

    let invalidated = store
        .mark_all_used_except(&email, CodePurpose::PasswordReset, winner.id)
        .await
        .unwrap();
    assert_eq!(invalidated, 1);

    let latest = store
        .find_latest_unused(&email, CodePurpose::PasswordReset)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, winner.id);

    let older_row = store
        .find_latest(&email, CodePurpose::PasswordReset)
        .await
        .unwrap()
        .unwrap();
    // find_latest ignores the used flag, so whichever row comes back
    // newest must be the winner; the older row is now consumed.
    assert_ne!(older_row.id, older.id);
}
