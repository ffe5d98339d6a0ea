//! Mock mail service for development and testing
//!
//! Prints outgoing messages to the console instead of sending real
//! email, and captures the codes it "delivered" so tests can read
//! them back. Structured log events never include the code; only the
//! console block does, since it stands in for the recipient's inbox.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use mv_core::services::Mailer;
use mv_shared::utils::email::mask_email;

/// Mock implementation of the mailer
pub struct MockMailService {
    /// Counter for generated messages
    message_count: Arc<AtomicU64>,
    /// Whether to simulate delivery failures
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
    /// Codes delivered per recipient, for test inspection
    sent_codes: Arc<Mutex<HashMap<String, String>>>,
}

impl MockMailService {
    /// Create a new mock mail service with console output enabled
    pub fn new() -> Self {
        Self::with_options(false, true)
    }

    /// Create a mock mail service with specific options
    pub fn with_options(simulate_failure: bool, console_output: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
            sent_codes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::Relaxed)
    }

    /// Get the last code delivered to a recipient
    pub async fn get_sent_code(&self, email: &str) -> Option<String> {
        self.sent_codes.lock().await.get(email).cloned()
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailService {
    async fn send_passcode(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        if self.simulate_failure {
            return Err("Mock mail delivery failure".to_string());
        }

        self.message_count.fetch_add(1, Ordering::Relaxed);
        let message_id = format!("mock-mail-{}", Uuid::new_v4());

        self.sent_codes
            .lock()
            .await
            .insert(email.to_string(), code.to_string());

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK EMAIL");
            println!("{}", "=".repeat(60));
            println!("To:      {}", email);
            println!("Subject: Your password reset code");
            println!("Code:    {}", code);
            println!("Expires: in {} minutes", expires_in_minutes);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mock_mail",
            email = %mask_email(email),
            message_id = %message_id,
            "Mock passcode email sent"
        );

        Ok(message_id)
    }
}
