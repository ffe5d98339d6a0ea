//! Mock implementations for testing the password reset service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::services::reset::traits::Mailer;

// Mock mailer for testing
pub struct MockMailer {
    pub sent_messages: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: bool,
}

impl MockMailer {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn get_sent_code(&self, email: &str) -> Option<String> {
        self.sent_messages.lock().unwrap().get(email).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_passcode(
        &self,
        email: &str,
        code: &str,
        _expires_in_minutes: i64,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("Mail service error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(email.to_string(), code.to_string());
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}
