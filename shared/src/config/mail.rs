//! Outbound mail provider configuration

use serde::{Deserialize, Serialize};

/// Mail service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail provider ("ses", "mock")
    pub provider: String,

    /// From address for outbound mail
    pub sender: String,

    /// AWS region for SES (ignored by other providers)
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            sender: "no-reply@mindverse.example".to_string(),
            region: default_region(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("MAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            sender: std::env::var("MAIL_SENDER")
                .unwrap_or_else(|_| "no-reply@mindverse.example".to_string()),
            region: std::env::var("MAIL_AWS_REGION").unwrap_or_else(|_| default_region()),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}
