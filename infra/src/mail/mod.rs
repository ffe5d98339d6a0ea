//! Mail service module
//!
//! Outbound email delivery for passcode notifications. Two providers
//! are available:
//! - AWS SES (`aws-ses` feature) for production delivery
//! - Mock mailer for development and testing

use std::sync::Arc;

use mv_core::services::Mailer;
use mv_shared::config::MailConfig;

pub mod mock_mail;

#[cfg(feature = "aws-ses")]
pub mod ses;

pub use mock_mail::MockMailService;

#[cfg(feature = "aws-ses")]
pub use ses::SesMailer;

/// Create a mailer based on configuration
///
/// Selects the provider named by `config.provider`. Unknown providers
/// fall back to the mock mailer with a warning so the service can
/// still come up in development.
pub async fn create_mailer(config: &MailConfig) -> Arc<dyn Mailer> {
    match config.provider.as_str() {
        #[cfg(feature = "aws-ses")]
        "ses" => {
            tracing::info!(
                sender = %config.sender,
                region = %config.region,
                "Using AWS SES mail provider"
            );
            Arc::new(SesMailer::new(config).await)
        }
        "mock" => {
            tracing::info!("Using mock mail provider");
            Arc::new(MockMailService::new())
        }
        other => {
            tracing::warn!(
                provider = %other,
                "Unknown mail provider, falling back to mock"
            );
            Arc::new(MockMailService::new())
        }
    }
}
