//! AWS SES mail delivery
//!
//! Sends passcode emails through Amazon SES v2. The SES message id is
//! returned to callers for correlation; the passcode itself is only
//! ever placed in the message body, never in logs.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client;
use tracing::{error, info};

use mv_core::services::Mailer;
use mv_shared::config::MailConfig;
use mv_shared::utils::email::mask_email;

/// AWS SES implementation of the mailer
pub struct SesMailer {
    client: Client,
    sender: String,
}

impl SesMailer {
    /// Create a new SES mailer
    ///
    /// Loads AWS credentials from the environment (standard AWS SDK
    /// credential chain) with the region taken from configuration.
    pub async fn new(config: &MailConfig) -> Self {
        let region = aws_config::Region::new(config.region.clone());
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        Self {
            client: Client::new(&aws_config),
            sender: config.sender.clone(),
        }
    }

    fn build_content(code: &str, expires_in_minutes: i64) -> Result<EmailContent, String> {
        let subject = Content::builder()
            .data("Your password reset code")
            .charset("UTF-8")
            .build()
            .map_err(|e| format!("Failed to build subject: {}", e))?;

        let html = format!(
            "<html><body>\
             <p>Use the code below to reset your password:</p>\
             <h2 style=\"letter-spacing: 4px;\">{}</h2>\
             <p>This code expires in {} minutes. If you did not request a \
             password reset, you can ignore this email.</p>\
             </body></html>",
            code, expires_in_minutes
        );

        let body_content = Content::builder()
            .data(html)
            .charset("UTF-8")
            .build()
            .map_err(|e| format!("Failed to build body: {}", e))?;

        let body = Body::builder().html(body_content).build();

        let message = Message::builder().subject(subject).body(body).build();

        Ok(EmailContent::builder().simple(message).build())
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send_passcode(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        let destination = Destination::builder().to_addresses(email).build();
        let content = Self::build_content(code, expires_in_minutes)?;

        let output = self
            .client
            .send_email()
            .from_email_address(&self.sender)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "SES send failed"
                );
                format!("SES send failed: {}", e)
            })?;

        let message_id = output.message_id().unwrap_or_default().to_string();

        info!(
            email = %mask_email(email),
            message_id = %message_id,
            "Passcode email dispatched via SES"
        );

        Ok(message_id)
    }
}
