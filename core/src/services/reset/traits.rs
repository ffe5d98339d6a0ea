//! Traits for mail delivery integration

use async_trait::async_trait;
use std::sync::Arc;

/// Trait for outbound passcode mail delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a passcode email
    ///
    /// Returns the provider message id on success.
    async fn send_passcode(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String>;
}

// Allows the service to be instantiated over a trait object produced
// by the provider factory.
#[async_trait]
impl<M: Mailer + ?Sized> Mailer for Arc<M> {
    async fn send_passcode(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        (**self).send_passcode(email, code, expires_in_minutes).await
    }
}
