//! Notifier abstraction
//!
//! A notifier delivers one outbound notice. Implementations report failure
//! through `Result`; the gateway decides what to do with it.

use crate::domain::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Outbound notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Recipient email address
    pub recipient: String,
    pub subject: String,
    /// HTML body
    pub body: String,
}

impl Notification {
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Delivery channel for notices
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Deliver a notice
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::Notification` if the notice could not be delivered.
    async fn send(&self, notification: &Notification) -> Result<()>;
}
