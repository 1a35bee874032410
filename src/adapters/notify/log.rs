//! Log-only notifier used when mail delivery is disabled

use super::traits::{Notification, Notifier};
use crate::domain::Result;
use async_trait::async_trait;

/// Writes each notice to the log instead of delivering it
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        tracing::info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            "Notification delivery disabled; notice logged only"
        );
        tracing::debug!(body = %notification.body, "Notice body");
        Ok(())
    }
}
