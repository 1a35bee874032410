//! HTTP mail relay notifier
//!
//! Posts each notice as JSON to a mail relay endpoint with a bearer API key:
//!
//! ```json
//! {"from": "noreply@clinic.example", "to": "d@x.com", "subject": "...", "html": "..."}
//! ```
//!
//! Server errors, throttling and connection failures are retried with
//! exponential backoff; other client errors fail immediately.

use super::traits::{Notification, Notifier};
use crate::config::{NotificationConfig, RetryConfig, SecretString};
use crate::domain::{ClinicError, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::json;
use std::time::Duration;

/// Notifier backed by an HTTP mail relay
pub struct HttpMailNotifier {
    endpoint: String,
    api_key: SecretString,
    sender: String,
    retry: RetryConfig,
    http_client: reqwest::Client,
}

/// Outcome of a single delivery attempt
enum Attempt {
    Delivered,
    Retryable(String),
    Fatal(String),
}

impl HttpMailNotifier {
    /// Create a notifier from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot be built
    pub fn new(config: &NotificationConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            ClinicError::Configuration(
                "notifications.api_key is required for the mail relay".to_string(),
            )
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                ClinicError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        tracing::info!(
            endpoint = %config.endpoint,
            sender = %config.sender,
            "Mail relay notifier initialized"
        );

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key,
            sender: config.sender.clone(),
            retry: config.retry.clone(),
            http_client,
        })
    }

    async fn attempt(&self, notification: &Notification) -> Attempt {
        let payload = json!({
            "from": self.sender,
            "to": notification.recipient,
            "subject": notification.subject,
            "html": notification.body,
        });

        let api_key: &str = self.api_key.expose_secret().as_ref();
        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => Attempt::Delivered,
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                let message = format!("mail relay returned {status}: {body}");
                if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    Attempt::Retryable(message)
                } else {
                    Attempt::Fatal(message)
                }
            }
            Err(e) => Attempt::Retryable(format!("mail relay request failed: {e}")),
        }
    }

    fn backoff_delay(&self, attempt: usize) -> Duration {
        let factor = self.retry.backoff_multiplier.powf((attempt - 1) as f64);
        let delay_ms = (self.retry.initial_delay_ms as f64 * factor) as u64;
        Duration::from_millis(delay_ms.min(self.retry.max_delay_ms))
    }
}

#[async_trait]
impl Notifier for HttpMailNotifier {
    fn name(&self) -> &'static str {
        "mail_relay"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let max_attempts = self.retry.max_retries + 1;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.attempt(notification).await {
                Attempt::Delivered => {
                    tracing::info!(
                        recipient = %notification.recipient,
                        attempt = attempt,
                        "Notification delivered"
                    );
                    return Ok(());
                }
                Attempt::Fatal(message) => return Err(ClinicError::Notification(message)),
                Attempt::Retryable(message) => {
                    if attempt >= max_attempts {
                        return Err(ClinicError::Notification(format!(
                            "{message} (gave up after {attempt} attempts)"
                        )));
                    }

                    let delay = self.backoff_delay(attempt);
                    tracing::warn!(
                        attempt = attempt,
                        max_attempts = max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %message,
                        "Retrying notification after error"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
