//! Fire-and-forget delivery of booking notices
//!
//! Each notice runs on its own task bounded by a timeout. Delivery failures
//! and timeouts are logged and never reach the caller.

use super::traits::{Notification, Notifier};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Subject line of the doctor's booking notice
pub const BOOKING_SUBJECT: &str = "New Appointment Booked";

/// Dispatches notices in the background
#[derive(Clone)]
pub struct NotificationGateway {
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
}

impl NotificationGateway {
    pub fn new(notifier: Arc<dyn Notifier>, timeout: Duration) -> Self {
        Self { notifier, timeout }
    }

    /// Send a notice on a background task
    ///
    /// The returned handle resolves once the attempt has finished, failed or
    /// timed out. Callers are free to drop it.
    pub fn notify(&self, notification: Notification) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        let timeout = self.timeout;

        tokio::spawn(async move {
            match tokio::time::timeout(timeout, notifier.send(&notification)).await {
                Ok(Ok(())) => {
                    tracing::debug!(
                        notifier = notifier.name(),
                        recipient = %notification.recipient,
                        "Notice sent"
                    );
                }
                Ok(Err(e)) => {
                    tracing::error!(
                        notifier = notifier.name(),
                        recipient = %notification.recipient,
                        error = %e,
                        "Failed to send notice"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        notifier = notifier.name(),
                        recipient = %notification.recipient,
                        timeout_secs = timeout.as_secs_f64(),
                        "Notice timed out"
                    );
                }
            }
        })
    }

    /// Notify a doctor about a new booking
    pub fn booking_notice(
        &self,
        doctor_email: &str,
        date: &str,
        time: &str,
        symptoms: &str,
    ) -> JoinHandle<()> {
        self.notify(booking_notification(doctor_email, date, time, symptoms))
    }
}

/// Build the doctor's booking notice
pub fn booking_notification(
    doctor_email: &str,
    date: &str,
    time: &str,
    symptoms: &str,
) -> Notification {
    let body = format!(
        "<h3>New Appointment</h3><p>You have a new appointment on {} at {}.<br>Symptoms: {}</p>",
        escape_html(date),
        escape_html(time),
        escape_html(symptoms)
    );
    Notification::new(doctor_email, BOOKING_SUBJECT, body)
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
