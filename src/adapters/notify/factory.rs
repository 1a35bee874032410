//! Notifier factory
//!
//! Picks the notifier implementation from the notification configuration.

use super::http::HttpMailNotifier;
use super::log::LogNotifier;
use super::traits::Notifier;
use crate::config::NotificationConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create a notifier based on the configuration
///
/// Returns the mail relay notifier when notifications are enabled and the
/// log-only notifier otherwise.
///
/// # Errors
///
/// Returns an error if the mail relay client cannot be created
pub fn create_notifier(config: &NotificationConfig) -> Result<Arc<dyn Notifier>> {
    if config.enabled {
        tracing::info!("Creating mail relay notifier");
        let notifier = HttpMailNotifier::new(config)?;
        Ok(Arc::new(notifier) as Arc<dyn Notifier>)
    } else {
        tracing::info!("Notifications disabled, booking notices will only be logged");
        Ok(Arc::new(LogNotifier) as Arc<dyn Notifier>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_disabled_config_yields_log_notifier() {
        let notifier = create_notifier(&NotificationConfig::default()).unwrap();
        assert_eq!(notifier.name(), "log");
    }

    #[test]
    fn test_enabled_config_yields_mail_relay() {
        let config = NotificationConfig {
            enabled: true,
            endpoint: "https://mail.example.com/send".to_string(),
            api_key: Some(secret_string("key".to_string())),
            ..Default::default()
        };
        let notifier = create_notifier(&config).unwrap();
        assert_eq!(notifier.name(), "mail_relay");
    }
}
