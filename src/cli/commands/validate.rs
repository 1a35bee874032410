//! Validate config command implementation
//!
//! This module implements the `validate-config` command. Secrets are never
//! printed.

use crate::config::{load_config, MedTrackConfig};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print_summary(&config);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}

fn print_summary(config: &MedTrackConfig) {
    println!("Configuration Summary:");
    println!("  Environment: {:?}", config.environment);
    println!("  Log Level: {}", config.application.log_level);
    println!("  Listen Address: {}", config.server.bind_address());
    println!("  Session Cookie: {}", config.session.cookie_name);
    println!("  Secure Cookie: {}", config.session.cookie_secure);
    println!("  Session Max Age: {} min", config.session.max_age_minutes);
    println!("  Session Secret: [REDACTED]");
    println!("  Bcrypt Cost: {}", config.security.bcrypt_cost);
    println!(
        "  Doctor Ownership Enforced: {}",
        config.security.enforce_doctor_ownership
    );

    if config.notifications.enabled {
        let key_set = config
            .notifications
            .api_key
            .as_ref()
            .map(|k| !k.expose_secret().is_empty())
            .unwrap_or(false);
        println!("  Notifications: mail relay");
        println!("  Relay Endpoint: {}", config.notifications.endpoint);
        println!("  Sender: {}", config.notifications.sender);
        println!("  API Key: {}", if key_set { "[SET]" } else { "[MISSING]" });
        println!(
            "  Timeout: {}s, max retries: {}",
            config.notifications.timeout_seconds, config.notifications.retry.max_retries
        );
    } else {
        println!("  Notifications: disabled (logged only)");
    }

    if config.logging.local_enabled {
        println!(
            "  File Logging: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        );
    }
    println!();
}
