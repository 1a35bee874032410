//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "medtrack.toml")]
    pub output: String,

    /// Include every section with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing MedTrack configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your secrets:");
                println!("     - MEDTRACK_SESSION_SECRET (at least 32 characters)");
                println!("     - MEDTRACK_MAIL_API_KEY (if notifications are enabled)");
                println!("  3. Validate configuration: medtrack validate-config");
                println!("  4. Start the service: medtrack serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# MedTrack Configuration File

environment = "development"

[application]
log_level = "info"

[server]
host = "127.0.0.1"
port = 5000

[session]
secret = "${MEDTRACK_SESSION_SECRET}"
# Plain HTTP during local development only
cookie_secure = false
"#
        .to_string()
    }

    /// Generate configuration with every section documented
    fn generate_config_with_examples() -> String {
        r#"# MedTrack Configuration File
# Clinic appointment tracker
#
# Values of the form ${VAR_NAME} are read from the environment (or a .env file).
# Any key can also be overridden with MEDTRACK_<SECTION>_<KEY>, for example
# MEDTRACK_SERVER_PORT=8080.

# Runtime environment: development | staging | production
# Production requires secure cookies and an https:// mail relay.
environment = "development"

# ============================================================================
# Application Configuration
# ============================================================================
[application]
# Log level: trace | debug | info | warn | error
log_level = "info"

# ============================================================================
# HTTP Server
# ============================================================================
[server]
host = "127.0.0.1"
port = 5000

# Worker threads (0 = one per CPU)
workers = 0

# ============================================================================
# Sessions
# ============================================================================
[session]
# Signing secret for session tokens (at least 32 characters)
secret = "${MEDTRACK_SESSION_SECRET}"

cookie_name = "medtrack_session"

# Only send the session cookie over HTTPS. Must be true in production.
cookie_secure = false

# Sessions expire this many minutes after login
max_age_minutes = 480

# ============================================================================
# Security
# ============================================================================
[security]
# Bcrypt cost factor (4-31)
bcrypt_cost = 12

# Restrict the doctor appointment view and diagnosis submission to the
# doctor the appointment is assigned to
enforce_doctor_ownership = false

# ============================================================================
# Booking Notifications
# ============================================================================
[notifications]
# When disabled, booking notices are written to the log only
enabled = false

# Mail relay accepting {"from", "to", "subject", "html"} as JSON
endpoint = "https://mail-relay.example.com/v1/messages"
# api_key = "${MEDTRACK_MAIL_API_KEY}"
sender = "noreply@medtrack.local"

# Upper bound for one notice, retries included
timeout_seconds = 10

# Upper bound for a single relay request (below timeout_seconds)
request_timeout_seconds = 3

[notifications.retry]
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 5000
backoff_multiplier = 2.0

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Write JSON logs to rolling files
local_enabled = false
local_path = "/var/log/medtrack"

# Rotation: daily | hourly
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MedTrackConfig;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "medtrack.toml".to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.output, "medtrack.toml");
        assert!(!args.with_examples);
    }

    #[test]
    fn test_generated_configs_parse() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: MedTrackConfig = toml::from_str(&content).unwrap();
            assert_eq!(config.server.port, 5000);
            assert!(!config.session.cookie_secure);
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("medtrack.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&output)
            .unwrap()
            .contains("MEDTRACK_SESSION_SECRET"));
    }
}
