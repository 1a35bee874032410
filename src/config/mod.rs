//! Configuration management for MedTrack.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! MedTrack uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MEDTRACK_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use medtrack::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medtrack.toml")?;
//!
//! println!("Listening on: {}", config.server.bind_address());
//! println!("Notifications enabled: {}", config.notifications.enabled);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ServerConfig`] - HTTP listener
//! - [`SessionConfig`] - Session signing secret and cookie
//! - [`SecurityConfig`] - Bcrypt cost and doctor ownership enforcement
//! - [`NotificationConfig`] - Mail relay for booking notices
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [session]
//! secret = "${MEDTRACK_SESSION_SECRET}"
//!
//! [notifications]
//! enabled = true
//! endpoint = "https://mail-relay.example.com/v1/messages"
//! api_key = "${MEDTRACK_MAIL_API_KEY}"
//! sender = "noreply@clinic.example.com"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, Environment, LoggingConfig, MedTrackConfig, NotificationConfig,
    RetryConfig, SecurityConfig, ServerConfig, SessionConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
