//! Configuration schema types
//!
//! This module defines the configuration structure for MedTrack.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main MedTrack configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedTrackConfig {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Session cookie settings
    pub session: SessionConfig,

    /// Password hashing and access-control settings
    #[serde(default)]
    pub security: SecurityConfig,

    /// Booking notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MedTrackConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.session.validate(&self.environment)?;
        self.security.validate()?;
        self.notifications.validate(&self.environment)?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Worker threads (0 = one per CPU)
    #[serde(default)]
    pub workers: usize,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("server.host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("server.port must be between 1 and 65535".to_string());
        }
        Ok(())
    }

    /// Address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign session tokens
    /// Stored securely in memory and automatically zeroized on drop
    pub secret: SecretString,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Set the Secure flag on the session cookie
    ///
    /// Must stay `true` in production; only disable for local development over
    /// plain HTTP.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,

    /// Minutes after login before a session must log in again
    #[serde(default = "default_session_max_age_minutes")]
    pub max_age_minutes: u64,
}

impl SessionConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.secret.expose_secret().as_ref().len() < MIN_SESSION_SECRET_LENGTH {
            return Err(format!(
                "session.secret must be at least {MIN_SESSION_SECRET_LENGTH} characters"
            ));
        }

        if self.cookie_name.trim().is_empty() {
            return Err("session.cookie_name cannot be empty".to_string());
        }

        if self.max_age_minutes == 0 {
            return Err("session.max_age_minutes must be at least 1".to_string());
        }

        if *environment == Environment::Production && !self.cookie_secure {
            return Err(
                "session.cookie_secure cannot be disabled in production environments. \
                For local development over plain HTTP, set 'environment = \"development\"'."
                    .to_string(),
            );
        }

        Ok(())
    }
}

/// Minimum accepted length of the session secret
pub const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Password hashing and access-control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Bcrypt cost factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Restrict the doctor appointment view and diagnosis submission to the
    /// doctor the appointment is assigned to
    #[serde(default)]
    pub enforce_doctor_ownership: bool,
}

impl SecurityConfig {
    fn validate(&self) -> Result<(), String> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(format!(
                "security.bcrypt_cost must be between 4 and 31, got {}",
                self.bcrypt_cost
            ));
        }
        Ok(())
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
            enforce_doctor_ownership: false,
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries > 10 {
            return Err(format!(
                "notifications.retry.max_retries cannot exceed 10, got {}",
                self.max_retries
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err("notifications.retry.backoff_multiplier must be at least 1.0".to_string());
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Booking notification configuration
///
/// When disabled, notices are written to the log instead of being delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Deliver notices through the mail relay
    #[serde(default)]
    pub enabled: bool,

    /// Mail relay endpoint that accepts JSON messages
    #[serde(default)]
    pub endpoint: String,

    /// Bearer API key for the mail relay
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Sender address
    #[serde(default = "default_sender")]
    pub sender: String,

    /// Upper bound for one notice, retries included
    #[serde(default = "default_notification_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Upper bound for a single relay request
    ///
    /// Must be shorter than `timeout_seconds` or retries never get a chance.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl NotificationConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if !(1..=120).contains(&self.timeout_seconds) {
            return Err(format!(
                "notifications.timeout_seconds must be between 1 and 120, got {}",
                self.timeout_seconds
            ));
        }

        if self.request_timeout_seconds == 0 || self.request_timeout_seconds >= self.timeout_seconds
        {
            return Err(format!(
                "notifications.request_timeout_seconds must be at least 1 and below \
                timeout_seconds ({}), got {}",
                self.timeout_seconds, self.request_timeout_seconds
            ));
        }

        self.retry.validate()?;

        if !self.enabled {
            return Ok(());
        }

        let endpoint = url::Url::parse(&self.endpoint)
            .map_err(|e| format!("notifications.endpoint is not a valid URL: {e}"))?;

        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err("notifications.endpoint must start with http:// or https://".to_string());
        }

        if *environment == Environment::Production && endpoint.scheme() != "https" {
            return Err("notifications.endpoint must use https:// in production".to_string());
        }

        if self.sender.trim().is_empty() {
            return Err("notifications.sender cannot be empty".to_string());
        }

        if self
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().is_empty())
            .unwrap_or(true)
        {
            return Err(
                "notifications.api_key cannot be empty when notifications are enabled".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            api_key: None,
            sender: default_sender(),
            timeout_seconds: default_notification_timeout_seconds(),
            request_timeout_seconds: default_request_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rolling files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cookie_name() -> String {
    "medtrack_session".to_string()
}

fn default_true() -> bool {
    true
}

fn default_bcrypt_cost() -> u32 {
    crate::core::identity::DEFAULT_BCRYPT_COST
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    5000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_sender() -> String {
    "noreply@medtrack.local".to_string()
}

fn default_notification_timeout_seconds() -> u64 {
    10
}

fn default_request_timeout_seconds() -> u64 {
    3
}

fn default_session_max_age_minutes() -> u64 {
    480
}

fn default_local_path() -> String {
    "/var/log/medtrack".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
