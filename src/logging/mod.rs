//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Human-readable console output
//! - JSON logs in rolling files (optional)
//! - Level from configuration, overridable with `RUST_LOG`
//!
//! Workflow events carry `user_id`, `appointment_id` and `role` fields. Passwords
//! and digests are never logged.
//!
//! # Example
//!
//! ```no_run
//! use medtrack::logging::init_logging;
//! use medtrack::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use medtrack::log_error_with_context;
/// use medtrack::domain::ClinicError;
///
/// let error = ClinicError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
