//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MedTrackConfig;
use super::secret::secret_string;
use crate::domain::errors::ClinicError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MedTrackConfig
/// 4. Applies environment variable overrides (MEDTRACK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use medtrack::config::loader::load_config;
///
/// let config = load_config("medtrack.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MedTrackConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ClinicError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ClinicError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MedTrackConfig = toml::from_str(&contents)
        .map_err(|e| ClinicError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ClinicError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ClinicError::Internal(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ClinicError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using MEDTRACK_* prefix
///
/// Environment variables follow the pattern: MEDTRACK_<SECTION>_<KEY>
/// For example: MEDTRACK_SERVER_PORT, MEDTRACK_NOTIFICATIONS_ENABLED.
/// Unparsable numeric or boolean values are ignored.
fn apply_env_overrides(config: &mut MedTrackConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("MEDTRACK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("MEDTRACK_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("MEDTRACK_SERVER_PORT") {
        if let Ok(port) = val.parse() {
            config.server.port = port;
        }
    }
    if let Ok(val) = std::env::var("MEDTRACK_SERVER_WORKERS") {
        if let Ok(workers) = val.parse() {
            config.server.workers = workers;
        }
    }

    // Session overrides
    if let Ok(val) = std::env::var("MEDTRACK_SESSION_SECRET") {
        config.session.secret = secret_string(val);
    }
    if let Ok(val) = std::env::var("MEDTRACK_SESSION_MAX_AGE_MINUTES") {
        if let Ok(minutes) = val.parse() {
            config.session.max_age_minutes = minutes;
        }
    }
    if let Ok(val) = std::env::var("MEDTRACK_SESSION_COOKIE_SECURE") {
        if let Ok(secure) = val.parse() {
            config.session.cookie_secure = secure;
        }
    }

    // Security overrides
    if let Ok(val) = std::env::var("MEDTRACK_SECURITY_BCRYPT_COST") {
        if let Ok(cost) = val.parse() {
            config.security.bcrypt_cost = cost;
        }
    }
    if let Ok(val) = std::env::var("MEDTRACK_SECURITY_ENFORCE_DOCTOR_OWNERSHIP") {
        if let Ok(enforce) = val.parse() {
            config.security.enforce_doctor_ownership = enforce;
        }
    }

    // Notification overrides
    if let Ok(val) = std::env::var("MEDTRACK_NOTIFICATIONS_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.notifications.enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("MEDTRACK_NOTIFICATIONS_ENDPOINT") {
        config.notifications.endpoint = val;
    }
    if let Ok(val) = std::env::var("MEDTRACK_NOTIFICATIONS_API_KEY") {
        config.notifications.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("MEDTRACK_NOTIFICATIONS_SENDER") {
        config.notifications.sender = val;
    }
    if let Ok(val) = std::env::var("MEDTRACK_NOTIFICATIONS_REQUEST_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.notifications.request_timeout_seconds = seconds;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MEDTRACK_LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("MEDTRACK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
