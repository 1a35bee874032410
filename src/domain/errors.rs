//! Domain error types
//!
//! This module defines the error hierarchy for MedTrack. Workflow errors carry a
//! user-visible message and know which screen the caller should be sent back to.
//! Errors never expose third-party types.

use super::user::Role;
use thiserror::Error;

/// Main MedTrack error type
///
/// Every workflow failure is recovered at the workflow boundary; none of these
/// variants is fatal to the process.
#[derive(Debug, Error)]
pub enum ClinicError {
    /// Missing or mismatched form fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Signup with an email that is already registered
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Unknown email, wrong password or mismatched role.
    ///
    /// Carries no detail on purpose: the three cases must be indistinguishable.
    #[error("Invalid credentials or role mismatch")]
    InvalidCredentials,

    /// Session missing, wrong role, or the session user no longer resolves
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid session that does not own the requested resource
    #[error("Access denied")]
    AccessDenied,

    /// Appointment or doctor identifier did not resolve
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Outbound notification failures (logged, never surfaced by workflows)
    #[error("Notification error: {0}")]
    Notification(String),

    /// Password hashing or verification failed to run
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Unexpected internal faults (e.g. a dangling identifier reference)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Screen a caller is sent back to after a workflow error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Signup,
    PatientDashboard,
    DoctorDashboard,
    Home,
}

impl Redirect {
    /// Path of the screen
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::Login => "/login",
            Redirect::Signup => "/signup",
            Redirect::PatientDashboard => "/patient/dashboard",
            Redirect::DoctorDashboard => "/doctor/dashboard",
            Redirect::Home => "/",
        }
    }
}

impl Redirect {
    /// Dashboard of a role, or the landing page without a session
    pub fn dashboard(role: Option<Role>) -> Self {
        match role {
            Some(Role::Patient) => Redirect::PatientDashboard,
            Some(Role::Doctor) => Redirect::DoctorDashboard,
            None => Redirect::Home,
        }
    }
}

impl ClinicError {
    /// Safe prior screen for the caller
    ///
    /// `role` is the role of the caller's session, if any.
    pub fn redirect(&self, role: Option<Role>) -> Redirect {
        match self {
            ClinicError::InvalidCredentials | ClinicError::Unauthorized(_) => Redirect::Login,
            ClinicError::Validation(_) | ClinicError::DuplicateEmail(_) if role.is_none() => {
                Redirect::Signup
            }
            _ => Redirect::dashboard(role),
        }
    }

    /// Short machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            ClinicError::Validation(_) => "validation_error",
            ClinicError::DuplicateEmail(_) => "duplicate_email",
            ClinicError::InvalidCredentials => "invalid_credentials",
            ClinicError::Unauthorized(_) => "unauthorized",
            ClinicError::AccessDenied => "access_denied",
            ClinicError::NotFound(_) => "not_found",
            _ => "internal_error",
        }
    }

    /// Message safe to show to the caller
    ///
    /// Internal faults collapse into a generic message; their detail goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            ClinicError::Validation(msg) => msg.clone(),
            ClinicError::DuplicateEmail(_) => "Email already registered.".to_string(),
            ClinicError::InvalidCredentials => "Invalid credentials or role mismatch.".to_string(),
            ClinicError::Unauthorized(msg) => msg.clone(),
            ClinicError::AccessDenied => "Access denied.".to_string(),
            ClinicError::NotFound(msg) => msg.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Whether the error is a caller mistake rather than a service fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClinicError::Validation(_)
                | ClinicError::DuplicateEmail(_)
                | ClinicError::InvalidCredentials
                | ClinicError::Unauthorized(_)
                | ClinicError::AccessDenied
                | ClinicError::NotFound(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ClinicError {
    fn from(err: std::io::Error) -> Self {
        ClinicError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ClinicError {
    fn from(err: serde_json::Error) -> Self {
        ClinicError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ClinicError {
    fn from(err: toml::de::Error) -> Self {
        ClinicError::Configuration(format!("TOML parse error: {err}"))
    }
}
