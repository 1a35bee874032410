//! Domain models and types for MedTrack.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`UserId`], [`AppointmentId`])
//! - **Domain models** ([`User`], [`Profile`], [`Appointment`], [`Diagnosis`])
//! - **Error types** ([`ClinicError`], [`Redirect`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes so a user ID can never be passed where an
//! appointment ID is expected:
//!
//! ```rust
//! use medtrack::domain::{AppointmentId, UserId};
//!
//! let doctor = UserId::generate();
//! let appointment = AppointmentId::generate();
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: UserId = appointment;
//! # let _ = (doctor, appointment);
//! ```

pub mod appointment;
pub mod errors;
pub mod ids;
pub mod result;
pub mod user;

// Re-export commonly used types for convenience
pub use appointment::{Appointment, AppointmentStatus, Diagnosis, NewAppointment};
pub use errors::{ClinicError, Redirect};
pub use ids::{AppointmentId, UserId};
pub use result::Result;
pub use user::{DoctorListing, PasswordDigest, Profile, PublicProfile, Role, User};
