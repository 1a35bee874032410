//! Read models returned by the workflows

use crate::core::ledger::AppointmentSummary;
use crate::domain::{Appointment, DoctorListing, PublicProfile};
use serde::Serialize;

/// Dashboard for the session user
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user: PublicProfile,
    /// Appointments in booking order
    pub appointments: Vec<Appointment>,
    #[serde(flatten)]
    pub summary: AppointmentSummary,
    /// Doctors available for booking (patient dashboard only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doctors: Vec<DoctorListing>,
}

/// Appointment as seen by its patient
#[derive(Debug, Clone, Serialize)]
pub struct PatientAppointmentView {
    pub appointment: Appointment,
    pub doctor: PublicProfile,
}

/// Appointment as seen by a doctor
#[derive(Debug, Clone, Serialize)]
pub struct DoctorAppointmentView {
    pub appointment: Appointment,
    pub patient: PublicProfile,
}

/// Result of a password reset request
///
/// Identical whether or not the email is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordOutcome {
    pub message: String,
    pub simulated: bool,
}

impl ForgotPasswordOutcome {
    pub(crate) fn simulated() -> Self {
        Self {
            message: "If that email is registered, a password reset link has been sent (simulated)."
                .to_string(),
            simulated: true,
        }
    }
}
