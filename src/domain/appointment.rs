//! Appointment records and their lifecycle
//!
//! An appointment is created `Pending` and moves to `Completed` when a doctor
//! submits a diagnosis. Diagnosis fields exist only on completed appointments;
//! the only mutator, [`Appointment::complete`], sets both together.

use super::ids::{AppointmentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => f.write_str("Pending"),
            AppointmentStatus::Completed => f.write_str("Completed"),
        }
    }
}

/// Outcome recorded by the doctor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub diagnosis: String,
    pub treatment_plan: String,
    pub prescription: String,
}

/// Booking request resolved to identifiers
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: UserId,
    pub doctor_id: UserId,
    pub date: String,
    pub time: String,
    pub symptoms: String,
}

/// Appointment record owned by the ledger
///
/// References its patient and doctor by identifier only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    id: AppointmentId,
    patient_id: UserId,
    patient_email: String,
    doctor_id: UserId,
    date: String,
    time: String,
    symptoms: String,
    status: AppointmentStatus,
    #[serde(flatten)]
    outcome: Option<Diagnosis>,
    created_at: DateTime<Utc>,
}

impl Appointment {
    /// Creates a pending appointment stamped with the current time
    pub fn new(id: AppointmentId, patient_email: impl Into<String>, request: NewAppointment) -> Self {
        Self {
            id,
            patient_id: request.patient_id,
            patient_email: patient_email.into(),
            doctor_id: request.doctor_id,
            date: request.date,
            time: request.time,
            symptoms: request.symptoms,
            status: AppointmentStatus::Pending,
            outcome: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn patient_id(&self) -> UserId {
        self.patient_id
    }

    pub fn patient_email(&self) -> &str {
        &self.patient_email
    }

    pub fn doctor_id(&self) -> UserId {
        self.doctor_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        self.outcome.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == AppointmentStatus::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.status == AppointmentStatus::Completed
    }

    /// Records the diagnosis and marks the appointment completed
    ///
    /// Completing an already completed appointment replaces the previous diagnosis.
    /// Returns the replaced diagnosis, if any.
    pub fn complete(&mut self, diagnosis: Diagnosis) -> Option<Diagnosis> {
        self.status = AppointmentStatus::Completed;
        self.outcome.replace(diagnosis)
    }
}
