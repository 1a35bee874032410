//! In-memory appointment ledger
//!
//! Appointments are kept in an arena keyed by identifier plus an insertion-order
//! index. Records are never removed; the only mutation after creation is the
//! diagnosis submission.

use crate::core::identity::IdentityStore;
use crate::domain::{
    Appointment, AppointmentId, ClinicError, Diagnosis, NewAppointment, Result, UserId,
};
use std::collections::HashMap;

/// Appointment records plus insertion order
#[derive(Debug, Default)]
pub struct AppointmentLedger {
    records: HashMap<AppointmentId, Appointment>,
    order: Vec<AppointmentId>,
}

impl AppointmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new pending appointment
    ///
    /// Both references are resolved against the identity store before anything
    /// is written, so a failed create leaves the ledger untouched.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::NotFound` if `doctor_id` is not a registered doctor or
    /// `patient_id` is not a registered patient.
    pub fn create(&mut self, users: &IdentityStore, request: NewAppointment) -> Result<AppointmentId> {
        if users.doctor(&request.doctor_id).is_none() {
            return Err(ClinicError::NotFound(format!(
                "Doctor {} not found.",
                request.doctor_id
            )));
        }

        let patient = users
            .get(&request.patient_id)
            .filter(|u| !u.is_doctor())
            .ok_or_else(|| {
                ClinicError::NotFound(format!("Patient {} not found.", request.patient_id))
            })?;

        let id = AppointmentId::generate();
        let appointment = Appointment::new(id, patient.email.clone(), request);

        self.order.push(id);
        self.records.insert(id, appointment);

        Ok(id)
    }

    pub fn get(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.records.get(id)
    }

    /// Appointments booked under a patient email, in insertion order
    pub fn list_for_patient(&self, patient_email: &str) -> Vec<&Appointment> {
        self.iter()
            .filter(|a| a.patient_email() == patient_email)
            .collect()
    }

    /// Appointments assigned to a doctor, in insertion order
    pub fn list_for_doctor(&self, doctor_id: &UserId) -> Vec<&Appointment> {
        self.iter().filter(|a| a.doctor_id() == *doctor_id).collect()
    }

    /// Record a diagnosis and mark the appointment completed
    ///
    /// Re-submitting on a completed appointment overwrites the earlier diagnosis.
    /// Returns the diagnosis that was replaced, if any.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::NotFound` if the identifier is unknown; nothing is
    /// mutated in that case.
    pub fn submit_diagnosis(
        &mut self,
        id: &AppointmentId,
        diagnosis: Diagnosis,
    ) -> Result<Option<Diagnosis>> {
        let appointment = self
            .records
            .get_mut(id)
            .ok_or_else(|| ClinicError::NotFound("Appointment not found.".to_string()))?;

        Ok(appointment.complete(diagnosis))
    }

    /// All appointments in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
