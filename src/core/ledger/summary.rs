//! Dashboard counts derived from appointment lists

use crate::domain::{Appointment, AppointmentStatus};
use serde::{Deserialize, Serialize};

/// Appointment counts for one patient or one doctor
///
/// Always derived on demand, never stored.
///
/// # Examples
///
/// ```
/// use medtrack::core::ledger::AppointmentSummary;
///
/// let summary = AppointmentSummary::from_appointments(std::iter::empty());
/// assert_eq!(summary.total, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl AppointmentSummary {
    pub fn from_appointments<'a>(appointments: impl IntoIterator<Item = &'a Appointment>) -> Self {
        appointments
            .into_iter()
            .fold(Self::default(), |mut summary, appt| {
                summary.total += 1;
                match appt.status() {
                    AppointmentStatus::Pending => summary.pending += 1,
                    AppointmentStatus::Completed => summary.completed += 1,
                }
                summary
            })
    }
}
