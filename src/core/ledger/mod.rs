//! Appointment ledger: appointment records and their derived counts

pub mod store;
pub mod summary;

pub use store::AppointmentLedger;
pub use summary::AppointmentSummary;
