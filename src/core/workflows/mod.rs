//! Clinic workflows
//!
//! - [`clinic`] - The [`Clinic`] composition layer
//! - [`forms`] - Caller input
//! - [`views`] - Read models returned to the caller
//!
//! Every role-scoped operation takes the caller's [`Session`](crate::core::session::Session)
//! explicitly and checks it before touching the stores.

pub mod clinic;
pub mod forms;
pub mod views;

pub use clinic::Clinic;
pub use forms::{BookingForm, DiagnosisForm, ForgotPasswordForm, LoginForm};
pub use views::{Dashboard, DoctorAppointmentView, ForgotPasswordOutcome, PatientAppointmentView};
