//! Core business logic for MedTrack.
//!
//! # Modules
//!
//! - [`identity`] - User registration, password hashing and the identity store
//! - [`ledger`] - Appointment ledger and dashboard counts
//! - [`session`] - Authenticated caller context and signed session tokens
//! - [`workflows`] - Signup, login, booking, diagnosis and the other clinic workflows
//!
//! # Booking Workflow
//!
//! 1. **Signup**: patient and doctor register with role-specific profiles
//! 2. **Login**: each authenticates with email, password and declared role
//! 3. **Book**: the patient picks a doctor, date and time
//! 4. **Notify**: the doctor is notified in the background
//! 5. **Diagnose**: the doctor records a diagnosis, completing the appointment
//!
//! # Example
//!
//! ```rust,no_run
//! use medtrack::config::load_config;
//! use medtrack::core::workflows::{BookingForm, Clinic, LoginForm};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medtrack.toml")?;
//! let clinic = Clinic::from_config(&config)?;
//!
//! let session = clinic.login(LoginForm::default()).await?;
//! let dashboard = clinic.patient_dashboard(Some(&session)).await?;
//!
//! println!("Total: {}", dashboard.summary.total);
//! println!("Pending: {}", dashboard.summary.pending);
//! println!("Completed: {}", dashboard.summary.completed);
//! # Ok(())
//! # }
//! ```

pub mod identity;
pub mod ledger;
pub mod session;
pub mod workflows;
