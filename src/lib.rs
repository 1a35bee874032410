// MedTrack - Clinic Appointment Tracker
// Copyright (c) 2025 MedTrack Contributors
// Licensed under the MIT License

//! # MedTrack - Clinic Appointment Tracker
//!
//! MedTrack lets patients and doctors register, log in, book appointments and
//! record diagnoses. Doctors are notified of new bookings in the background.
//!
//! ## Overview
//!
//! This library provides:
//! - **Identity**: role-aware signup and login with bcrypt password digests
//! - **Appointments**: an in-memory ledger with per-patient and per-doctor views
//! - **Sessions**: explicit session values, carried over HTTP in signed cookies
//! - **Notifications**: fire-and-forget booking notices through a mail relay
//!
//! All records live in memory for the life of the process.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (identity, ledger, session, workflows)
//! - [`adapters`] - External integrations (mail relay)
//! - [`server`] - HTTP surface (actix-web)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medtrack::config::load_config;
//! use medtrack::core::identity::SignupForm;
//! use medtrack::core::workflows::Clinic;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("medtrack.toml")?;
//!     let clinic = Clinic::from_config(&config)?;
//!
//!     let user_id = clinic.signup(SignupForm::default()).await?;
//!     println!("Registered {user_id}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every workflow returns [`domain::Result`]. Each [`domain::ClinicError`] carries
//! a caller-safe message and the screen to return to:
//!
//! ```rust
//! use medtrack::domain::{ClinicError, Redirect, Role};
//!
//! let err = ClinicError::AccessDenied;
//! assert_eq!(err.redirect(Some(Role::Patient)), Redirect::PatientDashboard);
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
