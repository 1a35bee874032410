//! External system integrations for MedTrack.
//!
//! - [`notify`] - Delivery of booking notices to doctors
//!
//! Adapters isolate outbound I/O behind traits so the clinic workflows can be
//! exercised with in-process implementations.
//!
//! ```rust,no_run
//! use medtrack::adapters::notify::{create_notifier, NotificationGateway};
//! use medtrack::config::NotificationConfig;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NotificationConfig::default();
//! let notifier = create_notifier(&config)?;
//! let gateway = NotificationGateway::new(notifier, Duration::from_secs(config.timeout_seconds));
//! gateway.booking_notice("doctor@example.com", "2025-01-10", "10:00", "cough");
//! # Ok(())
//! # }
//! ```

pub mod notify;
