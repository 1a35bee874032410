//! Booking notifications
//!
//! - [`traits`] - The [`Notifier`] abstraction
//! - [`http`] - Mail relay delivery over HTTP
//! - [`log`] - Log-only delivery for deployments without a relay
//! - [`gateway`] - Background dispatch with timeout
//! - [`factory`] - Notifier selection from configuration

pub mod factory;
pub mod gateway;
pub mod http;
pub mod log;
pub mod traits;

pub use factory::create_notifier;
pub use gateway::{booking_notification, NotificationGateway, BOOKING_SUBJECT};
pub use http::HttpMailNotifier;
pub use log::LogNotifier;
pub use traits::{Notification, Notifier};
