//! Shared application state

use super::cookie::CookieSettings;
use crate::config::MedTrackConfig;
use crate::core::session::SessionRegistry;
use crate::core::workflows::Clinic;
use crate::domain::Result;
use std::time::Duration;

/// State shared by every worker
pub struct AppState {
    pub clinic: Clinic,
    pub sessions: SessionRegistry,
    pub cookies: CookieSettings,
}

impl AppState {
    pub fn new(clinic: Clinic, sessions: SessionRegistry, cookies: CookieSettings) -> Self {
        Self {
            clinic,
            sessions,
            cookies,
        }
    }

    /// Build state from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the clinic cannot be created
    pub fn from_config(config: &MedTrackConfig) -> Result<Self> {
        Ok(Self::new(
            Clinic::from_config(config)?,
            SessionRegistry::new(config.session.secret.clone())
                .with_max_age(Duration::from_secs(config.session.max_age_minutes * 60)),
            CookieSettings {
                name: config.session.cookie_name.clone(),
                secure: config.session.cookie_secure,
            },
        ))
    }
}
