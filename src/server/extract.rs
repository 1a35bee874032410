//! Session extractor
//!
//! Resolves the session cookie against the session registry. A missing, forged
//! or cleared token yields an anonymous caller; the workflows decide whether
//! that is acceptable.

use super::error::ApiError;
use super::state::AppState;
use crate::core::session::Session;
use crate::domain::{ClinicError, Role};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::Future;
use std::pin::Pin;

/// Caller's session for one request
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    session: Option<Session>,
    token: Option<String>,
}

impl CurrentSession {
    pub fn get(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.role)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Pair a workflow error with this caller's role
    pub fn error(&self, err: ClinicError) -> ApiError {
        ApiError::new(err, self.role())
    }
}

impl FromRequest for CurrentSession {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = state.as_ref().and_then(|s| s.cookies.token(req));

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                ApiError::from(ClinicError::Internal(
                    "application state not configured".to_string(),
                ))
            })?;

            let session = match &token {
                Some(token) => state.sessions.resolve(token).await,
                None => None,
            };

            Ok(Self { session, token })
        })
    }
}
