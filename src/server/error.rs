//! HTTP mapping of workflow errors
//!
//! Every [`ClinicError`] becomes a status code plus a JSON body:
//!
//! ```json
//! {"error": "access_denied", "message": "Access denied.", "redirect": "/patient/dashboard"}
//! ```

use crate::domain::{ClinicError, Role};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

/// Workflow error paired with the caller's session role
#[derive(Debug)]
pub struct ApiError {
    inner: ClinicError,
    role: Option<Role>,
}

impl ApiError {
    pub fn new(inner: ClinicError, role: Option<Role>) -> Self {
        Self { inner, role }
    }

    pub fn inner(&self) -> &ClinicError {
        &self.inner
    }
}

impl From<ClinicError> for ApiError {
    fn from(inner: ClinicError) -> Self {
        Self { inner, role: None }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.inner {
            ClinicError::Validation(_) => StatusCode::BAD_REQUEST,
            ClinicError::DuplicateEmail(_) => StatusCode::CONFLICT,
            ClinicError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ClinicError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ClinicError::AccessDenied => StatusCode::FORBIDDEN,
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if !self.inner.is_client_error() {
            tracing::error!(error = %self.inner, "Request failed");
        }

        let body = json!({
            "error": self.inner.code(),
            "message": self.inner.user_message(),
            "redirect": self.inner.redirect(self.role).path(),
        });

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use test_case::test_case;

    #[test_case(ClinicError::Validation("x".into()), StatusCode::BAD_REQUEST ; "validation")]
    #[test_case(ClinicError::DuplicateEmail("p@x.com".into()), StatusCode::CONFLICT ; "duplicate email")]
    #[test_case(ClinicError::InvalidCredentials, StatusCode::UNAUTHORIZED ; "invalid credentials")]
    #[test_case(ClinicError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED ; "unauthorized")]
    #[test_case(ClinicError::AccessDenied, StatusCode::FORBIDDEN ; "access denied")]
    #[test_case(ClinicError::NotFound("x".into()), StatusCode::NOT_FOUND ; "not found")]
    #[test_case(ClinicError::Hashing("x".into()), StatusCode::INTERNAL_SERVER_ERROR ; "hashing")]
    fn test_status_codes(err: ClinicError, expected: StatusCode) {
        assert_eq!(ApiError::from(err).status_code(), expected);
    }

    #[actix_web::test]
    async fn test_error_body_hides_internal_detail() {
        let err = ApiError::new(
            ClinicError::Internal("dangling user reference".to_string()),
            Some(Role::Doctor),
        );
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["error"], "internal_error");
        assert_eq!(value["redirect"], "/doctor/dashboard");
        assert!(!value["message"].as_str().unwrap().contains("dangling"));
    }
}
