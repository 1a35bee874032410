//! Caller input for the session-scoped workflows
//!
//! Every field is optional at the type level so that a missing field surfaces as
//! a workflow error rather than a deserialization failure.

use crate::config::SecretString;
use crate::domain::Diagnosis;
use serde::Deserialize;

/// Login form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(alias = "userType")]
    pub role: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

/// Appointment booking form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingForm {
    pub doctor_id: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub symptoms: Option<String>,
}

/// Diagnosis submission form
///
/// Blank fields are stored as empty text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagnosisForm {
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    pub prescription: Option<String>,
}

impl From<DiagnosisForm> for Diagnosis {
    fn from(form: DiagnosisForm) -> Self {
        Diagnosis {
            diagnosis: form.diagnosis.unwrap_or_default(),
            treatment_plan: form.treatment_plan.unwrap_or_default(),
            prescription: form.prescription.unwrap_or_default(),
        }
    }
}

/// Password reset request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgotPasswordForm {
    pub email: Option<String>,
}
