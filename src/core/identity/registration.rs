//! Signup input validation
//!
//! Turns a raw signup form into a [`Registration`] with a parsed role and
//! role-specific profile. Password hashing happens later, outside the store lock.

use crate::config::SecretString;
use crate::domain::{ClinicError, Profile, Result, Role};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::str::FromStr;

const MISSING_FIELDS: &str = "Please fill in all required fields.";
const PASSWORD_MISMATCH: &str = "Passwords do not match.";

/// Raw signup form as submitted by the caller
///
/// Field names follow the signup form, including the `userType` role selector and
/// the per-role age inputs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(rename = "userType", alias = "role")]
    pub user_type: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub confirm_password: Option<SecretString>,
    pub patient_age: Option<String>,
    pub doctor_age: Option<String>,
    pub address: Option<String>,
    pub specialization: Option<String>,
    pub mobile: Option<String>,
}

/// Validated signup request
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub profile: Profile,
}

impl Registration {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    /// Validate a signup form
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::Validation` if a required field is blank, the role is
    /// unknown, an age is not a whole number, or the two passwords differ.
    pub fn from_form(form: SignupForm) -> Result<Self> {
        let user_type = required(form.user_type)?;
        let name = required(form.name)?;
        let email = required(form.email)?;
        let password = required_secret(form.password)?;
        let confirm_password = required_secret(form.confirm_password)?;

        let role = Role::from_str(&user_type).map_err(ClinicError::Validation)?;

        if password.expose_secret().as_ref() != confirm_password.expose_secret().as_ref() {
            return Err(ClinicError::Validation(PASSWORD_MISMATCH.to_string()));
        }

        let profile = match role {
            Role::Patient => Profile::Patient {
                age: parse_age(form.patient_age)?,
                address: optional(form.address),
                mobile: optional(form.mobile),
            },
            Role::Doctor => Profile::Doctor {
                age: parse_age(form.doctor_age)?,
                specialization: optional(form.specialization),
                mobile: optional(form.mobile),
            },
        };

        Ok(Self {
            name,
            email,
            password,
            profile,
        })
    }
}

fn required(value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ClinicError::Validation(MISSING_FIELDS.to_string())),
    }
}

fn required_secret(value: Option<SecretString>) -> Result<SecretString> {
    match value {
        Some(v) if !v.expose_secret().is_empty() => Ok(v),
        _ => Err(ClinicError::Validation(MISSING_FIELDS.to_string())),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_age(value: Option<String>) -> Result<Option<u32>> {
    match optional(value) {
        None => Ok(None),
        Some(v) => v
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ClinicError::Validation(format!("Invalid age '{v}'."))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use test_case::test_case;

    fn patient_form() -> SignupForm {
        SignupForm {
            user_type: Some("patient".to_string()),
            name: Some("Pat".to_string()),
            email: Some("p@x.com".to_string()),
            password: Some(secret_string("hunter22".to_string())),
            confirm_password: Some(secret_string("hunter22".to_string())),
            patient_age: Some("34".to_string()),
            address: Some("1 Main St".to_string()),
            mobile: Some("555-0100".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_patient_form() {
        let registration = Registration::from_form(patient_form()).unwrap();
        assert_eq!(registration.role(), Role::Patient);
        assert_eq!(registration.email, "p@x.com");
        assert_eq!(
            registration.profile,
            Profile::Patient {
                age: Some(34),
                address: Some("1 Main St".to_string()),
                mobile: Some("555-0100".to_string()),
            }
        );
    }

    #[test]
    fn test_valid_doctor_form_uses_doctor_fields() {
        let form = SignupForm {
            user_type: Some("doctor".to_string()),
            patient_age: Some("99".to_string()),
            doctor_age: Some("50".to_string()),
            specialization: Some("Neurology".to_string()),
            ..patient_form()
        };
        let registration = Registration::from_form(form).unwrap();
        assert_eq!(
            registration.profile,
            Profile::Doctor {
                age: Some(50),
                specialization: Some("Neurology".to_string()),
                mobile: Some("555-0100".to_string()),
            }
        );
    }

    #[test_case(|f: &mut SignupForm| f.user_type = None ; "missing role")]
    #[test_case(|f: &mut SignupForm| f.name = Some("   ".to_string()) ; "blank name")]
    #[test_case(|f: &mut SignupForm| f.email = None ; "missing email")]
    #[test_case(|f: &mut SignupForm| f.password = None ; "missing password")]
    #[test_case(|f: &mut SignupForm| f.confirm_password = Some(secret_string(String::new())) ; "empty confirmation")]
    fn test_missing_required_field(mutate: fn(&mut SignupForm)) {
        let mut form = patient_form();
        mutate(&mut form);
        let err = Registration::from_form(form).unwrap_err();
        assert_eq!(err.user_message(), MISSING_FIELDS);
    }

    #[test]
    fn test_password_mismatch() {
        let form = SignupForm {
            confirm_password: Some(secret_string("hunter23".to_string())),
            ..patient_form()
        };
        let err = Registration::from_form(form).unwrap_err();
        assert!(matches!(err, ClinicError::Validation(ref m) if m == PASSWORD_MISMATCH));
    }

    #[test]
    fn test_unknown_role() {
        let form = SignupForm {
            user_type: Some("nurse".to_string()),
            ..patient_form()
        };
        assert!(matches!(
            Registration::from_form(form),
            Err(ClinicError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_age() {
        let form = SignupForm {
            patient_age: Some("thirty".to_string()),
            ..patient_form()
        };
        assert!(matches!(
            Registration::from_form(form),
            Err(ClinicError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_optional_fields_are_dropped() {
        let form = SignupForm {
            patient_age: Some(" ".to_string()),
            address: Some(String::new()),
            ..patient_form()
        };
        let registration = Registration::from_form(form).unwrap();
        assert_eq!(registration.profile.age(), None);
    }

    #[test]
    fn test_signup_form_deserializes_user_type() {
        let form: SignupForm = serde_json::from_value(serde_json::json!({
            "userType": "doctor",
            "name": "Dr. Who",
            "password": "x",
        }))
        .unwrap();
        assert_eq!(form.user_type.as_deref(), Some("doctor"));
        assert!(form.password.is_some());
    }
}
