//! User records
//!
//! A user is either a patient or a doctor. The role is fixed at registration and
//! carried by the role-specific [`Profile`].

use super::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a user registers and logs in with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            other => Err(format!(
                "Invalid role '{other}'. Must be one of: patient, doctor"
            )),
        }
    }
}

/// Role-specific attributes captured at signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Patient {
        age: Option<u32>,
        address: Option<String>,
        mobile: Option<String>,
    },
    Doctor {
        age: Option<u32>,
        specialization: Option<String>,
        mobile: Option<String>,
    },
}

impl Profile {
    /// Role implied by the profile variant
    pub fn role(&self) -> Role {
        match self {
            Profile::Patient { .. } => Role::Patient,
            Profile::Doctor { .. } => Role::Doctor,
        }
    }

    pub fn age(&self) -> Option<u32> {
        match self {
            Profile::Patient { age, .. } | Profile::Doctor { age, .. } => *age,
        }
    }

    pub fn mobile(&self) -> Option<&str> {
        match self {
            Profile::Patient { mobile, .. } | Profile::Doctor { mobile, .. } => mobile.as_deref(),
        }
    }

    /// Doctor specialization, `None` for patients
    pub fn specialization(&self) -> Option<&str> {
        match self {
            Profile::Doctor { specialization, .. } => specialization.as_deref(),
            Profile::Patient { .. } => None,
        }
    }
}

/// One-way password digest
///
/// Debug output is redacted so digests never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

/// Registered user
///
/// Owned exclusively by the identity store. Never mutated or deleted after
/// registration.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique across all users, compared exactly as entered
    pub email: String,
    pub password_digest: PasswordDigest,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn is_doctor(&self) -> bool {
        self.role() == Role::Doctor
    }

    /// View of the user that is safe to hand to other callers
    pub fn public_profile(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            profile: self.profile.clone(),
        }
    }
}

/// User fields without credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub profile: Profile,
}

/// Entry of the doctor directory shown to patients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorListing {
    pub id: UserId,
    pub name: String,
    pub specialization: Option<String>,
}

impl From<&User> for DoctorListing {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            specialization: user.profile.specialization().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor() -> User {
        User {
            id: UserId::generate(),
            name: "Dr. Grey".to_string(),
            email: "d@x.com".to_string(),
            password_digest: PasswordDigest::new("$2b$04$abcdefghijklmnopqrstuv"),
            profile: Profile::Doctor {
                age: Some(41),
                specialization: Some("Cardiology".to_string()),
                mobile: None,
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::from_str("patient").unwrap(), Role::Patient);
        assert_eq!(Role::from_str(" doctor ").unwrap(), Role::Doctor);
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("Doctor").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_profile_role() {
        let user = doctor();
        assert_eq!(user.role(), Role::Doctor);
        assert!(user.is_doctor());
        assert_eq!(user.profile.specialization(), Some("Cardiology"));
        assert_eq!(user.profile.age(), Some(41));
    }

    #[test]
    fn test_digest_debug_redacted() {
        let user = doctor();
        let debug_output = format!("{user:?}");
        assert!(!debug_output.contains("$2b$04$"));
        assert!(debug_output.contains("REDACTED"));
    }

    #[test]
    fn test_public_profile_serialization() {
        let user = doctor();
        let json = serde_json::to_value(user.public_profile()).unwrap();
        assert_eq!(json["role"], "doctor");
        assert_eq!(json["specialization"], "Cardiology");
        assert_eq!(json["email"], "d@x.com");
        assert!(json.get("password_digest").is_none());
    }

    #[test]
    fn test_doctor_listing_from_user() {
        let user = doctor();
        let listing = DoctorListing::from(&user);
        assert_eq!(listing.id, user.id);
        assert_eq!(listing.specialization.as_deref(), Some("Cardiology"));
    }
}
