//! In-memory identity store
//!
//! Holds every registered user keyed by identifier, with an email index that
//! enforces uniqueness. Records are append-only: no update or delete path exists,
//! so identifiers handed out stay resolvable for the life of the process.

use super::registration::Registration;
use crate::domain::{ClinicError, PasswordDigest, Result, Role, User, UserId};
use chrono::Utc;
use std::collections::HashMap;

/// User records plus indexes
#[derive(Debug, Default)]
pub struct IdentityStore {
    users: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
    /// Registration order
    order: Vec<UserId>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a validated registration under a fresh identifier
    ///
    /// The password must already be hashed; only the digest is kept.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::DuplicateEmail` if the email is already registered.
    /// The store is left unchanged in that case.
    pub fn register(&mut self, registration: Registration, digest: PasswordDigest) -> Result<UserId> {
        if self.by_email.contains_key(&registration.email) {
            return Err(ClinicError::DuplicateEmail(registration.email));
        }

        let id = UserId::generate();
        let user = User {
            id,
            name: registration.name,
            email: registration.email,
            password_digest: digest,
            profile: registration.profile,
            created_at: Utc::now(),
        };

        self.by_email.insert(user.email.clone(), id);
        self.order.push(id);
        self.users.insert(id, user);

        Ok(id)
    }

    /// Whether an email is already taken
    pub fn contains_email(&self, email: &str) -> bool {
        self.by_email.contains_key(email)
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.by_email.get(email).and_then(|id| self.users.get(id))
    }

    /// Look up the user an authentication attempt refers to
    ///
    /// Role is part of the match key: a registered email under a different role
    /// yields `None`, exactly like an unknown email.
    pub fn find_for_login(&self, role: Role, email: &str) -> Option<&User> {
        self.find_by_email(email).filter(|u| u.role() == role)
    }

    /// Resolve a doctor by identifier
    pub fn doctor(&self, id: &UserId) -> Option<&User> {
        self.get(id).filter(|u| u.is_doctor())
    }

    /// Doctors in registration order
    pub fn doctors(&self) -> impl Iterator<Item = &User> {
        self.order
            .iter()
            .filter_map(|id| self.users.get(id))
            .filter(|u| u.is_doctor())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
