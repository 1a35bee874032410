//! Password hashing capability
//!
//! The identity store only ever sees digests. Hashing and verification sit behind
//! the [`PasswordHasher`] trait; [`BcryptHasher`] is the production implementation.

use crate::domain::{ClinicError, PasswordDigest, Result};
use async_trait::async_trait;

/// Bcrypt cost used when the configuration does not override it
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// One-way password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password into a salted digest
    async fn hash(&self, password: &str) -> Result<PasswordDigest>;

    /// Check a plain-text password against a digest
    ///
    /// Returns `Ok(false)` for a mismatch; `Err` only if verification could not run.
    async fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool>;
}

/// Bcrypt-backed hasher
///
/// Bcrypt is CPU-bound, so both operations run on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<PasswordDigest> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || {
            bcrypt::hash(password, cost)
                .map(PasswordDigest::new)
                .map_err(|e| ClinicError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| ClinicError::Hashing(format!("Task join error: {e}")))?
    }

    async fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool> {
        let password = password.to_string();
        let digest = digest.as_str().to_string();

        tokio::task::spawn_blocking(move || {
            bcrypt::verify(password, &digest).map_err(|e| ClinicError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| ClinicError::Hashing(format!("Task join error: {e}")))?
    }
}
