//! Session context
//!
//! A [`Session`] records who the caller authenticated as and with which role. It
//! is passed explicitly into every role-scoped workflow; nothing reads ambient
//! session state.
//!
//! The [`SessionRegistry`] keeps live sessions for the HTTP surface. Callers hold
//! a signed token: a random session ID plus a SHA-256 digest keyed with the
//! configured session secret. Tokens that fail the signature check, or whose
//! session was cleared or outlived the registry's maximum age, resolve to
//! nothing. Expired entries are swept whenever a new session is established.

use crate::config::SecretString;
use crate::domain::Role;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Authenticated caller for one interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_email: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_email: impl Into<String>, role: Role) -> Self {
        Self {
            user_email: user_email.into(),
            role,
        }
    }
}

/// Sessions older than this are treated as logged out
pub const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(8 * 60 * 60);

struct Entry {
    session: Session,
    issued_at: Instant,
}

/// Live sessions keyed by session ID
///
/// Held in memory only; every session is lost on restart.
pub struct SessionRegistry {
    secret: SecretString,
    max_age: Duration,
    sessions: RwLock<HashMap<Uuid, Entry>>,
}

impl SessionRegistry {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            max_age: DEFAULT_SESSION_MAX_AGE,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Expire sessions after `max_age` regardless of activity
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Store a session and return the signed token that refers to it
    pub async fn establish(&self, session: Session) -> String {
        let id = Uuid::new_v4();
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.issued_at) < self.max_age);
        let swept = before - sessions.len();
        if swept > 0 {
            tracing::debug!(swept, "Expired sessions removed");
        }
        sessions.insert(
            id,
            Entry {
                session,
                issued_at: now,
            },
        );

        format!("{}.{}", id, self.sign(&id))
    }

    /// Session a token refers to, if the token is authentic and still live
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        let id = self.verify(token)?;
        let sessions = self.sessions.read().await;
        let entry = sessions.get(&id)?;
        (entry.issued_at.elapsed() < self.max_age).then(|| entry.session.clone())
    }

    /// Drop the session behind a token
    ///
    /// Unknown or forged tokens are ignored.
    pub async fn clear(&self, token: &str) {
        if let Some(id) = self.verify(token) {
            self.sessions.write().await.remove(&id);
        }
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn sign(&self, id: &Uuid) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.expose_secret().as_ref().as_bytes());
        hasher.update(b".");
        hasher.update(id.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn verify(&self, token: &str) -> Option<Uuid> {
        let (id, signature) = token.split_once('.')?;
        let id = Uuid::parse_str(id).ok()?;
        let expected = self.sign(&id);

        // Compare every byte so timing does not reveal the matching prefix.
        let matches = expected.len() == signature.len()
            && expected
                .bytes()
                .zip(signature.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0;

        matches.then_some(id)
    }
}
