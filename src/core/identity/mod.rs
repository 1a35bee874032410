//! Identity store: user registration, lookup and credential checks
//!
//! - [`store`] - user records with the unique email index
//! - [`registration`] - signup form validation
//! - [`password`] - the hashing capability used for digests

pub mod password;
pub mod registration;
pub mod store;

pub use password::{BcryptHasher, PasswordHasher, DEFAULT_BCRYPT_COST};
pub use registration::{Registration, SignupForm};
pub use store::IdentityStore;
