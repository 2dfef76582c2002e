//! Password hashing collaborator.
//!
//! The seeding routine and any registration flow only see the
//! [`CredentialHasher`] trait; the stored value is whatever string the
//! hasher returns. [`Argon2Hasher`] produces salted Argon2id PHC strings, so
//! two calls with the same plaintext never return the same hash.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised by a [`CredentialHasher`].
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The hashing function itself failed.
    #[error("Failed to hash password for '{user_name}': {reason}")]
    Hash { user_name: String, reason: String },

    /// The stored value is not a hash this hasher understands.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}

/// One-way password hashing with verification.
pub trait CredentialHasher: Send + Sync {
    /// Hash `plaintext` for the account identified by `user_name`.
    fn hash(&self, user_name: &str, plaintext: &str) -> Result<String, PasswordError>;

    /// Check `plaintext` against a value previously returned by [`CredentialHasher::hash`].
    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, PasswordError>;
}

/// Argon2id with the crate's default parameters and a random salt per hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub const fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, user_name: &str, plaintext: &str) -> Result<String, PasswordError> {
        trace!("Hashing password for {}", user_name);
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash {
                user_name: user_name.to_string(),
                reason: e.to_string(),
            })
    }

    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => {
                debug!("Password verification failed");
                Ok(false)
            }
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}
