//! Argon2id credential hashing.
//!
//! # Responsibility
//! - Hash plaintext secrets with a fresh random salt into PHC strings.
//! - Verify a plaintext candidate against a stored PHC string.
//!
//! # Invariants
//! - Every hash call draws a new salt; equal passwords produce distinct
//!   hashes.
//! - A password mismatch is `Ok(false)`, not an error; only a malformed
//!   stored hash or hasher failure is an error.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error from hashing or verifying a credential.
///
/// The wrapped message never contains the plaintext secret.
#[derive(Debug)]
pub enum CredentialError {
    /// Hashing the plaintext failed.
    Hash(String),
    /// The stored hash is not a parseable PHC string.
    MalformedHash(String),
}

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(message) => write!(f, "credential hashing failed: {message}"),
            Self::MalformedHash(message) => write!(f, "stored credential hash is malformed: {message}"),
        }
    }
}

impl Error for CredentialError {}

/// One-way credential transform with constant-time verification.
///
/// Argon2id with default parameters: salted and deliberately slow to resist
/// offline guessing. Stateless; one instance can serve all callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialHasher;

impl CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext secret into a self-describing PHC string.
    pub fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| CredentialError::Hash(err.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verifies a plaintext candidate against a stored PHC string.
    pub fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|err| CredentialError::MalformedHash(err.to_string()))?;
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialError::MalformedHash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CredentialHasher;

    #[test]
    fn verify_accepts_matching_password() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("pw1").unwrap();
        assert!(hasher.verify("pw1", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("pw1").unwrap();
        assert!(!hasher.verify("pw2", &hash).unwrap());
    }

    #[test]
    fn equal_passwords_hash_to_distinct_strings() {
        let hasher = CredentialHasher::new();
        let first = hasher.hash("same secret").unwrap();
        let second = hasher.hash("same secret").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify("same secret", &second).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let hasher = CredentialHasher::new();
        assert!(hasher.verify("pw1", "not-a-phc-string").is_err());
    }
}
