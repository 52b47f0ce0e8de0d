//! Account domain model.
//!
//! # Responsibility
//! - Define the registered-identity record and its role tag.
//! - Provide constructors that assign stable identity at creation.
//!
//! # Invariants
//! - `uuid` is assigned at creation and never changes afterwards.
//! - `email` is globally unique among live accounts; the repository layer
//!   enforces this atomically on insert and update.
//! - `password_hash` holds a PHC-format string, never a plaintext secret.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an account.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AccountId = Uuid;

/// Closed role tag attached to every account.
///
/// This is a label, not a permission matrix; downstream authorization is
/// outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular account.
    Standard,
    /// Administrative account.
    Admin,
}

/// Registered user identity with a unique email and hashed credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable global ID, immutable after creation.
    pub uuid: AccountId,
    pub first_name: String,
    pub last_name: String,
    /// Case-sensitive, unique among live accounts.
    pub email: String,
    /// PHC string produced by the credential hasher.
    pub password_hash: String,
    pub role: Role,
}

impl Account {
    /// Creates a new account with a generated stable ID.
    ///
    /// The caller supplies an already-hashed credential; this constructor
    /// never sees plaintext.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), first_name, last_name, email, password_hash, role)
    }

    /// Creates an account with a caller-provided stable ID.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        uuid: AccountId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            uuid,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Account, Role};

    #[test]
    fn new_assigns_distinct_ids() {
        let a = Account::new("Ann", "Arbor", "ann@x.com", "$argon2id$stub", Role::Standard);
        let b = Account::new("Ann", "Arbor", "ann@x.com", "$argon2id$stub", Role::Standard);
        assert_ne!(a.uuid, b.uuid);
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Standard).unwrap(), "\"standard\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
