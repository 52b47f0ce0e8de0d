//! Task domain model.
//!
//! # Responsibility
//! - Define the owner-scoped unit-of-work record.
//!
//! # Invariants
//! - `owner` must resolve to an existing account at creation time; the
//!   service layer performs that resolution before any task write.
//! - `owner` never changes on update.

use crate::model::account::AccountId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Unit of work owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID, immutable after creation.
    pub uuid: TaskId,
    pub description: String,
    /// Whether the task is still actionable.
    pub active: bool,
    /// Owning account reference.
    pub owner: AccountId,
}

impl Task {
    /// Creates a new task with a generated stable ID.
    pub fn new(description: impl Into<String>, active: bool, owner: AccountId) -> Self {
        Self::with_id(Uuid::new_v4(), description, active, owner)
    }

    /// Creates a task with a caller-provided stable ID.
    pub fn with_id(
        uuid: TaskId,
        description: impl Into<String>,
        active: bool,
        owner: AccountId,
    ) -> Self {
        Self {
            uuid,
            description: description.into(),
            active,
            owner,
        }
    }
}
