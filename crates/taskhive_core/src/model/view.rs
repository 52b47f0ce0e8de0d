//! Outward-facing projections of domain entities.
//!
//! # Responsibility
//! - Define the shapes handed to transport layers.
//! - Keep entity-to-projection mapping as explicit pure functions, separate
//!   from the entity definitions.
//!
//! # Invariants
//! - `AccountView` never carries the credential hash.

use crate::model::account::{Account, AccountId, Role};
use crate::model::task::{Task, TaskId};
use serde::{Deserialize, Serialize};

/// Account shape exposed to callers outside the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

/// Task shape exposed to callers outside the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: TaskId,
    pub description: String,
    pub active: bool,
    pub owner_id: AccountId,
}

/// Projects an account to its outward shape, dropping the credential hash.
pub fn account_view(account: &Account) -> AccountView {
    AccountView {
        id: account.uuid,
        first_name: account.first_name.clone(),
        last_name: account.last_name.clone(),
        email: account.email.clone(),
        role: account.role,
    }
}

/// Projects a task to its outward shape.
pub fn task_view(task: &Task) -> TaskView {
    TaskView {
        id: task.uuid,
        description: task.description.clone(),
        active: task.active,
        owner_id: task.owner,
    }
}

#[cfg(test)]
mod tests {
    use super::{account_view, task_view};
    use crate::model::account::{Account, Role};
    use crate::model::task::Task;

    #[test]
    fn account_view_drops_credential_hash() {
        let account = Account::new("Ann", "Arbor", "ann@x.com", "$argon2id$secret", Role::Admin);
        let view = account_view(&account);
        assert_eq!(view.id, account.uuid);
        assert_eq!(view.email, "ann@x.com");

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn task_view_keeps_owner_reference() {
        let account = Account::new("Ann", "Arbor", "ann@x.com", "h", Role::Standard);
        let task = Task::new("water plants", true, account.uuid);
        let view = task_view(&task);
        assert_eq!(view.owner_id, account.uuid);
        assert!(view.active);
    }
}
