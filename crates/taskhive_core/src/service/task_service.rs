//! Owner-gated task use-cases.
//!
//! # Responsibility
//! - Provide task CRUD and owner-scoped queries.
//! - Resolve and validate the owning account before every owner-scoped
//!   operation.
//!
//! # Invariants
//! - No task-store write happens for an owner ID that does not resolve.
//! - The owner reference is immutable after creation.
//! - The owner check and the subsequent task write are two independent
//!   store calls, not one transaction.

use crate::model::account::AccountId;
use crate::model::task::{Task, TaskId};
use crate::model::view::{task_view, TaskView};
use crate::repo::account_repo::{AccountRepository, RepoError};
use crate::repo::task_repo::TaskRepository;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// The referenced owning account does not exist.
    OwnerNotFound(AccountId),
    /// Target task ID does not exist.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OwnerNotFound(id) => write!(f, "owning account not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::TaskNotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Task CRUD service gated on owner resolution.
pub struct TaskService<A: AccountRepository, T: TaskRepository> {
    accounts: A,
    tasks: T,
}

impl<A: AccountRepository, T: TaskRepository> TaskService<A, T> {
    /// Creates a service using the provided repository implementations.
    pub fn new(accounts: A, tasks: T) -> Self {
        Self { accounts, tasks }
    }

    /// Lists all tasks owned by the given account.
    pub fn list_by_owner(&self, owner: AccountId) -> Result<Vec<TaskView>, TaskServiceError> {
        self.resolve_owner(owner)?;
        let tasks = self.tasks.list_tasks_by_owner(owner)?;
        Ok(tasks.iter().map(task_view).collect())
    }

    /// Lists tasks owned by the given account, filtered on the active flag.
    pub fn list_by_owner_and_active(
        &self,
        owner: AccountId,
        active: bool,
    ) -> Result<Vec<TaskView>, TaskServiceError> {
        self.resolve_owner(owner)?;
        let tasks = self.tasks.list_tasks_by_owner_and_active(owner, active)?;
        Ok(tasks.iter().map(task_view).collect())
    }

    /// Creates a task for a resolved owner.
    pub fn create_task(
        &self,
        description: impl Into<String>,
        active: bool,
        owner: AccountId,
    ) -> Result<TaskView, TaskServiceError> {
        self.resolve_owner(owner)?;
        let task = Task::new(description, active, owner);
        self.tasks.create_task(&task)?;
        Ok(task_view(&task))
    }

    /// Rewrites description and active flag of an existing task.
    ///
    /// The owner reference is left untouched.
    pub fn update_task(
        &self,
        id: TaskId,
        description: impl Into<String>,
        active: bool,
    ) -> Result<TaskView, TaskServiceError> {
        let mut task = self
            .tasks
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        task.description = description.into();
        task.active = active;
        self.tasks.update_task(&task)?;
        Ok(task_view(&task))
    }

    /// Hard-deletes a task by ID.
    pub fn delete_task(&self, id: TaskId) -> Result<(), TaskServiceError> {
        if self.tasks.get_task(id)?.is_none() {
            return Err(TaskServiceError::TaskNotFound(id));
        }
        self.tasks.delete_task(id)?;
        Ok(())
    }

    fn resolve_owner(&self, owner: AccountId) -> Result<(), TaskServiceError> {
        match self.accounts.get_account(owner)? {
            Some(_) => Ok(()),
            None => Err(TaskServiceError::OwnerNotFound(owner)),
        }
    }
}
