//! Core domain logic for taskhive.
//! This crate is the single source of truth for identity and ownership
//! invariants: unique account emails, credential issue/verify, and
//! owner-gated task access.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::password::{CredentialError, CredentialHasher};
pub use auth::token::{TokenError, TokenIssuer, DEFAULT_TOKEN_TTL};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Account, AccountId, Role};
pub use model::task::{Task, TaskId};
pub use model::view::{account_view, task_view, AccountView, TaskView};
pub use repo::account_repo::{
    AccountRepository, RepoError, RepoResult, SqliteAccountRepository,
};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use service::account_service::{AccountService, AccountServiceError, AccountUpdateRequest};
pub use service::identity_service::{
    AuthSession, IdentityError, IdentityService, RegisterRequest,
};
pub use service::task_service::{TaskService, TaskServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
