//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Account insert/update behave as atomic compare-and-insert on email:
//!   the store itself fails with `DuplicateEmail` when a concurrent writer
//!   already claimed the address.
//! - Repository APIs return semantic errors (`AccountNotFound`,
//!   `TaskNotFound`, `DuplicateEmail`) in addition to DB transport errors.

pub mod account_repo;
pub mod task_repo;
