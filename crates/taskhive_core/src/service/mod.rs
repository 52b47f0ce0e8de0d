//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and credential calls into use-case level APIs.
//! - Keep transport layers decoupled from storage and crypto details.
//!
//! # Invariants
//! - Services are stateless; every mutation re-reads the store of record
//!   before acting.
//! - Services never hold locks; the uniqueness invariant is guaranteed by
//!   the store's atomic insert, not by service-side check-then-act.

pub mod account_service;
pub mod identity_service;
pub mod task_service;
