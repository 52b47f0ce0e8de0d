//! Registration and authentication workflows.
//!
//! # Responsibility
//! - Own the email-uniqueness invariant for new registrations.
//! - Exchange verified credentials for signed account assertions.
//!
//! # Invariants
//! - The pre-insert email lookup is advisory only; correctness under
//!   concurrent registration comes from the store's atomic insert, whose
//!   duplicate failure is translated to `DuplicateEmail` here.
//! - Uniqueness conflicts are reported, never retried.
//! - Log lines carry account IDs only, never emails or credential material.

use crate::auth::password::{CredentialError, CredentialHasher};
use crate::auth::token::{TokenError, TokenIssuer};
use crate::model::account::{Account, AccountId, Role};
use crate::repo::account_repo::{AccountRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input for registration and direct account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    /// Structurally validated upstream; treated as opaque here.
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Signed assertion plus the account it is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub account_id: AccountId,
}

/// Errors from identity use-cases.
#[derive(Debug)]
pub enum IdentityError {
    /// The email address is already held by a live account.
    DuplicateEmail(String),
    /// No account holds the presented email.
    AccountNotFound(String),
    /// The account exists but the password does not match.
    InvalidCredentials,
    /// Credential hashing/verification infrastructure failure.
    Credential(CredentialError),
    /// Token issuance/verification infrastructure failure.
    Token(TokenError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => {
                write!(f, "an account already holds email `{email}`")
            }
            Self::AccountNotFound(email) => {
                write!(f, "no account found for email `{email}`")
            }
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Credential(err) => write!(f, "{err}"),
            Self::Token(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IdentityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Credential(err) => Some(err),
            Self::Token(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for IdentityError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            other => Self::Repo(other),
        }
    }
}

impl From<CredentialError> for IdentityError {
    fn from(value: CredentialError) -> Self {
        Self::Credential(value)
    }
}

impl From<TokenError> for IdentityError {
    fn from(value: TokenError) -> Self {
        Self::Token(value)
    }
}

/// Registration/authentication service over an account repository.
pub struct IdentityService<R: AccountRepository> {
    accounts: R,
    hasher: CredentialHasher,
    tokens: TokenIssuer,
}

impl<R: AccountRepository> IdentityService<R> {
    /// Creates a service using the provided repository and credential
    /// components.
    pub fn new(accounts: R, hasher: CredentialHasher, tokens: TokenIssuer) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
        }
    }

    /// Registers a new account and returns a session bound to it.
    ///
    /// # Contract
    /// - Fails with `DuplicateEmail` when the address is already claimed,
    ///   whether caught by the advisory lookup or by the store's atomic
    ///   insert.
    /// - On success exactly one account record is created.
    pub fn register(&self, request: &RegisterRequest) -> Result<AuthSession, IdentityError> {
        if self
            .accounts
            .get_account_by_email(&request.email)?
            .is_some()
        {
            return Err(IdentityError::DuplicateEmail(request.email.clone()));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let account = Account::new(
            request.first_name.clone(),
            request.last_name.clone(),
            request.email.clone(),
            password_hash,
            request.role,
        );
        self.accounts.create_account(&account)?;

        let token = self.tokens.issue(account.uuid)?;
        info!(
            "event=register module=identity status=ok account={}",
            account.uuid
        );
        Ok(AuthSession {
            token,
            account_id: account.uuid,
        })
    }

    /// Exchanges email + password for a session.
    ///
    /// Unknown email and wrong password are distinct failure kinds; the
    /// underlying hash comparison itself is constant-time.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        let account = self
            .accounts
            .get_account_by_email(email)?
            .ok_or_else(|| IdentityError::AccountNotFound(email.to_string()))?;

        if !self.hasher.verify(password, &account.password_hash)? {
            info!(
                "event=authenticate module=identity status=denied account={}",
                account.uuid
            );
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self.tokens.issue(account.uuid)?;
        info!(
            "event=authenticate module=identity status=ok account={}",
            account.uuid
        );
        Ok(AuthSession {
            token,
            account_id: account.uuid,
        })
    }

    /// Validates a presented token and returns the bound account ID.
    pub fn verify_token(&self, token: &str) -> Result<AccountId, IdentityError> {
        Ok(self.tokens.verify(token)?)
    }
}
