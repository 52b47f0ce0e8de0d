//! Account management use-cases.
//!
//! # Responsibility
//! - Provide list/lookup/create/update/delete over account records.
//! - Re-check the email-uniqueness invariant on update.
//!
//! # Invariants
//! - Outward results are `AccountView` projections; the credential hash
//!   never leaves this module.
//! - On update, the target email may only collide with the account being
//!   updated itself, compared by identifier.
//! - The password is re-hashed on every update, even when the supplied
//!   plaintext is unchanged.

use crate::auth::password::{CredentialError, CredentialHasher};
use crate::model::account::{Account, AccountId};
use crate::model::view::{account_view, AccountView};
use crate::repo::account_repo::{AccountRepository, RepoError};
use crate::service::identity_service::RegisterRequest;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input for account update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUpdateRequest {
    pub account_id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Errors from account management use-cases.
#[derive(Debug)]
pub enum AccountServiceError {
    /// Target account ID does not exist.
    AccountNotFound(AccountId),
    /// No account holds the looked-up email.
    AccountNotFoundByEmail(String),
    /// The email address is already held by a different live account.
    DuplicateEmail(String),
    /// Credential hashing infrastructure failure.
    Credential(CredentialError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AccountServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccountNotFound(id) => write!(f, "account not found: {id}"),
            Self::AccountNotFoundByEmail(email) => {
                write!(f, "no account found for email `{email}`")
            }
            Self::DuplicateEmail(email) => {
                write!(f, "an account already holds email `{email}`")
            }
            Self::Credential(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Credential(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AccountServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            RepoError::AccountNotFound(id) => Self::AccountNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<CredentialError> for AccountServiceError {
    fn from(value: CredentialError) -> Self {
        Self::Credential(value)
    }
}

/// Account CRUD service over an account repository.
pub struct AccountService<R: AccountRepository> {
    accounts: R,
    hasher: CredentialHasher,
}

impl<R: AccountRepository> AccountService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(accounts: R, hasher: CredentialHasher) -> Self {
        Self { accounts, hasher }
    }

    /// Lists all accounts as outward projections.
    pub fn list_accounts(&self) -> Result<Vec<AccountView>, AccountServiceError> {
        let accounts = self.accounts.list_accounts()?;
        Ok(accounts.iter().map(account_view).collect())
    }

    /// Looks one account up by its exact email.
    pub fn find_by_email(&self, email: &str) -> Result<AccountView, AccountServiceError> {
        self.accounts
            .get_account_by_email(email)?
            .map(|account| account_view(&account))
            .ok_or_else(|| AccountServiceError::AccountNotFoundByEmail(email.to_string()))
    }

    /// Creates an account directly, without issuing a token.
    ///
    /// Same uniqueness check and hashing path as registration.
    pub fn create_account(
        &self,
        request: &RegisterRequest,
    ) -> Result<AccountView, AccountServiceError> {
        if self
            .accounts
            .get_account_by_email(&request.email)?
            .is_some()
        {
            return Err(AccountServiceError::DuplicateEmail(request.email.clone()));
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
        Ok(account_view(&account))
    }

    /// Rewrites name, email, and credential of an existing account.
    ///
    /// # Contract
    /// - Fails with `AccountNotFound` when the ID does not resolve.
    /// - Fails with `DuplicateEmail` when the target email belongs to a
    ///   different account; keeping the current email is always allowed.
    /// - The role tag is not updatable through this path.
    pub fn update_account(
        &self,
        request: &AccountUpdateRequest,
    ) -> Result<AccountView, AccountServiceError> {
        let mut account = self
            .accounts
            .get_account(request.account_id)?
            .ok_or(AccountServiceError::AccountNotFound(request.account_id))?;

        account.first_name = request.first_name.clone();
        account.last_name = request.last_name.clone();
        account.password_hash = self.hasher.hash(&request.password)?;

        if let Some(existing) = self.accounts.get_account_by_email(&request.email)? {
            if existing.uuid != account.uuid {
                return Err(AccountServiceError::DuplicateEmail(request.email.clone()));
            }
        }
        account.email = request.email.clone();

        self.accounts.update_account(&account)?;
        Ok(account_view(&account))
    }

    /// Hard-deletes an account by ID.
    ///
    /// Tasks owned by the account are left in place.
    pub fn delete_account(&self, id: AccountId) -> Result<(), AccountServiceError> {
        if self.accounts.get_account(id)?.is_none() {
            return Err(AccountServiceError::AccountNotFound(id));
        }
        self.accounts.delete_account(id)?;
        Ok(())
    }
}
