//! Account repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD and email lookup over `accounts` storage.
//! - Own the email-uniqueness enforcement at the storage boundary.
//!
//! # Invariants
//! - `create_account`/`update_account` surface a UNIQUE violation on
//!   `accounts.email` as `RepoError::DuplicateEmail`; callers must not rely
//!   on their own pre-checks for correctness.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Email comparison is byte-wise case-sensitive.

use crate::db::DbError;
use crate::model::account::{Account, AccountId, Role};
use crate::model::task::TaskId;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ACCOUNT_SELECT_SQL: &str = "SELECT
    uuid,
    first_name,
    last_name,
    email,
    password_hash,
    role
FROM accounts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for account/task persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The email address is already held by a live account.
    DuplicateEmail(String),
    AccountNotFound(AccountId),
    TaskNotFound(TaskId),
    InvalidData(String),
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => {
                write!(f, "an account already holds email `{email}`")
            }
            Self::AccountNotFound(id) => write!(f, "account not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is older than required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for account storage.
pub trait AccountRepository {
    /// Persists a new account. Fails with `DuplicateEmail` when the email is
    /// already claimed, atomically with respect to concurrent inserts.
    fn create_account(&self, account: &Account) -> RepoResult<AccountId>;
    /// Rewrites all mutable columns of an existing account.
    fn update_account(&self, account: &Account) -> RepoResult<()>;
    fn get_account(&self, id: AccountId) -> RepoResult<Option<Account>>;
    fn get_account_by_email(&self, email: &str) -> RepoResult<Option<Account>>;
    /// Hard-deletes an account. Owned tasks are left untouched.
    fn delete_account(&self, id: AccountId) -> RepoResult<()>;
    fn list_accounts(&self) -> RepoResult<Vec<Account>>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "accounts",
            &["uuid", "first_name", "last_name", "email", "password_hash", "role"],
        )?;
        Ok(Self { conn })
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn create_account(&self, account: &Account) -> RepoResult<AccountId> {
        let inserted = self.conn.execute(
            "INSERT INTO accounts (
                uuid,
                first_name,
                last_name,
                email,
                password_hash,
                role
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                account.uuid.to_string(),
                account.first_name.as_str(),
                account.last_name.as_str(),
                account.email.as_str(),
                account.password_hash.as_str(),
                role_to_db(account.role),
            ],
        );

        match inserted {
            Ok(_) => Ok(account.uuid),
            Err(err) if is_email_unique_violation(&err) => {
                Err(RepoError::DuplicateEmail(account.email.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_account(&self, account: &Account) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE accounts
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                password_hash = ?4,
                role = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?6;",
            params![
                account.first_name.as_str(),
                account.last_name.as_str(),
                account.email.as_str(),
                account.password_hash.as_str(),
                role_to_db(account.role),
                account.uuid.to_string(),
            ],
        );

        match changed {
            Ok(0) => Err(RepoError::AccountNotFound(account.uuid)),
            Ok(_) => Ok(()),
            Err(err) if is_email_unique_violation(&err) => {
                Err(RepoError::DuplicateEmail(account.email.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_account(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }

        Ok(None)
    }

    fn get_account_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE email = ?1;"))?;
        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }

        Ok(None)
    }

    fn delete_account(&self, id: AccountId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM accounts WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::AccountNotFound(id));
        }

        Ok(())
    }

    fn list_accounts(&self) -> RepoResult<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} ORDER BY created_at ASC, uuid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut accounts = Vec::new();
        while let Some(row) = rows.next()? {
            accounts.push(parse_account_row(row)?);
        }

        Ok(accounts)
    }
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<Account> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in accounts.uuid"))
    })?;

    let role_text: String = row.get("role")?;
    let role = parse_role(&role_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid role value `{role_text}` in accounts.role"))
    })?;

    Ok(Account {
        uuid,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        role,
    })
}

fn role_to_db(role: Role) -> &'static str {
    match role {
        Role::Standard => "standard",
        Role::Admin => "admin",
    }
}

fn parse_role(value: &str) -> Option<Role> {
    match value {
        "standard" => Some(Role::Standard),
        "admin" => Some(Role::Admin),
        _ => None,
    }
}

fn is_email_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, Some(message)) => {
            code.code == rusqlite::ErrorCode::ConstraintViolation
                && message.contains("accounts.email")
        }
        _ => false,
    }
}

pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
