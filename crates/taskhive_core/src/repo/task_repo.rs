//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD and owner-predicate queries over `tasks` storage.
//!
//! # Invariants
//! - `update_task` never writes the owner column; ownership is immutable
//!   after creation.
//! - `tasks.owner_uuid` is not foreign-keyed: deleting an owner leaves its
//!   task rows in place.
//! - List queries are ordered by `created_at ASC, uuid ASC` for stable
//!   pagination-free reads.

use crate::model::account::AccountId;
use crate::model::task::{Task, TaskId};
use crate::repo::account_repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    description,
    is_active,
    owner_uuid
FROM tasks";

/// Repository interface for task storage.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Rewrites description and active flag of an existing task.
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    fn list_tasks_by_owner(&self, owner: AccountId) -> RepoResult<Vec<Task>>;
    fn list_tasks_by_owner_and_active(
        &self,
        owner: AccountId,
        active: bool,
    ) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "tasks", &["uuid", "description", "is_active", "owner_uuid"])?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                description,
                is_active,
                owner_uuid
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                task.uuid.to_string(),
                task.description.as_str(),
                bool_to_int(task.active),
                task.owner.to_string(),
            ],
        )?;

        Ok(task.uuid)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                description = ?1,
                is_active = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?3;",
            params![
                task.description.as_str(),
                bool_to_int(task.active),
                task.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::TaskNotFound(task.uuid));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::TaskNotFound(id));
        }

        Ok(())
    }

    fn list_tasks_by_owner(&self, owner: AccountId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE owner_uuid = ?1
             ORDER BY created_at ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([owner.to_string()])?;
        collect_tasks(&mut rows)
    }

    fn list_tasks_by_owner_and_active(
        &self,
        owner: AccountId,
        active: bool,
    ) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE owner_uuid = ?1
               AND is_active = ?2
             ORDER BY created_at ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query(params![owner.to_string(), bool_to_int(active)])?;
        collect_tasks(&mut rows)
    }
}

fn collect_tasks(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Task>> {
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(tasks)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    let owner_text: String = row.get("owner_uuid")?;
    let owner = Uuid::parse_str(&owner_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{owner_text}` in tasks.owner_uuid"
        ))
    })?;

    let active = match row.get::<_, i64>("is_active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_active value `{other}` in tasks.is_active"
            )));
        }
    };

    Ok(Task {
        uuid,
        description: row.get("description")?,
        active,
        owner,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
