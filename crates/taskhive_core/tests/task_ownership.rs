use taskhive_core::db::open_db_in_memory;
use taskhive_core::{
    Account, AccountRepository, Role, SqliteAccountRepository, SqliteTaskRepository, TaskRepository,
    TaskService, TaskServiceError,
};
use uuid::Uuid;

fn seeded_owner(conn: &rusqlite::Connection, email: &str) -> Account {
    let repo = SqliteAccountRepository::try_new(conn).unwrap();
    let account = Account::new("Ann", "Arbor", email, "$argon2id$stub", Role::Standard);
    repo.create_account(&account).unwrap();
    account
}

fn task_service(
    conn: &rusqlite::Connection,
) -> TaskService<SqliteAccountRepository<'_>, SqliteTaskRepository<'_>> {
    TaskService::new(
        SqliteAccountRepository::try_new(conn).unwrap(),
        SqliteTaskRepository::try_new(conn).unwrap(),
    )
}

fn task_count(conn: &rusqlite::Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_for_missing_owner_fails_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = task_service(&conn);

    let ghost = Uuid::new_v4();
    let err = service.create_task("water plants", true, ghost).unwrap_err();
    assert!(matches!(err, TaskServiceError::OwnerNotFound(id) if id == ghost));
    assert_eq!(task_count(&conn), 0);
}

#[test]
fn create_after_owner_exists_succeeds_with_owner_reference() {
    let conn = open_db_in_memory().unwrap();
    let owner = seeded_owner(&conn, "ann@x.com");
    let service = task_service(&conn);

    let created = service.create_task("water plants", true, owner.uuid).unwrap();
    assert_eq!(created.owner_id, owner.uuid);
    assert_eq!(created.description, "water plants");
    assert!(created.active);
}

#[test]
fn list_by_owner_gates_on_owner_resolution() {
    let conn = open_db_in_memory().unwrap();
    let service = task_service(&conn);

    let ghost = Uuid::new_v4();
    let err = service.list_by_owner(ghost).unwrap_err();
    assert!(matches!(err, TaskServiceError::OwnerNotFound(_)));

    let err = service.list_by_owner_and_active(ghost, true).unwrap_err();
    assert!(matches!(err, TaskServiceError::OwnerNotFound(_)));
}

#[test]
fn list_by_owner_returns_only_that_owners_tasks() {
    let conn = open_db_in_memory().unwrap();
    let ann = seeded_owner(&conn, "ann@x.com");
    let bob = seeded_owner(&conn, "bob@x.com");
    let service = task_service(&conn);

    service.create_task("ann one", true, ann.uuid).unwrap();
    service.create_task("ann two", false, ann.uuid).unwrap();
    service.create_task("bob one", true, bob.uuid).unwrap();

    let anns = service.list_by_owner(ann.uuid).unwrap();
    assert_eq!(anns.len(), 2);
    assert!(anns.iter().all(|task| task.owner_id == ann.uuid));
}

#[test]
fn list_by_owner_and_active_filters_on_flag() {
    let conn = open_db_in_memory().unwrap();
    let ann = seeded_owner(&conn, "ann@x.com");
    let service = task_service(&conn);

    service.create_task("open", true, ann.uuid).unwrap();
    service.create_task("done", false, ann.uuid).unwrap();

    let active = service.list_by_owner_and_active(ann.uuid, true).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].description, "open");

    let inactive = service.list_by_owner_and_active(ann.uuid, false).unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].description, "done");
}

#[test]
fn update_rewrites_fields_and_keeps_owner() {
    let conn = open_db_in_memory().unwrap();
    let ann = seeded_owner(&conn, "ann@x.com");
    let service = task_service(&conn);

    let created = service.create_task("draft", true, ann.uuid).unwrap();
    let updated = service.update_task(created.id, "final", false).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description, "final");
    assert!(!updated.active);
    assert_eq!(updated.owner_id, ann.uuid);
}

#[test]
fn update_missing_task_fails() {
    let conn = open_db_in_memory().unwrap();
    let service = task_service(&conn);

    let ghost = Uuid::new_v4();
    let err = service.update_task(ghost, "anything", true).unwrap_err();
    assert!(matches!(err, TaskServiceError::TaskNotFound(id) if id == ghost));
}

#[test]
fn delete_removes_task_and_second_delete_fails() {
    let conn = open_db_in_memory().unwrap();
    let ann = seeded_owner(&conn, "ann@x.com");
    let service = task_service(&conn);

    let created = service.create_task("draft", true, ann.uuid).unwrap();
    service.delete_task(created.id).unwrap();
    assert_eq!(task_count(&conn), 0);

    let err = service.delete_task(created.id).unwrap_err();
    assert!(matches!(err, TaskServiceError::TaskNotFound(_)));
}

// Deleting an owner does not cascade: rows stay behind, and owner-gated
// listing starts failing for that id.
#[test]
fn deleting_owner_leaves_task_rows_in_place() {
    let conn = open_db_in_memory().unwrap();
    let ann = seeded_owner(&conn, "ann@x.com");
    let service = task_service(&conn);

    service.create_task("orphan to be", true, ann.uuid).unwrap();

    let accounts = SqliteAccountRepository::try_new(&conn).unwrap();
    accounts.delete_account(ann.uuid).unwrap();

    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();
    let remaining = tasks.list_tasks_by_owner(ann.uuid).unwrap();
    assert_eq!(remaining.len(), 1);

    let err = service.list_by_owner(ann.uuid).unwrap_err();
    assert!(matches!(err, TaskServiceError::OwnerNotFound(_)));
}
