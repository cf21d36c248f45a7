//! Repository tests against SeaORM's mock connection.
//!
//! The mock hands out query and exec results in the order they were
//! appended, so each test lays out exactly the statements the operation
//! is expected to issue.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{
    DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult, Transaction, Value,
};
use uuid::Uuid;

use contabi_core::accountancy::{
    AccountancyError, AccountancyStore, AssignmentInput, AssignmentSelection,
    NewAccountancyStatus, StatusUpdate,
};
use contabi_shared::types::ClientId;

use super::AccountancyRepository;
use crate::entities::{accountancy_types, client_accountancy_status, clients};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn repo_over(db: DatabaseConnection) -> AccountancyRepository {
    AccountancyRepository::new(Arc::new(db))
}

/// Repository plus a handle for reading back the statements it issued.
fn logged_repo(db: DatabaseConnection) -> (AccountancyRepository, Arc<DatabaseConnection>) {
    let db = Arc::new(db);
    (AccountancyRepository::new(Arc::clone(&db)), db)
}

fn transaction_log(repo: AccountancyRepository, db: Arc<DatabaseConnection>) -> Vec<Transaction> {
    drop(repo);
    Arc::try_unwrap(db)
        .expect("repository should hold the only other handle")
        .into_transaction_log()
}

fn statement_sql(txn: &Transaction) -> Vec<String> {
    txn.statements().iter().map(|stmt| stmt.sql.clone()).collect()
}

fn assert_rolled_back(txn: &Transaction) {
    let sql = statement_sql(txn);
    assert_eq!(sql.first().map(String::as_str), Some("BEGIN"));
    assert_eq!(sql.last().map(String::as_str), Some("ROLLBACK"));
    assert!(!sql.iter().any(|s| s == "COMMIT"), "unexpected commit: {sql:?}");
}

fn exec_ok(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

fn status_model(id: i32, client_id: Uuid, month: NaiveDate) -> client_accountancy_status::Model {
    client_accountancy_status::Model {
        id,
        client_id,
        month,
        due_date: None,
        observations: None,
    }
}

fn assignment_row(
    id: i32,
    status_id: i32,
    type_id: i32,
    type_name: &'static str,
    status_name: &'static str,
) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("id", Value::from(id)),
        ("status_id", Value::from(status_id)),
        ("assignment_type_id", Value::from(type_id)),
        ("assignment_type_name", Value::from(type_name)),
        ("assignment_status_id", Value::from(1)),
        ("assignment_status_name", Value::from(status_name)),
    ])
}

fn input(assignment_type_id: i32, assignment_status_id: i32) -> AssignmentInput {
    AssignmentInput {
        assignment_type_id,
        assignment_status_id,
    }
}

fn selection(assignment_type_id: i32, selected: bool) -> AssignmentSelection {
    AssignmentSelection {
        assignment_type_id,
        selected,
    }
}

// ============================================================================
// Status create
// ============================================================================

#[tokio::test]
async fn test_create_status_returns_generated_id() {
    let client = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![status_model(11, client, date(2024, 3, 1))]])
        .append_exec_results([exec_ok(1), exec_ok(1)])
        .into_connection();
    let repo = repo_over(db);

    let created = repo
        .create_status_with_assignments(
            NewAccountancyStatus {
                client_id: ClientId::from_uuid(client),
                month: date(2024, 3, 1),
                due_date: None,
                observations: None,
            },
            &[input(1, 1), input(2, 2)],
        )
        .await
        .expect("create should succeed");

    assert_eq!(created.id, 11);
    assert_eq!(created.client_id.into_inner(), client);
    assert_eq!(created.month, date(2024, 3, 1));
}

#[tokio::test]
async fn test_create_status_fails_when_an_upsert_fails() {
    let client = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![status_model(12, client, date(2024, 4, 1))]])
        .append_exec_results([exec_ok(1)])
        .append_exec_errors([DbErr::Custom("violates foreign key constraint".into())])
        .into_connection();
    let (repo, handle) = logged_repo(db);

    let err = repo
        .create_status_with_assignments(
            NewAccountancyStatus {
                client_id: ClientId::from_uuid(client),
                month: date(2024, 4, 1),
                due_date: Some(date(2024, 5, 17)),
                observations: Some("pending bank statements".into()),
            },
            &[input(1, 1), input(99, 1), input(3, 1)],
        )
        .await
        .expect_err("create should fail");

    assert!(matches!(err, AccountancyError::Database(_)));

    // Status insert, first upsert, failing upsert; the third is never sent.
    let log = transaction_log(repo, handle);
    assert_eq!(log.len(), 1);
    assert_rolled_back(&log[0]);
    assert_eq!(statement_sql(&log[0]).len(), 5);
}

// ============================================================================
// Status update
// ============================================================================

#[tokio::test]
async fn test_update_status_rejects_foreign_status() {
    // Zero rows matched by id + client: the gate must stop before any upsert.
    // A stray upsert would hit the empty exec buffer and surface as Database.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec_ok(0)])
        .into_connection();
    let (repo, handle) = logged_repo(db);
    let client = ClientId::default();

    let err = repo
        .update_status_with_assignments(7, client, StatusUpdate::default(), &[input(1, 2)])
        .await
        .expect_err("update should fail");

    match err {
        AccountancyError::StatusNotFound {
            status_id,
            client_id,
        } => {
            assert_eq!(status_id, 7);
            assert_eq!(client_id, client);
        }
        other => panic!("expected StatusNotFound, got {other:?}"),
    }

    // BEGIN, UPDATE, ROLLBACK: no assignment statement reached the store.
    let log = transaction_log(repo, handle);
    assert_eq!(log.len(), 1);
    assert_rolled_back(&log[0]);
    assert_eq!(statement_sql(&log[0]).len(), 3);
}

#[tokio::test]
async fn test_update_status_upserts_each_assignment() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec_ok(1), exec_ok(1), exec_ok(1)])
        .into_connection();
    let (repo, handle) = logged_repo(db);

    repo.update_status_with_assignments(
        3,
        ClientId::default(),
        StatusUpdate {
            due_date: Some(date(2024, 2, 17)),
            observations: Some("filed".into()),
        },
        &[input(1, 2), input(2, 2)],
    )
    .await
    .expect("update should succeed");

    let log = transaction_log(repo, handle);
    assert_eq!(log.len(), 1);
    let sql = statement_sql(&log[0]);
    assert_eq!(sql.len(), 5);
    assert_eq!(sql.last().map(String::as_str), Some("COMMIT"));
}

// ============================================================================
// Assignment matrix
// ============================================================================

#[tokio::test]
async fn test_matrix_update_with_no_selections_touches_nothing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let (repo, handle) = logged_repo(db);

    repo.update_client_assignments(ClientId::default(), &[])
        .await
        .expect("empty update should succeed");

    assert!(transaction_log(repo, handle).is_empty());
}

#[tokio::test]
async fn test_matrix_update_deletes_then_inserts() {
    // One bulk delete for type 2, one insert each for 1 and 3.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec_ok(1), exec_ok(1), exec_ok(1)])
        .into_connection();
    let (repo, handle) = logged_repo(db);

    repo.update_client_assignments(
        ClientId::default(),
        &[selection(1, true), selection(2, false), selection(3, true)],
    )
    .await
    .expect("update should succeed");

    // Delete and both inserts share one committed transaction.
    let log = transaction_log(repo, handle);
    assert_eq!(log.len(), 1);
    let sql = statement_sql(&log[0]);
    assert_eq!(sql.len(), 5);
    assert!(sql[1].starts_with("DELETE"));
    assert!(sql[2].starts_with("INSERT") && sql[3].starts_with("INSERT"));
    assert_eq!(sql[4], "COMMIT");
}

#[tokio::test]
async fn test_matrix_update_propagates_insert_failure() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec_ok(1)])
        .append_exec_errors([DbErr::Custom("connection reset".into())])
        .into_connection();
    let (repo, handle) = logged_repo(db);

    let err = repo
        .update_client_assignments(
            ClientId::default(),
            &[selection(4, false), selection(5, true)],
        )
        .await
        .expect_err("update should fail");

    assert!(matches!(err, AccountancyError::Database(_)));

    // The delete that already ran is undone with the failed insert.
    let log = transaction_log(repo, handle);
    assert_eq!(log.len(), 1);
    assert_rolled_back(&log[0]);
    assert!(statement_sql(&log[0])[1].starts_with("DELETE"));
}

#[tokio::test]
async fn test_matrix_read_maps_rows() {
    let client = Uuid::new_v4();
    let row = |type_id: i32, type_name: &'static str, selected: bool| {
        BTreeMap::from([
            ("client_id", Value::from(client)),
            ("client_name", Value::from("Abarrotes Lupita")),
            ("assignment_type_id", Value::from(type_id)),
            ("assignment_type_name", Value::from(type_name)),
            ("selected", Value::from(selected)),
        ])
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row(2, "DIOT", false), row(1, "IVA", true)]])
        .into_connection();
    let repo = repo_over(db);

    let matrix = repo.client_assignment_matrix().await.unwrap();

    assert_eq!(matrix.len(), 2);
    assert_eq!(matrix[0].client_id.into_inner(), client);
    assert_eq!(matrix[0].assignment_type_name, "DIOT");
    assert!(!matrix[0].selected);
    assert!(matrix[1].selected);
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_history_pairs_each_status_with_its_assignments() {
    let client = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            accountancy_types::Model {
                id: 2,
                name: "ISR".into(),
            },
            accountancy_types::Model {
                id: 1,
                name: "IVA".into(),
            },
        ]])
        .append_query_results([vec![
            status_model(31, client, date(2024, 3, 1)),
            status_model(30, client, date(2024, 2, 1)),
        ]])
        .append_query_results([vec![
            assignment_row(100, 31, 2, "ISR", "Done"),
            assignment_row(101, 31, 1, "IVA", "Pending"),
        ]])
        .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
        .into_connection();
    let repo = repo_over(db);

    let result = repo
        .client_history(ClientId::from_uuid(client))
        .await
        .expect("history should load");

    assert_eq!(result.active_assignments.len(), 2);
    assert_eq!(result.active_assignments[0].name, "ISR");

    assert_eq!(result.history.len(), 2);
    assert_eq!(result.history[0].status.id, 31);
    assert_eq!(result.history[0].assignments.len(), 2);
    assert_eq!(result.history[0].assignments[1].assignment_status_name, "Pending");
    assert_eq!(result.history[1].status.id, 30);
    assert!(result.history[1].assignments.is_empty());
}

#[tokio::test]
async fn test_history_aborts_on_assignment_fetch_failure() {
    let client = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<accountancy_types::Model>::new()])
        .append_query_results([vec![
            status_model(41, client, date(2024, 6, 1)),
            status_model(40, client, date(2024, 5, 1)),
        ]])
        .append_query_results([vec![assignment_row(200, 41, 1, "IVA", "Done")]])
        .append_query_errors([DbErr::Custom("statement timeout".into())])
        .into_connection();
    let repo = repo_over(db);

    let err = repo
        .client_history(ClientId::from_uuid(client))
        .await
        .expect_err("history should fail");

    assert!(matches!(err, AccountancyError::Database(_)));
}

#[tokio::test]
async fn test_history_for_client_without_statuses() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![accountancy_types::Model {
            id: 1,
            name: "IVA".into(),
        }]])
        .append_query_results([Vec::<client_accountancy_status::Model>::new()])
        .into_connection();
    let repo = repo_over(db);

    let result = repo.client_history(ClientId::default()).await.unwrap();

    assert!(result.history.is_empty());
    assert_eq!(result.active_assignments.len(), 1);
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
async fn test_active_clients_maps_models() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![clients::Model {
            id,
            name: "Ferretería Hidalgo".into(),
            rfc: Some("FHI010101AB1".into()),
            active: true,
            created_at: chrono::Utc::now().into(),
        }]])
        .into_connection();
    let repo = repo_over(db);

    let clients = repo.active_clients().await.unwrap();

    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].id.into_inner(), id);
    assert_eq!(clients[0].name, "Ferretería Hidalgo");
}

#[tokio::test]
async fn test_store_errors_are_reported_as_database_errors() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection refused".into())])
        .into_connection();
    let repo = repo_over(db);

    let err = repo.accountancy_types().await.unwrap_err();

    assert!(err.to_string().contains("connection refused"));
}
