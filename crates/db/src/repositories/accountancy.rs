//! Accountancy repository: assignment matrix, monthly statuses, and history.
//!
//! Writes that touch more than one row run in a single transaction. The
//! history read issues several independent queries and is not snapshot
//! isolated.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, Set, SqlErr, Statement, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use contabi_core::accountancy::{
    AccountancyClientInfo, AccountancyError, AccountancyStore, AccountancyType, AssignmentInput,
    AssignmentSelection, AssignmentStatus, ClientAccountancyAssignment, ClientAccountancyHistory,
    ClientAccountancyHistoryEntry, ClientAccountancyStatus, ClientAssignmentMatrixRow,
    ClientSummary, NewAccountancyStatus, StatusUpdate, partition_selections,
};
use contabi_shared::types::{ClientId, UserId};

use crate::entities::{
    accountancy_types, assignment_statuses, client_accountancy_assignments,
    client_accountancy_status, client_assignments_types, clients,
};

const ACTIVE_TYPES_SQL: &str = r"
SELECT at.id, at.name
FROM client_assignments_types cat
JOIN accountancy_types at ON cat.assignment_type_id = at.id
WHERE cat.client_id = $1
ORDER BY at.name ASC
";

// Only assignments whose type is still active for the client.
const STATUS_ASSIGNMENTS_SQL: &str = r"
SELECT
    caa.id,
    caa.status_id,
    caa.assignment_type_id,
    at.name AS assignment_type_name,
    caa.assignment_status_id,
    ast.name AS assignment_status_name
FROM client_accountancy_assignments caa
JOIN accountancy_types at ON caa.assignment_type_id = at.id
JOIN assignment_statuses ast ON caa.assignment_status_id = ast.id
JOIN client_assignments_types cat
  ON cat.assignment_type_id = caa.assignment_type_id AND cat.client_id = $2
WHERE caa.status_id = $1
ORDER BY at.name ASC
";

const MATRIX_SQL: &str = r"
SELECT
    c.id AS client_id,
    c.name AS client_name,
    at.id AS assignment_type_id,
    at.name AS assignment_type_name,
    (cat.assignment_type_id IS NOT NULL) AS selected
FROM clients c
CROSS JOIN accountancy_types at
LEFT JOIN client_assignments_types cat
  ON cat.client_id = c.id AND cat.assignment_type_id = at.id
WHERE c.active = TRUE
ORDER BY c.name, at.name
";

const CLIENTS_BY_SUPERVISOR_SQL: &str = r"
SELECT DISTINCT
    c.id,
    c.name,
    c.rfc,
    ca.responsible_id,
    r.username AS responsible_name,
    ca.emisor_id,
    e.name AS emisor_name
FROM clients c
JOIN client_assignments ca ON ca.client_id = c.id
LEFT JOIN users r ON r.id = ca.responsible_id
LEFT JOIN emisors e ON e.id = ca.emisor_id
WHERE ca.supervisor_id = $1
  AND c.active = TRUE
ORDER BY c.name
";

const CLIENTS_BY_RESPONSIBLE_SQL: &str = r"
SELECT DISTINCT
    c.id,
    c.name,
    c.rfc,
    ca.responsible_id,
    r.username AS responsible_name,
    ca.emisor_id,
    e.name AS emisor_name
FROM clients c
JOIN client_assignments ca ON ca.client_id = c.id
LEFT JOIN users r ON r.id = ca.responsible_id
LEFT JOIN emisors e ON e.id = ca.emisor_id
WHERE ca.responsible_id = $1
  AND c.active = TRUE
ORDER BY c.name
";

#[derive(Debug, FromQueryResult)]
struct AssignmentRow {
    id: i32,
    status_id: i32,
    assignment_type_id: i32,
    assignment_type_name: String,
    assignment_status_id: i32,
    assignment_status_name: String,
}

#[derive(Debug, FromQueryResult)]
struct MatrixRow {
    client_id: Uuid,
    client_name: String,
    assignment_type_id: i32,
    assignment_type_name: String,
    selected: bool,
}

#[derive(Debug, FromQueryResult)]
struct ClientInfoRow {
    id: Uuid,
    name: String,
    rfc: Option<String>,
    responsible_id: Option<Uuid>,
    responsible_name: Option<String>,
    emisor_id: Option<i32>,
    emisor_name: Option<String>,
}

impl From<accountancy_types::Model> for AccountancyType {
    fn from(model: accountancy_types::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<assignment_statuses::Model> for AssignmentStatus {
    fn from(model: assignment_statuses::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<client_accountancy_status::Model> for ClientAccountancyStatus {
    fn from(model: client_accountancy_status::Model) -> Self {
        Self {
            id: model.id,
            client_id: ClientId::from_uuid(model.client_id),
            month: model.month,
            due_date: model.due_date,
            observations: model.observations,
        }
    }
}

impl From<clients::Model> for ClientSummary {
    fn from(model: clients::Model) -> Self {
        Self {
            id: ClientId::from_uuid(model.id),
            name: model.name,
        }
    }
}

impl From<AssignmentRow> for ClientAccountancyAssignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            id: row.id,
            status_id: row.status_id,
            assignment_type_id: row.assignment_type_id,
            assignment_type_name: row.assignment_type_name,
            assignment_status_id: row.assignment_status_id,
            assignment_status_name: row.assignment_status_name,
        }
    }
}

impl From<MatrixRow> for ClientAssignmentMatrixRow {
    fn from(row: MatrixRow) -> Self {
        Self {
            client_id: ClientId::from_uuid(row.client_id),
            client_name: row.client_name,
            assignment_type_id: row.assignment_type_id,
            assignment_type_name: row.assignment_type_name,
            selected: row.selected,
        }
    }
}

impl From<ClientInfoRow> for AccountancyClientInfo {
    fn from(row: ClientInfoRow) -> Self {
        Self {
            id: ClientId::from_uuid(row.id),
            name: row.name,
            rfc: row.rfc,
            responsible_id: row.responsible_id.map(UserId::from_uuid),
            responsible_name: row.responsible_name,
            emisor_id: row.emisor_id,
            emisor_name: row.emisor_name,
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn db_err(err: DbErr) -> AccountancyError {
    AccountancyError::Database(err.to_string())
}

/// Upserts one assignment row per input, keyed on `(status_id, assignment_type_id)`.
///
/// An existing row keeps its ID and takes the new `assignment_status_id`.
async fn upsert_assignments<C: ConnectionTrait>(
    conn: &C,
    status_id: i32,
    assignments: &[AssignmentInput],
) -> Result<(), AccountancyError> {
    for assignment in assignments {
        let row = client_accountancy_assignments::ActiveModel {
            status_id: Set(status_id),
            assignment_type_id: Set(assignment.assignment_type_id),
            assignment_status_id: Set(assignment.assignment_status_id),
            ..Default::default()
        };

        client_accountancy_assignments::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    client_accountancy_assignments::Column::StatusId,
                    client_accountancy_assignments::Column::AssignmentTypeId,
                ])
                .update_column(client_accountancy_assignments::Column::AssignmentStatusId)
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(db_err)?;
    }
    Ok(())
}

/// Postgres-backed accountancy repository.
#[derive(Debug)]
pub struct AccountancyRepository {
    db: Arc<DatabaseConnection>,
}

impl AccountancyRepository {
    /// Creates a new accountancy repository over a shared connection pool.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn statement(&self, sql: &str, values: Vec<sea_orm::Value>) -> Statement {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }

    async fn clients_by_staff(
        &self,
        sql: &str,
        user_id: UserId,
    ) -> Result<Vec<AccountancyClientInfo>, AccountancyError> {
        let rows = ClientInfoRow::find_by_statement(
            self.statement(sql, vec![user_id.into_inner().into()]),
        )
        .all(self.db.as_ref())
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl AccountancyStore for AccountancyRepository {
    async fn accountancy_types(&self) -> Result<Vec<AccountancyType>, AccountancyError> {
        let types = accountancy_types::Entity::find()
            .order_by_asc(accountancy_types::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;

        Ok(types.into_iter().map(Into::into).collect())
    }

    async fn assignment_statuses(&self) -> Result<Vec<AssignmentStatus>, AccountancyError> {
        let statuses = assignment_statuses::Entity::find()
            .order_by_asc(assignment_statuses::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;

        Ok(statuses.into_iter().map(Into::into).collect())
    }

    async fn active_clients(&self) -> Result<Vec<ClientSummary>, AccountancyError> {
        let clients = clients::Entity::find()
            .filter(clients::Column::Active.eq(true))
            .order_by_asc(clients::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;

        Ok(clients.into_iter().map(Into::into).collect())
    }

    async fn clients_by_supervisor(
        &self,
        supervisor_id: UserId,
    ) -> Result<Vec<AccountancyClientInfo>, AccountancyError> {
        self.clients_by_staff(CLIENTS_BY_SUPERVISOR_SQL, supervisor_id)
            .await
    }

    async fn clients_by_responsible(
        &self,
        responsible_id: UserId,
    ) -> Result<Vec<AccountancyClientInfo>, AccountancyError> {
        self.clients_by_staff(CLIENTS_BY_RESPONSIBLE_SQL, responsible_id)
            .await
    }

    async fn client_assignment_matrix(
        &self,
    ) -> Result<Vec<ClientAssignmentMatrixRow>, AccountancyError> {
        let rows = MatrixRow::find_by_statement(self.statement(MATRIX_SQL, vec![]))
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_client_assignments(
        &self,
        client_id: ClientId,
        selections: &[AssignmentSelection],
    ) -> Result<(), AccountancyError> {
        let plan = partition_selections(selections);
        if plan.is_empty() {
            return Ok(());
        }

        let client_uuid = client_id.into_inner();
        // Dropping `txn` before commit rolls back both phases.
        let txn = self.db.begin().await.map_err(db_err)?;

        if !plan.to_remove.is_empty() {
            client_assignments_types::Entity::delete_many()
                .filter(client_assignments_types::Column::ClientId.eq(client_uuid))
                .filter(
                    client_assignments_types::Column::AssignmentTypeId
                        .is_in(plan.to_remove.iter().copied()),
                )
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        for &assignment_type_id in &plan.to_add {
            let link = client_assignments_types::ActiveModel {
                client_id: Set(client_uuid),
                assignment_type_id: Set(assignment_type_id),
            };

            client_assignments_types::Entity::insert(link)
                .on_conflict(
                    OnConflict::columns([
                        client_assignments_types::Column::ClientId,
                        client_assignments_types::Column::AssignmentTypeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        info!(
            client_id = %client_id,
            removed = plan.to_remove.len(),
            added = plan.to_add.len(),
            "Client assignment types reconciled"
        );
        Ok(())
    }

    async fn create_status_with_assignments(
        &self,
        status: NewAccountancyStatus,
        assignments: &[AssignmentInput],
    ) -> Result<ClientAccountancyStatus, AccountancyError> {
        let client_id = status.client_id;
        let month = status.month;
        let txn = self.db.begin().await.map_err(db_err)?;

        let inserted = client_accountancy_status::ActiveModel {
            client_id: Set(client_id.into_inner()),
            month: Set(month),
            due_date: Set(status.due_date),
            observations: Set(status.observations),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AccountancyError::DuplicateMonth { client_id, month }
            }
            _ => db_err(err),
        })?;

        upsert_assignments(&txn, inserted.id, assignments).await?;
        txn.commit().await.map_err(db_err)?;

        info!(
            client_id = %client_id,
            status_id = inserted.id,
            month = %month,
            assignments = assignments.len(),
            "Accountancy status created"
        );
        Ok(inserted.into())
    }

    async fn update_status_with_assignments(
        &self,
        status_id: i32,
        client_id: ClientId,
        update: StatusUpdate,
        assignments: &[AssignmentInput],
    ) -> Result<(), AccountancyError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let result = client_accountancy_status::Entity::update_many()
            .col_expr(
                client_accountancy_status::Column::DueDate,
                Expr::value(update.due_date),
            )
            .col_expr(
                client_accountancy_status::Column::Observations,
                Expr::value(update.observations),
            )
            .filter(client_accountancy_status::Column::Id.eq(status_id))
            .filter(client_accountancy_status::Column::ClientId.eq(client_id.into_inner()))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            warn!(
                client_id = %client_id,
                status_id,
                "Status not found or owned by another client"
            );
            return Err(AccountancyError::StatusNotFound {
                status_id,
                client_id,
            });
        }

        upsert_assignments(&txn, status_id, assignments).await?;
        txn.commit().await.map_err(db_err)?;

        info!(
            client_id = %client_id,
            status_id,
            assignments = assignments.len(),
            "Accountancy status updated"
        );
        Ok(())
    }

    async fn client_history(
        &self,
        client_id: ClientId,
    ) -> Result<ClientAccountancyHistory, AccountancyError> {
        let client_uuid = client_id.into_inner();

        let active_assignments: Vec<AccountancyType> = accountancy_types::Entity::find()
            .from_raw_sql(self.statement(ACTIVE_TYPES_SQL, vec![client_uuid.into()]))
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?
            .into_iter()
            .map(Into::into)
            .collect();

        let statuses = client_accountancy_status::Entity::find()
            .filter(client_accountancy_status::Column::ClientId.eq(client_uuid))
            .order_by_desc(client_accountancy_status::Column::Month)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;

        let mut history = Vec::with_capacity(statuses.len());
        for status in statuses {
            let assignments = AssignmentRow::find_by_statement(self.statement(
                STATUS_ASSIGNMENTS_SQL,
                vec![status.id.into(), status.client_id.into()],
            ))
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?
            .into_iter()
            .map(Into::into)
            .collect();

            history.push(ClientAccountancyHistoryEntry {
                status: status.into(),
                assignments,
            });
        }

        debug!(
            client_id = %client_id,
            months = history.len(),
            active_types = active_assignments.len(),
            "Accountancy history loaded"
        );

        Ok(ClientAccountancyHistory {
            history,
            active_assignments,
        })
    }
}

#[cfg(test)]
#[path = "accountancy_tests.rs"]
mod tests;
