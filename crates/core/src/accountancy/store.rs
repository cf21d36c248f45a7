//! Storage contract for the accountancy subsystem.

use async_trait::async_trait;
use contabi_shared::types::{ClientId, UserId};

use super::error::AccountancyError;
use super::types::{
    AccountancyClientInfo, AccountancyType, AssignmentInput, AssignmentSelection,
    AssignmentStatus, ClientAccountancyHistory, ClientAccountancyStatus,
    ClientAssignmentMatrixRow, ClientSummary, NewAccountancyStatus, StatusUpdate,
};

/// Data access for accountancy statuses, assignments, and their reference data.
///
/// Implemented by the Postgres repository; handlers depend only on this trait
/// so they can run against a substitute store.
#[async_trait]
pub trait AccountancyStore: Send + Sync {
    /// Lists all accountancy types, ordered by name.
    async fn accountancy_types(&self) -> Result<Vec<AccountancyType>, AccountancyError>;

    /// Lists all assignment statuses, ordered by ID.
    async fn assignment_statuses(&self) -> Result<Vec<AssignmentStatus>, AccountancyError>;

    /// Lists active clients, ordered by name.
    async fn active_clients(&self) -> Result<Vec<ClientSummary>, AccountancyError>;

    /// Lists active clients assigned to a supervisor.
    async fn clients_by_supervisor(
        &self,
        supervisor_id: UserId,
    ) -> Result<Vec<AccountancyClientInfo>, AccountancyError>;

    /// Lists active clients assigned to a responsible.
    async fn clients_by_responsible(
        &self,
        responsible_id: UserId,
    ) -> Result<Vec<AccountancyClientInfo>, AccountancyError>;

    /// Every active client crossed with every accountancy type.
    async fn client_assignment_matrix(
        &self,
    ) -> Result<Vec<ClientAssignmentMatrixRow>, AccountancyError>;

    /// Reconciles a client's active assignment types with the selections.
    ///
    /// Types not mentioned keep their current state. Atomic.
    async fn update_client_assignments(
        &self,
        client_id: ClientId,
        selections: &[AssignmentSelection],
    ) -> Result<(), AccountancyError>;

    /// Creates a monthly status and upserts its assignments in one transaction.
    async fn create_status_with_assignments(
        &self,
        status: NewAccountancyStatus,
        assignments: &[AssignmentInput],
    ) -> Result<ClientAccountancyStatus, AccountancyError>;

    /// Updates a status owned by `client_id` and upserts its assignments in one transaction.
    ///
    /// Fails with [`AccountancyError::StatusNotFound`] when the status does not
    /// exist or belongs to another client; nothing is written in that case.
    async fn update_status_with_assignments(
        &self,
        status_id: i32,
        client_id: ClientId,
        update: StatusUpdate,
        assignments: &[AssignmentInput],
    ) -> Result<(), AccountancyError>;

    /// Reads a client's history, most recent month first.
    ///
    /// Assignments whose type is no longer active for the client are omitted.
    async fn client_history(
        &self,
        client_id: ClientId,
    ) -> Result<ClientAccountancyHistory, AccountancyError>;
}
