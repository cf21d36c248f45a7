//! Accountancy routes: reference data, client listings, the assignment
//! matrix, and monthly status records.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use contabi_core::accountancy::{
    AccountancyError, AssignmentInput, AssignmentSelection, NewAccountancyStatus, StatusUpdate,
};
use contabi_shared::types::{ClientId, UserId};

use crate::{AppState, error::ApiError};

/// Creates the accountancy routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accountancy/types", get(list_types))
        .route("/accountancy/statuses", get(list_statuses))
        .route("/accountancy/clients/all", get(list_active_clients))
        .route(
            "/accountancy/clients/supervisor/{supervisor_id}",
            get(list_clients_by_supervisor),
        )
        .route(
            "/accountancy/clients/responsible/{responsible_id}",
            get(list_clients_by_responsible),
        )
        .route("/accountancy/clients/assignments", get(get_assignment_matrix))
        .route(
            "/accountancy/client/{client_id}/assignments",
            put(update_client_assignments),
        )
        .route("/accountancy/clients/history/record", post(create_status_record))
        .route(
            "/accountancy/client/{client_id}/status/{status_id}",
            put(update_status_record),
        )
        .route("/accountancy/client/{client_id}/history", get(get_client_history))
}

/// Request body for creating a monthly record.
#[derive(Debug, Deserialize)]
pub struct CreateStatusRequest {
    /// The status row to insert.
    pub status: NewAccountancyStatus,
    /// Assignment outcomes for the month.
    #[serde(default)]
    pub assignments: Vec<AssignmentInput>,
}

/// Status fields accepted when updating a monthly record.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateBody {
    /// Client the caller believes owns the status; must match the path.
    pub client_id: ClientId,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New observations.
    pub observations: Option<String>,
}

/// Request body for updating a monthly record.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Status fields.
    pub status: StatusUpdateBody,
    /// Assignment outcomes for the month.
    #[serde(default)]
    pub assignments: Vec<AssignmentInput>,
}

/// GET `/accountancy/types` - All accountancy types.
async fn list_types(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let types = state.store.accountancy_types().await?;
    Ok(Json(types))
}

/// GET `/accountancy/statuses` - All assignment statuses.
async fn list_statuses(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let statuses = state.store.assignment_statuses().await?;
    Ok(Json(statuses))
}

/// GET `/accountancy/clients/all` - Active clients.
async fn list_active_clients(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let clients = state.store.active_clients().await?;
    Ok(Json(clients))
}

/// GET `/accountancy/clients/supervisor/{supervisor_id}`
async fn list_clients_by_supervisor(
    State(state): State<AppState>,
    Path(supervisor_id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    let clients = state.store.clients_by_supervisor(supervisor_id).await?;
    Ok(Json(clients))
}

/// GET `/accountancy/clients/responsible/{responsible_id}`
async fn list_clients_by_responsible(
    State(state): State<AppState>,
    Path(responsible_id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    let clients = state.store.clients_by_responsible(responsible_id).await?;
    Ok(Json(clients))
}

/// GET `/accountancy/clients/assignments` - Client x type matrix.
async fn get_assignment_matrix(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state.store.client_assignment_matrix().await?;
    Ok(Json(rows))
}

/// PUT `/accountancy/client/{client_id}/assignments` - Reconcile active types.
async fn update_client_assignments(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
    Json(selections): Json<Vec<AssignmentSelection>>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .update_client_assignments(client_id, &selections)
        .await?;

    Ok(Json(json!({
        "message": "Client accountancy assignments updated successfully"
    })))
}

/// POST `/accountancy/clients/history/record` - Create a monthly record.
async fn create_status_record(
    State(state): State<AppState>,
    Json(payload): Json<CreateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state
        .store
        .create_status_with_assignments(payload.status, &payload.assignments)
        .await?;

    info!(
        client_id = %status.client_id,
        status_id = status.id,
        "Monthly record created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Client accountancy status and assignments created successfully",
            "status": status,
        })),
    ))
}

/// PUT `/accountancy/client/{client_id}/status/{status_id}` - Update a monthly record.
async fn update_status_record(
    State(state): State<AppState>,
    Path((client_id, status_id)): Path<(ClientId, i32)>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let body_client = payload.status.client_id;
    if body_client != client_id {
        warn!(
            client_id = %client_id,
            status_client_id = %body_client,
            "Status does not belong to the specified client"
        );
        return Err(AccountancyError::ClientMismatch {
            path: client_id,
            body: body_client,
        }
        .into());
    }

    let update = StatusUpdate {
        due_date: payload.status.due_date,
        observations: payload.status.observations,
    };

    state
        .store
        .update_status_with_assignments(status_id, client_id, update, &payload.assignments)
        .await?;

    Ok(Json(json!({
        "message": "Client accountancy status and assignments updated successfully"
    })))
}

/// GET `/accountancy/client/{client_id}/history` - Monthly history of a client.
async fn get_client_history(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state.store.client_history(client_id).await?;
    Ok(Json(history))
}

#[cfg(test)]
#[path = "accountancy_tests.rs"]
mod tests;
