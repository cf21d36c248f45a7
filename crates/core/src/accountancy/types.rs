//! Accountancy data types.

use chrono::NaiveDate;
use contabi_shared::types::{ClientId, UserId};
use serde::{Deserialize, Serialize};

/// A category of accountancy task a client may be subject to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountancyType {
    /// Type ID.
    pub id: i32,
    /// Display name.
    pub name: String,
}

/// Resolution state an assignment can be in (e.g. pending, done).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentStatus {
    /// Status ID.
    pub id: i32,
    /// Display name.
    pub name: String,
}

/// One cell of a matrix update: whether the client tracks a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSelection {
    /// Accountancy type ID.
    pub assignment_type_id: i32,
    /// `true` activates the type for the client, `false` deactivates it.
    pub selected: bool,
}

/// A row of the client × accountancy-type matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAssignmentMatrixRow {
    /// Client ID.
    pub client_id: ClientId,
    /// Client name.
    pub client_name: String,
    /// Accountancy type ID.
    pub assignment_type_id: i32,
    /// Accountancy type name.
    pub assignment_type_name: String,
    /// Whether the type is active for the client.
    pub selected: bool,
}

/// A stored monthly accountancy status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAccountancyStatus {
    /// Status ID, assigned by the store.
    pub id: i32,
    /// Owning client.
    pub client_id: ClientId,
    /// Reporting month (YYYY-MM-DD).
    pub month: NaiveDate,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Free-text notes.
    pub observations: Option<String>,
}

/// Input for creating a monthly status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccountancyStatus {
    /// Owning client.
    pub client_id: ClientId,
    /// Reporting month.
    pub month: NaiveDate,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Free-text notes.
    pub observations: Option<String>,
}

/// Editable fields of an existing monthly status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// New due date (`None` clears it).
    pub due_date: Option<NaiveDate>,
    /// New notes (`None` clears them).
    pub observations: Option<String>,
}

/// Resolution of one assignment type for a status, as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInput {
    /// Accountancy type ID.
    pub assignment_type_id: i32,
    /// Assignment status ID.
    pub assignment_status_id: i32,
}

/// Resolution of one assignment type for a status, as read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAccountancyAssignment {
    /// Assignment row ID.
    pub id: i32,
    /// Parent status ID.
    pub status_id: i32,
    /// Accountancy type ID.
    pub assignment_type_id: i32,
    /// Accountancy type name.
    pub assignment_type_name: String,
    /// Assignment status ID.
    pub assignment_status_id: i32,
    /// Assignment status name.
    pub assignment_status_name: String,
}

/// One month of a client's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAccountancyHistoryEntry {
    /// The monthly status.
    pub status: ClientAccountancyStatus,
    /// Assignments whose type is still active for the client.
    pub assignments: Vec<ClientAccountancyAssignment>,
}

/// A client's accountancy timeline, most recent month first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAccountancyHistory {
    /// Monthly entries ordered by month descending.
    pub history: Vec<ClientAccountancyHistoryEntry>,
    /// Types currently tracked for the client, ordered by name.
    pub active_assignments: Vec<AccountancyType>,
}

/// Client as listed on the supervisor/responsible screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountancyClientInfo {
    /// Client ID.
    pub id: ClientId,
    /// Client name.
    pub name: String,
    /// Tax identifier.
    pub rfc: Option<String>,
    /// Assigned responsible.
    pub responsible_id: Option<UserId>,
    /// Responsible's username.
    pub responsible_name: Option<String>,
    /// Issuing entity.
    pub emisor_id: Option<i32>,
    /// Issuing entity name.
    pub emisor_name: Option<String>,
}

/// Minimal client reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    /// Client ID.
    pub id: ClientId,
    /// Client name.
    pub name: String,
}
