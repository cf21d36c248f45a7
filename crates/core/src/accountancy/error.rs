//! Accountancy error types.

use chrono::NaiveDate;
use contabi_shared::{AppError, types::ClientId};
use thiserror::Error;

/// Accountancy-related errors.
#[derive(Debug, Error)]
pub enum AccountancyError {
    /// The status does not exist or belongs to another client.
    #[error("Status {status_id} not found or does not belong to client {client_id}")]
    StatusNotFound {
        /// Requested status ID.
        status_id: i32,
        /// Client the caller claimed owns it.
        client_id: ClientId,
    },

    /// A status already exists for this client and month.
    #[error("Client {client_id} already has a status for {month}")]
    DuplicateMonth {
        /// Client ID.
        client_id: ClientId,
        /// Reporting month.
        month: NaiveDate,
    },

    /// Request body names a different client than the URL.
    #[error("Status belongs to client {body}, not {path}")]
    ClientMismatch {
        /// Client from the request path.
        path: ClientId,
        /// Client from the request body.
        body: ClientId,
    },

    /// Store failure (connectivity or statement error).
    #[error("Database error: {0}")]
    Database(String),
}

impl From<AccountancyError> for AppError {
    fn from(err: AccountancyError) -> Self {
        match err {
            AccountancyError::StatusNotFound { .. } => Self::NotFound(err.to_string()),
            AccountancyError::DuplicateMonth { .. } => Self::Conflict(err.to_string()),
            AccountancyError::ClientMismatch { .. } => {
                Self::Forbidden("Status does not belong to this client".to_string())
            }
            AccountancyError::Database(msg) => Self::Database(msg),
        }
    }
}
