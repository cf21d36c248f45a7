//! Monthly accountancy tracking: assignment matrix, status records, history.

pub mod error;
pub mod matrix;
pub mod store;
pub mod types;


pub use error::AccountancyError;
pub use matrix::{SelectionPlan, partition_selections};
pub use store::AccountancyStore;
pub use types::{
    AccountancyClientInfo, AccountancyType, AssignmentInput, AssignmentSelection,
    AssignmentStatus, ClientAccountancyAssignment, ClientAccountancyHistory,
    ClientAccountancyHistoryEntry, ClientAccountancyStatus, ClientAssignmentMatrixRow,
    ClientSummary, NewAccountancyStatus, StatusUpdate,
};
