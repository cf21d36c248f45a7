//! `SeaORM` entity definitions.

#![allow(missing_docs)]

pub mod accountancy_types;
pub mod assignment_statuses;
pub mod client_accountancy_assignments;
pub mod client_accountancy_status;
pub mod client_assignments_types;
pub mod clients;
