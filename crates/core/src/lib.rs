//! Core business logic for Contabi.
//!
//! This crate contains domain logic with ZERO web or database dependencies.
//! Domain types, error taxonomy, and the storage contract live here.
//!
//! # Modules
//!
//! - `accountancy` - Assignment matrix, monthly status records, and client history

pub mod accountancy;
