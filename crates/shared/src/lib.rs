//! Shared types, errors, and configuration for Contabi.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for clients and users
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use error::AppError;
pub use types::{ClientId, UserId};
