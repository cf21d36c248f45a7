//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the accountancy back-office
//! - JSON error responses
//!
//! Handlers only see the [`AccountancyStore`] contract; the server binary
//! decides which implementation backs it.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use contabi_core::accountancy::AccountancyStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Accountancy data access.
    pub store: Arc<dyn AccountancyStore>,
}

impl AppState {
    /// Creates application state around a store.
    pub fn new(store: impl AccountancyStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
