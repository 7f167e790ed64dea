//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for budgets and recurring expenses
//! - Shared application state
//! - Error-to-response mapping

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use outlay_core::recurring::RecurringExpenseProcessor;
use outlay_db::RecurringExpenseRepository;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Processor type wired to the database store.
pub type Processor = RecurringExpenseProcessor<RecurringExpenseRepository>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Recurring expense processor, shared with the daily scheduler so manual
    /// and scheduled passes never overlap.
    pub processor: Arc<Processor>,
}

impl AppState {
    /// Builds state around a database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let processor = RecurringExpenseProcessor::new(Arc::new(RecurringExpenseRepository::new(
            db.clone(),
        )));
        Self {
            db: Arc::new(db),
            processor: Arc::new(processor),
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
