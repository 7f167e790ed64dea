//! Budget routes: current limit and monthly status.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::error_response};
use outlay_core::budget::{BudgetDefinition, BudgetHealth, BudgetService, BudgetStatus};
use outlay_db::{BudgetRepository, ExpenseRepository};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget", get(get_budget).post(set_budget))
        .route("/budget/status", get(get_budget_status))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for setting the monthly limit.
#[derive(Debug, Deserialize)]
pub struct SetBudgetRequest {
    /// Monthly limit, e.g. `"2000.00"`.
    pub monthly_limit: Decimal,
}

/// Response for a budget.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Budget ID.
    pub id: String,
    /// Monthly limit.
    pub monthly_limit: String,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<BudgetDefinition> for BudgetResponse {
    fn from(b: BudgetDefinition) -> Self {
        Self {
            id: b.id.to_string(),
            monthly_limit: b.monthly_limit.to_string(),
            created_at: b.created_at.to_rfc3339(),
            updated_at: b.updated_at.to_rfc3339(),
        }
    }
}

/// Response for the monthly status.
#[derive(Debug, Serialize)]
pub struct BudgetStatusResponse {
    /// Monthly limit.
    pub monthly_limit: String,
    /// Spent so far this month.
    pub total_spent: String,
    /// Limit minus spent.
    pub remaining: String,
    /// Percentage of the limit used.
    pub percentage_used: String,
    /// HEALTHY, WARNING or OVER_BUDGET.
    pub status: BudgetHealth,
}

impl From<BudgetStatus> for BudgetStatusResponse {
    fn from(s: BudgetStatus) -> Self {
        Self {
            monthly_limit: s.monthly_limit.to_string(),
            total_spent: s.total_spent.to_string(),
            remaining: s.remaining.to_string(),
            percentage_used: s.percentage_used.to_string(),
            status: s.status,
        }
    }
}

fn budget_service(state: &AppState) -> BudgetService<BudgetRepository, ExpenseRepository> {
    BudgetService::new(
        Arc::new(BudgetRepository::new((*state.db).clone())),
        Arc::new(ExpenseRepository::new((*state.db).clone())),
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/budget` - Current budget.
async fn get_budget(State(state): State<AppState>) -> impl IntoResponse {
    match budget_service(&state).current().await {
        Ok(budget) => (StatusCode::OK, Json(BudgetResponse::from(budget))).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST `/budget` - Set the monthly limit.
async fn set_budget(
    State(state): State<AppState>,
    Json(payload): Json<SetBudgetRequest>,
) -> impl IntoResponse {
    match budget_service(&state).set_limit(payload.monthly_limit).await {
        Ok(budget) => {
            info!(budget_id = %budget.id, "Budget set via API");
            (StatusCode::CREATED, Json(BudgetResponse::from(budget))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET `/budget/status` - Spending status for the current month.
async fn get_budget_status(State(state): State<AppState>) -> impl IntoResponse {
    let today = Local::now().date_naive();
    match budget_service(&state).status(today).await {
        Ok(status) => (StatusCode::OK, Json(BudgetStatusResponse::from(status))).into_response(),
        Err(e) => error_response(e),
    }
}
