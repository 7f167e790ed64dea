//! Recurring expense routes.
//!
//! Administrative CRUD over recurrence definitions plus the manual trigger
//! for a processing pass.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::error_response};
use outlay_core::recurring::{
    Frequency, RecurringExpense, RecurringExpenseInput, RecurringExpenseService,
};
use outlay_db::{CategoryRepository, RecurringExpenseRepository};
use outlay_shared::types::{CategoryId, RecurringExpenseId};
use outlay_shared::types::money::to_money_scale;

/// Creates the recurring expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recurring-expenses",
            get(list_recurring_expenses).post(create_recurring_expense),
        )
        .route("/recurring-expenses/active", get(list_active_recurring_expenses))
        .route("/recurring-expenses/process", post(process_recurring_expenses))
        .route(
            "/recurring-expenses/{id}",
            get(get_recurring_expense)
                .put(update_recurring_expense)
                .delete(delete_recurring_expense),
        )
        .route(
            "/recurring-expenses/{id}/toggle",
            patch(toggle_recurring_expense),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating or replacing a recurring expense.
#[derive(Debug, Deserialize)]
pub struct RecurringExpenseRequest {
    /// Amount per occurrence.
    pub amount: Decimal,
    /// Category ID.
    pub category_id: CategoryId,
    /// Optional description.
    pub description: Option<String>,
    /// DAILY, WEEKLY, BIWEEKLY, MONTHLY, QUARTERLY or YEARLY.
    pub frequency: Frequency,
    /// First occurrence.
    pub start_date: NaiveDate,
    /// Optional inclusive end date.
    pub end_date: Option<NaiveDate>,
}

impl From<RecurringExpenseRequest> for RecurringExpenseInput {
    fn from(r: RecurringExpenseRequest) -> Self {
        Self {
            amount: r.amount,
            category_id: r.category_id,
            description: r.description,
            frequency: r.frequency,
            start_date: r.start_date,
            end_date: r.end_date,
        }
    }
}

/// Query parameters for the toggle endpoint.
#[derive(Debug, Deserialize)]
pub struct ToggleQuery {
    /// Desired active flag.
    pub active: bool,
}

/// Response for a recurring expense.
#[derive(Debug, Serialize)]
pub struct RecurringExpenseResponse {
    /// Definition ID.
    pub id: String,
    /// Amount per occurrence.
    pub amount: String,
    /// Category ID.
    pub category_id: String,
    /// Category name.
    pub category_name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Frequency.
    pub frequency: Frequency,
    /// First occurrence.
    pub start_date: NaiveDate,
    /// Inclusive end date.
    pub end_date: Option<NaiveDate>,
    /// Next occurrence to be materialized.
    pub next_occurrence: NaiveDate,
    /// Whether the definition is processed.
    pub active: bool,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<RecurringExpense> for RecurringExpenseResponse {
    fn from(e: RecurringExpense) -> Self {
        Self {
            id: e.id.to_string(),
            amount: to_money_scale(e.amount).to_string(),
            category_id: e.category_id.to_string(),
            category_name: e.category_name,
            description: e.description,
            frequency: e.frequency,
            start_date: e.start_date,
            end_date: e.end_date,
            next_occurrence: e.next_occurrence,
            active: e.active,
            created_at: e.created_at.to_rfc3339(),
            updated_at: e.updated_at.to_rfc3339(),
        }
    }
}

type Service = RecurringExpenseService<RecurringExpenseRepository, CategoryRepository>;

fn recurring_service(state: &AppState) -> Service {
    RecurringExpenseService::new(
        Arc::new(RecurringExpenseRepository::new((*state.db).clone())),
        Arc::new(CategoryRepository::new((*state.db).clone())),
    )
}

fn to_response_list(expenses: Vec<RecurringExpense>) -> Vec<RecurringExpenseResponse> {
    expenses
        .into_iter()
        .map(RecurringExpenseResponse::from)
        .collect()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/recurring-expenses` - List all definitions.
async fn list_recurring_expenses(State(state): State<AppState>) -> impl IntoResponse {
    match recurring_service(&state).list().await {
        Ok(expenses) => (StatusCode::OK, Json(to_response_list(expenses))).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET `/recurring-expenses/active` - List active definitions.
async fn list_active_recurring_expenses(State(state): State<AppState>) -> impl IntoResponse {
    match recurring_service(&state).list_active().await {
        Ok(expenses) => (StatusCode::OK, Json(to_response_list(expenses))).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET `/recurring-expenses/{id}` - Fetch one definition.
async fn get_recurring_expense(
    State(state): State<AppState>,
    Path(id): Path<RecurringExpenseId>,
) -> impl IntoResponse {
    match recurring_service(&state).get(id).await {
        Ok(expense) => {
            (StatusCode::OK, Json(RecurringExpenseResponse::from(expense))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST `/recurring-expenses` - Create a definition.
async fn create_recurring_expense(
    State(state): State<AppState>,
    Json(payload): Json<RecurringExpenseRequest>,
) -> impl IntoResponse {
    match recurring_service(&state).create(payload.into()).await {
        Ok(expense) => {
            (StatusCode::CREATED, Json(RecurringExpenseResponse::from(expense))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// PUT `/recurring-expenses/{id}` - Replace a definition's fields.
async fn update_recurring_expense(
    State(state): State<AppState>,
    Path(id): Path<RecurringExpenseId>,
    Json(payload): Json<RecurringExpenseRequest>,
) -> impl IntoResponse {
    match recurring_service(&state).update(id, payload.into()).await {
        Ok(expense) => {
            (StatusCode::OK, Json(RecurringExpenseResponse::from(expense))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// DELETE `/recurring-expenses/{id}` - Delete a definition.
async fn delete_recurring_expense(
    State(state): State<AppState>,
    Path(id): Path<RecurringExpenseId>,
) -> impl IntoResponse {
    match recurring_service(&state).delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH `/recurring-expenses/{id}/toggle?active=bool` - Pause or resume.
async fn toggle_recurring_expense(
    State(state): State<AppState>,
    Path(id): Path<RecurringExpenseId>,
    Query(query): Query<ToggleQuery>,
) -> impl IntoResponse {
    match recurring_service(&state).toggle(id, query.active).await {
        Ok(expense) => {
            (StatusCode::OK, Json(RecurringExpenseResponse::from(expense))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST `/recurring-expenses/process` - Run a processing pass for today.
async fn process_recurring_expenses(State(state): State<AppState>) -> impl IntoResponse {
    let today = Local::now().date_naive();
    info!(reference_date = %today, "Manual recurring expense pass requested");

    match state.processor.run(today).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response(e),
    }
}
