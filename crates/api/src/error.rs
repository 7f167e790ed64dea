//! Mapping of domain errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use outlay_shared::AppError;
use serde_json::json;
use tracing::error;

/// Message returned in place of internal details for 5xx responses.
const INTERNAL_MESSAGE: &str = "An error occurred";

/// Converts an error into a JSON error response.
///
/// Server-side failures are logged and their details withheld from the client.
pub fn error_response(err: impl Into<AppError>) -> Response {
    let err = err.into();
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if status.is_server_error() {
        error!(error = %err, "Request failed");
        INTERNAL_MESSAGE.to_string()
    } else {
        err.message().to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": message
        })),
    )
        .into_response()
}
