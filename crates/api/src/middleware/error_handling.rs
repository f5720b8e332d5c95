//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON bodies so every endpoint fails the
//! same way. Bodies always carry a `message`; validation failures add `issues` and slot
//! conflicts add the full `conflicts` list.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use schooltime_core::errors::SchoolError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use schooltime_api::middleware::error_handling::AppError;
/// use schooltime_core::errors::SchoolError;
///
/// async fn handler(class_id: Option<i64>) -> Result<Json<i64>, AppError> {
///     let class_id = class_id
///         .ok_or_else(|| SchoolError::Validation("classId is required".to_string()))?;
///     Ok(Json(class_id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SchoolError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();

        let (status, body) = match self.0 {
            SchoolError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            SchoolError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            SchoolError::InvalidRequest(issues) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Validation failed", "issues": issues }),
            ),
            SchoolError::Conflict(message) => (StatusCode::CONFLICT, json!({ "message": message })),
            SchoolError::SlotConflict(conflicts) => (
                StatusCode::CONFLICT,
                json!({ "message": message, "conflicts": conflicts }),
            ),
            SchoolError::Authentication(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "message": message }))
            }
            SchoolError::Authorization(message) => {
                (StatusCode::FORBIDDEN, json!({ "message": message }))
            }
            SchoolError::Database(_) | SchoolError::Internal(_) => {
                error!("Request failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on `SchoolResult` inside handlers.
impl From<SchoolError> for AppError {
    fn from(err: SchoolError) -> Self {
        AppError(err)
    }
}

/// Storage failures reported as bare `eyre` errors become internal errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SchoolError::Database(err))
    }
}

/// Maps a SchoolError to an HTTP response
pub fn map_error(err: SchoolError) -> Response {
    AppError(err).into_response()
}
