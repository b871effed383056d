use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use crate::core::messages::catalog;
use crate::tasks::validation::FieldErrors;

#[derive(Debug, Clone)]
pub enum TaskApiError {
    Validation(FieldErrors),
    InvalidId,
    InvalidStatus,
    InvalidDate,
    NotFound,
    Database,
}

impl std::fmt::Display for TaskApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "Validation failed for {} field(s)", errors.len()),
            Self::InvalidId => write!(f, "Task id is not numeric"),
            Self::InvalidStatus => write!(f, "Unknown task status"),
            Self::InvalidDate => write!(f, "Malformed due date"),
            Self::NotFound => write!(f, "Task not found"),
            Self::Database => write!(f, "Database operation failed"),
        }
    }
}

impl std::error::Error for TaskApiError {}

impl From<crate::core::utils::StoreError> for TaskApiError {
    fn from(e: crate::core::utils::StoreError) -> Self {
        log::error!("Task store error: {e}");
        Self::Database
    }
}

impl IntoResponse for TaskApiError {
    fn into_response(self) -> axum::response::Response {
        let messages = catalog();
        let (status, body) = match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "message": messages.validation_failed,
                    "errors": errors,
                    "status": 400
                }),
            ),
            Self::InvalidId => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": messages.invalid_id, "status": 400 }),
            ),
            Self::InvalidStatus => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": messages.invalid_status, "status": 400 }),
            ),
            Self::InvalidDate => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": messages.invalid_date, "status": 400 }),
            ),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "message": messages.task_not_found, "status": 404 }),
            ),
            Self::Database => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "message": messages.server_error, "status": 500 }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
