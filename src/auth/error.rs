use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use crate::core::messages::catalog;
use crate::tasks::validation::FieldErrors;

#[derive(Debug, Clone)]
pub enum AuthApiError {
    Validation(FieldErrors),
    EmailTaken,
    InvalidCredentials,
    Database,
}

impl std::fmt::Display for AuthApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "Validation failed for {} field(s)", errors.len()),
            Self::EmailTaken => write!(f, "Email already registered"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::Database => write!(f, "Database operation failed"),
        }
    }
}

impl std::error::Error for AuthApiError {}

impl From<crate::core::utils::StoreError> for AuthApiError {
    fn from(e: crate::core::utils::StoreError) -> Self {
        log::error!("User store error: {e}");
        Self::Database
    }
}

impl IntoResponse for AuthApiError {
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
            Self::EmailTaken => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "message": messages.validation_failed,
                    "errors": { "email": [messages.email_taken] },
                    "status": 400
                }),
            ),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "message": messages.invalid_credentials, "status": 401 }),
            ),
            Self::Database => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "message": messages.server_error, "status": 500 }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
