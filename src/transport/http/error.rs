//! API error type with automatic HTTP status mapping.
//!
//! Every error body uses the `ApiResponse` envelope (`success: false`).

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::types::ApiResponse;
use crate::domain::model::{FieldError, ValidationError};
use crate::storage::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or semantically invalid input (422).
    #[error("{0}")]
    Validation(ValidationError),

    /// No row with this id (404).
    #[error("{resource} not found (id {id})")]
    NotFound { resource: &'static str, id: i32 },

    /// Unique or foreign key constraint violated (409).
    #[error("{message}")]
    Conflict { message: String },

    /// Value rejected by the database, e.g. out of range (400).
    #[error("{message}")]
    BadRequest { message: String },

    /// Unexpected persistence failure (500, logged).
    #[error(transparent)]
    Database(StoreError),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(e) => ApiResponse {
                success: false,
                data: Some(serde_json::json!({ "errors": e.errors })),
                error: Some("Validation failed".to_string()),
            },
            Self::NotFound { resource, id } => {
                ApiResponse::error(format!("{} not found (id {})", resource, id))
            }
            Self::Conflict { message } | Self::BadRequest { message } => {
                ApiResponse::error(message)
            }
            Self::Database(e) => {
                tracing::error!(error = %e, "database error");
                ApiResponse::error("an internal error occurred")
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation { .. } | StoreError::ForeignKeyViolation { .. } => {
                Self::Conflict {
                    message: e.to_string(),
                }
            }
            StoreError::InvalidValue(_) => Self::BadRequest {
                message: e.to_string(),
            },
            StoreError::Database(_) => Self::Database(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let field = field_from_message(&message).unwrap_or("body").to_string();
        Self::Validation(ValidationError {
            errors: vec![FieldError { field, message }],
        })
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let message = rejection.body_text();
        let field = field_from_message(&message).unwrap_or("query").to_string();
        Self::Validation(ValidationError {
            errors: vec![FieldError { field, message }],
        })
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(ValidationError::single("path", rejection.body_text()))
    }
}

/// Best-effort field name from a serde error message.
///
/// Handles ``missing field `vin` `` and the `year: invalid type ...` path prefix.
pub fn field_from_message(message: &str) -> Option<&str> {
    if let Some(start) = message.find("missing field `") {
        let rest = &message[start + "missing field `".len()..];
        return rest.find('`').map(|end| &rest[..end]);
    }
    let detail = message
        .split_once("target type: ")
        .map(|(_, d)| d)
        .unwrap_or(message);
    let (path, _) = detail.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then_some(path)
}
