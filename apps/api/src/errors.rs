use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::enhancement::EnhanceError;
use crate::storage::StorageError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Content cannot be empty")]
    EmptyContent,

    /// Body could not be read (e.g. over the size limit); keeps axum's status.
    #[error("Request body rejected: {message}")]
    Body { status: StatusCode, message: String },

    #[error("Save failed: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::BytesRejection(_) => AppError::Body {
                status: rejection.status(),
                message: rejection.body_text(),
            },
            _ => AppError::Validation(rejection.body_text()),
        }
    }
}

impl From<EnhanceError> for AppError {
    fn from(err: EnhanceError) -> Self {
        match err {
            EnhanceError::EmptyContent => AppError::EmptyContent,
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => AppError::NotFound(format!("Resume {id} not found")),
            StorageError::Io { .. } | StorageError::Serialize(_) => {
                AppError::Storage(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::EmptyContent => (StatusCode::BAD_REQUEST, "EMPTY_CONTENT", self.to_string()),
            AppError::Body { status, message } => (*status, "BODY_REJECTED", message.clone()),
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                // Cause is echoed to the caller.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    self.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
