use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lessonbook_core::{CoreError, ValidationError};
use serde::Serialize;

/// Every failure a handler can report. Each variant maps to exactly one
/// status code and all of them render as `{ "error", "message" }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{error}: {message}")]
    Validation { error: String, message: String },
    #[error("{error}: {message}")]
    NotFound { error: String, message: String },
    #[error("Store failure: {0}")]
    Store(String),
    #[error("Asset not found: {0}")]
    AssetNotFound(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn lesson_not_found(id: &str) -> Self {
        AppError::NotFound {
            error: "Lesson not found".to_string(),
            message: format!("No lesson exists with id {}", id),
        }
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        AppError::Validation {
            error: "Invalid request body".to_string(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AssetNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn into_body(self) -> ErrorBody {
        let (error, message) = match self {
            AppError::Validation { error, message } => (error, message),
            AppError::NotFound { error, message } => (error, message),
            AppError::Store(msg) => ("Internal Server Error".to_string(), msg),
            AppError::AssetNotFound(path) => (
                "Image not found".to_string(),
                format!("The requested image '{}' does not exist", path),
            ),
        };
        ErrorBody { error, message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(self.into_body())).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation {
            error: err.to_string(),
            message: err.detail(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Store(msg) => AppError::Store(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_body(rejection.body_text())
    }
}
