//! Application error type shared by the query core, the store and the handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// JSON body returned for every error.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidInput(message.into())
    }

    pub fn blog_not_found() -> Self {
        AppError::NotFound("Blog not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ArticleNotFound(_) => AppError::blog_not_found(),
            StoreError::DuplicateSlug(slug) => {
                AppError::Conflict(format!("Slug already exists: {}", slug))
            }
            StoreError::UnknownCategory(id) => {
                AppError::InvalidInput(format!("Unknown category_id: {}", id))
            }
            StoreError::Poisoned => AppError::Unavailable("content store unavailable".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::NotFound(msg) | AppError::Conflict(msg) | AppError::InvalidInput(msg) => {
                ErrorResponse {
                    error: msg,
                    message: None,
                }
            }
            AppError::Unauthorized => ErrorResponse {
                error: "Unauthorized".to_string(),
                message: Some("Admin login required".to_string()),
            },
            AppError::Unavailable(detail) => {
                tracing::error!(error = %detail, "request failed with unavailable store");
                ErrorResponse {
                    error: "Service unavailable".to_string(),
                    message: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
