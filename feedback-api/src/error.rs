use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use feedback_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{message}")]
    Upstream {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn configuration() -> Self {
        AppError::Configuration("Server configuration error".to_string())
    }

    /// Wrap a failed store call. The store's own message is preferred over
    /// `fallback`, and its raw error payload is kept as `details`.
    pub fn from_store(err: StoreError, fallback: &str) -> Self {
        match err {
            StoreError::Internal { .. } | StoreError::Authentication { .. } => {
                AppError::Internal("Internal server error".to_string())
            }
            other => AppError::Upstream {
                message: other
                    .upstream_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| fallback.to_string()),
                details: other.details().cloned(),
            },
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Upstream { details, .. } => details.clone(),
            _ => None,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::from_store(err, "Upstream store request failed")
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Configuration(_) | AppError::Upstream { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            details: self.details(),
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;
