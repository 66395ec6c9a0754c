use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mindgen_core::MindMapError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Service rejected request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Core(#[from] MindMapError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// JSON error body, `{"detail": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match self {
            ServiceError::Core(MindMapError::EmptyKeyword) => StatusCode::BAD_REQUEST,
            // 422 for a well-formed body with missing or mistyped fields
            ServiceError::InvalidBody(ref rejection) => rejection.status(),
            ServiceError::Rejected { status, .. } => {
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let detail = match self {
            ServiceError::Rejected { detail, .. } => detail,
            ServiceError::InvalidBody(rejection) => rejection.body_text(),
            other => other.to_string(),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
