use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sitenav_catalog::CatalogError;
use thiserror::Error;

/// Failures starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Store(#[from] sitenav_store::StoreError),

    #[error("favicon resolver error: {0}")]
    Favicon(#[from] sitenav_favicon::FaviconError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A handler failure, rendered as `{"success": false, "message": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => Self::Validation(msg),
            CatalogError::NotFound(name) => Self::NotFound(format!("website not found: {name}")),
            CatalogError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                let message = if e.is_unavailable() {
                    "failed to read data"
                } else {
                    "failed to save data"
                };
                Self::Storage(message.into())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "success": false, "message": self.to_string() }))).into_response()
    }
}
