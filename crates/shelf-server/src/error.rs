//! Server error types and their HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use shelf_site::SiteError;

/// Error returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected failure (filesystem access, render error).
    #[error("{0}")]
    Internal(String),
}

impl From<SiteError> for ServerError {
    fn from(e: SiteError) -> Self {
        Self::Internal(e.to_string())
    }
}

/// JSON error body: `{"error": "..."}`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
