//! Request-level error type and its HTTP mapping.
//!
//! Every pipeline stage returns `QueryError`; the handler converts it to a
//! response exactly once, at the server boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while serving a sheet query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Malformed path or query parameter.
    #[error("{0}")]
    BadRequest(String),

    /// The upstream sheet cannot be processed as requested (pagination).
    #[error("{0}")]
    PreconditionFailed(String),

    /// Upstream fetch failed; carries the upstream status when there was one.
    #[error("{message}")]
    Upstream {
        status: Option<StatusCode>,
        message: String,
    },

    /// Upstream document did not have the expected shape.
    #[error("{0}")]
    Internal(String),
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

impl QueryError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            QueryError::BadRequest(_) => StatusCode::BAD_REQUEST,
            QueryError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            QueryError::Upstream { status: Some(s), .. }
                if s.is_client_error() || s.is_server_error() =>
            {
                *s
            }
            QueryError::Upstream { .. } | QueryError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // Usage errors are plain text, everything else is structured.
            QueryError::BadRequest(message) => (status, message).into_response(),
            other => (status, Json(json!({ "error": other.to_string() }))).into_response(),
        }
    }
}
