//! Response rendering.
//!
//! # Responsibilities
//! - Pass-through documents are served as `application/json`
//! - Transformed sheets carry only the allowlisted upstream headers
//!
//! # Design Decisions
//! - The transformed body is a raw `Body`, so no Content-Type is added
//!   beyond what the upstream sent

use axum::{
    body::Body,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::QueryError;
use crate::query::Outcome;

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::PassThrough(body) => Json(body).into_response(),
            Outcome::Transformed { sheet, headers } => match serde_json::to_vec(&sheet) {
                Ok(bytes) => (headers, Body::from(bytes)).into_response(),
                Err(e) => {
                    QueryError::Internal(format!("Failed to serialize sheet: {}", e)).into_response()
                }
            },
        }
    }
}
