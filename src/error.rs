//! Error types for the product service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// == Api Error Enum ==
/// Unified error type for the product service.
///
/// Cache store failures are deliberately absent: the cache layer absorbs
/// them (see `cache::CacheStoreError`), so no cache malfunction can surface
/// through this type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No durable record exists for the requested identifier
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Request payload failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Durable store rejected a write; the operation performed no cache mutation
    #[error("Durable store write failed: {0}")]
    NotPersisted(#[source] sqlx::Error),

    /// Durable store read/query failed
    #[error("Durable store query failed: {0}")]
    Store(#[from] sqlx::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Client errors carry their message; store failures log the detail
        // server-side and return a generic body.
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotPersisted(err) => {
                error!("Durable store write failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Store(err) => {
                error!("Durable store query failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the product service.
pub type Result<T> = std::result::Result<T, ApiError>;
