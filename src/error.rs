//! Error types for the caching proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

// == Proxy Error Enum ==
/// Unified error type for the caching proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The path segment is not a usable cache key
    #[error("Invalid HTTP status code in URL path: {0:?}")]
    InvalidKey(String),

    /// PUT request carried no body
    #[error("Request body is empty")]
    EmptyBody,

    /// No cache entry exists for the key
    #[error("Image for {0} not found in cache")]
    NotFound(String),

    /// The upstream provider could not supply the image
    #[error("Upstream fetch for {key} failed: {reason}")]
    Upstream { key: String, reason: String },

    /// Filesystem failure other than a missing entry
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request used a verb other than GET, PUT or DELETE
    #[error("Method not allowed")]
    MethodNotAllowed,
}

// == IntoResponse Implementation ==
//
// Every failure is converted to exactly one plain-text HTTP response here;
// nothing propagates past the router boundary. Bodies never carry internal
// paths or upstream detail.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::InvalidKey(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid HTTP status code in URL path.",
            )
                .into_response(),
            ProxyError::EmptyBody => {
                (StatusCode::BAD_REQUEST, "Request body is empty.").into_response()
            }
            ProxyError::NotFound(key) => (
                StatusCode::NOT_FOUND,
                format!("Image for {key} not found in cache."),
            )
                .into_response(),
            ProxyError::Upstream { key, .. } => (
                StatusCode::NOT_FOUND,
                format!("Image for {key} not found upstream or fetch failed."),
            )
                .into_response(),
            ProxyError::Io(err) => {
                error!(error = %err, "request failed with cache I/O error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error.").into_response()
            }
            ProxyError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "GET, PUT, DELETE")],
                "Method not allowed.",
            )
                .into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
