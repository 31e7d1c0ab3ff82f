//! Stub error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Stub-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum StubError {
    /// Resource not found (or not visible yet).
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Failure injected by a test hook.
    Injected(String),
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            StubError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            StubError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            StubError::Injected(msg) => {
                tracing::warn!(error = %msg, "injected failure");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
