//! Probe error types.

use thiserror::Error;

/// Errors that can occur while probing a service.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Socket-level failure: connection refused, DNS, request timeout.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An expected field is absent from a response body.
    #[error("response field '{path}' is missing")]
    MissingField { path: String },

    /// A response field is present but has an unusable JSON type.
    #[error("response field '{path}' is not a {expected}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
    },
}
