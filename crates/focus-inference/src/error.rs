//! Error types for the model layer.

use thiserror::Error;

/// Errors that can occur while calling an external model.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Failed to build the HTTP client.
    #[error("failed to create client: {0}")]
    ClientCreate(String),

    /// The request to the model server failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The model server answered with a non-success status.
    #[error("model server returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The model response could not be decoded.
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for InferenceError {
    fn from(err: serde_json::Error) -> Self {
        InferenceError::InvalidResponse(err.to_string())
    }
}
