//! Domain-level error types.

use thiserror::Error;

/// Failure fetching from the remote recipe API.
///
/// Carries the underlying message so callers can surface it verbatim.
#[derive(Debug, Error)]
pub enum RemoteFetchError {
    #[error("Recipe service timed out")]
    Timeout,

    #[error("Recipe service unreachable: {0}")]
    Transport(String),

    #[error("Recipe service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from recipe service: {0}")]
    Decode(String),
}

impl RemoteFetchError {
    /// True when the remote API reported the recipe does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteFetchError::Status { status: 404, .. })
    }
}

/// Document store errors (favorites and profiles).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Failed to read from store: {0}")]
    Read(String),

    #[error("Failed to write to store: {0}")]
    Write(String),
}
