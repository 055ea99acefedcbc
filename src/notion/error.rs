// src/notion/error.rs

use thiserror::Error;

/// Errors raised while querying the content store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The store did not answer within the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The store answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The store answered 2xx with a body we could not decode.
    #[error("malformed store response: {0}")]
    Decode(String),

    #[error("invalid store url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
