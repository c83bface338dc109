//! Error types for the store client boundary.

use thiserror::Error;

/// Result type for store client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors a store client can report. kvom never retries or rewrites these.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The client cannot evaluate this query.
    #[error("unsupported query: {0}")]
    UnsupportedQuery(String),

    /// No index is registered under this name.
    #[error("unknown index: {0}")]
    UnknownIndex(String),

    /// The store rejected the command.
    #[error("store error: {0}")]
    Store(String),
}
