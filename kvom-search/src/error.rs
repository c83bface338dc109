//! Error types for query compilation and execution.

use kvom_client::ClientError;
use kvom_codec::CodecError;
use thiserror::Error;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors raised while building, compiling or running a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query refers to an unknown field or applies an operator the
    /// field's type does not support. Reported when the query is compiled.
    #[error("{0}")]
    Usage(String),

    /// A result record could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The store client failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}
