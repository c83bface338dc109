//! Error types for repository operations.

use kvom_client::ClientError;
use kvom_codec::CodecError;
use kvom_model::ModelError;
use kvom_search::SearchError;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors from any layer a repository call passes through.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Invalid schema use, such as assigning undefined to a field.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A stored record could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The store client failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A search failed to compile or run.
    #[error(transparent)]
    Search(#[from] SearchError),
}
