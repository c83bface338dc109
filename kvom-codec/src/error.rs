//! Error types for the wire codec.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding store records.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A wire value does not match its declared field type.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A JSON document could not be parsed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A wire value failed to parse as its declared type.
///
/// Messages quote the literal value the store returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Expected a value of '1' or '0' from the store for a boolean but received: \"{received}\"")]
    InvalidBoolean { alias: String, received: String },

    #[error("Expected a string containing a number from the store but received: \"{received}\"")]
    InvalidNumber { alias: String, received: String },

    #[error("Expected a string containing an epoch date from the store but received: \"{received}\"")]
    InvalidDate { alias: String, received: String },

    #[error("Expected a point string from the store but received: \"{received}\"")]
    InvalidPoint { alias: String, received: String },

    /// JSON mode: the value for `alias` has the wrong JSON type.
    #[error("Expected {expected} from the store for '{alias}' but received: {received}")]
    UnexpectedJson {
        alias: String,
        expected: &'static str,
        received: String,
    },

    #[error("Expected a JSON object from the store but received: {0}")]
    NotAnObject(String),

    #[error("Expected alternating field/value entries from the store but received {0} entries")]
    OddHashLength(usize),
}
