//! Error types for schema construction and entity access.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by the model layer.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The schema definition or its options are invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A field accessor was used incorrectly.
    #[error(transparent)]
    Usage(#[from] UsageError),
}

/// Invalid schema options or field declarations. Raised at schema
/// construction and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("'{0}' in an invalid data structure. Valid data structures are 'HASH' and 'JSON'.")]
    InvalidDataStructure(String),

    #[error("Prefix must be a non-empty string.")]
    EmptyPrefix,

    #[error("Index name must be a non-empty string.")]
    EmptyIndexName,

    #[error(
        "The field '{field}' is configured with a type of '{field_type}'. Valid types include 'boolean', 'number', 'string', 'string[]', 'date', 'point', and 'text'."
    )]
    InvalidFieldType { field: String, field_type: String },

    #[error("The field '{0}' is configured with an empty separator.")]
    EmptySeparator(String),

    #[error("The field '{0}' is declared more than once.")]
    DuplicateField(String),

    #[error("invalid schema definition: {0}")]
    InvalidDefinition(String),
}

/// Misuse of a typed field accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error(
        "Property '{field}' on entity of type '{entity_type}' cannot be set to undefined. Use null instead."
    )]
    UndefinedAssignment { field: String, entity_type: String },

    #[error(
        "Property '{field}' on entity of type '{entity_type}' expects a value of type '{expected}' but received a '{received}'."
    )]
    TypeMismatch {
        field: String,
        entity_type: String,
        expected: &'static str,
        received: &'static str,
    },

    #[error(
        "Property '{field}' on entity of type '{entity_type}' is the entity's identity and cannot be set."
    )]
    ReadOnlyIdentity { field: String, entity_type: String },
}
