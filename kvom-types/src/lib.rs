//! Core type definitions for kvom.
//!
//! This crate defines the store-agnostic types every other kvom crate
//! depends on:
//! - ULID identities (the default entity identity strategy)
//! - [`FieldValue`], the typed value held under an alias in an entity
//! - [`Point`], a longitude/latitude pair

mod ids;
mod value;

pub use ids::{generate_ulid, Ulid, ULID_ALPHABET, ULID_LEN};
pub use value::{FieldValue, Point};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid ULID: {0}")]
    InvalidUlid(String),
}
