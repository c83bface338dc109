//! Schema and entity model for kvom.
//!
//! Defines the types every other kvom crate builds on:
//! - [`Schema`]: an entity type's declared fields, key prefix, index name,
//!   record shape and identity strategy
//! - [`FieldDefinition`] / [`FieldType`]: one declared field
//! - [`FieldAccessor`]: the per-field getter/setter table a schema builds
//! - [`Entity`]: one record, identified by id and key name, holding
//!   alias-keyed [`FieldValue`](kvom_types::FieldValue)s

mod accessor;
mod entity;
mod error;
mod field;
mod options;
mod schema;

pub use accessor::FieldAccessor;
pub use entity::{Assign, CreateArgs, Entity, EntityData, InitialData, ENTITY_ID, KEY_NAME};
pub use error::{ConfigurationError, ModelError, ModelResult, UsageError};
pub use field::{FieldDefinition, FieldType, DEFAULT_SEPARATOR};
pub use options::{DataStructure, IdStrategy, SchemaOptions};
pub use schema::Schema;
