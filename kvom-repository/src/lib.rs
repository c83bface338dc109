//! kvom: object mapping for HASH/JSON key-value stores with search.
//!
//! A [`Repository`] ties one [`Schema`] to one [`StoreClient`]. It creates
//! entities, moves them to and from the store through the codec, and hands
//! out searches over the schema's index.
//!
//! The lower layers are re-exported so most callers only depend on this crate.

mod error;
mod repository;

pub use error::{RepositoryError, RepositoryResult};
pub use repository::Repository;

pub use kvom_client::{MemoryClient, StoreClient};
pub use kvom_model::{
    Assign, CreateArgs, DataStructure, Entity, FieldDefinition, FieldType, InitialData, Schema,
    SchemaOptions,
};
pub use kvom_search::{DistanceUnit, RawSearch, Search, SearchOptions};
pub use kvom_types::{FieldValue, Point, Ulid};
