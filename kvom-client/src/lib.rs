//! Store client boundary for kvom.
//!
//! kvom does not talk to the network itself. Every read, write and search
//! goes through an injected [`StoreClient`]:
//! - `search` runs a paginated query against an index
//! - `get` / `set` / `delete` move [`RawRecord`](kvom_codec::RawRecord)s by key
//!
//! [`MemoryClient`] is an in-memory implementation for tests and tooling.

mod client;
mod error;
mod memory;

pub use client::{RawDocument, SearchRequest, SearchResults, StoreClient};
pub use error::{ClientError, ClientResult};
pub use memory::MemoryClient;
