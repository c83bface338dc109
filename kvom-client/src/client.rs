//! The narrow store interface kvom depends on.
//!
//! Implementations own the connection, timeouts and retries. kvom only
//! builds requests, awaits them and maps the results.

use crate::error::ClientResult;
use async_trait::async_trait;
use kvom_codec::RawRecord;
use kvom_model::DataStructure;
use serde::{Deserialize, Serialize};

/// A paginated search against one index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub index_name: String,
    /// Query in the store's search syntax. `*` matches everything.
    pub query: String,
    pub offset: usize,
    pub count: usize,
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    /// The record's storage key.
    pub key: String,
    pub record: RawRecord,
}

/// A page of search hits plus the total number of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub total: u64,
    /// Hits in the order the store ranked them.
    pub documents: Vec<RawDocument>,
}

impl SearchResults {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Abstract store client.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Runs one paginated search.
    async fn search(&self, request: SearchRequest) -> ClientResult<SearchResults>;

    /// Reads the record at `key`, or `None` if the key does not exist.
    async fn get(&self, key: &str, structure: DataStructure) -> ClientResult<Option<RawRecord>>;

    /// Replaces the record at `key`.
    async fn set(&self, key: &str, record: RawRecord) -> ClientResult<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> ClientResult<()>;
}
