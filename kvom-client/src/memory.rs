//! In-memory store client.
//!
//! Holds records in a sorted map and answers match-all searches over a
//! registered index's key prefix. Useful for tests and local tooling; it
//! does not evaluate query predicates.

use crate::client::{RawDocument, SearchRequest, SearchResults, StoreClient};
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use kvom_codec::RawRecord;
use kvom_model::{DataStructure, Schema};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

/// A [`StoreClient`] backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryClient {
    records: RwLock<BTreeMap<String, RawRecord>>,
    /// index name -> key prefix
    indexes: RwLock<HashMap<String, String>>,
}

impl MemoryClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `index_name` cover every key under `"<prefix>:"`.
    pub async fn register_index(&self, index_name: &str, prefix: &str) {
        self.indexes
            .write()
            .await
            .insert(index_name.to_string(), prefix.to_string());
    }

    /// Registers the schema's index over the schema's prefix.
    pub async fn register_schema(&self, schema: &Schema) {
        self.register_index(schema.index_name(), schema.prefix()).await;
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl StoreClient for MemoryClient {
    async fn search(&self, request: SearchRequest) -> ClientResult<SearchResults> {
        if request.query.trim() != "*" {
            return Err(ClientError::UnsupportedQuery(request.query));
        }

        let prefix = self
            .indexes
            .read()
            .await
            .get(&request.index_name)
            .map(|p| format!("{p}:"))
            .ok_or_else(|| ClientError::UnknownIndex(request.index_name.clone()))?;

        let records = self.records.read().await;
        let matching: Vec<(&String, &RawRecord)> = records
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .collect();

        let documents = matching
            .iter()
            .skip(request.offset)
            .take(request.count)
            .map(|(key, record)| RawDocument {
                key: (*key).clone(),
                record: (*record).clone(),
            })
            .collect::<Vec<_>>();

        debug!(
            index = %request.index_name,
            total = matching.len(),
            returned = documents.len(),
            "Memory search"
        );

        Ok(SearchResults {
            total: matching.len() as u64,
            documents,
        })
    }

    async fn get(&self, key: &str, structure: DataStructure) -> ClientResult<Option<RawRecord>> {
        match self.records.read().await.get(key) {
            None => Ok(None),
            Some(record) if record.data_structure() != structure => Err(ClientError::Store(
                format!("WRONGTYPE {key} does not hold a {structure} record"),
            )),
            Some(record) => Ok(Some(record.clone())),
        }
    }

    async fn set(&self, key: &str, record: RawRecord) -> ClientResult<()> {
        if record.is_empty() {
            return Err(ClientError::Store(format!(
                "cannot write an empty hash to {key}"
            )));
        }
        self.records.write().await.insert(key.to_string(), record);
        Ok(())
    }

    async fn delete(&self, key: &str) -> ClientResult<()> {
        self.records.write().await.remove(key);
        Ok(())
    }
}
