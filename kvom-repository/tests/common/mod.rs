//! Shared fixtures for repository tests.

#![allow(dead_code)]

use async_trait::async_trait;
use kvom_client::{ClientResult, MemoryClient, SearchRequest, SearchResults};
use kvom_codec::RawRecord;
use kvom_repository::{
    DataStructure, FieldDefinition, InitialData, Repository, Schema, SchemaOptions, StoreClient,
};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

pub const A_STRING: &str = "foo";
pub const A_NUMBER: f64 = 42.0;

/// Installs a test log writer once. Filter with `RUST_LOG=kvom_repository=debug`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn simple_schema(data_structure: DataStructure) -> Arc<Schema> {
    Arc::new(
        Schema::new(
            "SimpleEntity",
            vec![
                FieldDefinition::string("aString"),
                FieldDefinition::number("aNumber"),
                FieldDefinition::boolean("aBoolean"),
            ],
            SchemaOptions::default().with_data_structure(data_structure),
        )
        .unwrap(),
    )
}

pub fn entity_data() -> InitialData {
    InitialData::new()
        .with("aString", A_STRING)
        .with("aNumber", A_NUMBER)
        .with("aBoolean", true)
}

pub fn entity_data_with_id() -> InitialData {
    InitialData::new()
        .with("entityId", "foo")
        .with("keyName", "key:bar")
}

/// A repository over a fresh [`MemoryClient`] with the schema's index registered.
pub async fn memory_repository(schema: Arc<Schema>) -> (Repository, Arc<MemoryClient>) {
    let client = Arc::new(MemoryClient::new());
    client.register_schema(&schema).await;
    (Repository::new(schema, client.clone()), client)
}

/// One store call as the recording client saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(SearchRequest),
    Get(String, DataStructure),
    Set(String, RawRecord),
    Delete(String),
}

/// Records every call and answers with nothing.
#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
}

impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl StoreClient for RecordingClient {
    async fn search(&self, request: SearchRequest) -> ClientResult<SearchResults> {
        self.record(Call::Search(request));
        Ok(SearchResults::empty())
    }

    async fn get(&self, key: &str, structure: DataStructure) -> ClientResult<Option<RawRecord>> {
        self.record(Call::Get(key.to_string(), structure));
        Ok(None)
    }

    async fn set(&self, key: &str, record: RawRecord) -> ClientResult<()> {
        self.record(Call::Set(key.to_string(), record));
        Ok(())
    }

    async fn delete(&self, key: &str) -> ClientResult<()> {
        self.record(Call::Delete(key.to_string()));
        Ok(())
    }
}
