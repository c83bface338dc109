//! Shared schemas and a recording store client for search tests.

#![allow(dead_code)]

use async_trait::async_trait;
use kvom_client::{
    ClientError, ClientResult, RawDocument, SearchRequest, SearchResults, StoreClient,
};
use kvom_codec::RawRecord;
use kvom_model::{DataStructure, EntityData, FieldDefinition, Schema, SchemaOptions};
use kvom_types::FieldValue;
use std::sync::{Arc, Mutex};

pub fn simple_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::string("aString"),
        FieldDefinition::number("aNumber"),
        FieldDefinition::boolean("aBoolean"),
    ]
}

pub fn simple_hash_schema() -> Arc<Schema> {
    Arc::new(Schema::new("SimpleHashEntity", simple_fields(), SchemaOptions::default()).unwrap())
}

pub fn simple_json_schema() -> Arc<Schema> {
    Arc::new(
        Schema::new(
            "SimpleJsonEntity",
            simple_fields(),
            SchemaOptions::default().with_data_structure(DataStructure::Json),
        )
        .unwrap(),
    )
}

/// Every field type, plus one aliased field.
pub fn full_schema(data_structure: DataStructure) -> Arc<Schema> {
    Arc::new(
        Schema::new(
            "TestEntity",
            vec![
                FieldDefinition::string("aString"),
                FieldDefinition::string("aliased").with_alias("anAlias"),
                FieldDefinition::number("aNumber"),
                FieldDefinition::boolean("aBoolean"),
                FieldDefinition::date("aDate"),
                FieldDefinition::point("aPoint"),
                FieldDefinition::text("aText"),
                FieldDefinition::string_array("tags"),
            ],
            SchemaOptions::default().with_data_structure(data_structure),
        )
        .unwrap(),
    )
}

/// (id, aString, aNumber, aBoolean) for the three fixture entities.
pub const SIMPLE_ENTITIES: [(&str, &str, f64, bool); 3] = [
    ("1", "foo", 42.0, false),
    ("2", "bar", 23.0, true),
    ("3", "baz", 13.0, true),
];

pub fn simple_data(index: usize) -> EntityData {
    let (_, s, n, b) = SIMPLE_ENTITIES[index];
    [
        ("aString", FieldValue::from(s)),
        ("aNumber", FieldValue::Number(n)),
        ("aBoolean", FieldValue::Boolean(b)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

pub fn hash_document(schema: &Schema, index: usize) -> RawDocument {
    let (id, s, n, b) = SIMPLE_ENTITIES[index];
    let entries = [
        "aString".to_string(),
        s.to_string(),
        "aNumber".to_string(),
        n.to_string(),
        "aBoolean".to_string(),
        if b { "1" } else { "0" }.to_string(),
    ];
    RawDocument {
        key: schema.key_for(id),
        record: RawRecord::Hash(entries.to_vec()),
    }
}

pub fn json_document(schema: &Schema, index: usize) -> RawDocument {
    let (id, s, n, b) = SIMPLE_ENTITIES[index];
    let document = serde_json::json!({ "aString": s, "aNumber": n, "aBoolean": b });
    RawDocument {
        key: schema.key_for(id),
        record: RawRecord::Json(document.to_string()),
    }
}

/// Serves slices of a fixed document list and records every request.
pub struct RecordingClient {
    documents: Vec<RawDocument>,
    calls: Mutex<Vec<SearchRequest>>,
}

impl RecordingClient {
    pub fn new(documents: Vec<RawDocument>) -> Arc<Self> {
        Arc::new(Self {
            documents,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> Vec<SearchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoreClient for RecordingClient {
    async fn search(&self, request: SearchRequest) -> ClientResult<SearchResults> {
        let documents = self
            .documents
            .iter()
            .skip(request.offset)
            .take(request.count)
            .cloned()
            .collect();
        self.calls.lock().unwrap().push(request);
        Ok(SearchResults {
            total: self.documents.len() as u64,
            documents,
        })
    }

    async fn get(&self, _key: &str, _structure: DataStructure) -> ClientResult<Option<RawRecord>> {
        Err(ClientError::Store("get is not expected in search tests".into()))
    }

    async fn set(&self, _key: &str, _record: RawRecord) -> ClientResult<()> {
        Err(ClientError::Store("set is not expected in search tests".into()))
    }

    async fn delete(&self, _key: &str) -> ClientResult<()> {
        Err(ClientError::Store("delete is not expected in search tests".into()))
    }
}

/// Fails every call, for error propagation tests.
pub struct FailingClient;

#[async_trait]
impl StoreClient for FailingClient {
    async fn search(&self, _request: SearchRequest) -> ClientResult<SearchResults> {
        Err(ClientError::Connection("connection refused".into()))
    }

    async fn get(&self, _key: &str, _structure: DataStructure) -> ClientResult<Option<RawRecord>> {
        Err(ClientError::Connection("connection refused".into()))
    }

    async fn set(&self, _key: &str, _record: RawRecord) -> ClientResult<()> {
        Err(ClientError::Connection("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> ClientResult<()> {
        Err(ClientError::Connection("connection refused".into()))
    }
}
