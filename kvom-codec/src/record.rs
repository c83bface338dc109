use crate::error::CodecResult;
use crate::{hash, json};
use kvom_model::{DataStructure, EntityData, Schema};
use serde::{Deserialize, Serialize};

/// A record as the store returns and accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawRecord {
    /// Alternating field and value strings.
    Hash(Vec<String>),
    /// One JSON document.
    Json(String),
}

impl RawRecord {
    /// The data structure this record belongs to.
    #[must_use]
    pub fn data_structure(&self) -> DataStructure {
        match self {
            Self::Hash(_) => DataStructure::Hash,
            Self::Json(_) => DataStructure::Json,
        }
    }

    /// True for a hash with no fields. The store cannot hold one, so
    /// writing it means deleting the key. JSON documents are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Hash(entries) if entries.is_empty())
    }
}

/// Decodes a raw record into alias-keyed entity data.
pub fn decode_record(schema: &Schema, record: &RawRecord) -> CodecResult<EntityData> {
    match record {
        RawRecord::Hash(entries) => hash::decode(schema, &hash::from_flat(entries)?),
        RawRecord::Json(document) => json::decode(schema, document),
    }
}

/// Encodes entity data in the schema's data structure.
#[must_use]
pub fn encode_record(schema: &Schema, data: &EntityData) -> RawRecord {
    match schema.data_structure() {
        DataStructure::Hash => RawRecord::Hash(hash::to_flat(&hash::encode(schema, data))),
        DataStructure::Json => RawRecord::Json(json::encode(data)),
    }
}
