//! Schema options: storage naming, record shape and identity strategy.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A zero-argument function producing a fresh entity identity.
pub type IdStrategy = Arc<dyn Fn() -> String + Send + Sync>;

/// The record shape entities are stored as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataStructure {
    /// A flat string-keyed hash of string values.
    #[default]
    Hash,
    /// A single JSON document.
    Json,
}

impl DataStructure {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hash => "HASH",
            Self::Json => "JSON",
        }
    }
}

impl fmt::Display for DataStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataStructure {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HASH" => Ok(Self::Hash),
            "JSON" => Ok(Self::Json),
            other => Err(ConfigurationError::InvalidDataStructure(other.to_string())),
        }
    }
}

impl TryFrom<String> for DataStructure {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DataStructure> for String {
    fn from(ds: DataStructure) -> Self {
        ds.as_str().to_string()
    }
}

/// Options for a [`Schema`](crate::Schema). Every field has a default.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SchemaOptions {
    /// Key prefix. Defaults to the entity type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Search index name. Defaults to `"<prefix>:index"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    #[serde(default)]
    pub data_structure: DataStructure,
    /// Identity generator. Defaults to ULIDs.
    #[serde(skip)]
    pub id_strategy: Option<IdStrategy>,
}

impl SchemaOptions {
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_index_name(mut self, index_name: &str) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    #[must_use]
    pub fn with_data_structure(mut self, data_structure: DataStructure) -> Self {
        self.data_structure = data_structure;
        self
    }

    #[must_use]
    pub fn with_id_strategy<F>(mut self, strategy: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.id_strategy = Some(Arc::new(strategy));
        self
    }
}

impl fmt::Debug for SchemaOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaOptions")
            .field("prefix", &self.prefix)
            .field("index_name", &self.index_name)
            .field("data_structure", &self.data_structure)
            .field("id_strategy", &self.id_strategy.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
