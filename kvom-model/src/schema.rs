//! Entity schemas: declared fields, key layout and identity strategy.

use crate::accessor::FieldAccessor;
use crate::error::{ConfigurationError, ModelResult};
use crate::field::{FieldDefinition, FieldType};
use crate::options::{DataStructure, IdStrategy, SchemaOptions};
use kvom_types::generate_ulid;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Declares an entity type: its fields, how it is keyed and indexed, and
/// how its records are shaped in the store.
///
/// A schema is validated once at construction and immutable afterwards.
/// Share it between repositories and searches behind an `Arc`.
#[derive(Clone)]
pub struct Schema {
    entity_type: String,
    fields: Vec<FieldDefinition>,
    accessors: HashMap<String, FieldAccessor>,
    /// alias -> field name
    aliases: HashMap<String, String>,
    prefix: String,
    index_name: String,
    data_structure: DataStructure,
    id_strategy: IdStrategy,
}

impl Schema {
    /// Validates `fields` and `options` and builds the accessor table.
    pub fn new(
        entity_type: &str,
        fields: Vec<FieldDefinition>,
        options: SchemaOptions,
    ) -> ModelResult<Self> {
        let prefix = options.prefix.unwrap_or_else(|| entity_type.to_string());
        if prefix.is_empty() {
            return Err(ConfigurationError::EmptyPrefix.into());
        }

        let index_name = options
            .index_name
            .unwrap_or_else(|| format!("{prefix}:index"));
        if index_name.is_empty() {
            return Err(ConfigurationError::EmptyIndexName.into());
        }

        let mut accessors = HashMap::with_capacity(fields.len());
        let mut aliases = HashMap::with_capacity(fields.len());
        for def in &fields {
            if accessors.contains_key(&def.name) {
                return Err(ConfigurationError::DuplicateField(def.name.clone()).into());
            }
            if def.separator.as_deref() == Some("") {
                return Err(ConfigurationError::EmptySeparator(def.name.clone()).into());
            }
            let accessor = FieldAccessor::new(def);
            if let Some(previous) = aliases.insert(accessor.alias().to_string(), def.name.clone()) {
                warn!(
                    entity_type,
                    alias = accessor.alias(),
                    first = %previous,
                    second = %def.name,
                    "Fields share an alias; the later declaration owns it on the wire"
                );
            }
            accessors.insert(def.name.clone(), accessor);
        }

        let id_strategy = options
            .id_strategy
            .unwrap_or_else(|| Arc::new(generate_ulid) as IdStrategy);

        info!(
            entity_type,
            prefix = %prefix,
            index_name = %index_name,
            data_structure = %options.data_structure,
            fields = fields.len(),
            "Schema built"
        );

        Ok(Self {
            entity_type: entity_type.to_string(),
            fields,
            accessors,
            aliases,
            prefix,
            index_name,
            data_structure: options.data_structure,
            id_strategy,
        })
    }

    /// Builds a schema from a JSON definition of the form
    /// `{"<field>": {"type": "<type>", "alias": "...", "separator": "..."}}`.
    ///
    /// Unknown type names fail with [`ConfigurationError::InvalidFieldType`]
    /// naming the field and the rejected type.
    pub fn from_json(
        entity_type: &str,
        definition: &serde_json::Value,
        options: SchemaOptions,
    ) -> ModelResult<Self> {
        let object = definition.as_object().ok_or_else(|| {
            ConfigurationError::InvalidDefinition("expected an object of field definitions".into())
        })?;

        let mut fields = Vec::with_capacity(object.len());
        for (name, raw) in object {
            let type_value = raw.get("type");
            let type_name = type_value.and_then(|t| t.as_str());
            let field_type = type_name.and_then(FieldType::from_name).ok_or_else(|| {
                ConfigurationError::InvalidFieldType {
                    field: name.clone(),
                    field_type: match (type_name, type_value) {
                        (Some(t), _) => t.to_string(),
                        (None, Some(other)) => other.to_string(),
                        (None, None) => "undefined".to_string(),
                    },
                }
            })?;

            let mut def = FieldDefinition::new(name, field_type);
            def.alias = optional_string(raw, "alias", name)?;
            def.separator = optional_string(raw, "separator", name)?;
            fields.push(def);
        }

        Self::new(entity_type, fields, options)
    }

    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    #[must_use]
    pub fn data_structure(&self) -> DataStructure {
        self.data_structure
    }

    /// Declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// The accessor for a declared field name.
    #[must_use]
    pub fn accessor(&self, field: &str) -> Option<&FieldAccessor> {
        self.accessors.get(field)
    }

    /// The accessor owning a wire-level alias.
    #[must_use]
    pub fn accessor_for_alias(&self, alias: &str) -> Option<&FieldAccessor> {
        self.aliases
            .get(alias)
            .and_then(|field| self.accessors.get(field))
    }

    /// Iterates the accessor table in declaration order.
    pub fn accessors(&self) -> impl Iterator<Item = &FieldAccessor> {
        self.fields
            .iter()
            .filter_map(|def| self.accessors.get(&def.name))
    }

    /// Generates a fresh identity with the configured strategy.
    #[must_use]
    pub fn generate_id(&self) -> String {
        (self.id_strategy)()
    }

    /// The storage key for an entity id: `"<prefix>:<id>"`.
    #[must_use]
    pub fn key_for(&self, entity_id: &str) -> String {
        format!("{}:{}", self.prefix, entity_id)
    }

    /// Recovers the entity id from a storage key. Keys without this
    /// schema's prefix are returned unchanged.
    #[must_use]
    pub fn id_from_key<'k>(&self, key: &'k str) -> &'k str {
        key.strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(key)
    }
}

fn optional_string(
    raw: &serde_json::Value,
    key: &str,
    field: &str,
) -> Result<Option<String>, ConfigurationError> {
    match raw.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ConfigurationError::InvalidDefinition(format!(
            "the {key} of field '{field}' must be a string, found {other}"
        ))),
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("entity_type", &self.entity_type)
            .field("fields", &self.fields)
            .field("prefix", &self.prefix)
            .field("index_name", &self.index_name)
            .field("data_structure", &self.data_structure)
            .finish_non_exhaustive()
    }
}
