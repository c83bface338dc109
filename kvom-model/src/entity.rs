//! Entities, their identity and the ways to construct them.

use crate::error::{ModelResult, UsageError};
use crate::schema::Schema;
use chrono::{DateTime, Utc};
use kvom_types::{FieldValue, Point};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Entity data keyed by alias.
pub type EntityData = BTreeMap<String, FieldValue>;

/// Reserved names that never reach entity data.
pub const ENTITY_ID: &str = "entityId";
pub const KEY_NAME: &str = "keyName";

/// A write through a field accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum Assign {
    /// Store the value.
    Value(FieldValue),
    /// Remove the field.
    Null,
    /// The "no value" sentinel. Always rejected; use `Null` to clear a field.
    Undefined,
}

macro_rules! assign_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Assign {
                fn from(v: $t) -> Self {
                    Self::Value(v.into())
                }
            }

            impl From<Option<$t>> for Assign {
                fn from(v: Option<$t>) -> Self {
                    v.map_or(Self::Null, |v| Self::Value(v.into()))
                }
            }
        )*
    };
}

assign_from!(
    FieldValue,
    bool,
    f64,
    i32,
    &str,
    String,
    Vec<String>,
    Vec<&str>,
    DateTime<Utc>,
    Point,
);

/// Field-name keyed values used to populate a new entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialData(Vec<(String, Assign)>);

impl InitialData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. A later entry for the same name overrides an earlier one.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Assign>) -> Self {
        self.0.push((field.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Assign)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Assign>> FromIterator<(K, V)> for InitialData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The ways an entity can be created.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateArgs {
    /// Generated identity, no data.
    Empty,
    /// Caller-supplied identity, no data.
    WithId(String),
    /// Generated identity with initial data.
    WithData(InitialData),
    /// Caller-supplied identity with initial data.
    WithIdAndData(String, InitialData),
}

impl From<()> for CreateArgs {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl From<&str> for CreateArgs {
    fn from(id: &str) -> Self {
        Self::WithId(id.to_string())
    }
}

impl From<String> for CreateArgs {
    fn from(id: String) -> Self {
        Self::WithId(id)
    }
}

impl From<InitialData> for CreateArgs {
    fn from(data: InitialData) -> Self {
        Self::WithData(data)
    }
}

impl From<(&str, InitialData)> for CreateArgs {
    fn from((id, data): (&str, InitialData)) -> Self {
        Self::WithIdAndData(id.to_string(), data)
    }
}

impl From<(String, InitialData)> for CreateArgs {
    fn from((id, data): (String, InitialData)) -> Self {
        Self::WithIdAndData(id, data)
    }
}

/// One record of an entity type.
///
/// The identity is fixed at construction; the key name is derived from it.
/// Declared fields are read and written through the schema's accessor
/// table, undeclared fields are stored under their own name.
#[derive(Clone)]
pub struct Entity {
    schema: Arc<Schema>,
    entity_id: String,
    key_name: String,
    data: EntityData,
}

impl Entity {
    /// Creates an empty entity with the given identity.
    pub fn new(schema: Arc<Schema>, entity_id: impl Into<String>) -> Self {
        Self::with_data(schema, entity_id, EntityData::new())
    }

    /// Creates an entity around alias-keyed data, typically decoded from
    /// the store.
    pub fn with_data(schema: Arc<Schema>, entity_id: impl Into<String>, data: EntityData) -> Self {
        let entity_id = entity_id.into();
        let key_name = schema.key_for(&entity_id);
        Self {
            schema,
            entity_id,
            key_name,
            data,
        }
    }

    /// Resolves `args` into an entity.
    ///
    /// The identity is either the supplied id or a generated one. Any
    /// `entityId` or `keyName` entries in the initial data are dropped, so
    /// identity can never be injected through bulk data.
    pub fn create(schema: Arc<Schema>, args: impl Into<CreateArgs>) -> ModelResult<Self> {
        let (id, data) = match args.into() {
            CreateArgs::Empty => (None, InitialData::default()),
            CreateArgs::WithId(id) => (Some(id), InitialData::default()),
            CreateArgs::WithData(data) => (None, data),
            CreateArgs::WithIdAndData(id, data) => (Some(id), data),
        };

        let id = id.unwrap_or_else(|| schema.generate_id());
        let mut entity = Self::new(schema, id);
        for (field, value) in data.0 {
            if field == ENTITY_ID || field == KEY_NAME {
                continue;
            }
            entity.set(&field, value)?;
        }
        Ok(entity)
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    #[must_use]
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// Alias-keyed data, as the codec sees it.
    #[must_use]
    pub fn data(&self) -> &EntityData {
        &self.data
    }

    pub fn into_data(self) -> EntityData {
        self.data
    }

    /// Reads a field by name. Absent fields read as `None`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        match self.schema.accessor(field) {
            Some(accessor) => accessor.get(&self.data),
            None => self.data.get(field),
        }
    }

    /// Writes a field by name. Assigning `Null` (or `None`) removes it.
    /// `entityId` and `keyName` are fixed at construction and rejected here.
    pub fn set(&mut self, field: &str, value: impl Into<Assign>) -> ModelResult<()> {
        if field == ENTITY_ID || field == KEY_NAME {
            return Err(UsageError::ReadOnlyIdentity {
                field: field.to_string(),
                entity_type: self.schema.entity_type().to_string(),
            }
            .into());
        }

        let value = value.into();
        if let Some(accessor) = self.schema.accessor(field) {
            accessor.set(self.schema.entity_type(), &mut self.data, value)?;
            return Ok(());
        }

        match value {
            Assign::Value(v) => {
                self.data.insert(field.to_string(), v);
            }
            Assign::Null => {
                self.data.remove(field);
            }
            Assign::Undefined => {
                return Err(UsageError::UndefinedAssignment {
                    field: field.to_string(),
                    entity_type: self.schema.entity_type().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    pub fn get_number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    pub fn get_string_array(&self, field: &str) -> Option<&[String]> {
        self.get(field).and_then(FieldValue::as_string_array)
    }

    pub fn get_date(&self, field: &str) -> Option<DateTime<Utc>> {
        self.get(field).and_then(FieldValue::as_date)
    }

    pub fn get_point(&self, field: &str) -> Option<Point> {
        self.get(field).and_then(FieldValue::as_point)
    }

    /// Field names of the populated data, by declared name where one exists.
    /// Stored entries named like the identity keys are skipped.
    fn field_names(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.data
            .iter()
            .filter(|(alias, _)| alias.as_str() != ENTITY_ID && alias.as_str() != KEY_NAME)
            .map(|(alias, value)| {
                let name = self
                    .schema
                    .accessor_for_alias(alias)
                    .map_or(alias.as_str(), |a| a.field());
                (name, value)
            })
    }

    /// `entityId`, `keyName`, then every populated field.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        [ENTITY_ID, KEY_NAME]
            .into_iter()
            .chain(self.field_names().map(|(name, _)| name))
            .map(str::to_string)
            .collect()
    }

    /// A JSON view of the entity keyed by field name.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(ENTITY_ID.into(), Value::String(self.entity_id.clone()));
        object.insert(KEY_NAME.into(), Value::String(self.key_name.clone()));
        for (name, value) in self.field_names() {
            object.insert(
                name.to_string(),
                serde_json::to_value(value).unwrap_or(Value::Null),
            );
        }
        Value::Object(object)
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.entity_id == other.entity_id
            && self.key_name == other.key_name
            && self.data == other.data
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("entity_type", &self.schema.entity_type())
            .field("entity_id", &self.entity_id)
            .field("key_name", &self.key_name)
            .field("data", &self.data)
            .finish()
    }
}
