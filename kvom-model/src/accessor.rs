//! Per-field accessors generated once per schema.
//!
//! Every declared field gets a [`FieldAccessor`] that reads and writes the
//! field's alias in an entity's data map. Entities route every declared
//! field access through this table.

use crate::entity::{Assign, EntityData};
use crate::error::UsageError;
use crate::field::{FieldDefinition, FieldType};
use chrono::DateTime;
use kvom_types::FieldValue;

/// Typed getter/setter for one declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccessor {
    field: String,
    alias: String,
    field_type: FieldType,
    separator: String,
}

impl FieldAccessor {
    pub(crate) fn new(def: &FieldDefinition) -> Self {
        Self {
            field: def.name.clone(),
            alias: def.alias().to_string(),
            field_type: def.field_type,
            separator: def.separator().to_string(),
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the value stored under the alias, or `None` when absent.
    pub fn get<'d>(&self, data: &'d EntityData) -> Option<&'d FieldValue> {
        data.get(&self.alias)
    }

    /// Writes `value` under the alias.
    ///
    /// `Assign::Null` removes the entry. `Assign::Undefined` and values of
    /// the wrong kind are rejected and leave `data` untouched.
    pub fn set(
        &self,
        entity_type: &str,
        data: &mut EntityData,
        value: Assign,
    ) -> Result<(), UsageError> {
        match value {
            Assign::Undefined => Err(UsageError::UndefinedAssignment {
                field: self.field.clone(),
                entity_type: entity_type.to_string(),
            }),
            Assign::Null => {
                data.remove(&self.alias);
                Ok(())
            }
            Assign::Value(v) if !self.field_type.accepts(&v) => Err(UsageError::TypeMismatch {
                field: self.field.clone(),
                entity_type: entity_type.to_string(),
                expected: self.field_type.name(),
                received: v.kind(),
            }),
            Assign::Value(v) => {
                data.insert(self.alias.clone(), truncate_to_millis(v));
                Ok(())
            }
        }
    }
}

/// The store keeps dates as epoch milliseconds; finer precision would not
/// survive a save and fetch.
fn truncate_to_millis(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Date(d) => DateTime::from_timestamp_millis(d.timestamp_millis())
            .map_or(FieldValue::Date(d), FieldValue::Date),
        other => other,
    }
}
