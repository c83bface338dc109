//! Field types and field definitions.

use kvom_types::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used to join string arrays when a field declares none.
pub const DEFAULT_SEPARATOR: &str = ",";

/// The declared type of a field.
///
/// The serialized names match the names accepted in JSON schema
/// definitions: `{"type": "string[]"}` rather than `{"type": "string_array"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Boolean,
    Number,
    String,
    #[serde(rename = "string[]")]
    StringArray,
    Date,
    Point,
    Text,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::Boolean,
        FieldType::Number,
        FieldType::String,
        FieldType::StringArray,
        FieldType::Date,
        FieldType::Point,
        FieldType::Text,
    ];

    /// The declared name of this type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::StringArray => "string[]",
            Self::Date => "date",
            Self::Point => "point",
            Self::Text => "text",
        }
    }

    /// Looks a type up by its declared name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Whether `value` is the variant this type holds in entity data.
    /// `string` and `text` fields both hold [`FieldValue::String`].
    #[must_use]
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (Self::Boolean, FieldValue::Boolean(_))
                | (Self::Number, FieldValue::Number(_))
                | (Self::String | Self::Text, FieldValue::String(_))
                | (Self::StringArray, FieldValue::StringArray(_))
                | (Self::Date, FieldValue::Date(_))
                | (Self::Point, FieldValue::Point(_))
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One declared field of an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// In-code field name.
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Wire-level name. Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Delimiter for string arrays. Defaults to `,`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            alias: None,
            separator: None,
        }
    }

    pub fn boolean(name: &str) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn number(name: &str) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn string_array(name: &str) -> Self {
        Self::new(name, FieldType::StringArray)
    }

    pub fn date(name: &str) -> Self {
        Self::new(name, FieldType::Date)
    }

    pub fn point(name: &str) -> Self {
        Self::new(name, FieldType::Point)
    }

    pub fn text(name: &str) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// Stores the field under `alias` on the wire.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Joins and splits string arrays on `separator`.
    #[must_use]
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// The wire-level name.
    #[must_use]
    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// The string array delimiter.
    #[must_use]
    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }
}
