//! JSON records: one document per entity.
//!
//! Booleans, numbers and string arrays use their native JSON shapes. Dates
//! are epoch milliseconds and points are `"<longitude>,<latitude>"`
//! strings, matching what the search store indexes.

use crate::error::{CodecResult, DataError};
use crate::scalar::{date_from_millis, parse_point};
use kvom_model::{EntityData, FieldType, Schema};
use kvom_types::FieldValue;
use serde_json::{Map, Number, Value};

/// Parses a JSON document into alias-keyed entity data.
///
/// `null` values are treated as absent.
pub fn decode(schema: &Schema, document: &str) -> CodecResult<EntityData> {
    let value: Value = serde_json::from_str(document)?;
    let Value::Object(object) = value else {
        return Err(DataError::NotAnObject(value.to_string()).into());
    };

    let mut data = EntityData::new();
    for (alias, value) in object {
        if value.is_null() {
            continue;
        }
        let typed = match schema.accessor_for_alias(&alias) {
            None => match value {
                Value::String(s) => FieldValue::String(s),
                other => FieldValue::Json(other),
            },
            Some(accessor) => decode_declared(&alias, accessor.field_type(), value)?,
        };
        data.insert(alias, typed);
    }
    Ok(data)
}

fn decode_declared(alias: &str, field_type: FieldType, value: Value) -> Result<FieldValue, DataError> {
    let unexpected = |expected: &'static str, received: &Value| DataError::UnexpectedJson {
        alias: alias.into(),
        expected,
        received: received.to_string(),
    };

    match field_type {
        FieldType::Boolean => value
            .as_bool()
            .map(FieldValue::Boolean)
            .ok_or_else(|| unexpected("a boolean", &value)),
        FieldType::Number => value
            .as_f64()
            .map(FieldValue::Number)
            .ok_or_else(|| unexpected("a number", &value)),
        FieldType::Date => value
            .as_f64()
            .and_then(date_from_millis)
            .map(FieldValue::Date)
            .ok_or_else(|| unexpected("an epoch date", &value)),
        FieldType::Point => match &value {
            Value::String(s) => parse_point(alias, s).map(FieldValue::Point),
            other => Err(unexpected("a point string", other)),
        },
        FieldType::String | FieldType::Text => match value {
            Value::String(s) => Ok(FieldValue::String(s)),
            other => Err(unexpected("a string", &other)),
        },
        FieldType::StringArray => {
            let items = value
                .as_array()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|item| item.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or_else(|| unexpected("an array of strings", &value))?;
            Ok(FieldValue::StringArray(items))
        }
    }
}

/// Serializes alias-keyed entity data as a JSON document.
///
/// Absent fields are omitted. Non-finite numbers have no JSON form and are
/// written as `null`.
pub fn encode(data: &EntityData) -> String {
    let object: Map<String, Value> = data
        .iter()
        .map(|(alias, value)| (alias.clone(), to_json_value(value)))
        .collect();
    Value::Object(object).to_string()
}

fn to_json_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Boolean(b) => Value::Bool(*b),
        FieldValue::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::StringArray(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        FieldValue::Date(d) => Value::Number(d.timestamp_millis().into()),
        FieldValue::Point(p) => Value::String(p.to_string()),
        FieldValue::Json(v) => v.clone(),
    }
}
