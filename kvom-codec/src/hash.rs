//! HASH records: a flat map of string fields to string values.

use crate::error::{CodecResult, DataError};
use crate::scalar::{
    parse_boolean, parse_date, parse_number, parse_point, split_array, to_wire_string,
};
use kvom_model::{EntityData, FieldType, Schema, DEFAULT_SEPARATOR};
use kvom_types::FieldValue;
use std::collections::BTreeMap;

/// A HASH record as a string map.
pub type HashData = BTreeMap<String, String>;

/// Converts a store hash into alias-keyed entity data.
///
/// Declared aliases are parsed as their field type; undeclared keys pass
/// through as strings. Fails on the first value that does not parse, so a
/// partially typed result is never returned.
pub fn decode(schema: &Schema, hash: &HashData) -> CodecResult<EntityData> {
    let mut data = EntityData::new();
    for (alias, value) in hash {
        let typed = match schema.accessor_for_alias(alias) {
            None => FieldValue::String(value.clone()),
            Some(accessor) => match accessor.field_type() {
                FieldType::Boolean => FieldValue::Boolean(parse_boolean(alias, value)?),
                FieldType::Number => FieldValue::Number(parse_number(alias, value)?),
                FieldType::Date => FieldValue::Date(parse_date(alias, value)?),
                FieldType::Point => FieldValue::Point(parse_point(alias, value)?),
                FieldType::String | FieldType::Text => FieldValue::String(value.clone()),
                FieldType::StringArray => {
                    FieldValue::StringArray(split_array(value, accessor.separator()))
                }
            },
        };
        data.insert(alias.clone(), typed);
    }
    Ok(data)
}

/// Converts alias-keyed entity data into a store hash.
///
/// Absent fields are omitted rather than written as empty strings.
pub fn encode(schema: &Schema, data: &EntityData) -> HashData {
    data.iter()
        .map(|(alias, value)| {
            let separator = schema
                .accessor_for_alias(alias)
                .map_or(DEFAULT_SEPARATOR, |a| a.separator());
            (alias.clone(), to_wire_string(value, separator))
        })
        .collect()
}

/// Pairs up a flat `[field, value, field, value, ...]` sequence.
pub fn from_flat(entries: &[String]) -> CodecResult<HashData> {
    if entries.len() % 2 != 0 {
        return Err(DataError::OddHashLength(entries.len()).into());
    }
    Ok(entries
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect())
}

/// Flattens a hash into `[field, value, field, value, ...]`.
pub fn to_flat(hash: &HashData) -> Vec<String> {
    hash.iter()
        .flat_map(|(k, v)| [k.clone(), v.clone()])
        .collect()
}
