//! Per-type string encodings shared by the HASH and JSON codecs.

use crate::error::DataError;
use chrono::{DateTime, Utc};
use kvom_types::{FieldValue, Point};
use regex_lite::Regex;
use std::sync::LazyLock;

static POINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+(\.\d*)?,-?\d+(\.\d*)?$").expect("valid point pattern")
});

pub(crate) fn parse_boolean(alias: &str, value: &str) -> Result<bool, DataError> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(DataError::InvalidBoolean {
            alias: alias.into(),
            received: value.into(),
        }),
    }
}

pub(crate) fn parse_number(alias: &str, value: &str) -> Result<f64, DataError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| DataError::InvalidNumber {
            alias: alias.into(),
            received: value.into(),
        })
}

pub(crate) fn parse_date(alias: &str, value: &str) -> Result<DateTime<Utc>, DataError> {
    let millis = value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(|n| n as i64)
    });
    millis
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| DataError::InvalidDate {
            alias: alias.into(),
            received: value.into(),
        })
}

pub(crate) fn date_from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if millis.is_finite() {
        DateTime::from_timestamp_millis(millis as i64)
    } else {
        None
    }
}

pub(crate) fn parse_point(alias: &str, value: &str) -> Result<Point, DataError> {
    let invalid = || DataError::InvalidPoint {
        alias: alias.into(),
        received: value.into(),
    };
    if !POINT_PATTERN.is_match(value) {
        return Err(invalid());
    }
    let (lon, lat) = value.split_once(',').ok_or_else(invalid)?;
    let longitude = lon.parse::<f64>().map_err(|_| invalid())?;
    let latitude = lat.parse::<f64>().map_err(|_| invalid())?;
    Ok(Point::new(longitude, latitude))
}

pub(crate) fn split_array(value: &str, separator: &str) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        value.split(separator).map(str::to_string).collect()
    }
}

/// Renders a value as its HASH wire string.
pub(crate) fn to_wire_string(value: &FieldValue, separator: &str) -> String {
    match value {
        FieldValue::Boolean(true) => "1".into(),
        FieldValue::Boolean(false) => "0".into(),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::String(s) => s.clone(),
        FieldValue::StringArray(items) => items.join(separator),
        FieldValue::Date(d) => d.timestamp_millis().to_string(),
        FieldValue::Point(p) => p.to_string(),
        FieldValue::Json(serde_json::Value::String(s)) => s.clone(),
        FieldValue::Json(v) => v.to_string(),
    }
}
