use chrono::DateTime;
use kvom_codec::{decode_record, encode_record, json, CodecError, DataError, RawRecord};
use kvom_model::{DataStructure, EntityData, FieldDefinition, Schema, SchemaOptions};
use kvom_types::{FieldValue, Point};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn json_schema() -> Schema {
    Schema::new(
        "JsonEntity",
        vec![
            FieldDefinition::boolean("aBoolean"),
            FieldDefinition::number("aNumber"),
            FieldDefinition::date("aDate"),
            FieldDefinition::point("aPoint"),
            FieldDefinition::string("aString").with_alias("s"),
            FieldDefinition::string_array("tags"),
            FieldDefinition::text("body"),
        ],
        SchemaOptions::default().with_data_structure(DataStructure::Json),
    )
    .unwrap()
}

fn data_err(document: Value) -> DataError {
    match json::decode(&json_schema(), &document.to_string()) {
        Err(CodecError::Data(e)) => e,
        other => panic!("expected a data error, got {other:?}"),
    }
}

// ── Decoding ─────────────────────────────────────────────────────

#[test]
fn decodes_native_json_shapes() {
    let document = json!({
        "aBoolean": true,
        "aNumber": 42.5,
        "aDate": 1_665_971_262_344i64,
        "aPoint": "12.34,56.78",
        "s": "foo",
        "tags": ["a", "b"],
        "body": "some text"
    });
    let actual = json::decode(&json_schema(), &document.to_string()).unwrap();

    let expected: EntityData = [
        ("aBoolean", FieldValue::Boolean(true)),
        ("aNumber", FieldValue::Number(42.5)),
        (
            "aDate",
            FieldValue::Date(DateTime::from_timestamp_millis(1_665_971_262_344).unwrap()),
        ),
        ("aPoint", FieldValue::Point(Point::new(12.34, 56.78))),
        ("s", FieldValue::from("foo")),
        ("tags", FieldValue::from(vec!["a", "b"])),
        ("body", FieldValue::from("some text")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    assert_eq!(actual, expected);
}

#[test]
fn undeclared_values_pass_through() {
    let document = json!({ "name": "x", "nested": { "a": 1 }, "n": 3 });
    let actual = json::decode(&json_schema(), &document.to_string()).unwrap();
    assert_eq!(actual["name"], FieldValue::from("x"));
    assert_eq!(actual["nested"], FieldValue::Json(json!({ "a": 1 })));
    assert_eq!(actual["n"], FieldValue::Json(json!(3)));
}

#[test]
fn nulls_are_absent() {
    let actual = json::decode(&json_schema(), r#"{"aNumber": null, "other": null}"#).unwrap();
    assert!(actual.is_empty());
}

#[test]
fn wrong_json_type_is_a_data_error() {
    let err = data_err(json!({ "aBoolean": "1" }));
    assert_eq!(
        err.to_string(),
        r#"Expected a boolean from the store for 'aBoolean' but received: "1""#
    );
    assert!(matches!(
        data_err(json!({ "tags": ["a", 1] })),
        DataError::UnexpectedJson { .. }
    ));
    assert!(matches!(
        data_err(json!({ "aPoint": "nowhere" })),
        DataError::InvalidPoint { .. }
    ));
}

#[test]
fn non_object_document_is_rejected() {
    assert!(matches!(data_err(json!([1, 2])), DataError::NotAnObject(_)));
}

#[test]
fn malformed_document_is_a_json_error() {
    assert!(matches!(
        json::decode(&json_schema(), "{not json"),
        Err(CodecError::Json(_))
    ));
}

// ── Encoding ─────────────────────────────────────────────────────

#[test]
fn encodes_native_json_shapes() {
    let data: EntityData = [
        ("aBoolean", FieldValue::Boolean(false)),
        (
            "aDate",
            FieldValue::Date(DateTime::from_timestamp_millis(1000).unwrap()),
        ),
        ("aPoint", FieldValue::Point(Point::new(-1.5, 2.0))),
        ("tags", FieldValue::from(vec!["a"])),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let encoded: Value = serde_json::from_str(&json::encode(&data)).unwrap();
    assert_eq!(
        encoded,
        json!({ "aBoolean": false, "aDate": 1000, "aPoint": "-1.5,2", "tags": ["a"] })
    );
}

// ── Raw records ──────────────────────────────────────────────────

#[test]
fn encode_record_follows_schema_structure() {
    let data: EntityData = [("s".to_string(), FieldValue::from("foo"))].into();
    let record = encode_record(&json_schema(), &data);
    assert_eq!(record.data_structure(), DataStructure::Json);
    assert_eq!(record, RawRecord::Json(r#"{"s":"foo"}"#.into()));
    assert_eq!(decode_record(&json_schema(), &record).unwrap(), data);
}

#[test]
fn hash_record_decodes_flat_entries() {
    let schema = Schema::new(
        "HashEntity",
        vec![FieldDefinition::number("n")],
        SchemaOptions::default(),
    )
    .unwrap();
    let record = RawRecord::Hash(vec!["n".into(), "7".into()]);
    let data = decode_record(&schema, &record).unwrap();
    assert_eq!(data["n"], FieldValue::Number(7.0));
}

#[test]
fn only_empty_hashes_are_empty() {
    assert!(RawRecord::Hash(vec![]).is_empty());
    assert!(!RawRecord::Json("{}".into()).is_empty());
}
