mod common;

use chrono::DateTime;
use common::{full_schema, RecordingClient};
use kvom_model::DataStructure;
use kvom_search::{CompiledQuery, DistanceUnit, RawSearch, Search, SearchError};
use kvom_types::Point;
use pretty_assertions::assert_eq;

const EPOCH: i64 = 1_665_971_262_344;

fn hash_search() -> Search {
    Search::new(full_schema(DataStructure::Hash), RecordingClient::empty())
}

fn json_search() -> Search {
    Search::new(full_schema(DataStructure::Json), RecordingClient::empty())
}

fn query(search: Search) -> String {
    search.compile().unwrap().query
}

fn usage_error(search: Search) -> String {
    match search.compile() {
        Err(SearchError::Usage(message)) => message,
        other => panic!("expected a usage error, got {other:?}"),
    }
}

// ── Defaults ─────────────────────────────────────────────────────

#[test]
fn empty_search_matches_everything() {
    assert_eq!(
        hash_search().compile().unwrap(),
        CompiledQuery {
            index_name: "TestEntity:index".to_string(),
            query: "*".to_string(),
        }
    );
}

#[test]
fn raw_search_passes_query_through() {
    let raw = RawSearch::new(
        full_schema(DataStructure::Hash),
        RecordingClient::empty(),
        "@aString:{foo}",
    );
    assert_eq!(raw.compile().query, "@aString:{foo}");
    assert_eq!(raw.compile().index_name, "TestEntity:index");
}

#[test]
fn blank_raw_search_matches_everything() {
    for input in ["", "   "] {
        let raw = RawSearch::new(
            full_schema(DataStructure::Hash),
            RecordingClient::empty(),
            input,
        );
        assert_eq!(raw.compile().query, "*");
    }
}

// ── Strings & tags ───────────────────────────────────────────────

#[test]
fn string_equality_is_a_tag_match() {
    assert_eq!(
        query(hash_search().where_field("aString").eq("foo")),
        "(@aString:{foo})"
    );
}

#[test]
fn clauses_use_the_alias() {
    assert_eq!(
        query(hash_search().where_field("aliased").eq("bar")),
        "(@anAlias:{bar})"
    );
}

#[test]
fn tag_values_are_escaped() {
    assert_eq!(
        query(hash_search().where_field("aString").eq("foo bar.baz")),
        r"(@aString:{foo\ bar\.baz})"
    );
}

#[test]
fn trailing_backslash_cannot_escape_the_closing_brace() {
    assert_eq!(
        query(hash_search().where_field("aString").eq("foo\\")),
        r"(@aString:{foo\\})"
    );
    assert_eq!(
        query(hash_search().where_field("aString").eq("a/b?")),
        r"(@aString:{a\/b\?})"
    );
}

#[test]
fn not_negates_the_clause() {
    assert_eq!(
        query(hash_search().where_field("aString").not().eq("foo")),
        "(-@aString:{foo})"
    );
}

#[test]
fn array_contains() {
    assert_eq!(
        query(hash_search().where_field("tags").contains("a")),
        "(@tags:{a})"
    );
    assert_eq!(
        query(hash_search().where_field("tags").contains_one_of(["a", "b c"])),
        r"(@tags:{a|b\ c})"
    );
}

#[test]
fn contains_one_of_needs_values() {
    let message = usage_error(
        hash_search()
            .where_field("tags")
            .contains_one_of(Vec::<String>::new()),
    );
    assert!(message.contains("at least one value"));
}

// ── Booleans ─────────────────────────────────────────────────────

#[test]
fn hash_booleans_compile_to_one_and_zero() {
    assert_eq!(
        query(hash_search().where_field("aBoolean").is_true()),
        "(@aBoolean:{1})"
    );
    assert_eq!(
        query(hash_search().where_field("aBoolean").eq(false)),
        "(@aBoolean:{0})"
    );
}

#[test]
fn json_booleans_compile_to_literals() {
    assert_eq!(
        query(json_search().where_field("aBoolean").eq(true)),
        "(@aBoolean:{true})"
    );
    assert_eq!(
        query(json_search().where_field("aBoolean").is_false()),
        "(@aBoolean:{false})"
    );
}

// ── Numbers ──────────────────────────────────────────────────────

#[test]
fn number_operators() {
    let cases: [(Search, &str); 6] = [
        (hash_search().where_field("aNumber").eq(42), "(@aNumber:[42 42])"),
        (hash_search().where_field("aNumber").gt(42), "(@aNumber:[(42 +inf])"),
        (hash_search().where_field("aNumber").gte(42), "(@aNumber:[42 +inf])"),
        (hash_search().where_field("aNumber").lt(42), "(@aNumber:[-inf (42])"),
        (hash_search().where_field("aNumber").lte(42.5), "(@aNumber:[-inf 42.5])"),
        (
            hash_search().where_field("aNumber").between(10, 20),
            "(@aNumber:[10 20])",
        ),
    ];
    for (search, expected) in cases {
        assert_eq!(query(search), expected);
    }
}

#[test]
fn negative_numbers() {
    assert_eq!(
        query(hash_search().where_field("aNumber").gte(-7.25)),
        "(@aNumber:[-7.25 +inf])"
    );
}

#[test]
fn nan_is_rejected() {
    let message = usage_error(hash_search().where_field("aNumber").eq(f64::NAN));
    assert!(message.contains("NaN"));
}

// ── Dates ────────────────────────────────────────────────────────

#[test]
fn date_operators_use_epoch_millis() {
    let date = DateTime::from_timestamp_millis(EPOCH).unwrap();
    let cases: [(Search, String); 5] = [
        (
            hash_search().where_field("aDate").on(date),
            format!("(@aDate:[{EPOCH} {EPOCH}])"),
        ),
        (
            hash_search().where_field("aDate").after(date),
            format!("(@aDate:[({EPOCH} +inf])"),
        ),
        (
            hash_search().where_field("aDate").on_or_after(date),
            format!("(@aDate:[{EPOCH} +inf])"),
        ),
        (
            hash_search().where_field("aDate").before(date),
            format!("(@aDate:[-inf ({EPOCH}])"),
        ),
        (
            hash_search().where_field("aDate").on_or_before(date),
            format!("(@aDate:[-inf {EPOCH}])"),
        ),
    ];
    for (search, expected) in cases {
        assert_eq!(query(search), expected);
    }
}

#[test]
fn dates_accept_number_operators() {
    let start = DateTime::from_timestamp_millis(1_000).unwrap();
    let end = DateTime::from_timestamp_millis(2_000).unwrap();
    assert_eq!(
        query(hash_search().where_field("aDate").between(start, end)),
        "(@aDate:[1000 2000])"
    );
    assert_eq!(
        query(hash_search().where_field("aDate").gt(1_500)),
        "(@aDate:[(1500 +inf])"
    );
}

// ── Text & points ────────────────────────────────────────────────

#[test]
fn text_matching() {
    assert_eq!(
        query(hash_search().where_field("aText").matches("hello world")),
        r"(@aText:'hello\ world')"
    );
    assert_eq!(
        query(hash_search().where_field("aText").matches_exact("hello world")),
        r#"(@aText:"hello\ world")"#
    );
}

#[test]
fn point_radius() {
    assert_eq!(
        query(hash_search().where_field("aPoint").in_radius(
            Point::new(12.34, 56.78),
            10.0,
            DistanceUnit::Miles
        )),
        "(@aPoint:[12.34 56.78 10 mi])"
    );
}

// ── Combination ──────────────────────────────────────────────────

#[test]
fn and_wraps_both_sides() {
    assert_eq!(
        query(
            hash_search()
                .where_field("aString")
                .eq("foo")
                .and("aNumber")
                .gt(42)
        ),
        "( (@aString:{foo}) (@aNumber:[(42 +inf]) )"
    );
}

#[test]
fn chained_where_is_and() {
    assert_eq!(
        query(
            hash_search()
                .where_field("aString")
                .eq("foo")
                .where_field("aBoolean")
                .is_true()
        ),
        "( (@aString:{foo}) (@aBoolean:{1}) )"
    );
}

#[test]
fn combination_is_left_associative() {
    assert_eq!(
        query(
            hash_search()
                .where_field("aString")
                .eq("a")
                .or("aString")
                .eq("b")
                .and("aBoolean")
                .is_true()
        ),
        "( ( (@aString:{a}) | (@aString:{b}) ) (@aBoolean:{1}) )"
    );
}

#[test]
fn groups_nest() {
    assert_eq!(
        query(
            hash_search()
                .where_field("aString")
                .eq("foo")
                .and_group(|s| s.where_field("aNumber").gt(1).or("aNumber").lt(0))
        ),
        "( (@aString:{foo}) ( (@aNumber:[(1 +inf]) | (@aNumber:[-inf (0]) ) )"
    );
    assert_eq!(
        query(
            hash_search()
                .where_field("aString")
                .eq("foo")
                .or_group(|s| s.where_field("aBoolean").is_false())
        ),
        "( (@aString:{foo}) | (@aBoolean:{0}) )"
    );
}

#[test]
fn empty_group_is_ignored() {
    assert_eq!(
        query(hash_search().where_field("aString").eq("foo").and_group(|s| s)),
        "(@aString:{foo})"
    );
}

// ── Usage errors ─────────────────────────────────────────────────

#[test]
fn unknown_field_is_reported_at_compile() {
    let message = usage_error(hash_search().where_field("nope").eq("x"));
    assert_eq!(
        message,
        "The field 'nope' used with 'eq' is not part of the schema for 'TestEntity'."
    );
}

#[test]
fn operator_must_fit_the_field_type() {
    let message = usage_error(hash_search().where_field("aString").matches("x"));
    assert_eq!(
        message,
        "The operator 'matches' cannot be used on the field 'aString' of type 'string'."
    );

    let message = usage_error(hash_search().where_field("aNumber").eq("x"));
    assert_eq!(
        message,
        "The operator 'eq' on field 'aNumber' expects a number but received a 'string'."
    );

    usage_error(hash_search().where_field("aNumber").on(DateTime::from_timestamp_millis(0).unwrap()));
    usage_error(hash_search().where_field("tags").eq("a"));
}

#[test]
fn first_error_wins() {
    let message = usage_error(
        hash_search()
            .where_field("missing")
            .eq("x")
            .and("aString")
            .matches("y"),
    );
    assert!(message.contains("'missing'"));
}

#[test]
fn errors_inside_groups_surface() {
    let message = usage_error(
        hash_search()
            .where_field("aString")
            .eq("foo")
            .and_group(|s| s.where_field("ghost").is_true()),
    );
    assert!(message.contains("'ghost'"));
}
