//! Per-field clause builder.

use crate::predicate::{Condition, DistanceUnit, Predicate, RangeBound};
use crate::search::Search;
use chrono::{DateTime, Utc};
use kvom_model::{DataStructure, FieldAccessor, FieldType};
use kvom_types::{FieldValue, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub(crate) fn join(self, left: Predicate, right: Predicate) -> Predicate {
        match self {
            Self::And => Predicate::And(Box::new(left), Box::new(right)),
            Self::Or => Predicate::Or(Box::new(left), Box::new(right)),
        }
    }
}

/// A pending clause on one field. Every operator hands back the [`Search`].
///
/// Which operators are valid depends on the field's declared type:
///
/// | type | operators |
/// |---|---|
/// | string | `eq` |
/// | string[] | `contains`, `contains_one_of` |
/// | boolean | `eq`, `is_true`, `is_false` |
/// | number | `eq`, `gt`, `gte`, `lt`, `lte`, `between` |
/// | date | `on`, `after`, `on_or_after`, `before`, `on_or_before`, and the number operators |
/// | text | `matches`, `matches_exact` |
/// | point | `in_radius` |
#[must_use]
pub struct WhereField {
    search: Search,
    field: String,
    combinator: Combinator,
    negated: bool,
}

impl WhereField {
    pub(crate) fn new(search: Search, field: &str, combinator: Combinator) -> Self {
        Self {
            search,
            field: field.to_string(),
            combinator,
            negated: false,
        }
    }

    /// Negates the operator that follows.
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn eq(self, value: impl Into<FieldValue>) -> Search {
        let value = value.into();
        self.apply("eq", |acc, structure| match acc.field_type() {
            FieldType::String => match value {
                FieldValue::String(s) => Ok(Condition::Tag(vec![s])),
                other => Err(wrong_value("eq", acc, "string", &other)),
            },
            FieldType::Boolean => match value {
                FieldValue::Boolean(b) => Ok(boolean_tag(b, structure)),
                other => Err(wrong_value("eq", acc, "boolean", &other)),
            },
            FieldType::Number | FieldType::Date => {
                let v = range_value("eq", acc, value)?;
                Ok(range(RangeBound::Inclusive(v), RangeBound::Inclusive(v)))
            }
            _ => Err(invalid_operator("eq", acc)),
        })
    }

    pub fn is_true(self) -> Search {
        self.boolean("is_true", true)
    }

    pub fn is_false(self) -> Search {
        self.boolean("is_false", false)
    }

    pub fn gt(self, value: impl Into<FieldValue>) -> Search {
        self.lower_bound("gt", value.into(), RangeBound::Exclusive)
    }

    pub fn gte(self, value: impl Into<FieldValue>) -> Search {
        self.lower_bound("gte", value.into(), RangeBound::Inclusive)
    }

    pub fn lt(self, value: impl Into<FieldValue>) -> Search {
        self.upper_bound("lt", value.into(), RangeBound::Exclusive)
    }

    pub fn lte(self, value: impl Into<FieldValue>) -> Search {
        self.upper_bound("lte", value.into(), RangeBound::Inclusive)
    }

    /// Inclusive on both ends.
    pub fn between(self, lower: impl Into<FieldValue>, upper: impl Into<FieldValue>) -> Search {
        let (lower, upper) = (lower.into(), upper.into());
        self.apply("between", |acc, _| {
            let l = range_value("between", acc, lower)?;
            let h = range_value("between", acc, upper)?;
            Ok(range(RangeBound::Inclusive(l), RangeBound::Inclusive(h)))
        })
    }

    pub fn on(self, date: DateTime<Utc>) -> Search {
        self.dated("on", date, |ms| {
            (RangeBound::Inclusive(ms), RangeBound::Inclusive(ms))
        })
    }

    pub fn after(self, date: DateTime<Utc>) -> Search {
        self.dated("after", date, |ms| {
            (RangeBound::Exclusive(ms), RangeBound::Unbounded)
        })
    }

    pub fn on_or_after(self, date: DateTime<Utc>) -> Search {
        self.dated("on_or_after", date, |ms| {
            (RangeBound::Inclusive(ms), RangeBound::Unbounded)
        })
    }

    pub fn before(self, date: DateTime<Utc>) -> Search {
        self.dated("before", date, |ms| {
            (RangeBound::Unbounded, RangeBound::Exclusive(ms))
        })
    }

    pub fn on_or_before(self, date: DateTime<Utc>) -> Search {
        self.dated("on_or_before", date, |ms| {
            (RangeBound::Unbounded, RangeBound::Inclusive(ms))
        })
    }

    pub fn contains(self, value: impl Into<String>) -> Search {
        let value = value.into();
        self.apply("contains", |acc, _| match acc.field_type() {
            FieldType::StringArray => Ok(Condition::Tag(vec![value])),
            _ => Err(invalid_operator("contains", acc)),
        })
    }

    /// Matches when the array holds any of `values`.
    pub fn contains_one_of<I, S>(self, values: I) -> Search
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.apply("contains_one_of", |acc, _| match acc.field_type() {
            FieldType::StringArray if values.is_empty() => Err(format!(
                "The operator 'contains_one_of' on field '{}' needs at least one value.",
                acc.field()
            )),
            FieldType::StringArray => Ok(Condition::Tag(values)),
            _ => Err(invalid_operator("contains_one_of", acc)),
        })
    }

    /// Full-text match.
    pub fn matches(self, value: impl Into<String>) -> Search {
        self.text("matches", value.into(), false)
    }

    /// Exact phrase match.
    pub fn matches_exact(self, value: impl Into<String>) -> Search {
        self.text("matches_exact", value.into(), true)
    }

    pub fn in_radius(self, center: Point, radius: f64, unit: DistanceUnit) -> Search {
        self.apply("in_radius", |acc, _| match acc.field_type() {
            FieldType::Point => Ok(Condition::Radius {
                center,
                radius,
                unit,
            }),
            _ => Err(invalid_operator("in_radius", acc)),
        })
    }

    fn boolean(self, op: &'static str, value: bool) -> Search {
        self.apply(op, |acc, structure| match acc.field_type() {
            FieldType::Boolean => Ok(boolean_tag(value, structure)),
            _ => Err(invalid_operator(op, acc)),
        })
    }

    fn lower_bound(
        self,
        op: &'static str,
        value: FieldValue,
        bound: fn(f64) -> RangeBound,
    ) -> Search {
        self.apply(op, |acc, _| {
            let v = range_value(op, acc, value)?;
            Ok(range(bound(v), RangeBound::Unbounded))
        })
    }

    fn upper_bound(
        self,
        op: &'static str,
        value: FieldValue,
        bound: fn(f64) -> RangeBound,
    ) -> Search {
        self.apply(op, |acc, _| {
            let v = range_value(op, acc, value)?;
            Ok(range(RangeBound::Unbounded, bound(v)))
        })
    }

    fn dated(
        self,
        op: &'static str,
        date: DateTime<Utc>,
        bounds: fn(f64) -> (RangeBound, RangeBound),
    ) -> Search {
        self.apply(op, |acc, _| match acc.field_type() {
            FieldType::Date => {
                let (lower, upper) = bounds(epoch_millis(date));
                Ok(range(lower, upper))
            }
            _ => Err(invalid_operator(op, acc)),
        })
    }

    fn text(self, op: &'static str, value: String, exact: bool) -> Search {
        self.apply(op, |acc, _| match acc.field_type() {
            FieldType::Text => Ok(Condition::Text { value, exact }),
            _ => Err(invalid_operator(op, acc)),
        })
    }

    /// Resolves the field and builds the clause, or records why it can't.
    fn apply(
        self,
        op: &'static str,
        build: impl FnOnce(&FieldAccessor, DataStructure) -> Result<Condition, String>,
    ) -> Search {
        let Self {
            search,
            field,
            combinator,
            negated,
        } = self;

        let schema = search.schema();
        let clause = match schema.accessor(&field) {
            None => Err(format!(
                "The field '{field}' used with '{op}' is not part of the schema for '{}'.",
                schema.entity_type()
            )),
            Some(acc) => build(acc, schema.data_structure()).map(|condition| Predicate::Clause {
                alias: acc.alias().to_string(),
                negated,
                condition,
            }),
        };
        search.push(combinator, clause)
    }
}

fn range(lower: RangeBound, upper: RangeBound) -> Condition {
    Condition::Range { lower, upper }
}

/// Booleans are indexed as tags: `1`/`0` in hashes, `true`/`false` in JSON.
fn boolean_tag(value: bool, structure: DataStructure) -> Condition {
    let tag = match (structure, value) {
        (DataStructure::Hash, true) => "1",
        (DataStructure::Hash, false) => "0",
        (DataStructure::Json, true) => "true",
        (DataStructure::Json, false) => "false",
    };
    Condition::Tag(vec![tag.to_string()])
}

fn epoch_millis(date: DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64
}

/// Numeric value for a range operator. Date fields take dates or epoch
/// milliseconds.
fn range_value(op: &str, acc: &FieldAccessor, value: FieldValue) -> Result<f64, String> {
    match (acc.field_type(), value) {
        (FieldType::Number | FieldType::Date, FieldValue::Number(n)) if !n.is_nan() => Ok(n),
        (FieldType::Number | FieldType::Date, FieldValue::Number(_)) => Err(format!(
            "The operator '{op}' on field '{}' cannot compare against NaN.",
            acc.field()
        )),
        (FieldType::Date, FieldValue::Date(d)) => Ok(epoch_millis(d)),
        (FieldType::Number, other) => Err(wrong_value(op, acc, "number", &other)),
        (FieldType::Date, other) => Err(wrong_value(op, acc, "date", &other)),
        _ => Err(invalid_operator(op, acc)),
    }
}

fn invalid_operator(op: &str, acc: &FieldAccessor) -> String {
    format!(
        "The operator '{op}' cannot be used on the field '{}' of type '{}'.",
        acc.field(),
        acc.field_type()
    )
}

fn wrong_value(op: &str, acc: &FieldAccessor, expected: &str, received: &FieldValue) -> String {
    format!(
        "The operator '{op}' on field '{}' expects a {expected} but received a '{}'.",
        acc.field(),
        received.kind()
    )
}
