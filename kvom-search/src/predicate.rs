//! Predicate tree and its compilation to the store's query syntax.

use crate::escape::escape;
use kvom_types::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance unit for radius queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
    #[serde(rename = "ft")]
    Feet,
}

impl DistanceUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Miles => "mi",
            Self::Feet => "ft",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One end of a numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeBound {
    Unbounded,
    Inclusive(f64),
    Exclusive(f64),
}

impl RangeBound {
    fn render(self, infinity: &str) -> String {
        match self {
            Self::Unbounded => infinity.to_string(),
            Self::Inclusive(v) => format_number(v),
            Self::Exclusive(v) => format!("({}", format_number(v)),
        }
    }
}

/// What a single clause matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Any of the given tag values.
    Tag(Vec<String>),
    /// A numeric range.
    Range { lower: RangeBound, upper: RangeBound },
    /// Full-text match, or exact phrase match when `exact`.
    Text { value: String, exact: bool },
    /// Within `radius` of `center`.
    Radius {
        center: Point,
        radius: f64,
        unit: DistanceUnit,
    },
}

/// A query expression. Combination is left-associative in build order.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Clause {
        alias: String,
        negated: bool,
        condition: Condition,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    /// Renders the expression in the store's query syntax.
    #[must_use]
    pub fn compile(&self) -> String {
        match self {
            Self::Clause {
                alias,
                negated,
                condition,
            } => {
                let sign = if *negated { "-" } else { "" };
                format!("({sign}@{alias}:{})", render_condition(condition))
            }
            Self::And(left, right) => format!("( {} {} )", left.compile(), right.compile()),
            Self::Or(left, right) => format!("( {} | {} )", left.compile(), right.compile()),
        }
    }
}

fn render_condition(condition: &Condition) -> String {
    match condition {
        Condition::Tag(values) => {
            let joined = values
                .iter()
                .map(|v| escape(v))
                .collect::<Vec<_>>()
                .join("|");
            format!("{{{joined}}}")
        }
        Condition::Range { lower, upper } => {
            format!("[{} {}]", lower.render("-inf"), upper.render("+inf"))
        }
        Condition::Text { value, exact: false } => format!("'{}'", escape(value)),
        Condition::Text { value, exact: true } => format!("\"{}\"", escape(value)),
        Condition::Radius {
            center,
            radius,
            unit,
        } => format!(
            "[{} {} {} {unit}]",
            format_number(center.longitude),
            format_number(center.latitude),
            format_number(*radius)
        ),
    }
}

fn format_number(value: f64) -> String {
    if value == f64::INFINITY {
        "+inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        value.to_string()
    }
}
