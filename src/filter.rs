//! Declarative row filters.
//!
//! A [`FilterRule`] compares one column against a literal, e.g. `2>=-100000`
//! keeps rows whose third field is at least -100000. Rules can be written on
//! the command line or stored in a job file, then compiled against a schema
//! into a [`RowFilter`] that the reader uses as its row predicate.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{ReaderError, Result};
use crate::row::{Row, Value};
use crate::schema::FormatSchema;

/// Comparison operator of a filter rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl CompareOp {
    // Two-character operators first so `>=` is not read as `>` followed by `=`.
    const PARSE_ORDER: [Self; 6] = [Self::Eq, Self::Ne, Self::Le, Self::Ge, Self::Lt, Self::Gt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Whether `field <op> literal` holds, given `field.cmp(literal)`.
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `column <op> literal` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRule {
    /// Zero-based column index
    pub column: usize,
    pub op: CompareOp,
    pub value: Value,
}

impl FilterRule {
    pub fn new(column: usize, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            column,
            op,
            value: value.into(),
        }
    }

    /// Evaluate the rule on a row. Missing columns and incomparable values
    /// (text against numbers, NaN) never match.
    pub fn matches(&self, row: &Row) -> bool {
        let Some(field) = row.get(self.column) else {
            return false;
        };
        let ordering = match (field, &self.value) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.as_str().cmp(b.as_str())),
            (field, literal) => match (field.as_number(), literal.as_number()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        };
        ordering.is_some_and(|o| self.op.holds(o))
    }

    // Make the literal comparable with the column it targets.
    fn bind(self, schema: &FormatSchema) -> Result<Self> {
        let Some(column_type) = schema.get(self.column) else {
            return Err(ReaderError::InvalidFilter(format!(
                "rule '{self}' refers to column {}, but format '{schema}' has {} column(s)",
                self.column,
                schema.len()
            )));
        };

        let value = match self.value {
            Value::Text(s) if column_type.is_numeric() => parse_literal(&s).ok_or_else(|| {
                ReaderError::InvalidFilter(format!(
                    "column {} is {column_type}, cannot compare it with text {s:?}",
                    self.column
                ))
            })?,
            Value::Text(s) => Value::Text(s),
            number if column_type.is_numeric() => number,
            number => Value::Text(number.to_string()),
        };
        Ok(Self { value, ..self })
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.column, self.op, self.value)
    }
}

impl FromStr for FilterRule {
    type Err = ReaderError;

    /// Parse `<column><op><literal>`, e.g. `2>=-100000` or `0==abc`.
    ///
    /// The literal is kept as written. [`RowFilter::compile`] turns it into a
    /// number for numeric columns.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (column, rest) = s.split_at(digits);
        let column = column.parse::<usize>().map_err(|_| {
            ReaderError::InvalidFilter(format!("{s:?} does not start with a column index"))
        })?;

        let rest = rest.trim_start();
        let op = CompareOp::PARSE_ORDER
            .into_iter()
            .find(|op| rest.starts_with(op.as_str()))
            .ok_or_else(|| {
                ReaderError::InvalidFilter(format!(
                    "{s:?} has no comparison operator (==, !=, <, <=, >, >=)"
                ))
            })?;

        let literal = rest.get(op.as_str().len()..).unwrap_or_default().trim();
        Ok(Self::new(column, op, literal))
    }
}

fn parse_literal(text: &str) -> Option<Value> {
    text.parse::<i64>()
        .map(Value::Int)
        .or_else(|_| text.parse::<f64>().map(Value::Float))
        .ok()
}

/// All-of combination of filter rules, checked against a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    rules: Vec<FilterRule>,
}

impl RowFilter {
    /// Check every rule against `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::InvalidFilter`] if a rule targets a column the
    /// schema does not have, or compares a numeric column with text.
    pub fn compile(rules: impl IntoIterator<Item = FilterRule>, schema: &FormatSchema) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(|rule| rule.bind(schema))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    /// True when every rule matches; an empty filter keeps every row.
    pub fn matches(&self, row: &Row) -> bool {
        self.rules.iter().all(|rule| rule.matches(row))
    }
}
