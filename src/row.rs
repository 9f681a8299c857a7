//! Typed values and the rows built from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// One converted field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value, widening integers to `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            // `{:?}` keeps a decimal point on whole floats so they read back as floats
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// A fully parsed and validated line.
///
/// Rows only live while their line is being processed. A row predicate sees
/// each one exactly once, and always with one value per schema column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    line_index: usize,
    values: Vec<Value>,
}

impl Row {
    pub fn new(line_index: usize, values: Vec<Value>) -> Self {
        Self { line_index, values }
    }

    /// Zero-based index of the physical line this row came from.
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn int(&self, column: usize) -> Option<i64> {
        self.get(column).and_then(Value::as_int)
    }

    pub fn float(&self, column: usize) -> Option<f64> {
        self.get(column).and_then(Value::as_float)
    }

    pub fn text(&self, column: usize) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    pub fn number(&self, column: usize) -> Option<f64> {
        self.get(column).and_then(Value::as_number)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl Index<usize> for Row {
    type Output = Value;

    #[expect(clippy::indexing_slicing)] // panics like `Vec` indexing
    fn index(&self, column: usize) -> &Value {
        &self.values[column]
    }
}
