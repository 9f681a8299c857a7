//! Column-oriented storage for accepted rows.

use serde::Serialize;

use crate::error::{ReaderError, Result};
use crate::row::{Row, Value};
use crate::schema::{ColumnType, FormatSchema};

/// Values of one schema column, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    /// Empty column with the storage type of `column_type`.
    pub fn for_type(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Int | ColumnType::IdxInt | ColumnType::PosInt => Self::Int(Vec::new()),
            ColumnType::Float | ColumnType::PosFloat => Self::Float(Vec::new()),
            ColumnType::String => Self::Text(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Self::Int(v) => v.get(index).copied().map(Value::Int),
            Self::Float(v) => v.get(index).copied().map(Value::Float),
            Self::Text(v) => v.get(index).cloned().map(Value::Text),
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_texts(&self) -> Option<&[String]> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Int(_), Value::Int(_))
                | (Self::Float(_), Value::Float(_))
                | (Self::Text(_), Value::Text(_))
        )
    }

    // Callers check `accepts` first; a mismatched value is dropped.
    fn push_checked(&mut self, value: Value) {
        match (self, value) {
            (Self::Int(c), Value::Int(v)) => c.push(v),
            (Self::Float(c), Value::Float(v)) => c.push(v),
            (Self::Text(c), Value::Text(v)) => c.push(v),
            _ => {}
        }
    }
}

/// The result of a typed read: one [`Column`] per schema entry.
///
/// Rows are appended whole or not at all, so every column always has
/// [`num_rows`](Self::num_rows) values.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    schema: FormatSchema,
    columns: Vec<Column>,
    num_rows: usize,
}

impl Columns {
    /// One empty column per schema entry.
    pub fn empty(schema: FormatSchema) -> Self {
        let columns = schema.iter().map(Column::for_type).collect();
        Self {
            schema,
            columns,
            num_rows: 0,
        }
    }

    /// Append every value of `row` to its column.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::Type`] if the row has the wrong number of
    /// values or a value does not match its column's storage type. Nothing
    /// is appended in that case.
    pub fn push_row(&mut self, row: Row) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ReaderError::Type(format!(
                "row from line {} has {} value(s), expected {}",
                row.line_index(),
                row.len(),
                self.columns.len()
            )));
        }
        if let Some((j, (column, value))) = self
            .columns
            .iter()
            .zip(row.values())
            .enumerate()
            .find(|(_, (column, value))| !column.accepts(value))
        {
            return Err(ReaderError::Type(format!(
                "column {j} holds {} values, got {} ({})",
                column.kind_name(),
                value,
                value.kind_name()
            )));
        }

        for (column, value) in self.columns.iter_mut().zip(row.into_values()) {
            column.push_checked(value);
        }
        self.num_rows += 1;
        Ok(())
    }

    pub fn schema(&self) -> &FormatSchema {
        &self.schema
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, column: usize) -> Option<&Column> {
        self.columns.get(column)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn ints(&self, column: usize) -> Option<&[i64]> {
        self.get(column).and_then(Column::as_ints)
    }

    pub fn floats(&self, column: usize) -> Option<&[f64]> {
        self.get(column).and_then(Column::as_floats)
    }

    pub fn texts(&self, column: usize) -> Option<&[String]> {
        self.get(column).and_then(Column::as_texts)
    }

    /// Values of accepted row `index`, one per column.
    pub fn row_values(&self, index: usize) -> Option<Vec<Value>> {
        if index >= self.num_rows {
            return None;
        }
        self.columns.iter().map(|c| c.get(index)).collect()
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
