//! The typed column reader.
//!
//! Reads a comma-separated file line by line, converts every field according
//! to a [`FormatSchema`], optionally filters whole rows, and collects accepted
//! rows into [`Columns`].
//!
//! ## Validation
//!
//! Each physical line must have exactly one field per schema column, every
//! field must convert under its column type, and an `idx_int` field must hold
//! the line's own zero-based index. The first violation fails the whole read;
//! there is no partial result.
//!
//! ## Filtering
//!
//! A row predicate runs once per line, after the line has been fully
//! converted. Rejected rows are skipped without touching any column. Line
//! indices keep counting rejected lines.
//!
//! ```no_run
//! use typed_columns::reader::read_typed_columns;
//!
//! let keep_large = |row: &typed_columns::Row| row.int(2).is_some_and(|v| v >= -100_000);
//! let columns = read_typed_columns("runs.csv", "string,string,int,float", Some(&keep_large))?;
//! println!("{} rows", columns.num_rows());
//! # Ok::<(), typed_columns::error::ReaderError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::columns::Columns;
use crate::error::{ReaderError, Result, ResultExt as _};
use crate::row::{Row, Value};
use crate::scalar::{parse_float, parse_int, parse_positive_float, parse_positive_int};
use crate::schema::{ColumnType, FormatSchema};

/// Read a typed CSV file into columns.
///
/// `descriptor` is parsed before the file is opened, so a bad descriptor is
/// reported even when the path does not exist.
///
/// # Errors
///
/// - [`ReaderError::InvalidSchema`] for an unknown descriptor token
/// - [`ReaderError::Io`] if the file cannot be opened or read
/// - [`ReaderError::RowShape`], [`ReaderError::IndexMismatch`],
///   [`ReaderError::Parse`] or [`ReaderError::Range`] for the first invalid line
pub fn read_typed_columns(
    path: impl AsRef<Path>,
    descriptor: &str,
    predicate: Option<&dyn Fn(&Row) -> bool>,
) -> Result<Columns> {
    let schema = FormatSchema::parse(descriptor)?;
    let mut reader = ColumnReader::new(schema);
    if let Some(predicate) = predicate {
        reader = reader.with_filter(predicate);
    }
    reader.read_path(path)
}

/// Reusable reader configuration: a schema plus an optional row predicate.
pub struct ColumnReader<'f> {
    schema: FormatSchema,
    filter: Option<Box<dyn Fn(&Row) -> bool + 'f>>,
}

impl<'f> ColumnReader<'f> {
    pub fn new(schema: FormatSchema) -> Self {
        Self {
            schema,
            filter: None,
        }
    }

    /// Build a reader from a format descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::InvalidSchema`] for an unknown token.
    pub fn from_descriptor(descriptor: &str) -> Result<Self> {
        Ok(Self::new(FormatSchema::parse(descriptor)?))
    }

    /// Keep only rows for which `predicate` returns true.
    #[must_use]
    pub fn with_filter(mut self, predicate: impl Fn(&Row) -> bool + 'f) -> Self {
        self.filter = Some(Box::new(predicate));
        self
    }

    pub fn schema(&self) -> &FormatSchema {
        &self.schema
    }

    /// Validated rows of `reader`, ignoring the filter.
    pub fn rows<R: BufRead>(&self, reader: R) -> Rows<'_, R> {
        Rows::new(&self.schema, reader)
    }

    /// Read and validate every line of `reader`.
    ///
    /// # Errors
    ///
    /// See [`read_typed_columns`].
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Columns> {
        let mut columns = Columns::empty(self.schema.clone());
        let mut rejected = 0usize;

        for row in self.rows(reader) {
            let row = row.inspect_err(|_| {
                tracing::warn!(
                    schema = %self.schema,
                    accepted = columns.num_rows(),
                    rejected,
                    "read aborted on invalid input"
                );
            })?;
            if let Some(filter) = &self.filter
                && !filter(&row)
            {
                rejected += 1;
                continue;
            }
            columns.push_row(row)?;
        }

        tracing::debug!(
            schema = %self.schema,
            accepted = columns.num_rows(),
            rejected,
            "typed read complete"
        );
        Ok(columns)
    }

    /// Open `path` and read it.
    ///
    /// # Errors
    ///
    /// See [`read_typed_columns`].
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Columns> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), schema = %self.schema, "reading typed columns");
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        self.read(BufReader::new(file))
    }
}

/// Iterator over the validated rows of a line source.
///
/// Yields one `Row` per physical line. After the first error it yields that
/// error and then stops.
pub struct Rows<'s, R> {
    schema: &'s FormatSchema,
    lines: Lines<R>,
    line_index: usize,
    done: bool,
}

impl<'s, R: BufRead> Rows<'s, R> {
    pub fn new(schema: &'s FormatSchema, reader: R) -> Self {
        Self {
            schema,
            lines: reader.lines(),
            line_index: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Rows<'_, R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
        };

        let result = parse_line(self.schema, self.line_index, &line);
        if result.is_err() {
            self.done = true;
        }
        self.line_index += 1;
        Some(result)
    }
}

/// Split and convert one line.
///
/// # Errors
///
/// [`ReaderError::RowShape`] on a field count mismatch, otherwise the first
/// conversion error with its line and column.
pub fn parse_line(schema: &FormatSchema, line_index: usize, line: &str) -> Result<Row> {
    let tokens: Vec<&str> = line.split(',').collect();
    if tokens.len() != schema.len() {
        return Err(ReaderError::RowShape {
            line_index,
            line: line.to_owned(),
            expected: schema.to_string(),
            found: tokens.len(),
        });
    }

    let values = schema
        .iter()
        .zip(tokens)
        .enumerate()
        .map(|(column, (column_type, token))| {
            convert_field(column_type, token, line_index).map_err(|e| e.at_field(line_index, column))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Row::new(line_index, values))
}

fn convert_field(column_type: ColumnType, token: &str, line_index: usize) -> Result<Value> {
    match column_type {
        ColumnType::Int => parse_int(token).map(Value::Int),
        ColumnType::IdxInt => {
            let value = parse_int(token)?;
            if usize::try_from(value).ok() != Some(line_index) {
                return Err(ReaderError::IndexMismatch { line_index, value });
            }
            Ok(Value::Int(value))
        }
        ColumnType::PosInt => parse_positive_int(token).map(Value::Int),
        ColumnType::Float => parse_float(token).map(Value::Float),
        ColumnType::PosFloat => parse_positive_float(token).map(Value::Float),
        ColumnType::String => Ok(Value::Text(token.trim().to_owned())),
    }
}
