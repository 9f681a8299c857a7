//! Error handling for typed column reads.
//!
//! Every failure the reader can report is a variant of [`ReaderError`]. The
//! variants mirror the ways a load can go wrong, so callers can match on the
//! kind instead of inspecting message text:
//!
//! ```
//! use typed_columns::error::ReaderError;
//!
//! fn describe(err: &ReaderError) -> &'static str {
//!     match err {
//!         ReaderError::InvalidSchema { .. } => "bad format descriptor",
//!         ReaderError::RowShape { .. } | ReaderError::IndexMismatch { .. } => "malformed file",
//!         ReaderError::Parse(_) | ReaderError::Range(_) | ReaderError::Type(_) => "bad value",
//!         _ => "other",
//!     }
//! }
//! ```
//!
//! `std::io::Error` and `serde_json::Error` convert automatically, so `?`
//! works on file and job-file operations:
//!
//! ```no_run
//! use typed_columns::error::Result;
//!
//! fn load(path: &str) -> Result<String> {
//!     Ok(std::fs::read_to_string(path)?)
//! }
//! ```

use std::fmt;

use crate::schema::ColumnType;

/// Main error type for typed column reads.
#[derive(Debug)]
pub enum ReaderError {
    /// A format descriptor token is not one of the known column types
    InvalidSchema { token: String },

    /// A line does not have exactly one field per schema column
    RowShape {
        line_index: usize,
        line: String,
        expected: String,
        found: usize,
    },

    /// An `idx_int` field does not hold its own zero-based line index
    IndexMismatch { line_index: usize, value: i64 },

    /// A token is not a valid numeric literal
    Parse(String),

    /// A number is outside the range its parser accepts
    Range(String),

    /// A scalar parser was handed a value that is not text
    Type(String),

    /// A filter rule does not fit the schema, or cannot be parsed
    InvalidFilter(String),

    /// A read job file is malformed
    Config(String),

    /// I/O errors (opening or reading the input)
    Io(std::io::Error),
}

impl ReaderError {
    /// Prefix value errors with the position of the offending field.
    ///
    /// Only [`Parse`](Self::Parse), [`Range`](Self::Range) and
    /// [`Type`](Self::Type) carry free-form messages; other kinds already
    /// name their location and are returned unchanged.
    pub(crate) fn at_field(self, line_index: usize, column: usize) -> Self {
        match self {
            Self::Parse(msg) => Self::Parse(format!("line {line_index}, column {column}: {msg}")),
            Self::Range(msg) => Self::Range(format!("line {line_index}, column {column}: {msg}")),
            Self::Type(msg) => Self::Type(format!("line {line_index}, column {column}: {msg}")),
            other => other,
        }
    }
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSchema { token } => write!(
                f,
                "Invalid column type '{token}' in format descriptor, must be one of: {}",
                ColumnType::allowed_list()
            ),
            Self::RowShape {
                line_index,
                line,
                expected,
                found,
            } => write!(
                f,
                "Line {line_index} has {found} field(s), format '{expected}' requires one per column: {line:?}"
            ),
            Self::IndexMismatch { line_index, value } => write!(
                f,
                "Index column holds {value} on line {line_index}, expected {line_index}"
            ),
            Self::Parse(msg) => write!(f, "Parse error: {msg}"),
            Self::Range(msg) => write!(f, "Range error: {msg}"),
            Self::Type(msg) => write!(f, "Type error: {msg}"),
            Self::InvalidFilter(msg) => write!(f, "Invalid filter: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ReaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReaderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ReaderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

/// Result type alias for typed column operations.
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Errors
    ///
    /// Returns the original error with `msg` prepended to its message.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    ///
    /// # Errors
    ///
    /// Returns the original error with the closure's text prepended.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ReaderError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| add_context(e.into(), &msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| add_context(e.into(), &f()))
    }
}

// The error kind survives; only the message grows.
fn add_context(err: ReaderError, msg: &str) -> ReaderError {
    match err {
        ReaderError::Io(e) => ReaderError::Io(std::io::Error::new(e.kind(), format!("{msg}: {e}"))),
        ReaderError::Parse(m) => ReaderError::Parse(format!("{msg}: {m}")),
        ReaderError::Range(m) => ReaderError::Range(format!("{msg}: {m}")),
        ReaderError::Type(m) => ReaderError::Type(format!("{msg}: {m}")),
        ReaderError::InvalidFilter(m) => ReaderError::InvalidFilter(format!("{msg}: {m}")),
        ReaderError::Config(m) => ReaderError::Config(format!("{msg}: {m}")),
        other => other,
    }
}
