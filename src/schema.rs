//! Column type tags and the format descriptor they are parsed from.
//!
//! A format descriptor is a comma-separated list of tags such as
//! `"idx_int,pos_int,float,string"`. Each tag fixes how the field in that
//! position is converted and validated, and the number of tags fixes how many
//! fields every line must have.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ReaderError, Result};

/// Type tag for one column of a typed CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Any signed integer
    Int,
    /// Integer equal to the zero-based line index
    IdxInt,
    /// Non-negative integer
    PosInt,
    /// Any real number
    Float,
    /// Non-negative real number
    PosFloat,
    /// Trimmed text, no conversion
    String,
}

impl ColumnType {
    pub const ALL: [Self; 6] = [
        Self::Int,
        Self::IdxInt,
        Self::PosInt,
        Self::Float,
        Self::PosFloat,
        Self::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::IdxInt => "idx_int",
            Self::PosInt => "pos_int",
            Self::Float => "float",
            Self::PosFloat => "pos_float",
            Self::String => "string",
        }
    }

    /// Whether values of this column are stored as numbers.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::String)
    }

    pub(crate) fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ReaderError::InvalidSchema {
                token: s.to_owned(),
            })
    }
}

/// Ordered column types for every line of a file.
///
/// Parsed once from a descriptor and immutable afterwards. Matching is exact
/// and case-sensitive, so `"string,"`, `",int"`, `"Int"` and `""` are all
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSchema {
    columns: Vec<ColumnType>,
}

impl FormatSchema {
    /// Parse a comma-separated format descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::InvalidSchema`] naming the first token that is
    /// not a known column type.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let columns = descriptor
            .split(',')
            .map(ColumnType::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a parsed schema; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ColumnType> {
        self.columns.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ColumnType> + '_ {
        self.columns.iter().copied()
    }

    pub fn columns(&self) -> &[ColumnType] {
        &self.columns
    }
}

impl FromStr for FormatSchema {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FormatSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(column.as_str())?;
        }
        Ok(())
    }
}
