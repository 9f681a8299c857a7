//! # typed-columns - typed, validated column reader
//!
//! Loads comma-separated experiment data into typed columns. Every line is
//! checked against a format descriptor before it is accepted, so a result
//! either holds the whole file or the read fails.
//!
//! ## Quick Start
//!
//! ```no_run
//! use typed_columns::read_typed_columns;
//!
//! # fn example() -> typed_columns::Result<()> {
//! let columns = read_typed_columns("runs.csv", "idx_int,string,int,float", None)?;
//! println!("{} rows", columns.num_rows());
//!
//! let scores = columns.floats(3).unwrap_or_default();
//! println!("first score: {:?}", scores.first());
//! # Ok(())
//! # }
//! ```
//!
//! ## Format descriptors
//!
//! | Tag | Stored as | Constraint |
//! |-----|-----------|------------|
//! | `int` | `i64` | none |
//! | `idx_int` | `i64` | equals the zero-based line index |
//! | `pos_int` | `i64` | `>= 0` |
//! | `float` | `f64` | none |
//! | `pos_float` | `f64` | `>= 0.0` |
//! | `string` | `String` | trimmed, no conversion |
//!
//! ## Filtering
//!
//! Pass a closure to drop rows after they have been validated:
//!
//! ```no_run
//! use typed_columns::ColumnReader;
//!
//! # fn example() -> typed_columns::Result<()> {
//! let columns = ColumnReader::from_descriptor("string,string,int,float")?
//!     .with_filter(|row| row.int(2).is_some_and(|v| v >= -100_000))
//!     .read_path("runs.csv")?;
//! # Ok(())
//! # }
//! ```
//!
//! Declarative rules ([`filter::FilterRule`]) and JSON job files
//! ([`config::ReadJob`]) cover the same ground without code.
//!
//! ## Core Modules
//!
//! - [`schema`]: column type tags and descriptor parsing
//! - [`scalar`]: text-to-number parsers with range checks
//! - [`reader`]: the line-by-line read/validate/filter loop
//! - [`columns`]: column-oriented results
//! - [`error`]: error types

#![warn(clippy::all, rust_2018_idioms)]

pub mod columns;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod output;
pub mod reader;
pub mod row;
pub mod scalar;
pub mod schema;
pub mod summary;

pub use columns::{Column, Columns};
pub use error::{ReaderError, Result};
pub use reader::{ColumnReader, read_typed_columns};
pub use row::{Row, Value};
pub use schema::{ColumnType, FormatSchema};
