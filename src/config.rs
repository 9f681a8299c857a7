//! Read job files.
//!
//! A job bundles everything one typed read needs into a JSON document, so a
//! load can be repeated without retyping the format and filters:
//!
//! ```json
//! {
//!   "input": "runs.csv",
//!   "schema": "idx_int,string,int,float",
//!   "filters": [{ "column": 2, "op": ">=", "value": -100000 }],
//!   "output": "json"
//! }
//! ```
//!
//! A relative `input` is resolved against the directory of the job file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::columns::Columns;
use crate::error::{Result, ResultExt as _};
use crate::filter::{FilterRule, RowFilter};
use crate::output::OutputFormat;
use crate::reader::ColumnReader;
use crate::schema::FormatSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadJob {
    /// File to read
    pub input: PathBuf,

    /// Format descriptor, e.g. `"idx_int,pos_int,float,string"`
    pub schema: String,

    /// Rows must match every rule to be kept
    #[serde(default)]
    pub filters: Vec<FilterRule>,

    /// How the result is rendered
    #[serde(default)]
    pub output: OutputFormat,
}

impl ReadJob {
    pub fn new(input: impl Into<PathBuf>, schema: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            schema: schema.into(),
            filters: Vec::new(),
            output: OutputFormat::default(),
        }
    }

    /// Load a job from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::Io`](crate::error::ReaderError::Io) if the
    /// file cannot be read, [`ReaderError::Config`](crate::error::ReaderError::Config)
    /// if it is not a valid job.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        let mut job = Self::from_json(&content)
            .with_context(|| format!("Failed to parse job file {}", path.display()))?;

        if job.input.is_relative()
            && let Some(base) = path.parent()
        {
            job.input = base.join(&job.input);
        }
        Ok(job)
    }

    /// Parse a job from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::Config`](crate::error::ReaderError::Config) for
    /// malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the job to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::Config`](crate::error::ReaderError::Config) if
    /// serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the job as a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json).context("Failed to write job file")
    }

    /// Reader for this job: parsed schema plus compiled filters.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::InvalidSchema`](crate::error::ReaderError::InvalidSchema)
    /// or [`ReaderError::InvalidFilter`](crate::error::ReaderError::InvalidFilter).
    pub fn reader(&self) -> Result<ColumnReader<'static>> {
        let schema = FormatSchema::parse(&self.schema)?;
        let filter = RowFilter::compile(self.filters.iter().cloned(), &schema)?;
        let reader = ColumnReader::new(schema);
        if filter.is_empty() {
            return Ok(reader);
        }
        Ok(reader.with_filter(move |row| filter.matches(row)))
    }

    /// Run the job.
    ///
    /// # Errors
    ///
    /// Any error of [`reader`](Self::reader) or of the read itself.
    pub fn run(&self) -> Result<Columns> {
        self.reader()?.read_path(&self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReaderError;
    use crate::filter::CompareOp;

    #[test]
    fn test_job_defaults() {
        let job = ReadJob::from_json(r#"{"input": "data.csv", "schema": "int,float"}"#)
            .expect("minimal job");
        assert_eq!(job, ReadJob::new("data.csv", "int,float"));
        assert!(job.filters.is_empty());
        assert_eq!(job.output, OutputFormat::Summary);
    }

    #[test]
    fn test_job_serialization() {
        let mut job = ReadJob::new("runs.csv", "idx_int,string,int,float");
        job.filters.push(FilterRule::new(2, CompareOp::Ge, -100_000));
        job.output = OutputFormat::Json;

        let json = job.to_json().expect("serialize");
        assert!(json.contains("\"op\": \">=\""));
        assert!(json.contains("\"output\": \"json\""));

        let parsed = ReadJob::from_json(&json).expect("parse");
        assert_eq!(parsed, job);
    }

    #[test]
    fn test_malformed_job_is_config_error() {
        assert!(matches!(
            ReadJob::from_json(r#"{"schema": "int"}"#),
            Err(ReaderError::Config(_))
        ));
    }

    #[test]
    fn test_reader_validates_filters_against_schema() {
        let mut job = ReadJob::new("runs.csv", "int");
        job.filters.push(FilterRule::new(3, CompareOp::Eq, 1));
        assert!(matches!(job.reader(), Err(ReaderError::InvalidFilter(_))));

        let job = ReadJob::new("runs.csv", "int,");
        assert!(matches!(
            job.reader(),
            Err(ReaderError::InvalidSchema { .. })
        ));
    }
}
