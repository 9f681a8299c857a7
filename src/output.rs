//! Writing read results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::columns::{Column, Columns};
use crate::error::{ReaderError, Result};
use crate::summary::summarize;

/// A writer that flushes after every write.
///
/// Useful when output is tailed while a long job is still running: nothing
/// sits in a buffer waiting for the process to exit.
#[derive(Debug)]
pub struct InstantWriter<W: Write> {
    inner: W,
}

impl<W: Write> InstantWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for InstantWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.inner.flush()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// How [`write_columns`] renders a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Accepted rows as comma-separated lines
    Csv,
    /// Schema, row count and columns as a JSON object
    Json,
    /// One summary line per column
    #[default]
    Summary,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "summary" => Ok(Self::Summary),
            other => Err(ReaderError::Config(format!(
                "unknown output format '{other}', expected csv, json or summary"
            ))),
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    schema: String,
    rows: usize,
    columns: Vec<&'a Column>,
}

/// Render `columns` to `writer` in the given format.
///
/// # Errors
///
/// Returns [`ReaderError::Io`] if the writer fails.
pub fn write_columns<W: Write>(writer: &mut W, columns: &Columns, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            for index in 0..columns.num_rows() {
                let Some(values) = columns.row_values(index) else {
                    break;
                };
                let line = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                writeln!(writer, "{line}")?;
            }
        }
        OutputFormat::Json => {
            let output = JsonOutput {
                schema: columns.schema().to_string(),
                rows: columns.num_rows(),
                columns: columns.iter().collect(),
            };
            serde_json::to_writer_pretty(&mut *writer, &output).map_err(|e| {
                if e.is_io() {
                    ReaderError::Io(e.into())
                } else {
                    ReaderError::from(e)
                }
            })?;
            writeln!(writer)?;
        }
        OutputFormat::Summary => {
            writeln!(
                writer,
                "{} row(s), format {}",
                columns.num_rows(),
                columns.schema()
            )?;
            for summary in summarize(columns) {
                writeln!(writer, "{summary}")?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ColumnReader;
    use std::io::Cursor;

    fn sample() -> Columns {
        ColumnReader::from_descriptor("string,string,int,float")
            .expect("valid descriptor")
            .read(Cursor::new("a,b,10,-9.3\nabc,def,-100000,30.24\n"))
            .expect("valid file")
    }

    #[test]
    fn test_csv_output_reads_back() {
        let columns = sample();
        let mut out = Vec::new();
        write_columns(&mut out, &columns, OutputFormat::Csv).expect("write csv");
        let text = String::from_utf8(out).expect("utf-8");
        assert_eq!(text, "a,b,10,-9.3\nabc,def,-100000,30.24\n");

        let again = ColumnReader::new(columns.schema().clone())
            .read(Cursor::new(text))
            .expect("re-read");
        assert_eq!(again, columns);
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_columns(&mut out, &sample(), OutputFormat::Json).expect("write json");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value["schema"], "string,string,int,float");
        assert_eq!(value["rows"], 2);
        assert_eq!(value["columns"][2], serde_json::json!([10, -100_000]));
        assert_eq!(value["columns"][0], serde_json::json!(["a", "abc"]));
    }

    #[test]
    fn test_summary_output() {
        let mut out = Vec::new();
        write_columns(&mut out, &sample(), OutputFormat::Summary).expect("write summary");
        let text = String::from_utf8(out).expect("utf-8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("2 row(s), format string,string,int,float"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("min=-100000.0000 max=10.0000"));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(ReaderError::Config(_))
        ));
        assert_eq!(OutputFormat::default(), OutputFormat::Summary);
    }

    #[derive(Default)]
    struct CountingSink {
        data: Vec<u8>,
        flushes: usize,
    }

    impl Write for CountingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_instant_writer_flushes_each_write() {
        let mut writer = InstantWriter::new(CountingSink::default());
        writer.write_all(b"abc").expect("write");
        writer.write_all(b"def").expect("write");
        let sink = writer.into_inner();
        assert_eq!(sink.data, b"abcdef");
        assert_eq!(sink.flushes, 2);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failing_writer_is_io_error() {
        for format in [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Summary] {
            match write_columns(&mut BrokenPipe, &sample(), format) {
                Err(ReaderError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
                other => panic!("{format}: expected an I/O error, got {other:?}"),
            }
        }
    }
}
