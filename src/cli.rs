use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use typed_columns::config::ReadJob;
use typed_columns::filter::FilterRule;
use typed_columns::output::{InstantWriter, OutputFormat, write_columns};
use typed_columns::{ColumnReader, Columns};

#[derive(Parser)]
#[command(
    name = "typed-columns",
    version,
    about = "Read comma-separated experiment data into typed, validated columns"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write logs to a daily-rotating file
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Directory for log files. Defaults to the platform data directory.
    #[arg(long, global = true, env = "TYPED_COLUMNS_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a file and print the accepted rows
    Read {
        /// Comma-separated input file
        file: PathBuf,

        /// Format descriptor, e.g. "idx_int,pos_int,float,string"
        #[arg(short, long)]
        schema: String,

        /// Keep rows matching <column><op><literal>, e.g. "2>=-100000". Repeatable.
        #[arg(short = 'f', long = "filter")]
        filters: Vec<FilterRule>,

        /// Output format (csv, json, summary)
        #[arg(long, default_value = "summary")]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a file without printing its rows
    Check {
        /// Comma-separated input file
        file: PathBuf,

        /// Format descriptor
        #[arg(short, long)]
        schema: String,
    },
    /// Run a JSON read job
    Job {
        /// Path to the job file
        job: PathBuf,

        /// Override the job's output format
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Read {
            file,
            schema,
            filters,
            format,
            output,
        } => handle_read(&file, schema, filters, format, output.as_deref()),
        Commands::Check { file, schema } => handle_check(&file, &schema),
        Commands::Job {
            job,
            format,
            output,
        } => handle_job(&job, format, output.as_deref()),
    }
}

fn handle_read(
    file: &Path,
    schema: String,
    filters: Vec<FilterRule>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let mut job = ReadJob::new(file, schema);
    job.filters = filters;
    job.output = format;
    let columns = run_job(&job)?;
    emit(&columns, job.output, output)
}

fn handle_check(file: &Path, schema: &str) -> Result<()> {
    let columns = ColumnReader::from_descriptor(schema)?
        .read_path(file)
        .with_context(|| format!("{} does not match format '{schema}'", file.display()))?;

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "{}: {} row(s) OK",
        file.display(),
        columns.num_rows()
    )?;
    Ok(())
}

fn handle_job(path: &Path, format: Option<OutputFormat>, output: Option<&Path>) -> Result<()> {
    let mut job = ReadJob::from_file(path)?;
    if let Some(format) = format {
        job.output = format;
    }
    let columns = run_job(&job)?;
    emit(&columns, job.output, output)
}

fn run_job(job: &ReadJob) -> Result<Columns> {
    let columns = job
        .run()
        .with_context(|| format!("Failed to read {}", job.input.display()))?;
    tracing::info!(
        input = %job.input.display(),
        rows = columns.num_rows(),
        filters = job.filters.len(),
        "read complete"
    );
    Ok(columns)
}

fn emit(columns: &Columns, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_columns(&mut InstantWriter::new(file), columns, format)?;
            tracing::info!("Wrote {format} output to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout().lock();
            write_columns(&mut InstantWriter::new(stdout), columns, format)?;
        }
    }
    Ok(())
}
