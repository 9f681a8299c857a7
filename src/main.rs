//! # typed-columns command-line entry point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Install logging (stderr, optional rotating file)
//!   └─> Run the subcommand
//! ```
//!
//! ```bash
//! typed-columns read runs.csv --schema idx_int,string,int,float --filter "2>=-100000" --format json
//! typed-columns check runs.csv --schema idx_int,string,int,float
//! typed-columns job nightly.json
//! ```
//!
//! Errors are returned from `main`, so the whole context chain is printed and
//! the exit status is non-zero.

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;
use typed_columns::logging;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let log_dir = match (cli.log_dir, cli.log_file) {
        (Some(dir), _) => Some(dir),
        (None, true) => Some(logging::get_log_dir()?),
        (None, false) => None,
    };
    logging::init(cli.verbose, log_dir.as_deref())?;

    cli::run_command(cli.command)
}
