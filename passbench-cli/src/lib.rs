#![warn(missing_docs)]
//! PassBench CLI Library
//!
//! This module provides the suite runner and command-line harness for
//! benchmark binaries. Build a [`Suite`] in your main function and hand it
//! to `passbench::run()` (or `passbench_cli::run()`) to get the full
//! passbench CLI experience.
//!
//! # Example
//!
//! ```ignore
//! use passbench::prelude::*;
//!
//! fn main() {
//!     let suite = Suite::new().register("sqrt", |n, _timer| {
//!         for i in 0..n {
//!             std::hint::black_box((i as f64).sqrt());
//!         }
//!     });
//!
//!     if let Err(e) = passbench::run(suite) {
//!         eprintln!("Error: {e}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

mod config;
mod executor;

pub use config::*;
pub use executor::{HistoryOutcome, Suite, SuiteError, record_history};

use clap::{Parser, Subcommand};
use passbench_report::{OutputFormat, TextReporter, generate_json_report};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// PassBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "passbench")]
#[command(author, version, about = "PassBench - pass-based micro-benchmark harness")]
pub struct Cli {
    /// Optional subcommand; defaults to running the suite
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter benchmarks by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Number of passes over all benchmarks
    #[arg(long)]
    pub passes: Option<u32>,

    /// Suppress all textual output
    #[arg(short, long)]
    pub quiet: bool,

    /// Measured time per benchmark per pass, in milliseconds
    #[arg(long)]
    pub target_ms: Option<f64>,

    /// Minimum calibration probe duration, in milliseconds
    #[arg(long)]
    pub prime_ms: Option<f64>,

    /// Output format: human, json
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Output file for the JSON report (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (otherwise passbench.toml is discovered)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not append to the results history
    #[arg(long)]
    pub no_history: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered benchmarks matching the filter
    List,
}

/// Run the PassBench CLI over `suite` with the process arguments.
/// This is the main entry point for benchmark binaries.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run(suite: Suite) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli, suite)
}

/// Run the PassBench CLI over `suite` with pre-parsed arguments.
pub fn run_with_cli(cli: Cli, mut suite: Suite) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    init_logging(cli.verbose, config.suite.quiet);

    let format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;

    let filter = Regex::new(&cli.filter)?;
    suite.retain(|name| filter.is_match(name));

    if let Some(Commands::List) = cli.command {
        return list_benchmarks(&suite);
    }

    if suite.is_empty() {
        if !config.suite.quiet {
            println!("No benchmarks found.");
        }
        return Ok(());
    }

    // Rows stream to stdout only in human mode so JSON stays parseable
    let rows_quiet = config.suite.quiet || format == OutputFormat::Json;
    let mut reporter = TextReporter::stdout(rows_quiet);
    let report = suite.run(&config.suite, &mut reporter)?;

    if format == OutputFormat::Json {
        let output = generate_json_report(&report)?;
        if let Some(ref path) = cli.output {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let mut file = std::fs::File::create(path)?;
            file.write_all(output.as_bytes())?;
            if !config.suite.quiet {
                eprintln!("Report written to: {}", path.display());
            }
        } else {
            println!("{}", output);
        }
    }

    record_history(&suite, &config.history)?;

    Ok(())
}

/// Build the effective configuration by layering:
/// passbench.toml (or `--config`) → CLI overrides → validation.
fn resolve_config(cli: &Cli) -> Result<PassbenchConfig, ConfigError> {
    let mut config = match cli.config {
        Some(ref path) => PassbenchConfig::load(path)?,
        None => PassbenchConfig::discover()?.unwrap_or_default(),
    };

    if let Some(passes) = cli.passes {
        config.suite.pass_count = passes;
    }
    if cli.quiet {
        config.suite.quiet = true;
    }
    if let Some(ms) = cli.target_ms {
        config.suite.target_duration_millis = ms;
    }
    if let Some(ms) = cli.prime_ms {
        config.suite.prime_duration_millis = ms;
    }
    if cli.no_history {
        config.history.enabled = false;
    }

    config.suite.validate()?;
    Ok(config)
}

/// Install the stderr subscriber. `RUST_LOG` wins over the flag-derived
/// filter; a subscriber installed earlier is left in place.
fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "passbench=debug"
    } else if quiet {
        "passbench=warn"
    } else {
        "passbench=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn list_benchmarks(suite: &Suite) -> anyhow::Result<()> {
    println!("PassBench Suite:");
    for bench in suite.benchmarks() {
        println!("├── {}", bench.name());
    }
    println!("{} benchmarks found.", suite.len());
    Ok(())
}
