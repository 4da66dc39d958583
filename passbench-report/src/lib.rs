#![warn(missing_docs)]
//! PassBench Report - Reporting and History
//!
//! Generates output for suite runs:
//! - Fixed-width text rows (human-readable, one per benchmark per pass)
//! - JSON (machine-readable)
//! - A results history file of per-version log ratios

mod formatting;
mod history;
mod json;
mod report;

pub use formatting::{NullReporter, Reporter, TextReporter, format_header, format_row};
pub use history::{HistoryError, ResultsStore, log_ratio, read_manifest_version};
pub use json::generate_json_report;
pub use report::{PassReport, ReportRow, SuiteReport, TimeUnit};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON document after the run
    Json,
    /// Human-readable rows while running
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("Human".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
