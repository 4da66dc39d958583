//! Output Formatting
//!
//! Fixed-width text rendering of report rows, and the `Reporter` seam the
//! suite drives while it runs.
//!
//! Layout (one line per benchmark per pass):
//!
//! ```text
//!                        benchmark             p98 |       min       max  stddev    CV     p80     p95     p99    samples
//! -----------------------------------------------------------------------------------------------------------------------
//!                             sqrt      0.61 ns/op |      0.58      1.02    0.03  0.05    0.60    0.60    0.61   30000000
//! ```

use crate::report::ReportRow;
use std::io::{self, Write};

/// Width of the rule under the header
const RULE_WIDTH: usize = 119;

/// Column header followed by a rule
pub fn format_header() -> String {
    format!(
        "{:>32} {:>15} | {:>9} {:>9} {:>7} {:>5} {:>7} {:>7} {:>7} {:>10}\n{}",
        "benchmark",
        "p98",
        "min",
        "max",
        "stddev",
        "CV",
        "p80",
        "p95",
        "p99",
        "samples",
        "-".repeat(RULE_WIDTH)
    )
}

/// One fixed-width row
pub fn format_row(row: &ReportRow) -> String {
    format!(
        "{:>32} {:>9.2} {}/op | {:>9.2} {:>9.2} {:>7.2} {:>5.2} {:>7.2} {:>7.2} {:>7.2} {:>10}",
        row.name,
        row.p98,
        row.unit,
        row.min,
        row.max,
        row.std_dev,
        row.cv,
        row.p80,
        row.p95,
        row.p99,
        row.samples
    )
}

/// Receives progress and rows while a suite runs.
///
/// Every method has a no-op default so implementations only override what
/// they render.
pub trait Reporter {
    /// Priming is about to start for `benchmarks` benchmarks
    fn priming_started(&mut self, _benchmarks: usize) -> io::Result<()> {
        Ok(())
    }

    /// Pass `pass` (1-based) of `total` is starting
    fn pass_started(&mut self, _pass: u32, _total: u32) -> io::Result<()> {
        Ok(())
    }

    /// A benchmark finished its share of the current pass
    fn row(&mut self, _row: &ReportRow) -> io::Result<()> {
        Ok(())
    }

    /// Pass `pass` finished
    fn pass_finished(&mut self, _pass: u32) -> io::Result<()> {
        Ok(())
    }
}

/// Reporter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Plain-text reporter; prints nothing when quiet
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    out: W,
    quiet: bool,
}

impl TextReporter<io::Stdout> {
    /// Reporter writing to stdout
    pub fn stdout(quiet: bool) -> Self {
        Self::new(io::stdout(), quiet)
    }
}

impl<W: Write> TextReporter<W> {
    /// Reporter writing to `out`
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.out, "{}", line)
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn priming_started(&mut self, _benchmarks: usize) -> io::Result<()> {
        self.print("Priming benchmarks...")
    }

    fn pass_started(&mut self, pass: u32, _total: u32) -> io::Result<()> {
        self.print(&format!("Pass {}...", pass))?;
        self.print(&format_header())
    }

    fn row(&mut self, row: &ReportRow) -> io::Result<()> {
        self.print(&format_row(row))?;
        if !self.quiet {
            self.out.flush()?;
        }
        Ok(())
    }

    fn pass_finished(&mut self, _pass: u32) -> io::Result<()> {
        self.print("")
    }
}
