#![warn(missing_docs)]
//! # PassBench
//!
//! Micro-benchmark harness for Rust with adaptive calibration and
//! histogram-backed statistics.
//!
//! PassBench runs a named set of benchmarks in repeated passes:
//! - **Adaptive Calibration**: each benchmark is probed with a growing
//!   iteration count until one call lasts long enough to estimate its cost
//! - **Calibrated Sampling**: every pass runs ~1 ms samples until the pass's
//!   time budget is spent
//! - **Deferred Start**: a body can call `timer.start()` to exclude its setup
//! - **Histogram Statistics**: min, max, mean, stddev, CV and p80/p95/p98/p99
//!   accumulated across passes
//! - **Results History**: per-version p80 ratios appended to a JSON file
//!
//! ## Quick Start
//!
//! ```ignore
//! use passbench::prelude::*;
//!
//! fn main() {
//!     let suite = Suite::new()
//!         .register("sqrt", |n, _timer| {
//!             for i in 0..n {
//!                 std::hint::black_box((i as f64).sqrt());
//!             }
//!         })
//!         .register("sum_prepared", |n, timer| {
//!             let data: Vec<u64> = (0..10_000).collect();
//!             timer.start();
//!             for _ in 0..n {
//!                 std::hint::black_box(data.iter().sum::<u64>());
//!             }
//!         });
//!
//!     if let Err(e) = passbench::run(suite) {
//!         eprintln!("Error: {e}");
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! ## Programmatic Runs
//!
//! ```ignore
//! let options = SuiteOptions { pass_count: 1, ..Default::default() };
//! let report = suite.run(&options, &mut NullReporter)?;
//! for row in report.final_rows() {
//!     println!("{}: {:.2} {}/op", row.name, row.p98, row.unit);
//! }
//! ```

// Re-export core types
pub use passbench_core::{
    Benchmark, BenchmarkError, Calibration, Instant, MIN_NS_PER_OP, Timer, busy_wait,
};

// Re-export stats
pub use passbench_stats::{
    DurationHistogram, HistogramError, Percentiles, SummaryStatistics, compute_percentiles,
    compute_summary,
};

// Re-export reporting
pub use passbench_report::{
    NullReporter, OutputFormat, PassReport, ReportRow, Reporter, ResultsStore, SuiteReport,
    TextReporter, TimeUnit, format_header, format_row, generate_json_report,
};

// Re-export suite and configuration
pub use passbench_cli::{
    ConfigError, HistoryConfig, HistoryOutcome, PassbenchConfig, Suite, SuiteError, SuiteOptions,
    record_history,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{NullReporter, Reporter, Suite, SuiteOptions, TextReporter, Timer, busy_wait};
}

/// Run the PassBench CLI harness over a suite.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() {
///     passbench::run(suite).unwrap();
/// }
/// ```
pub use passbench_cli::run;
