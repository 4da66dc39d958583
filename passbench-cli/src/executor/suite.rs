//! Suite Execution
//!
//! Orchestrates a run over every registered benchmark:
//!
//! ```text
//! Idle ──► Priming ──► Pass 1 ──► Pass 2 ──► … ──► Pass N ──► Done
//! ```
//!
//! - **Priming** calibrates each benchmark once, in registration order.
//! - **Each pass** runs every benchmark's calibrated samples, in registration
//!   order, and hands the resulting row to the reporter.
//!
//! Execution is strictly sequential on the calling thread. After each
//! sample, between benchmarks and between passes the thread yields, which
//! never changes ordering or results. A panicking benchmark aborts the whole run.

use crate::config::{ConfigError, SuiteOptions};
use passbench_core::{Benchmark, BenchmarkError, Timer};
use passbench_report::{PassReport, ReportRow, Reporter, SuiteReport};
use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, catch_unwind};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a suite run
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Options or registrations were rejected before anything ran
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A benchmark was asked to run before priming
    #[error(transparent)]
    NotCalibrated(#[from] BenchmarkError),

    /// A benchmark body panicked
    #[error("benchmark '{name}' panicked: {message}")]
    BenchmarkPanicked {
        /// Benchmark whose body panicked
        name: String,
        /// Panic payload, when it was a string
        message: String,
    },

    /// The reporter failed to write
    #[error("report output failed: {0}")]
    Report(#[from] std::io::Error),
}

/// An ordered collection of benchmarks
#[derive(Debug, Default)]
pub struct Suite {
    benchmarks: Vec<Benchmark>,
}

impl Suite {
    /// Create an empty suite
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named benchmark.
    ///
    /// The body receives the iteration count and a [`Timer`]; it should run
    /// the code under test that many times. Calling `timer.start()` excludes
    /// everything before the call from the measurement.
    pub fn register<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: FnMut(u64, &mut Timer<'_>) + 'static,
    {
        self.benchmarks.push(Benchmark::new(name, body));
        self
    }

    /// Number of registered benchmarks
    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    /// Whether no benchmark is registered
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    /// Registered benchmarks, in registration order
    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmarks
    }

    /// Look up a benchmark by name
    pub fn benchmark(&self, name: &str) -> Option<&Benchmark> {
        self.benchmarks.iter().find(|b| b.name() == name)
    }

    /// Keep only benchmarks whose name satisfies `keep`, preserving order
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.benchmarks.retain(|b| keep(b.name()));
    }

    /// Prime every benchmark, then run `options.pass_count` passes.
    ///
    /// Options and names are validated before any body executes. Min, max
    /// and distributions keep accumulating if the suite is run again.
    pub fn run(
        &mut self,
        options: &SuiteOptions,
        reporter: &mut dyn Reporter,
    ) -> Result<SuiteReport, SuiteError> {
        options.validate()?;
        self.check_unique_names()?;

        let prime_ns = options.prime_duration_ns();
        let target_ns = options.target_duration_ns();

        // === Priming ===
        info!(benchmarks = self.benchmarks.len(), "priming");
        reporter.priming_started(self.benchmarks.len())?;
        for bench in &mut self.benchmarks {
            let name = bench.name().to_string();
            guarded(&name, || bench.calibrate(prime_ns, target_ns))?;
            std::thread::yield_now();
        }

        // === Passes ===
        let mut report = SuiteReport::default();
        for pass in 1..=options.pass_count {
            info!(pass, total = options.pass_count, "pass started");
            reporter.pass_started(pass, options.pass_count)?;

            let mut rows = Vec::with_capacity(self.benchmarks.len());
            for bench in &mut self.benchmarks {
                let name = bench.name().to_string();
                guarded(&name, || bench.run_pass())??;

                let row = ReportRow::from_summary(name, &bench.summary());
                debug!(benchmark = %row.name, p98 = row.p98, unit = %row.unit, "row");
                reporter.row(&row)?;
                rows.push(row);
                std::thread::yield_now();
            }

            reporter.pass_finished(pass)?;
            report.passes.push(PassReport { pass, rows });
            std::thread::yield_now();
        }

        Ok(report)
    }

    fn check_unique_names(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for bench in &self.benchmarks {
            if !seen.insert(bench.name()) {
                return Err(ConfigError::Invalid {
                    field: "name",
                    reason: format!("duplicate benchmark name '{}'", bench.name()),
                });
            }
        }
        Ok(())
    }
}

/// Run `f`, turning a panic into `SuiteError::BenchmarkPanicked`
fn guarded<T>(name: &str, f: impl FnOnce() -> T) -> Result<T, SuiteError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|panic| {
        let message = if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        SuiteError::BenchmarkPanicked {
            name: name.to_string(),
            message,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use passbench_core::busy_wait;
    use passbench_report::{NullReporter, TextReporter};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn fast_options() -> SuiteOptions {
        SuiteOptions {
            pass_count: 2,
            quiet: true,
            target_duration_millis: 4.0,
            prime_duration_millis: 1.0,
        }
    }

    fn spin(micros: u64) -> impl FnMut(u64, &mut Timer<'_>) + 'static {
        move |n, _timer| {
            for _ in 0..n {
                busy_wait(Duration::from_micros(micros));
            }
        }
    }

    #[test]
    fn test_register_is_chainable_and_ordered() {
        let suite = Suite::new()
            .register("a", spin(1))
            .register("b", spin(1))
            .register("c", spin(1));

        let names: Vec<_> = suite.benchmarks().iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(suite.len(), 3);
        assert!(suite.benchmark("b").is_some());
        assert!(suite.benchmark("z").is_none());
    }

    #[test]
    fn test_run_orders_priming_then_passes() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut suite = Suite::new();
        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            suite = suite.register(name, move |n, _timer| {
                log.borrow_mut().push(name);
                for _ in 0..n {
                    busy_wait(Duration::from_micros(200));
                }
            });
        }

        let report = suite.run(&fast_options(), &mut NullReporter).unwrap();
        assert_eq!(report.passes.len(), 2);
        for (i, pass) in report.passes.iter().enumerate() {
            assert_eq!(pass.pass, i as u32 + 1);
            let names: Vec<_> = pass.rows.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["first", "second"]);
        }

        // Every "second" call during priming happens after all "first" probes,
        // and after priming the two alternate by pass.
        let log = log.borrow();
        let first_second = log.iter().position(|n| *n == "second").unwrap();
        assert!(log[..first_second].iter().all(|n| *n == "first"));
        assert_eq!(log.last(), Some(&"second"));
    }

    #[test]
    fn test_distribution_accumulates_across_passes() {
        let mut suite = Suite::new().register("spin", spin(100));
        let report = suite.run(&fast_options(), &mut NullReporter).unwrap();

        let bench = suite.benchmark("spin").unwrap();
        let calibration = bench.calibration().unwrap();
        assert_eq!(
            bench.distribution().len(),
            2 * calibration.samples_per_pass
        );

        let first = &report.passes[0].rows[0];
        let second = &report.passes[1].rows[0];
        assert_eq!(second.samples, 2 * first.samples);
    }

    #[test]
    fn test_invalid_options_run_nothing() {
        let calls = Rc::new(RefCell::new(0_u32));
        let counter = Rc::clone(&calls);
        let mut suite = Suite::new().register("never", move |_, _| {
            *counter.borrow_mut() += 1;
        });

        let options = SuiteOptions {
            pass_count: 0,
            ..fast_options()
        };
        let err = suite.run(&options, &mut NullReporter).unwrap_err();
        assert!(matches!(err, SuiteError::Config(ConfigError::Invalid { .. })));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut suite = Suite::new().register("dup", spin(1)).register("dup", spin(1));
        let err = suite.run(&fast_options(), &mut NullReporter).unwrap_err();
        assert!(matches!(
            err,
            SuiteError::Config(ConfigError::Invalid { field: "name", .. })
        ));
    }

    #[test]
    fn test_panicking_body_aborts_run() {
        let calls = Rc::new(RefCell::new(0_u32));
        let counter = Rc::clone(&calls);

        let mut suite = Suite::new()
            .register("boom", |_, _| panic!("exploded"))
            .register("after", move |_, _| {
                *counter.borrow_mut() += 1;
            });

        let err = suite.run(&fast_options(), &mut NullReporter).unwrap_err();
        match err {
            SuiteError::BenchmarkPanicked { name, message } => {
                assert_eq!(name, "boom");
                assert_eq!(message, "exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_retain_filters_in_order() {
        let mut suite = Suite::new()
            .register("json_small", spin(1))
            .register("sqrt", spin(1))
            .register("json_large", spin(1));
        suite.retain(|name| name.starts_with("json"));

        let names: Vec<_> = suite.benchmarks().iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["json_small", "json_large"]);
    }

    #[test]
    fn test_text_output() {
        let mut suite = Suite::new().register("spin", spin(50));
        let mut reporter = TextReporter::new(Vec::new(), false);
        let options = SuiteOptions {
            pass_count: 1,
            ..fast_options()
        };
        suite.run(&options, &mut reporter).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.starts_with("Priming benchmarks...\nPass 1...\n"));
        assert!(out.contains("spin"));
        assert!(out.contains("/op |"));
    }
}
