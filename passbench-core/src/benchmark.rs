//! Benchmark - Calibration and Measurement Cycles
//!
//! A `Benchmark` pairs a named body with its calibration and its accumulated
//! results. The body is called as `body(n, &mut timer)` and is expected to run
//! the code under test `n` times.
//!
//! Lifecycle:
//! - `calibrate` once: geometric probe search for a per-op cost estimate,
//!   then split the pass budget into samples of roughly one millisecond
//! - `run_pass` any number of times: each pass records `samples_per_pass`
//!   samples of `iterations_per_sample` iterations
//!
//! Min, max and the distribution accumulate across passes and are never reset.

use crate::measure::Instant;
use crate::timer::Timer;
use passbench_stats::{DurationHistogram, SummaryStatistics, compute_summary};
use thiserror::Error;
use tracing::{debug, warn};

/// Iteration count of the first calibration probe
pub const INITIAL_PROBE_ITERATIONS: u64 = 2;

/// Measured time each sample should cover (1 ms)
pub const SAMPLE_DURATION_NS: f64 = 1e6;

/// Floor applied to the per-op estimate before deriving iteration counts
pub const MIN_NS_PER_OP: f64 = 0.001;

/// Probe growth when the last probe was more than this factor short
const FAR_FROM_THRESHOLD: f64 = 10.0;

/// Benchmark body: `(iterations, timer)`
pub type BenchFn = Box<dyn FnMut(u64, &mut Timer<'_>)>;

/// Errors raised by a benchmark's run cycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BenchmarkError {
    /// A pass was requested before the benchmark was primed
    #[error("benchmark '{0}' has not been calibrated")]
    NotCalibrated(String),
}

/// Result of priming a benchmark
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Iterations per sample (about one millisecond of work)
    pub iterations_per_sample: u64,
    /// Samples per pass (covers the pass duration budget)
    pub samples_per_pass: u64,
    /// Per-op cost measured by the final probe
    pub ns_per_op: f64,
    /// Number of probes run
    pub probes: u32,
}

impl Calibration {
    /// Derive sample sizing from a per-op estimate and a pass budget.
    ///
    /// `iterations_per_sample = ceil(1e6 / ns_per_op)`, and
    /// `samples_per_pass = ceil(ceil(target / ns_per_op) / iterations_per_sample)`.
    pub fn from_estimate(ns_per_op: f64, target_duration_ns: f64) -> Self {
        let estimate = if ns_per_op.is_finite() {
            ns_per_op.max(MIN_NS_PER_OP)
        } else {
            MIN_NS_PER_OP
        };

        let iterations_per_sample = ((SAMPLE_DURATION_NS / estimate).ceil() as u64).max(1);
        let total_iterations = (target_duration_ns / estimate).ceil() as u64;
        let samples_per_pass = total_iterations.div_ceil(iterations_per_sample).max(1);

        Self {
            iterations_per_sample,
            samples_per_pass,
            ns_per_op: estimate,
            probes: 0,
        }
    }

    /// Iterations executed by one pass
    pub fn iterations_per_pass(&self) -> u64 {
        self.iterations_per_sample.saturating_mul(self.samples_per_pass)
    }
}

/// A named unit of work with its calibration and accumulated samples
pub struct Benchmark {
    name: String,
    body: BenchFn,

    // === Calibration ===
    calibration: Option<Calibration>,

    // === Accumulated results (across all passes) ===
    iterations_observed: u64,
    min_ns_per_op: Option<f64>,
    max_ns_per_op: Option<f64>,
    distribution: DurationHistogram,
}

impl std::fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .field("calibration", &self.calibration)
            .field("iterations_observed", &self.iterations_observed)
            .field("min_ns_per_op", &self.min_ns_per_op)
            .field("max_ns_per_op", &self.max_ns_per_op)
            .field("samples", &self.distribution.len())
            .finish_non_exhaustive()
    }
}

impl Benchmark {
    /// Create an uncalibrated benchmark
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: FnMut(u64, &mut Timer<'_>) + 'static,
    {
        Self {
            name: name.into(),
            body: Box::new(body),
            calibration: None,
            iterations_observed: 0,
            min_ns_per_op: None,
            max_ns_per_op: None,
            distribution: DurationHistogram::default(),
        }
    }

    /// Benchmark name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calibration, once primed
    pub fn calibration(&self) -> Option<Calibration> {
        self.calibration
    }

    /// Iterations executed across all recorded samples
    pub fn iterations_observed(&self) -> u64 {
        self.iterations_observed
    }

    /// Fastest sample so far (ns/op)
    pub fn min_ns_per_op(&self) -> Option<f64> {
        self.min_ns_per_op
    }

    /// Slowest sample so far (ns/op)
    pub fn max_ns_per_op(&self) -> Option<f64> {
        self.max_ns_per_op
    }

    /// Histogram of recorded samples
    pub fn distribution(&self) -> &DurationHistogram {
        &self.distribution
    }

    /// Run one measurement cycle of `iterations` iterations.
    ///
    /// The clock starts before the body is invoked; if the body calls
    /// [`Timer::start`], only the time after its last call is measured.
    /// Returns nanoseconds per operation. Panics in the body propagate.
    pub fn measure(&mut self, iterations: u64) -> f64 {
        let iterations = iterations.max(1);

        let mut start = Instant::now();
        let mut timer = Timer::new(iterations, &mut start);
        (self.body)(iterations, &mut timer);
        let elapsed = start.elapsed_nanos();

        elapsed / iterations as f64
    }

    /// Prime the benchmark and store its calibration.
    ///
    /// Probes run with a growing iteration count until one probe takes at
    /// least `prime_duration_ns` of wall-clock time (setup included). The
    /// count grows tenfold while a probe is more than 10x short of the
    /// threshold, and doubles otherwise. There is no upper bound on the
    /// number of probes.
    pub fn calibrate(&mut self, prime_duration_ns: f64, target_duration_ns: f64) -> Calibration {
        let mut count = INITIAL_PROBE_ITERATIONS;
        let mut probes = 0_u32;

        let ns_per_op = loop {
            let probe_start = Instant::now();
            let ns = self.measure(count);
            let actual = probe_start.elapsed_nanos();
            probes = probes.saturating_add(1);

            if actual >= prime_duration_ns {
                break ns;
            }

            count = if prime_duration_ns / actual > FAR_FROM_THRESHOLD {
                count.saturating_mul(10)
            } else {
                count.saturating_mul(2)
            };
        };

        let calibration = Calibration {
            probes,
            ..Calibration::from_estimate(ns_per_op, target_duration_ns)
        };

        debug!(
            benchmark = %self.name,
            probes,
            ns_per_op,
            iterations_per_sample = calibration.iterations_per_sample,
            samples_per_pass = calibration.samples_per_pass,
            "calibrated"
        );

        self.calibration = Some(calibration);
        calibration
    }

    /// Run one pass: `samples_per_pass` measurement cycles, each recorded
    /// into the distribution and min/max. The thread yields after every
    /// sample, outside the measured interval.
    pub fn run_pass(&mut self) -> Result<(), BenchmarkError> {
        let calibration = self
            .calibration
            .ok_or_else(|| BenchmarkError::NotCalibrated(self.name.clone()))?;

        let saturated_before = self.distribution.saturated_count();

        for _ in 0..calibration.samples_per_pass {
            let ns = self.measure(calibration.iterations_per_sample);
            self.record_sample(ns, calibration.iterations_per_sample);
            std::thread::yield_now();
        }

        let saturated = self.distribution.saturated_count() - saturated_before;
        if saturated > 0 {
            warn!(
                benchmark = %self.name,
                saturated,
                highest = self.distribution.highest_trackable(),
                "samples exceeded histogram range and were clamped"
            );
        }

        Ok(())
    }

    fn record_sample(&mut self, ns_per_op: f64, iterations: u64) {
        self.iterations_observed = self.iterations_observed.saturating_add(iterations);
        self.min_ns_per_op = Some(self.min_ns_per_op.map_or(ns_per_op, |m| m.min(ns_per_op)));
        self.max_ns_per_op = Some(self.max_ns_per_op.map_or(ns_per_op, |m| m.max(ns_per_op)));
        self.distribution.record(ns_per_op);
    }

    /// Summary statistics over everything recorded so far
    pub fn summary(&self) -> SummaryStatistics {
        compute_summary(
            &self.distribution,
            self.min_ns_per_op.unwrap_or(0.0),
            self.max_ns_per_op.unwrap_or(0.0),
            self.iterations_observed,
        )
    }
}
