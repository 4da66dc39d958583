#![warn(missing_docs)]
//! PassBench Core - Timing Model
//!
//! This crate provides the measurement side of a benchmark:
//! - `Timer` capability passed into benchmark bodies (deferred start)
//! - `Benchmark` with measurement cycles, calibration and passes
//! - Monotonic `Instant` and `busy_wait` helpers

mod benchmark;
mod measure;
mod timer;

pub use benchmark::{
    BenchFn, Benchmark, BenchmarkError, Calibration, INITIAL_PROBE_ITERATIONS, MIN_NS_PER_OP,
    SAMPLE_DURATION_NS,
};
pub use measure::{Instant, busy_wait};
pub use timer::Timer;
