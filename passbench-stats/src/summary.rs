//! Summary Statistics
//!
//! Combines the exact extremes tracked by a benchmark with the
//! histogram-derived distribution figures:
//! - Min, max are EXACT (tracked outside the histogram)
//! - Mean, stddev and percentiles carry the histogram's bucket precision

use crate::histogram::DurationHistogram;
use crate::percentiles::{Percentiles, compute_percentiles};
use serde::{Deserialize, Serialize};

/// Per-benchmark statistics, all values in nanoseconds per operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Fastest sample observed
    pub min: f64,
    /// Slowest sample observed
    pub max: f64,
    /// Histogram mean
    pub mean: f64,
    /// Histogram population standard deviation
    pub std_dev: f64,
    /// Reported percentiles
    pub percentiles: Percentiles,
    /// Number of samples recorded into the histogram
    pub sample_count: u64,
    /// Iterations executed across all samples
    pub iterations: u64,
}

/// Compute summary statistics for one benchmark
pub fn compute_summary(
    histogram: &DurationHistogram,
    min: f64,
    max: f64,
    iterations: u64,
) -> SummaryStatistics {
    SummaryStatistics {
        min,
        max,
        mean: histogram.mean(),
        std_dev: histogram.stddev(),
        percentiles: compute_percentiles(histogram),
        sample_count: histogram.len(),
        iterations,
    }
}

impl SummaryStatistics {
    /// Coefficient of variation (stddev / mean), unit independent.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.std_dev / self.mean
        }
    }

    /// Check if distribution appears stable (low CV)
    pub fn is_stable(&self, cv_threshold: f64) -> bool {
        self.coefficient_of_variation() < cv_threshold
    }
}
