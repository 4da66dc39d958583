//! Percentile Queries
//!
//! The fixed set of latency percentiles reported per benchmark. Each is an
//! independent query against the histogram; p98 and p99 are never aliased.

use crate::histogram::DurationHistogram;
use serde::{Deserialize, Serialize};

/// Percentiles reported for every row
pub const REPORTED_PERCENTILES: [f64; 4] = [80.0, 95.0, 98.0, 99.0];

/// Reported percentiles, in nanoseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    /// 80th percentile (also the history baseline metric)
    pub p80: f64,
    /// 95th percentile
    pub p95: f64,
    /// 98th percentile (headline column)
    pub p98: f64,
    /// 99th percentile
    pub p99: f64,
}

impl Percentiles {
    /// Apply a scale factor to every percentile
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            p80: self.p80 * factor,
            p95: self.p95 * factor,
            p98: self.p98 * factor,
            p99: self.p99 * factor,
        }
    }
}

/// Query the reported percentiles from a histogram
pub fn compute_percentiles(histogram: &DurationHistogram) -> Percentiles {
    let [p80, p95, p98, p99] = REPORTED_PERCENTILES.map(|p| histogram.percentile(p));
    Percentiles { p80, p95, p98, p99 }
}
