//! Report Data Structures

use passbench_stats::SummaryStatistics;
use serde::{Deserialize, Serialize};

/// Display unit chosen per row from the row's minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// min <= 1500 ns
    Ns,
    /// 1500 ns < min <= 1.5 ms
    Us,
    /// min > 1.5 ms
    Ms,
}

impl TimeUnit {
    /// Pick the unit for a row whose fastest sample is `min_ns`
    pub fn for_min(min_ns: f64) -> Self {
        if min_ns > 1.5e6 {
            TimeUnit::Ms
        } else if min_ns > 1.5e3 {
            TimeUnit::Us
        } else {
            TimeUnit::Ns
        }
    }

    /// Multiplier converting nanoseconds to this unit
    pub fn factor(self) -> f64 {
        match self {
            TimeUnit::Ns => 1.0,
            TimeUnit::Us => 1.0 / 1e3,
            TimeUnit::Ms => 1.0 / 1e6,
        }
    }

    /// Unit suffix
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "us",
            TimeUnit::Ms => "ms",
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One benchmark's figures after a pass, scaled to `unit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Benchmark name
    pub name: String,
    /// Unit every time figure on the row is expressed in
    pub unit: TimeUnit,
    /// 98th percentile per-op time
    pub p98: f64,
    /// Fastest sample (exact)
    pub min: f64,
    /// Slowest sample (exact)
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// stddev / mean (unitless)
    pub cv: f64,
    /// 80th percentile per-op time
    pub p80: f64,
    /// 95th percentile per-op time
    pub p95: f64,
    /// 99th percentile per-op time
    pub p99: f64,
    /// Mean per-op time
    pub mean: f64,
    /// Cumulative iterations across all samples
    pub samples: u64,
}

impl ReportRow {
    /// Build a row, scaling every time figure by the same unit factor
    pub fn from_summary(name: impl Into<String>, stats: &SummaryStatistics) -> Self {
        let unit = TimeUnit::for_min(stats.min);
        let factor = unit.factor();
        let percentiles = stats.percentiles.scaled(factor);

        Self {
            name: name.into(),
            unit,
            p98: percentiles.p98,
            min: stats.min * factor,
            max: stats.max * factor,
            std_dev: stats.std_dev * factor,
            cv: stats.coefficient_of_variation(),
            p80: percentiles.p80,
            p95: percentiles.p95,
            p99: percentiles.p99,
            mean: stats.mean * factor,
            samples: stats.iterations,
        }
    }
}

/// Rows emitted by one pass, in registration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    /// 1-based pass number
    pub pass: u32,
    /// One row per benchmark
    pub rows: Vec<ReportRow>,
}

/// Everything a suite run produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Passes in execution order
    pub passes: Vec<PassReport>,
}

impl SuiteReport {
    /// Rows of the final pass (cumulative over all passes)
    pub fn final_rows(&self) -> &[ReportRow] {
        self.passes.last().map(|p| p.rows.as_slice()).unwrap_or(&[])
    }
}
