#![warn(missing_docs)]
//! PassBench Statistical Engine
//!
//! Aggregates benchmark samples into distribution statistics:
//! - Bucketed duration histogram with bounded relative precision
//! - Independent percentile queries (p80, p95, p98, p99)
//! - Summary statistics with exact extremes and coefficient of variation

mod histogram;
mod percentiles;
mod summary;

pub use histogram::{
    DEFAULT_HIGHEST_TRACKABLE, DEFAULT_LOWEST_TRACKABLE, DEFAULT_SIGNIFICANT_FIGURES,
    DurationHistogram, HistogramError,
};
pub use percentiles::{Percentiles, REPORTED_PERCENTILES, compute_percentiles};
pub use summary::{SummaryStatistics, compute_summary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_LOWEST_TRACKABLE, 1);
        assert_eq!(DEFAULT_HIGHEST_TRACKABLE, 1_000_000_000);
        assert_eq!(DEFAULT_SIGNIFICANT_FIGURES, 3);
    }
}
