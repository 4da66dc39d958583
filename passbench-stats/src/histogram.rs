//! Duration Histogram
//!
//! A fixed-precision bucketed counter for nanosecond durations, backed by an
//! HDR histogram.
//!
//! **Precision**: recording is lossy. A value is stored as the index of its
//! sub-bucket, and queries answer with a representative value of that
//! sub-bucket:
//! - percentiles report the *highest* value equivalent to the bucket
//! - mean and stddev use the *midpoint* of each bucket
//!
//! With 3 significant figures the relative error is bounded by 0.1%.
//! Values above `highest_trackable` are clamped and counted as saturated.

use hdrhistogram::{CreationError, Histogram};
use thiserror::Error;

/// Default lowest discernible value (1 ns)
pub const DEFAULT_LOWEST_TRACKABLE: u64 = 1;

/// Default highest trackable value (1 s, in nanoseconds)
pub const DEFAULT_HIGHEST_TRACKABLE: u64 = 1_000_000_000;

/// Default precision (decimal digits)
pub const DEFAULT_SIGNIFICANT_FIGURES: u8 = 3;

/// Errors raised when constructing a histogram
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistogramError {
    /// Lowest discernible value was zero
    #[error("lowest trackable value must be >= 1, got {0}")]
    LowestTooSmall(u64),

    /// Precision outside the supported range
    #[error("significant figures must be in 1..=5, got {0}")]
    InvalidPrecision(u8),

    /// Trackable range too narrow
    #[error("highest trackable value {highest} must be >= 2 * lowest ({lowest})")]
    HighestTooSmall {
        /// Requested lowest value
        lowest: u64,
        /// Requested highest value
        highest: u64,
    },

    /// Any other layout the backing histogram refuses
    #[error("histogram creation failed: {0:?}")]
    Creation(CreationError),
}

impl From<CreationError> for HistogramError {
    fn from(e: CreationError) -> Self {
        HistogramError::Creation(e)
    }
}

/// Bucketed histogram of nanosecond durations
#[derive(Debug, Clone)]
pub struct DurationHistogram {
    histogram: Histogram<u64>,
    saturated_count: u64,
}

impl Default for DurationHistogram {
    fn default() -> Self {
        let histogram = Histogram::new_with_bounds(
            DEFAULT_LOWEST_TRACKABLE,
            DEFAULT_HIGHEST_TRACKABLE,
            DEFAULT_SIGNIFICANT_FIGURES,
        )
        .expect("default histogram bounds are valid");
        Self {
            histogram,
            saturated_count: 0,
        }
    }
}

impl DurationHistogram {
    /// Create a histogram tracking `[lowest, highest]` with the given precision.
    pub fn new(lowest: u64, highest: u64, significant_figures: u8) -> Result<Self, HistogramError> {
        if lowest < 1 {
            return Err(HistogramError::LowestTooSmall(lowest));
        }
        if !(1..=5).contains(&significant_figures) {
            return Err(HistogramError::InvalidPrecision(significant_figures));
        }
        if highest < lowest.saturating_mul(2) {
            return Err(HistogramError::HighestTooSmall { lowest, highest });
        }
        Ok(Self {
            histogram: Histogram::new_with_bounds(lowest, highest, significant_figures)?,
            saturated_count: 0,
        })
    }

    /// Record one duration in nanoseconds.
    ///
    /// Fractional values are rounded; negative and NaN values record as 0,
    /// values above the trackable range are clamped to `highest_trackable`.
    pub fn record(&mut self, nanos: f64) {
        let value = if nanos.is_nan() || nanos <= 0.0 {
            0
        } else {
            nanos.round() as u64
        };
        if value > self.histogram.high() {
            self.saturated_count += 1;
        }
        self.histogram.saturating_record(value);
    }

    /// Number of recorded values
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }

    /// Number of recorded values that exceeded the trackable range
    pub fn saturated_count(&self) -> u64 {
        self.saturated_count
    }

    /// Lowest discernible value
    pub fn lowest_trackable(&self) -> u64 {
        self.histogram.low()
    }

    /// Highest trackable value
    pub fn highest_trackable(&self) -> u64 {
        self.histogram.high()
    }

    /// Decimal digits of precision
    pub fn significant_figures(&self) -> u8 {
        self.histogram.sigfig()
    }

    /// Value at the given percentile (0.0..=100.0), reported as the highest
    /// value equivalent to the bucket holding that rank. Returns 0 when empty.
    pub fn percentile(&self, percentile: f64) -> f64 {
        if self.histogram.is_empty() {
            return 0.0;
        }
        let quantile = percentile.clamp(0.0, 100.0) / 100.0;
        self.histogram.value_at_quantile(quantile) as f64
    }

    /// Mean of recorded values (bucket midpoints). Returns 0 when empty.
    pub fn mean(&self) -> f64 {
        if self.histogram.is_empty() {
            return 0.0;
        }
        self.histogram.mean()
    }

    /// Population standard deviation of recorded values (bucket midpoints).
    pub fn stddev(&self) -> f64 {
        if self.histogram.is_empty() {
            return 0.0;
        }
        self.histogram.stdev()
    }

    /// Smallest value sharing a bucket with `value`
    pub fn lowest_equivalent(&self, value: u64) -> u64 {
        self.histogram.lowest_equivalent(value)
    }

    /// Largest value sharing a bucket with `value`
    pub fn highest_equivalent(&self, value: u64) -> u64 {
        self.histogram.highest_equivalent(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative_error(actual: f64, expected: f64) -> f64 {
        ((actual - expected) / expected).abs()
    }

    #[test]
    fn test_construction_limits() {
        assert_eq!(
            DurationHistogram::new(0, 1000, 3).unwrap_err(),
            HistogramError::LowestTooSmall(0)
        );
        assert_eq!(
            DurationHistogram::new(1, 1000, 6).unwrap_err(),
            HistogramError::InvalidPrecision(6)
        );
        assert!(matches!(
            DurationHistogram::new(10, 15, 3),
            Err(HistogramError::HighestTooSmall { .. })
        ));

        let hist = DurationHistogram::new(1, 1_000_000_000, 3).unwrap();
        assert_eq!(hist.lowest_trackable(), 1);
        assert_eq!(hist.highest_trackable(), 1_000_000_000);
        assert_eq!(hist.significant_figures(), 3);
    }

    #[test]
    fn test_small_values_are_exact() {
        let mut hist = DurationHistogram::default();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            hist.record(v);
        }

        assert_eq!(hist.len(), 5);
        assert_eq!(hist.percentile(50.0), 3.0);
        assert_eq!(hist.percentile(100.0), 5.0);
        assert!((hist.mean() - 3.0).abs() < 1e-9);
        assert!((hist.stddev() - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_and_negative_values() {
        let mut hist = DurationHistogram::default();
        hist.record(0.4);
        hist.record(-3.0);
        hist.record(f64::NAN);
        hist.record(2.6);

        assert_eq!(hist.len(), 4);
        assert_eq!(hist.percentile(75.0), 0.0);
        assert_eq!(hist.percentile(100.0), 3.0);
    }

    #[test]
    fn test_precision_within_three_digits() {
        let mut hist = DurationHistogram::default();
        let values = [12_345.0, 987_654.0, 10_000_000.0, 123_456_789.0];
        for v in values {
            hist.record(v);
        }

        for v in values {
            let low = hist.lowest_equivalent(v as u64) as f64;
            let high = hist.highest_equivalent(v as u64) as f64;
            assert!(low <= v && v <= high);
            assert!(relative_error(high, v) < 1e-3, "{} -> {}", v, high);
        }
    }

    #[test]
    fn test_percentiles_uniform() {
        let mut hist = DurationHistogram::default();
        for v in 1..=10_000 {
            hist.record(v as f64 * 100.0);
        }

        assert!(relative_error(hist.percentile(50.0), 500_000.0) < 2e-3);
        assert!(relative_error(hist.percentile(80.0), 800_000.0) < 2e-3);
        assert!(relative_error(hist.percentile(99.0), 990_000.0) < 2e-3);
        assert!(relative_error(hist.mean(), 500_050.0) < 2e-3);
        // Uniform distribution: stddev = range / sqrt(12)
        assert!(relative_error(hist.stddev(), 999_900.0 / 12.0_f64.sqrt()) < 1e-2);
    }

    #[test]
    fn test_percentile_is_monotonic() {
        let mut hist = DurationHistogram::default();
        for v in [10.0, 2_000.0, 35_000.0, 35_100.0, 4_000_000.0] {
            hist.record(v);
        }

        let p80 = hist.percentile(80.0);
        let p95 = hist.percentile(95.0);
        let p98 = hist.percentile(98.0);
        let p99 = hist.percentile(99.0);
        assert!(p80 <= p95 && p95 <= p98 && p98 <= p99);
    }

    #[test]
    fn test_saturation_clamps() {
        let mut hist = DurationHistogram::default();
        hist.record(5e9);
        hist.record(1e9);

        assert_eq!(hist.saturated_count(), 1);
        assert_eq!(hist.len(), 2);
        assert!(relative_error(hist.percentile(100.0), 1e9) < 1e-3);
    }

    #[test]
    fn test_empty() {
        let hist = DurationHistogram::default();
        assert!(hist.is_empty());
        assert_eq!(hist.percentile(99.0), 0.0);
        assert_eq!(hist.mean(), 0.0);
        assert_eq!(hist.stddev(), 0.0);
    }
}
