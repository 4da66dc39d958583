//! History Persistence
//!
//! After all passes, append each benchmark's p80 relative to the first
//! benchmark's p80 to the results history, keyed by package version.
//! The step only runs when both the results file and the manifest exist;
//! otherwise the feature is considered absent. A baseline p80 of zero (a body
//! faster than the clock resolves) gives no usable ratios, so nothing is
//! written for that run.

use crate::config::HistoryConfig;
use crate::executor::suite::Suite;
use passbench_report::{HistoryError, ResultsStore, log_ratio, read_manifest_version};
use tracing::{debug, info, warn};

/// Outcome of the persistence step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// Disabled, a required file was absent, or nothing to record
    Skipped,
    /// Samples appended for `benchmarks` benchmarks under `version`
    Recorded {
        /// Package version the samples were filed under
        version: String,
        /// Number of benchmarks appended
        benchmarks: usize,
    },
}

/// Append the suite's p80 log ratios to the results history
pub fn record_history(suite: &Suite, config: &HistoryConfig) -> Result<HistoryOutcome, HistoryError> {
    if !config.enabled {
        debug!("history disabled");
        return Ok(HistoryOutcome::Skipped);
    }
    if !config.results_path.exists() || !config.manifest_path.exists() {
        debug!(
            results = %config.results_path.display(),
            manifest = %config.manifest_path.display(),
            "history files absent, skipping"
        );
        return Ok(HistoryOutcome::Skipped);
    }

    let p80s: Vec<(&str, f64)> = suite
        .benchmarks()
        .iter()
        .map(|b| (b.name(), b.summary().percentiles.p80))
        .collect();
    if p80s.is_empty() {
        return Ok(HistoryOutcome::Skipped);
    }

    let version = read_manifest_version(&config.manifest_path)?;
    let mut store = ResultsStore::load(&config.results_path)?;

    let appended = append_log_ratios(&mut store, &version, &p80s);
    if appended == 0 {
        return Ok(HistoryOutcome::Skipped);
    }
    store.save(&config.results_path)?;

    info!(
        path = %config.results_path.display(),
        version = %version,
        benchmarks = appended,
        "history recorded"
    );

    Ok(HistoryOutcome::Recorded {
        version,
        benchmarks: appended,
    })
}

/// Append `log10(p80 / baseline)` for each entry, the first entry being the
/// baseline. Returns how many samples were stored.
fn append_log_ratios(store: &mut ResultsStore, version: &str, p80s: &[(&str, f64)]) -> usize {
    let Some(&(baseline_name, baseline)) = p80s.first() else {
        return 0;
    };
    if !(baseline.is_finite() && baseline > 0.0) {
        warn!(
            baseline = baseline_name,
            p80 = baseline,
            "baseline p80 is not positive, history not recorded"
        );
        return 0;
    }

    let mut appended = 0;
    for &(name, p80) in p80s {
        if store.append(name, version, log_ratio(p80, baseline)) {
            appended += 1;
        } else {
            warn!(benchmark = name, p80, "non-finite log ratio skipped");
        }
    }
    appended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuiteOptions;
    use passbench_core::busy_wait;
    use passbench_report::NullReporter;
    use std::path::Path;
    use std::time::Duration;

    fn ran_suite() -> Suite {
        let mut suite = Suite::new()
            .register("fast", |n, _timer| {
                for _ in 0..n {
                    busy_wait(Duration::from_micros(50));
                }
            })
            .register("slow", |n, _timer| {
                for _ in 0..n {
                    busy_wait(Duration::from_micros(500));
                }
            });
        let options = SuiteOptions {
            pass_count: 1,
            quiet: true,
            target_duration_millis: 5.0,
            prime_duration_millis: 1.0,
        };
        suite.run(&options, &mut NullReporter).unwrap();
        suite
    }

    fn history_config(dir: &Path) -> HistoryConfig {
        HistoryConfig {
            enabled: true,
            results_path: dir.join("results.json"),
            manifest_path: dir.join("Cargo.toml"),
        }
    }

    #[test]
    fn test_skipped_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = history_config(dir.path());
        let suite = ran_suite();

        assert_eq!(record_history(&suite, &config).unwrap(), HistoryOutcome::Skipped);

        // Manifest alone is not enough
        std::fs::write(&config.manifest_path, "[package]\nversion = \"0.1.0\"\n").unwrap();
        assert_eq!(record_history(&suite, &config).unwrap(), HistoryOutcome::Skipped);
        assert!(!config.results_path.exists());
    }

    #[test]
    fn test_appends_log_ratios() {
        let dir = tempfile::tempdir().unwrap();
        let config = history_config(dir.path());
        std::fs::write(&config.manifest_path, "[package]\nversion = \"0.4.2\"\n").unwrap();
        std::fs::write(&config.results_path, r#"{"fast": {"0.4.1": [0.0]}}"#).unwrap();

        let suite = ran_suite();
        let outcome = record_history(&suite, &config).unwrap();
        assert_eq!(
            outcome,
            HistoryOutcome::Recorded {
                version: "0.4.2".to_string(),
                benchmarks: 2
            }
        );

        let store = ResultsStore::load(&config.results_path).unwrap();
        // Prior entries are kept
        assert_eq!(store.samples("fast", "0.4.1"), &[0.0]);
        // Baseline against itself is exactly zero
        assert_eq!(store.samples("fast", "0.4.2"), &[0.0]);
        // 500us vs 50us: log10(10) = 1, within timing noise
        let slow = store.samples("slow", "0.4.2");
        assert_eq!(slow.len(), 1);
        assert!(slow[0] > 0.5 && slow[0] < 1.5, "log ratio {}", slow[0]);

        // A second run merges rather than replaces
        record_history(&suite, &config).unwrap();
        let store = ResultsStore::load(&config.results_path).unwrap();
        assert_eq!(store.samples("slow", "0.4.2").len(), 2);
    }

    #[test]
    fn test_malformed_results_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = history_config(dir.path());
        std::fs::write(&config.manifest_path, "[package]\nversion = \"0.1.0\"\n").unwrap();
        std::fs::write(&config.results_path, "[1, 2").unwrap();

        let suite = ran_suite();
        assert!(matches!(
            record_history(&suite, &config),
            Err(HistoryError::Json(_))
        ));
    }

    #[test]
    fn test_zero_baseline_writes_nothing() {
        let mut store = ResultsStore::default();
        let appended = append_log_ratios(&mut store, "0.1.0", &[("empty", 0.0), ("other", 120.0)]);

        assert_eq!(appended, 0);
        assert_eq!(store.benchmarks().count(), 0);
    }

    #[test]
    fn test_zero_p80_after_baseline_is_skipped() {
        let mut store = ResultsStore::default();
        let appended = append_log_ratios(
            &mut store,
            "0.1.0",
            &[("base", 100.0), ("empty", 0.0), ("slow", 1000.0)],
        );

        assert_eq!(appended, 2);
        assert_eq!(store.samples("base", "0.1.0"), &[0.0]);
        assert_eq!(store.samples("empty", "0.1.0"), &[] as &[f64]);
        assert!((store.samples("slow", "0.1.0")[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_runs_stay_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let config = history_config(dir.path());
        std::fs::write(&config.manifest_path, "[package]\nversion = \"0.1.0\"\n").unwrap();
        // Left behind by an earlier run with a zero baseline
        std::fs::write(&config.results_path, r#"{"fast": {"0.1.0": [null]}}"#).unwrap();

        let suite = ran_suite();
        for _ in 0..2 {
            assert!(matches!(
                record_history(&suite, &config).unwrap(),
                HistoryOutcome::Recorded { benchmarks: 2, .. }
            ));
        }

        let store = ResultsStore::load(&config.results_path).unwrap();
        assert_eq!(store.samples("fast", "0.1.0"), &[0.0, 0.0]);
        assert!(!std::fs::read_to_string(&config.results_path).unwrap().contains("null"));
    }

    #[test]
    fn test_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = HistoryConfig {
            enabled: false,
            ..history_config(dir.path())
        };
        assert_eq!(
            record_history(&Suite::new(), &config).unwrap(),
            HistoryOutcome::Skipped
        );
    }
}
