//! Results History
//!
//! A JSON file accumulating, per benchmark and per package version, the
//! log10 ratio of the benchmark's p80 to the suite baseline's p80:
//!
//! ```json
//! {
//!     "sqrt": {
//!         "0.3.1": [0.41, 0.39]
//!     }
//! }
//! ```
//!
//! Runs append; existing entries are never replaced. Only finite samples are
//! stored, and `null` entries left by older writers are dropped on load.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors reading or writing history
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The results file is not valid history JSON
    #[error("malformed results file: {0}")]
    Json(#[from] serde_json::Error),

    /// The manifest could not be parsed or has no package version
    #[error("malformed manifest: {0}")]
    Manifest(String),
}

/// benchmark name → version → log-ratio samples
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultsStore {
    entries: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
}

impl<'de> Deserialize<'de> for ResultsStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored =
            BTreeMap::<String, BTreeMap<String, Vec<Option<f64>>>>::deserialize(deserializer)?;
        let entries = stored
            .into_iter()
            .map(|(name, versions)| {
                let versions: BTreeMap<String, Vec<f64>> = versions
                    .into_iter()
                    .map(|(version, samples)| (version, samples.into_iter().flatten().collect()))
                    .collect();
                (name, versions)
            })
            .collect();
        Ok(Self { entries })
    }
}

impl ResultsStore {
    /// Load a store from `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the store to `path` with four-space indentation
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HistoryError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        std::fs::write(path.as_ref(), buf)?;
        Ok(())
    }

    /// Append one sample for `benchmark` at `version`.
    ///
    /// Non-finite samples are refused; returns whether the sample was stored.
    pub fn append(&mut self, benchmark: &str, version: &str, sample: f64) -> bool {
        if !sample.is_finite() {
            return false;
        }
        self.entries
            .entry(benchmark.to_string())
            .or_default()
            .entry(version.to_string())
            .or_default()
            .push(sample);
        true
    }

    /// Samples recorded for `benchmark` at `version`
    pub fn samples(&self, benchmark: &str, version: &str) -> &[f64] {
        self.entries
            .get(benchmark)
            .and_then(|versions| versions.get(version))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Benchmarks with recorded history
    pub fn benchmarks(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// log10 of `value / baseline`
pub fn log_ratio(value: f64, baseline: f64) -> f64 {
    (value / baseline).log10()
}

/// Read `package.version` from a Cargo manifest
pub fn read_manifest_version(path: impl AsRef<Path>) -> Result<String, HistoryError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let manifest: toml::Value =
        toml::from_str(&content).map_err(|e| HistoryError::Manifest(e.to_string()))?;

    manifest
        .get("package")
        .and_then(|package| package.get("version"))
        .and_then(toml::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| HistoryError::Manifest("missing package.version".to_string()))
}
