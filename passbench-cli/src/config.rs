//! Configuration loading from passbench.toml
//!
//! Suite options can be specified in a `passbench.toml` file in the project
//! root. The file is discovered by walking up from the current directory.
//! Unknown keys and mistyped values are rejected.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the discovered configuration file
pub const CONFIG_FILE_NAME: &str = "passbench.toml";

/// Configuration errors. All of them are raised before any benchmark runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown key or value of the wrong type
    #[error("invalid configuration: {0}")]
    Parse(String),

    /// Well-typed value outside its allowed range
    #[error("invalid option `{field}`: {reason}")]
    Invalid {
        /// Offending option
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Options controlling one suite run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteOptions {
    /// Number of passes over all benchmarks
    #[serde(default = "default_pass_count", alias = "passes", alias = "passCount")]
    pub pass_count: u32,
    /// Suppress all textual output
    #[serde(default)]
    pub quiet: bool,
    /// Measured time budget per benchmark per pass (milliseconds)
    #[serde(
        default = "default_target_duration",
        alias = "targetDurationMillis",
        alias = "testDurationMillis"
    )]
    pub target_duration_millis: f64,
    /// Minimum wall-clock time of the calibration probe (milliseconds)
    #[serde(default = "default_prime_duration", alias = "primeDurationMillis")]
    pub prime_duration_millis: f64,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self {
            pass_count: default_pass_count(),
            quiet: false,
            target_duration_millis: default_target_duration(),
            prime_duration_millis: default_prime_duration(),
        }
    }
}

fn default_pass_count() -> u32 {
    5
}
fn default_target_duration() -> f64 {
    1500.0
}
fn default_prime_duration() -> f64 {
    50.0
}

impl SuiteOptions {
    /// Parse options from a TOML table
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Parse options from a JSON object
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pass_count == 0 {
            return Err(ConfigError::Invalid {
                field: "pass_count",
                reason: "must be at least 1".to_string(),
            });
        }
        check_positive("target_duration_millis", self.target_duration_millis)?;
        check_positive("prime_duration_millis", self.prime_duration_millis)?;
        Ok(())
    }

    /// Pass budget in nanoseconds
    pub fn target_duration_ns(&self) -> f64 {
        self.target_duration_millis * 1e6
    }

    /// Calibration threshold in nanoseconds
    pub fn prime_duration_ns(&self) -> f64 {
        self.prime_duration_millis * 1e6
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

/// Results history configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Append to the results file after a run (when it and the manifest exist)
    #[serde(default = "default_history_enabled")]
    pub enabled: bool,
    /// Results file
    #[serde(default = "default_results_path")]
    pub results_path: PathBuf,
    /// Manifest providing the package version
    #[serde(default = "default_manifest_path")]
    pub manifest_path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_history_enabled(),
            results_path: default_results_path(),
            manifest_path: default_manifest_path(),
        }
    }
}

fn default_history_enabled() -> bool {
    true
}
fn default_results_path() -> PathBuf {
    PathBuf::from("dist/benchmark-results.json")
}
fn default_manifest_path() -> PathBuf {
    PathBuf::from("Cargo.toml")
}

/// PassBench configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassbenchConfig {
    /// Suite options
    #[serde(default)]
    pub suite: SuiteOptions,
    /// Results history
    #[serde(default)]
    pub history: HistoryConfig,
}

impl PassbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.suite.validate()?;
        Ok(config)
    }

    /// Discover configuration by walking up from the current directory
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        let dir = std::env::current_dir()?;
        Self::discover_from(&dir)
    }

    /// Discover configuration by walking up from `start`.
    ///
    /// A found file that fails to load is an error, not a miss.
    pub fn discover_from(start: &Path) -> Result<Option<Self>, ConfigError> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# PassBench Configuration

[suite]
# Number of passes over all benchmarks
pass_count = 5
# Suppress all textual output
quiet = false
# Measured time per benchmark per pass (milliseconds)
target_duration_millis = 1500.0
# Minimum duration of the calibration probe (milliseconds)
prime_duration_millis = 50.0

[history]
# Append per-version p80 log ratios after each run
enabled = true
# Results file; history is only written when this file already exists
results_path = "dist/benchmark-results.json"
# Manifest providing the package version
manifest_path = "Cargo.toml"
"#
        .to_string()
    }
}
