//! Suite Executor
//!
//! Runs registered benchmarks and persists their results.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Suite (registered via Suite::register)
//!       │
//!       ▼
//! ┌─────────────┐
//! │    suite    │  Prime, then N passes of rows
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ persistence │  Append p80 log ratios to history
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`suite`] - Calibration and pass orchestration
//! - [`persistence`] - Results history after a run

mod persistence;
mod suite;

// Re-export public API
pub use persistence::{HistoryOutcome, record_history};
pub use suite::{Suite, SuiteError};
