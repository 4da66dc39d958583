//! JSON Output

use crate::report::SuiteReport;

/// Generate a prettified JSON report.
///
/// Serializes every pass and row into machine-readable JSON format.
pub fn generate_json_report(report: &SuiteReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
