//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Non-finite statistics (an undefined coefficient of variation) serialize as
/// `null`.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
