//! Report Building

use super::execution::{HarnessConfig, HarnessOutcome};
use super::metadata::build_report_meta;
use pibench_report::{Report, ReportConfig};

/// Assemble the report for one harness run
pub fn build_report(
    config: &HarnessConfig,
    outcome: HarnessOutcome,
    total_duration_ms: f64,
) -> Report {
    Report {
        meta: build_report_meta(total_duration_ms),
        config: ReportConfig {
            steps: config.steps,
            thread_counts: config.thread_counts.clone(),
            repeats: config.repeats,
            summation: config.mode,
            precision: config.precision,
            remainder: config.remainder,
            measure_chunks: config.measure_chunks,
        },
        runs: outcome.runs,
        pi_spread: outcome.pi_spread,
    }
}
