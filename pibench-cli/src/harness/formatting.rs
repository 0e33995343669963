//! Output Formatting
//!
//! Human-readable output for a harness report:
//! - A header line naming the columns, then one row per thread count
//! - Per-chunk spans and a chunk-time summary when chunk timing is on
//! - The coefficient of variation of π across thread counts

use pibench_report::{
    Report, RunResult, format_cv, format_duration, format_pi_cv, format_significant,
};
use pibench_stats::DEFAULT_STABLE_CV;

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();
    let digits = report.pi_digits();
    let pi_width = digits + 3;

    output.push('\n');
    output.push_str("PiBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "steps: {}  repeats: {}  summation: {:?}  precision: {}  remainder: {:?}\n\n",
        report.config.steps,
        report.config.repeats,
        report.config.summation,
        report.config.precision,
        report.config.remainder,
    ));

    output.push_str(&format!(
        "{:>8}  {:>12}  {:<pi_width$}  {:>12}  {:>12}  {:>10}  {:>8}\n",
        "threads",
        "steps",
        "pi",
        "time/step",
        "mean time",
        "cv",
        "speedup",
        pi_width = pi_width
    ));
    output.push_str(&"-".repeat(8 + 12 + pi_width + 12 + 12 + 10 + 8 + 12));
    output.push('\n');

    let mut unstable = false;
    for run in &report.runs {
        let marker = if run.is_stable(DEFAULT_STABLE_CV) {
            ""
        } else {
            unstable = true;
            " *"
        };
        output.push_str(&format!(
            "{:>8}  {:>12}  {:<pi_width$}  {:>12}  {:>12}  {:>10}  {:>8.2}{}\n",
            run.thread_count,
            run.step_count,
            format_significant(run.pi_estimate, digits),
            format_duration(run.time_per_step_ns),
            format_duration(run.mean_time_ns),
            format_cv(run.coefficient_of_variation),
            run.scaling.speedup,
            marker,
            pi_width = pi_width
        ));
    }

    if unstable {
        output.push_str(&format!(
            "  * timing cv at or above {} (or undefined)\n",
            DEFAULT_STABLE_CV
        ));
    }

    for run in report.runs.iter().filter(|r| r.dropped_terms > 0) {
        output.push_str(&format!(
            "  note: {} threads evaluated {} of {} terms ({} trailing terms dropped)\n",
            run.thread_count,
            run.step_count - run.dropped_terms,
            run.step_count,
            run.dropped_terms
        ));
    }

    for run in &report.runs {
        if run.chunk_stats.is_some() {
            format_chunk_section(&mut output, run);
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "pi cv across thread counts: {} (mean {}, std dev {:e})\n",
        format_pi_cv(report.pi_spread.coefficient_of_variation),
        format_significant(report.pi_spread.mean, digits),
        report.pi_spread.std_dev
    ));

    output
}

fn format_chunk_section(output: &mut String, run: &RunResult) {
    output.push_str(&format!("\nChunk timings ({} threads)\n", run.thread_count));
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  {:>9}  {:>5}  {:>12}  {:>14}  {:>14}\n",
        "partition", "trial", "duration", "start (ns)", "stop (ns)"
    ));

    for span in &run.chunk_spans {
        output.push_str(&format!(
            "  {:>9}  {:>5}  {:>12}  {:>14}  {:>14}\n",
            span.partition,
            span.trial,
            format_duration(span.duration_ns() as f64),
            span.start_ns,
            span.stop_ns
        ));
    }

    if let Some(stats) = &run.chunk_stats {
        output.push_str(&format!(
            "  chunk time cv: {} (mean {}, std dev {}, {} chunks)\n",
            format_cv(stats.coefficient_of_variation),
            format_duration(stats.mean),
            format_duration(stats.std_dev),
            stats.sample_count
        ));
    }
}
