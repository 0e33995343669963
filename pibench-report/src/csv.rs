//! CSV Output
//!
//! One row per thread-count configuration. Undefined statistics are written
//! as `NaN`; chunk columns are empty when chunk timing was off.

use crate::format::format_significant;
use crate::report::Report;

const HEADER: &str = "threads,steps,repeats,pi,abs_error,dropped_terms,mean_ns,std_dev_ns,cv,\
time_per_step_ns,min_ns,median_ns,max_ns,speedup,efficiency,chunk_mean_ns,chunk_cv";

/// Generate a CSV report
pub fn generate_csv_report(report: &Report) -> String {
    let digits = report.pi_digits();
    let mut output = String::with_capacity(HEADER.len() * (report.runs.len() + 1));
    output.push_str(HEADER);
    output.push('\n');

    for run in &report.runs {
        let (chunk_mean, chunk_cv) = match &run.chunk_stats {
            Some(stats) => (
                format!("{}", stats.mean),
                format!("{}", stats.coefficient_of_variation),
            ),
            None => (String::new(), String::new()),
        };

        output.push_str(&format!(
            "{},{},{},{},{:e},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            run.thread_count,
            run.step_count,
            run.repeat_count,
            format_significant(run.pi_estimate, digits),
            run.abs_error,
            run.dropped_terms,
            run.mean_time_ns,
            run.std_dev_time_ns,
            run.coefficient_of_variation,
            run.time_per_step_ns,
            run.min_time_ns,
            run.median_time_ns,
            run.max_time_ns,
            run.scaling.speedup,
            run.scaling.efficiency,
            chunk_mean,
            chunk_cv,
        ));
    }

    output
}
