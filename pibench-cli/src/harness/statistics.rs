//! Statistics Computation
//!
//! Turns raw configuration samples into [`RunResult`]s. Configurations are
//! summarized in parallel with Rayon; speedup is filled in afterwards against
//! the first configuration.
//!
//! The π estimate of a configuration is the last trial's value while the
//! timing statistics use every trial.

use super::execution::{ConfigurationSamples, HarnessOutcome};
use pibench_report::RunResult;
use pibench_stats::{Scaling, compute_scaling, compute_summary};
use rayon::prelude::*;

/// Summarize every configuration and the spread of π across them
pub fn compute_statistics(samples: &[ConfigurationSamples]) -> HarnessOutcome {
    let mut runs: Vec<RunResult> = samples.par_iter().map(summarize_configuration).collect();

    if let Some((baseline_mean, baseline_threads)) =
        runs.first().map(|r| (r.mean_time_ns, r.thread_count))
    {
        for run in &mut runs {
            run.scaling = compute_scaling(
                baseline_mean,
                baseline_threads,
                run.mean_time_ns,
                run.thread_count,
            );
        }
    }

    let estimates: Vec<f64> = runs.iter().map(|r| r.pi_estimate).collect();
    HarnessOutcome {
        runs,
        pi_spread: compute_summary(&estimates),
    }
}

/// Summarize one configuration (scaling left at identity)
pub fn summarize_configuration(samples: &ConfigurationSamples) -> RunResult {
    let times = compute_summary(&samples.trial_times_ns);

    let chunk_stats = if samples.chunk_spans.is_empty() {
        None
    } else {
        let durations: Vec<f64> = samples
            .chunk_spans
            .iter()
            .map(|s| s.duration_ns() as f64)
            .collect();
        Some(compute_summary(&durations))
    };

    RunResult {
        thread_count: samples.threads,
        step_count: samples.steps,
        repeat_count: samples.trial_times_ns.len(),
        pi_estimate: samples.pi_estimate,
        abs_error: (samples.pi_estimate - std::f64::consts::PI).abs(),
        dropped_terms: samples.dropped_terms,
        mean_time_ns: times.mean,
        std_dev_time_ns: times.std_dev,
        coefficient_of_variation: times.coefficient_of_variation,
        time_per_step_ns: times.mean / samples.steps as f64,
        min_time_ns: times.min,
        median_time_ns: times.median,
        max_time_ns: times.max,
        scaling: Scaling::identity(),
        chunk_stats,
        chunk_spans: samples.chunk_spans.clone(),
    }
}
