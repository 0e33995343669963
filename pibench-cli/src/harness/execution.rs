//! Benchmark Execution
//!
//! Runs the trial loop for every thread-count configuration.
//!
//! ## Data Flow
//!
//! ```text
//!   HarnessConfig
//!        │
//!        ▼
//! ┌──────────────────┐
//! │     Harness      │  for threads in thread_counts:
//! │                  │      for trial in 0..repeats:
//! │                  │          Timer ─ reduce() ─ stop
//! └────────┬─────────┘
//!          │
//!          ▼
//!  ConfigurationSamples (trial times, last π, chunk spans)
//! ```
//!
//! Trials run strictly one after another: every worker of a trial is joined
//! before the next trial starts, and configurations never overlap.

use super::statistics::compute_statistics;
use indicatif::{ProgressBar, ProgressStyle};
use pibench_core::{
    ChunkClock, ChunkSpan, Precision, ReduceRequest, RemainderPolicy, SeriesError, SummationMode,
    Timer, reduce, validate_shape,
};
use pibench_report::RunResult;
use pibench_stats::SummaryStatistics;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a harness run
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The thread-count list is empty
    #[error("at least one thread count is required")]
    NoThreadCounts,

    /// Zero trials per configuration
    #[error("the number of repeats must be at least 1")]
    ZeroRepeats,

    /// Planning or reduction failed; no partial results are reported
    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Parameters of one harness run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Series length
    pub steps: u64,
    /// Thread counts, run in this order
    pub thread_counts: Vec<usize>,
    /// Trials per thread count
    pub repeats: usize,
    /// Summation discipline
    pub mode: SummationMode,
    /// Floating-point width
    pub precision: Precision,
    /// Handling of `steps % threads`
    pub remainder: RemainderPolicy,
    /// Record per-chunk spans
    pub measure_chunks: bool,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl HarnessConfig {
    /// One trial per thread count, naive double precision, no chunk timing
    pub fn new(steps: u64, thread_counts: Vec<usize>) -> Self {
        Self {
            steps,
            thread_counts,
            repeats: 1,
            mode: SummationMode::default(),
            precision: Precision::default(),
            remainder: RemainderPolicy::default(),
            measure_chunks: false,
            show_progress: false,
        }
    }

    /// Check every precondition before any trial runs
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.thread_counts.is_empty() {
            return Err(HarnessError::NoThreadCounts);
        }
        if self.repeats == 0 {
            return Err(HarnessError::ZeroRepeats);
        }
        for &threads in &self.thread_counts {
            validate_shape(self.steps, threads)?;
        }
        Ok(())
    }

    fn request(&self, threads: usize) -> ReduceRequest {
        ReduceRequest::new(self.steps, threads)
            .with_mode(self.mode)
            .with_precision(self.precision)
            .with_remainder(self.remainder)
    }
}

/// Raw measurements of one thread-count configuration
#[derive(Debug, Clone)]
pub struct ConfigurationSamples {
    /// Thread count
    pub threads: usize,
    /// Series length
    pub steps: u64,
    /// Wall time of every trial (ns), in trial order
    pub trial_times_ns: Vec<f64>,
    /// π estimate of the last trial
    pub pi_estimate: f64,
    /// Terms skipped by the partition plan
    pub dropped_terms: u64,
    /// Chunk spans of every trial, ordered by trial then partition
    pub chunk_spans: Vec<ChunkSpan>,
}

/// Aggregated outcome of a harness run
#[derive(Debug, Clone)]
pub struct HarnessOutcome {
    /// One result per configuration, in run order
    pub runs: Vec<RunResult>,
    /// Spread of the π estimates across configurations
    pub pi_spread: SummaryStatistics,
}

/// Runs repeated reductions across thread counts
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    /// Create a harness; fails if the configuration is invalid
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Harness configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Execute every configuration and compute statistics
    pub fn run(&self) -> Result<HarnessOutcome, HarnessError> {
        let samples = self.execute()?;
        Ok(compute_statistics(&samples))
    }

    /// Execute every configuration, returning raw samples
    pub fn execute(&self) -> Result<Vec<ConfigurationSamples>, HarnessError> {
        let total = (self.config.thread_counts.len() * self.config.repeats) as u64;
        let pb = if self.config.show_progress {
            ProgressBar::new(total)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let epoch = Instant::now();
        let mut results = Vec::with_capacity(self.config.thread_counts.len());

        for &threads in &self.config.thread_counts {
            pb.set_message(format!("{} threads", threads));
            let samples = match self.execute_configuration(threads, epoch, &pb) {
                Ok(samples) => samples,
                Err(e) => {
                    pb.abandon_with_message("Failed");
                    return Err(e);
                }
            };
            results.push(samples);
        }

        pb.finish_with_message("Complete");
        Ok(results)
    }

    fn execute_configuration(
        &self,
        threads: usize,
        epoch: Instant,
        pb: &ProgressBar,
    ) -> Result<ConfigurationSamples, HarnessError> {
        let request = self.config.request(threads);
        let repeats = self.config.repeats;

        let mut trial_times_ns = Vec::with_capacity(repeats);
        let mut chunk_spans = if self.config.measure_chunks {
            Vec::with_capacity(repeats * threads)
        } else {
            Vec::new()
        };
        let mut pi_estimate = f64::NAN;
        let mut dropped_terms = 0;

        for trial in 0..repeats {
            let clock = self
                .config
                .measure_chunks
                .then(|| ChunkClock::new(epoch, trial));

            let timer = Timer::start();
            let reduction = reduce(&request, clock)?;
            let elapsed_ns = timer.stop_nanos();

            debug!(threads, trial, elapsed_ns, pi = reduction.pi, "trial complete");

            trial_times_ns.push(elapsed_ns as f64);
            chunk_spans.extend(reduction.chunk_spans);
            pi_estimate = reduction.pi;
            dropped_terms = reduction.dropped_terms;
            pb.inc(1);
        }

        if dropped_terms > 0 {
            warn!(
                steps = self.config.steps,
                threads,
                dropped_terms,
                "steps is not a multiple of threads; trailing terms were not evaluated"
            );
        }

        info!(
            threads,
            repeats,
            pi = pi_estimate,
            "configuration complete"
        );

        Ok(ConfigurationSamples {
            threads,
            steps: self.config.steps,
            trial_times_ns,
            pi_estimate,
            dropped_terms,
            chunk_spans,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_configs() {
        let empty = HarnessConfig::new(100, vec![]);
        assert!(matches!(empty.validate(), Err(HarnessError::NoThreadCounts)));

        let mut zero_repeats = HarnessConfig::new(100, vec![1]);
        zero_repeats.repeats = 0;
        assert!(matches!(
            zero_repeats.validate(),
            Err(HarnessError::ZeroRepeats)
        ));

        let too_many = HarnessConfig::new(4, vec![1, 5]);
        assert!(matches!(
            Harness::new(too_many),
            Err(HarnessError::Series(SeriesError::ThreadsExceedSteps { .. }))
        ));

        let zero_threads = HarnessConfig::new(4, vec![0]);
        assert!(matches!(
            zero_threads.validate(),
            Err(HarnessError::Series(SeriesError::ZeroThreads))
        ));
    }

    #[test]
    fn test_execute_collects_every_trial() {
        let mut config = HarnessConfig::new(10_000, vec![1, 2, 3]);
        config.repeats = 4;
        let samples = Harness::new(config).unwrap().execute().unwrap();

        assert_eq!(samples.len(), 3);
        for (s, threads) in samples.iter().zip([1, 2, 3]) {
            assert_eq!(s.threads, threads);
            assert_eq!(s.trial_times_ns.len(), 4);
            assert!(s.chunk_spans.is_empty());
            assert!(s.pi_estimate.is_finite());
        }
        assert_eq!(samples[2].dropped_terms, 1);
    }

    #[test]
    fn test_chunk_spans_cover_partitions_and_trials() {
        let mut config = HarnessConfig::new(9_000, vec![3]);
        config.repeats = 2;
        config.measure_chunks = true;
        let samples = Harness::new(config).unwrap().execute().unwrap();

        let spans = &samples[0].chunk_spans;
        assert_eq!(spans.len(), 6);
        let keys: Vec<(usize, usize)> = spans.iter().map(|s| (s.trial, s.partition)).collect();
        assert_eq!(keys, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);

        // Trial 1 starts after trial 0 has fully joined
        let trial0_end = spans[..3].iter().map(|s| s.stop_ns).max().unwrap();
        let trial1_start = spans[3..].iter().map(|s| s.start_ns).min().unwrap();
        assert!(trial1_start >= trial0_end);
    }
}
