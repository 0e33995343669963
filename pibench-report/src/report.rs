//! Report Data Structures

use chrono::{DateTime, Utc};
use pibench_core::{ChunkSpan, Precision, RemainderPolicy, SummationMode};
use pibench_stats::{Scaling, SummaryStatistics, is_stable_cv};
use serde::{Deserialize, Serialize};

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub config: ReportConfig,
    /// One entry per thread-count configuration, in run order
    pub runs: Vec<RunResult>,
    /// Spread of the π estimates across configurations
    pub pi_spread: SummaryStatistics,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
    pub total_duration_ms: f64,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
}

/// Harness parameters captured in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub steps: u64,
    pub thread_counts: Vec<usize>,
    pub repeats: usize,
    pub summation: SummationMode,
    pub precision: Precision,
    pub remainder: RemainderPolicy,
    pub measure_chunks: bool,
}

/// Aggregated result of one thread-count configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub thread_count: usize,
    pub step_count: u64,
    pub repeat_count: usize,
    /// π estimate of the last trial
    pub pi_estimate: f64,
    /// `|pi_estimate - π|`
    pub abs_error: f64,
    /// Terms skipped by the partition plan
    pub dropped_terms: u64,
    /// Mean wall time of one full reduction (ns)
    pub mean_time_ns: f64,
    /// Population standard deviation of the trial times (ns)
    pub std_dev_time_ns: f64,
    /// `std_dev_time_ns / mean_time_ns`; NaN when undefined
    pub coefficient_of_variation: f64,
    /// `mean_time_ns / step_count`
    pub time_per_step_ns: f64,
    pub min_time_ns: f64,
    pub median_time_ns: f64,
    pub max_time_ns: f64,
    /// Against the first configuration of the run
    pub scaling: Scaling,
    /// Statistics over every chunk duration of every trial
    pub chunk_stats: Option<SummaryStatistics>,
    /// Raw chunk spans, ordered by trial then partition
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chunk_spans: Vec<ChunkSpan>,
}

impl RunResult {
    /// Whether the trial times fall under a CV threshold
    pub fn is_stable(&self, cv_threshold: f64) -> bool {
        is_stable_cv(self.coefficient_of_variation, cv_threshold)
    }
}

impl Report {
    /// Significant digits for printing π at the report's precision
    pub fn pi_digits(&self) -> usize {
        self.config.precision.significant_digits()
    }

    /// Total number of trials run across configurations
    pub fn total_trials(&self) -> usize {
        self.runs.iter().map(|r| r.repeat_count).sum()
    }
}
