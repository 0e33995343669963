#![warn(missing_docs)]
//! # PiBench
//!
//! Parallel approximation of π with the Leibniz series, plus a harness that
//! times the computation across thread counts.
//!
//! - **Partitioned reduction**: `[0, steps)` is split into contiguous chunks,
//!   each summed on its own worker of a per-call rayon pool
//! - **Compensated summation**: Kahan summation for the chunks and for the combine step
//! - **Runtime precision**: `f32` or `f64` arithmetic through one generic code path
//! - **Statistics**: mean, population standard deviation and coefficient of
//!   variation of trial times, chunk times and π estimates
//! - **Reports**: human table, JSON or CSV
//!
//! ## Quick Start
//!
//! ```no_run
//! use pibench::{ReduceRequest, SummationMode, reduce};
//!
//! let request = ReduceRequest::new(1_000_000, 4).with_mode(SummationMode::Compensated);
//! let reduction = reduce(&request, None)?;
//! println!("π ≈ {}", reduction.pi);
//! # Ok::<(), pibench::SeriesError>(())
//! ```
//!
//! ## Benchmark Harness
//!
//! ```no_run
//! use pibench::{Harness, HarnessConfig, build_report, format_human_output};
//!
//! let mut config = HarnessConfig::new(10_000_000, vec![1, 2, 4, 8]);
//! config.repeats = 5;
//! let harness = Harness::new(config)?;
//! let outcome = harness.run()?;
//! let report = build_report(harness.config(), outcome, 0.0);
//! print!("{}", format_human_output(&report));
//! # Ok::<(), pibench::HarnessError>(())
//! ```

// Re-export the series engine
pub use pibench_core::{
    ChunkClock, ChunkSpan, KahanSum, PartitionPlan, Precision, ReduceRequest, Reduction,
    RemainderPolicy, SeriesError, SeriesFloat, SeriesRange, SummationMode, Timer,
    combine_partials, evaluate_chunk, evaluate_chunk_timed, parallel_map_reduce,
    plan_partitions, reduce, reduce_pi, sequential_pi, sequential_pi_with, validate_shape,
};

// Re-export stats
pub use pibench_stats::{
    DEFAULT_STABLE_CV, Scaling, SummaryStatistics, coefficient_of_variation, compute_percentile,
    compute_scaling, compute_summary, is_stable_cv,
};

// Re-export reporting
pub use pibench_report::{
    OutputFormat, Report, ReportConfig, ReportMeta, RunResult, SystemInfo, generate_csv_report,
    generate_json_report,
};

// Re-export the harness and CLI
pub use pibench_cli::{
    Cli, ConfigurationSamples, Harness, HarnessConfig, HarnessError, HarnessOutcome,
    PiBenchConfig, build_harness_config, build_report, compute_statistics, format_human_output,
    run, run_with_cli,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Harness, HarnessConfig, Precision, ReduceRequest, RemainderPolicy, SummationMode, reduce,
        reduce_pi,
    };
}
