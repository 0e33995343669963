//! Benchmark Harness
//!
//! Runs the reduction repeatedly across thread counts and turns the raw
//! timings into a report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! HarnessConfig
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Run trials, collect timings and chunk spans
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ statistics  │  Dispersion per configuration (parallel), scaling, π spread
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Build Report with system metadata
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Trial loop and configuration validation
//! - [`statistics`] - Parallel statistics computation
//! - [`report`] - Report building
//! - [`formatting`] - Human-readable output formatting
//! - [`metadata`] - System metadata collection

mod execution;
mod formatting;
mod metadata;
mod report;
mod statistics;

pub use execution::{ConfigurationSamples, Harness, HarnessConfig, HarnessError, HarnessOutcome};
pub use formatting::format_human_output;
pub use metadata::{build_report_meta, num_cpus};
pub use report::build_report;
pub use statistics::{compute_statistics, summarize_configuration};
