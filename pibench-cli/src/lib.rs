#![warn(missing_docs)]
//! PiBench CLI Library
//!
//! Command-line front end for the π benchmark. Use `pibench::run()` (or
//! `pibench_cli::run()`) in a main function to get the full CLI.
//!
//! # Example
//!
//! ```ignore
//! fn main() {
//!     if let Err(e) = pibench_cli::run() {
//!         eprintln!("Error: {e:#}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

mod config;
mod harness;

pub use config::*;
pub use harness::{
    ConfigurationSamples, Harness, HarnessConfig, HarnessError, HarnessOutcome, build_report,
    build_report_meta, compute_statistics, format_human_output, num_cpus,
    summarize_configuration,
};

use clap::Parser;
use pibench_core::{Precision, RemainderPolicy, SummationMode};
use pibench_report::{OutputFormat, generate_csv_report, generate_json_report};
use std::path::PathBuf;
use std::time::Instant;

const USAGE_HINT: &str =
    "usage: pibench <STEPS> --threads <N>[,<N>...] [--repeats <R>] [--compensated] [--chunk-times]";

/// PiBench CLI arguments
#[derive(Parser, Debug, Default)]
#[command(name = "pibench")]
#[command(
    author,
    version,
    about = "PiBench - parallel Leibniz-series π approximation benchmark"
)]
pub struct Cli {
    /// Number of series terms (falls back to `run.steps` in pibench.toml)
    pub steps: Option<u64>,

    /// Thread counts to sweep, comma separated (e.g. 1,2,4,8)
    #[arg(short, long, value_delimiter = ',')]
    pub threads: Vec<usize>,

    /// Trials per thread count
    #[arg(short, long)]
    pub repeats: Option<usize>,

    /// Use Kahan compensated summation
    #[arg(long, visible_alias = "kahan")]
    pub compensated: bool,

    /// Record per-chunk start/stop times
    #[arg(long)]
    pub chunk_times: bool,

    /// Floating-point width: f32 or f64
    #[arg(long)]
    pub precision: Option<Precision>,

    /// Trailing terms when steps is not a multiple of threads: truncate or absorb
    #[arg(long)]
    pub remainder: Option<RemainderPolicy>,

    /// Output format: human, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Configuration file (default: discover pibench.toml upwards from the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a default pibench.toml and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Run the PiBench CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the PiBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    if cli.print_config {
        print!("{}", PiBenchConfig::default_toml());
        return Ok(());
    }

    let filter = if cli.verbose {
        "pibench=debug"
    } else {
        "pibench=info"
    };
    // A subscriber may already be installed when embedded in another binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = match &cli.config {
        Some(path) => PiBenchConfig::load(path)
            .map_err(|e| anyhow::anyhow!("failed to load {}: {}", path.display(), e))?,
        None => PiBenchConfig::discover().unwrap_or_default(),
    };

    let (harness_config, format) = build_harness_config(&cli, &config)?;
    let harness =
        Harness::new(harness_config).map_err(|e| anyhow::anyhow!("{}\n{}", e, USAGE_HINT))?;

    tracing::info!(
        steps = harness.config().steps,
        thread_counts = ?harness.config().thread_counts,
        repeats = harness.config().repeats,
        precision = %harness.config().precision,
        "starting benchmark"
    );

    let start = Instant::now();
    let outcome = harness.run()?;
    let total_duration_ms = start.elapsed().as_secs_f64() * 1e3;

    let report = build_report(harness.config(), outcome, total_duration_ms);

    let output = match format {
        OutputFormat::Human => format_human_output(&report),
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Csv => generate_csv_report(&report),
    };
    println!("{}", output);

    Ok(())
}

/// Build a [`HarnessConfig`] by layering: pibench.toml defaults → CLI overrides.
pub fn build_harness_config(
    cli: &Cli,
    config: &PiBenchConfig,
) -> anyhow::Result<(HarnessConfig, OutputFormat)> {
    let steps = cli
        .steps
        .or(config.run.steps)
        .ok_or_else(|| anyhow::anyhow!("the number of steps is required\n{}", USAGE_HINT))?;

    let thread_counts = if cli.threads.is_empty() {
        config.run.threads.clone()
    } else {
        cli.threads.clone()
    };

    let format_name = cli.format.as_deref().unwrap_or(&config.output.format);
    let format: OutputFormat = format_name.parse().map_err(|e| anyhow::anyhow!("{}", e))?;

    let harness_config = HarnessConfig {
        steps,
        thread_counts,
        repeats: cli.repeats.unwrap_or(config.run.repeats),
        mode: SummationMode::from_compensated(cli.compensated || config.run.compensated),
        precision: cli.precision.unwrap_or(config.run.precision),
        remainder: cli.remainder.unwrap_or(config.run.remainder),
        measure_chunks: cli.chunk_times || config.run.measure_chunks,
        show_progress: !cli.no_progress
            && config.output.progress
            && format == OutputFormat::Human,
    };

    Ok((harness_config, format))
}
