//! Thread Sweep Example
//!
//! Uses PiBench as a library: one direct reduction per summation mode, then
//! a harness sweep over powers of two up to the core count.
//!
//! Run with:
//!   cargo run --release --example thread_sweep
//!   cargo run --release --example thread_sweep -- 50000000

use pibench::prelude::*;
use pibench::{build_report, format_human_output};

fn main() -> anyhow::Result<()> {
    let steps = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(10_000_000);

    for mode in [SummationMode::Naive, SummationMode::Compensated] {
        for precision in [Precision::Single, Precision::Double] {
            let request = ReduceRequest::new(steps, 4)
                .with_mode(mode)
                .with_precision(precision);
            let reduction = reduce(&request, None)?;
            println!(
                "{:<12} {}  pi = {:.*}  error = {:e}",
                format!("{mode:?}"),
                precision,
                precision.significant_digits() - 1,
                reduction.pi,
                (reduction.pi - std::f64::consts::PI).abs()
            );
        }
    }

    let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
    let thread_counts: Vec<usize> = std::iter::successors(Some(1usize), |t| Some(t * 2))
        .take_while(|&t| t <= cores)
        .collect();

    let mut config = HarnessConfig::new(steps, thread_counts);
    config.repeats = 5;
    config.mode = SummationMode::Compensated;

    let harness = Harness::new(config)?;
    let outcome = harness.run()?;
    let report = build_report(harness.config(), outcome, 0.0);
    print!("{}", format_human_output(&report));

    Ok(())
}
