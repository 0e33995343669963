//! Parallel Scaling
//!
//! Compares one thread-count configuration against a baseline configuration
//! (the first one run). Speedup above 1.0 means the candidate is faster.

use serde::{Deserialize, Serialize};

/// Speedup and parallel efficiency relative to a baseline configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaling {
    /// `baseline_mean / mean`
    pub speedup: f64,
    /// `speedup * baseline_threads / threads` (1.0 = linear scaling)
    pub efficiency: f64,
}

impl Scaling {
    /// Scaling of the baseline against itself
    pub fn identity() -> Self {
        Self {
            speedup: 1.0,
            efficiency: 1.0,
        }
    }
}

/// Compute scaling of `(mean, threads)` against `(baseline_mean, baseline_threads)`.
///
/// A zero candidate mean or zero thread count gives NaN fields.
pub fn compute_scaling(
    baseline_mean: f64,
    baseline_threads: usize,
    mean: f64,
    threads: usize,
) -> Scaling {
    let speedup = if mean == 0.0 {
        f64::NAN
    } else {
        baseline_mean / mean
    };

    let efficiency = if threads == 0 {
        f64::NAN
    } else {
        speedup * baseline_threads as f64 / threads as f64
    };

    Scaling {
        speedup,
        efficiency,
    }
}
