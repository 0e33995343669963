#![warn(missing_docs)]
//! PiBench Statistical Engine
//!
//! Provides the statistics reported for repeated π reductions:
//! - Population mean / standard deviation / coefficient of variation
//! - Median and extremes via interpolated percentiles
//! - Speedup and parallel efficiency across thread counts

mod percentiles;
mod scaling;
mod summary;

pub use percentiles::compute_percentile;
pub use scaling::{Scaling, compute_scaling};
pub use summary::{SummaryStatistics, coefficient_of_variation, compute_summary, is_stable_cv};

/// CV below which a timing distribution is reported as stable
pub const DEFAULT_STABLE_CV: f64 = 0.05;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!((DEFAULT_STABLE_CV - 0.05).abs() < f64::EPSILON);
    }
}
