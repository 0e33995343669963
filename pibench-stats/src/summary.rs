//! Summary Statistics
//!
//! Population statistics over one set of samples (trial times, chunk times,
//! or π estimates across configurations):
//! - Mean and standard deviation with divisor `n`, not `n - 1`
//! - Coefficient of variation as a plain ratio, NaN when the mean is zero
//! - Min, median and max

use crate::percentiles::percentile_of_sorted;
use serde::{Deserialize, Serialize};

/// Summary of one sample set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// `std_dev / mean`; NaN when undefined
    pub coefficient_of_variation: f64,
    /// Smallest sample
    pub min: f64,
    /// Median (linear interpolation)
    pub median: f64,
    /// Largest sample
    pub max: f64,
    /// Number of samples
    pub sample_count: usize,
}

/// `std_dev / mean`, or NaN when `mean` is exactly zero
pub fn coefficient_of_variation(std_dev: f64, mean: f64) -> f64 {
    if mean == 0.0 { f64::NAN } else { std_dev / mean }
}

/// Compute population statistics.
///
/// An empty slice yields zero mean and spread with a NaN coefficient of
/// variation.
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics {
            mean: 0.0,
            std_dev: 0.0,
            coefficient_of_variation: f64::NAN,
            min: 0.0,
            max: 0.0,
            median: 0.0,
            sample_count: 0,
        };
    }

    let n = samples.len() as f64;

    // Shift by the first sample so identical inputs give an exact mean
    let shift = samples[0];
    let mean = shift + samples.iter().map(|x| x - shift).sum::<f64>() / n;

    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    SummaryStatistics {
        mean,
        std_dev,
        coefficient_of_variation: coefficient_of_variation(std_dev, mean),
        min: sorted[0],
        median: percentile_of_sorted(&sorted, 50.0),
        max: sorted[sorted.len() - 1],
        sample_count: samples.len(),
    }
}

/// Whether a distribution with this CV counts as stable (defined and below threshold)
pub fn is_stable_cv(cv: f64, cv_threshold: f64) -> bool {
    cv.is_finite() && cv < cv_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_std_dev() {
        // Classic example: population std dev is exactly 2
        let samples = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = compute_summary(&samples);

        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.std_dev, 2.0);
        assert_eq!(summary.coefficient_of_variation, 0.4);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.sample_count, 8);
    }

    #[test]
    fn test_equal_samples_have_zero_cv() {
        let samples = vec![1_234_567.0; 5];
        let summary = compute_summary(&samples);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.coefficient_of_variation, 0.0);
        assert!(is_stable_cv(summary.coefficient_of_variation, 0.01));
    }

    #[test]
    fn test_equal_non_dyadic_samples_are_exact() {
        let samples = vec![std::f64::consts::PI; 7];
        let summary = compute_summary(&samples);
        assert_eq!(summary.mean, std::f64::consts::PI);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn test_zero_mean_is_nan() {
        let summary = compute_summary(&[0.0, 0.0, 0.0]);
        assert!(summary.coefficient_of_variation.is_nan());
        assert!(!is_stable_cv(summary.coefficient_of_variation, 1.0));

        let symmetric = compute_summary(&[-1.0, 1.0]);
        assert!(symmetric.coefficient_of_variation.is_nan());
    }

    #[test]
    fn test_single_sample() {
        let summary = compute_summary(&[42.0]);
        assert_eq!(summary.mean, 42.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.coefficient_of_variation, 0.0);
    }

    #[test]
    fn test_empty_samples() {
        let summary = compute_summary(&[]);
        assert_eq!(summary.sample_count, 0);
        assert_eq!(summary.mean, 0.0);
        assert!(summary.coefficient_of_variation.is_nan());
    }

    #[test]
    fn test_cv_non_negative_for_positive_mean() {
        let summary = compute_summary(&[10.0, 12.0, 9.0, 11.5]);
        assert!(summary.coefficient_of_variation > 0.0);
    }

    #[test]
    fn test_nan_cv_serializes_as_null() {
        let summary = compute_summary(&[]);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"coefficient_of_variation\":null"));
    }
}
