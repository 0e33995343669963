//! Percentile Computation
//!
//! Percentiles over timing samples, interpolated linearly between the two
//! nearest ranks. Out-of-range requests clamp to the extremes.

/// Percentile of `samples`; sorts a copy first.
///
/// # Examples
///
/// ```
/// # use pibench_stats::compute_percentile;
/// let trial_times = vec![40.0, 10.0, 30.0, 20.0];
/// assert_eq!(compute_percentile(&trial_times, 50.0), 25.0);
/// assert_eq!(compute_percentile(&trial_times, 100.0), 40.0);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_of_sorted(&sorted, percentile)
}

/// Percentile of an ascending slice; 0.0 when empty
pub(crate) fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };

    let rank = (percentile / 100.0).clamp(0.0, 1.0) * last as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    let weight = rank - below as f64;

    sorted[below] + weight * (sorted[above] - sorted[below])
}
