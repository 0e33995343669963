//! Leibniz Series
//!
//! `π = 4 · Σ (-1)^i / (2i + 1)`
//!
//! This module holds the single-threaded building blocks:
//! - [`plan_partitions`] splits `[0, steps)` into one contiguous range per worker
//! - [`evaluate_chunk`] sums the terms of one range (naive or Kahan)
//! - [`combine_partials`] folds partial sums in partition order
//! - [`sequential_pi`] is the plain single-loop reference
//!
//! Partial sums are never scaled by 4; scaling happens once after the combine.

use crate::error::SeriesError;
use crate::measure::{ChunkClock, ChunkSpan};
use crate::precision::{Precision, SeriesFloat};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Half-open range of term indices `[start, stop)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRange {
    /// First term index (inclusive)
    pub start: u64,
    /// One past the last term index
    pub stop: u64,
}

impl SeriesRange {
    /// Create a range; `start > stop` yields an empty range
    pub fn new(start: u64, stop: u64) -> Self {
        Self { start, stop }
    }

    /// Number of terms in the range
    pub fn len(&self) -> u64 {
        self.stop.saturating_sub(self.start)
    }

    /// Whether the range contains no terms
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sign of the first term, taken from the global index parity
    pub fn initial_sign<F: SeriesFloat>(&self) -> F {
        if self.start & 0x1 == 1 { -F::ONE } else { F::ONE }
    }
}

/// How terms and partial sums are accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummationMode {
    /// Plain floating-point addition
    #[default]
    Naive,
    /// Kahan compensated summation
    Compensated,
}

impl SummationMode {
    /// Map the front end's `compensated` flag to a mode
    pub fn from_compensated(compensated: bool) -> Self {
        if compensated {
            SummationMode::Compensated
        } else {
            SummationMode::Naive
        }
    }
}

/// What to do with the `steps mod threads` trailing terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemainderPolicy {
    /// Every partition gets `steps / threads` terms; the remainder is dropped
    /// and reported in [`PartitionPlan::dropped_terms`]
    #[default]
    Truncate,
    /// The last partition runs to `steps`, covering every term
    #[serde(alias = "absorb")]
    AbsorbIntoLast,
}

impl std::str::FromStr for RemainderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truncate" => Ok(RemainderPolicy::Truncate),
            "absorb" | "absorb-into-last" => Ok(RemainderPolicy::AbsorbIntoLast),
            other => Err(format!("Unknown remainder policy: {}", other)),
        }
    }
}

/// Ordered partitions of one `(steps, threads)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    /// One range per partition, ascending and contiguous
    pub ranges: Vec<SeriesRange>,
    /// Trailing terms of `[0, steps)` not covered by any range
    pub dropped_terms: u64,
}

impl PartitionPlan {
    /// Total number of terms evaluated under this plan
    pub fn covered_terms(&self) -> u64 {
        self.ranges.iter().map(SeriesRange::len).sum()
    }
}

/// Largest series length whose last denominator `2i + 1` fits in `u64`
pub const MAX_STEPS: u64 = u64::MAX / 2;

/// Check the `1 <= threads <= steps <= MAX_STEPS` precondition shared by planner and reducer
pub fn validate_shape(steps: u64, threads: usize) -> Result<(), SeriesError> {
    if steps == 0 {
        return Err(SeriesError::ZeroSteps);
    }
    if steps > MAX_STEPS {
        return Err(SeriesError::TooManySteps {
            steps,
            max: MAX_STEPS,
        });
    }
    if threads == 0 {
        return Err(SeriesError::ZeroThreads);
    }
    if threads as u64 > steps {
        return Err(SeriesError::ThreadsExceedSteps { steps, threads });
    }
    Ok(())
}

/// Split `[0, steps)` into `threads` contiguous ranges.
///
/// Partition `i` gets `[i * (steps / threads), (i + 1) * (steps / threads))`.
/// With [`RemainderPolicy::Truncate`] the last `steps % threads` terms are
/// not evaluated at all.
pub fn plan_partitions(
    steps: u64,
    threads: usize,
    policy: RemainderPolicy,
) -> Result<PartitionPlan, SeriesError> {
    validate_shape(steps, threads)?;

    let chunk = steps / threads as u64;
    let mut ranges: Vec<SeriesRange> = (0..threads as u64)
        .map(|i| SeriesRange::new(i * chunk, (i + 1) * chunk))
        .collect();

    let remainder = steps % threads as u64;
    let dropped_terms = match policy {
        RemainderPolicy::Truncate => remainder,
        RemainderPolicy::AbsorbIntoLast => {
            if let Some(last) = ranges.last_mut() {
                last.stop = steps;
            }
            0
        }
    };

    Ok(PartitionPlan {
        ranges,
        dropped_terms,
    })
}

/// Running Kahan sum: `y = x - c; t = sum + y; c = (t - sum) - y; sum = t`
#[derive(Debug, Clone, Copy)]
pub struct KahanSum<F> {
    sum: F,
    c: F,
}

impl<F: SeriesFloat> KahanSum<F> {
    /// Empty sum with zero compensation
    pub fn new() -> Self {
        Self {
            sum: F::ZERO,
            c: F::ZERO,
        }
    }

    /// Add one value, folding back the low-order bits lost last time
    #[inline(always)]
    pub fn add(&mut self, x: F) {
        let y = x - self.c;
        let t = self.sum + y;
        self.c = (t - self.sum) - y;
        self.sum = t;
    }

    /// Current sum
    pub fn value(&self) -> F {
        self.sum
    }
}

impl<F: SeriesFloat> Default for KahanSum<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial alternating sum of `sign / (2i + 1)` over `range`
pub fn evaluate_chunk<F: SeriesFloat>(range: SeriesRange, mode: SummationMode) -> F {
    match mode {
        SummationMode::Naive => naive_chunk(range),
        SummationMode::Compensated => kahan_chunk(range),
    }
}

fn naive_chunk<F: SeriesFloat>(range: SeriesRange) -> F {
    let mut sum = F::ZERO;
    let mut sign = range.initial_sign::<F>();
    for i in range.start..range.stop {
        sum = sum + sign / F::from_index(2 * i + 1);
        sign = -sign;
    }
    sum
}

fn kahan_chunk<F: SeriesFloat>(range: SeriesRange) -> F {
    let mut acc = KahanSum::new();
    let mut sign = range.initial_sign::<F>();
    for i in range.start..range.stop {
        acc.add(sign / F::from_index(2 * i + 1));
        sign = -sign;
    }
    acc.value()
}

/// [`evaluate_chunk`] plus the wall-clock span of the call
pub fn evaluate_chunk_timed<F: SeriesFloat>(
    partition: usize,
    range: SeriesRange,
    mode: SummationMode,
    clock: &ChunkClock,
) -> (F, ChunkSpan) {
    let started = Instant::now();
    let sum = std::hint::black_box(evaluate_chunk::<F>(range, mode));
    let stopped = Instant::now();
    (sum, clock.span(partition, started, stopped))
}

/// Fold partial sums in slice (partition) order
pub fn combine_partials<F: SeriesFloat>(partials: &[F], mode: SummationMode) -> F {
    match mode {
        SummationMode::Naive => partials.iter().fold(F::ZERO, |acc, &x| acc + x),
        SummationMode::Compensated => {
            let mut acc = KahanSum::new();
            for &x in partials {
                acc.add(x);
            }
            acc.value()
        }
    }
}

/// Single-loop reference: `4 · Σ sign / (2i + 1)` over `[0, steps)`.
///
/// `steps` is capped at [`MAX_STEPS`].
pub fn sequential_pi<F: SeriesFloat>(steps: u64, mode: SummationMode) -> F {
    let steps = steps.min(MAX_STEPS);
    let mut sign = F::ONE;
    let sum = match mode {
        SummationMode::Naive => {
            let mut pi = F::ZERO;
            for i in 0..steps {
                pi = pi + sign / F::from_index(2 * i + 1);
                sign = -sign;
            }
            pi
        }
        SummationMode::Compensated => {
            let mut acc = KahanSum::new();
            for i in 0..steps {
                acc.add(sign / F::from_index(2 * i + 1));
                sign = -sign;
            }
            acc.value()
        }
    };
    F::FOUR * sum
}

/// [`sequential_pi`] in a runtime-selected width, widened to `f64`
pub fn sequential_pi_with(precision: Precision, steps: u64, mode: SummationMode) -> f64 {
    match precision {
        Precision::Single => sequential_pi::<f32>(steps, mode).to_f64(),
        Precision::Double => sequential_pi::<f64>(steps, mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_even_split() {
        let plan = plan_partitions(100, 4, RemainderPolicy::Truncate).unwrap();
        assert_eq!(plan.ranges.len(), 4);
        assert_eq!(plan.ranges[0], SeriesRange::new(0, 25));
        assert_eq!(plan.ranges[3], SeriesRange::new(75, 100));
        assert_eq!(plan.dropped_terms, 0);
        assert_eq!(plan.covered_terms(), 100);
    }

    #[test]
    fn test_plan_truncates_remainder() {
        let plan = plan_partitions(100, 7, RemainderPolicy::Truncate).unwrap();
        assert_eq!(plan.ranges.len(), 7);
        assert!(plan.ranges.iter().all(|r| r.len() == 14));
        assert_eq!(plan.ranges[6].stop, 98);
        assert_eq!(plan.dropped_terms, 2);
        assert_eq!(plan.covered_terms(), 98);
    }

    #[test]
    fn test_plan_absorbs_remainder() {
        let plan = plan_partitions(100, 7, RemainderPolicy::AbsorbIntoLast).unwrap();
        assert_eq!(plan.ranges[6], SeriesRange::new(84, 100));
        assert_eq!(plan.dropped_terms, 0);
        assert_eq!(plan.covered_terms(), 100);
    }

    #[test]
    fn test_plan_contiguous() {
        for steps in [1u64, 2, 9, 10, 97, 1000] {
            for threads in 1..=steps.min(16) as usize {
                for policy in [RemainderPolicy::Truncate, RemainderPolicy::AbsorbIntoLast] {
                    let plan = plan_partitions(steps, threads, policy).unwrap();
                    assert_eq!(plan.ranges.len(), threads);
                    assert_eq!(plan.ranges[0].start, 0);
                    for pair in plan.ranges.windows(2) {
                        assert_eq!(pair[0].stop, pair[1].start);
                    }
                    assert!(plan.ranges.iter().all(|r| !r.is_empty()));
                    assert_eq!(plan.covered_terms() + plan.dropped_terms, steps);
                }
            }
        }
    }

    #[test]
    fn test_plan_rejects_bad_shapes() {
        assert!(matches!(
            plan_partitions(10, 0, RemainderPolicy::Truncate),
            Err(SeriesError::ZeroThreads)
        ));
        assert!(matches!(
            plan_partitions(0, 1, RemainderPolicy::Truncate),
            Err(SeriesError::ZeroSteps)
        ));
        assert!(matches!(
            plan_partitions(3, 4, RemainderPolicy::Truncate),
            Err(SeriesError::ThreadsExceedSteps {
                steps: 3,
                threads: 4
            })
        ));
        assert!(matches!(
            plan_partitions(u64::MAX, 4, RemainderPolicy::Truncate),
            Err(SeriesError::TooManySteps { max: MAX_STEPS, .. })
        ));
        assert!(validate_shape(MAX_STEPS, 4).is_ok());
        assert!(validate_shape(MAX_STEPS + 1, 4).is_err());
    }

    #[test]
    fn test_sign_follows_global_index() {
        assert_eq!(evaluate_chunk::<f64>(SeriesRange::new(0, 1), SummationMode::Naive), 1.0);
        assert_eq!(
            evaluate_chunk::<f64>(SeriesRange::new(1, 2), SummationMode::Naive),
            -1.0 / 3.0
        );
        assert_eq!(
            evaluate_chunk::<f64>(SeriesRange::new(2, 3), SummationMode::Compensated),
            1.0 / 5.0
        );
    }

    #[test]
    fn test_split_ranges_match_whole() {
        let whole: f64 = evaluate_chunk(SeriesRange::new(0, 1001), SummationMode::Naive);
        let left: f64 = evaluate_chunk(SeriesRange::new(0, 333), SummationMode::Naive);
        let right: f64 = evaluate_chunk(SeriesRange::new(333, 1001), SummationMode::Naive);
        assert!((whole - (left + right)).abs() < 1e-14);
    }

    #[test]
    fn test_kahan_matches_naive_on_short_range() {
        // 1 - 1/3 + 1/5 - ... - 1/19
        let exact = 0.760_459_904_732_350_6_f64;
        let naive: f64 = evaluate_chunk(SeriesRange::new(0, 10), SummationMode::Naive);
        let kahan: f64 = evaluate_chunk(SeriesRange::new(0, 10), SummationMode::Compensated);
        let bound = 10.0 * f64::EPSILON;
        assert!((naive - kahan).abs() <= bound);
        assert!((kahan - exact).abs() <= bound);
    }

    #[test]
    fn test_kahan_closer_in_single_precision() {
        let steps = 1_000_000;
        let reference: f64 = evaluate_chunk(SeriesRange::new(0, steps), SummationMode::Compensated);
        let naive: f32 = evaluate_chunk(SeriesRange::new(0, steps), SummationMode::Naive);
        let kahan: f32 = evaluate_chunk(SeriesRange::new(0, steps), SummationMode::Compensated);

        let naive_err = (naive.to_f64() - reference).abs();
        let kahan_err = (kahan.to_f64() - reference).abs();
        assert!(
            kahan_err < naive_err,
            "kahan error {kahan_err} should beat naive error {naive_err}"
        );
    }

    #[test]
    fn test_kahan_sum_keeps_small_terms() {
        let mut acc = KahanSum::<f32>::new();
        acc.add(1.0);
        for _ in 0..1000 {
            acc.add(1e-8);
        }
        assert!((acc.value() - 1.00001).abs() < 1e-6);
    }

    #[test]
    fn test_combine_in_order() {
        let partials = [1.0f64, -1.0 / 3.0, 1.0 / 5.0];
        let naive = combine_partials(&partials, SummationMode::Naive);
        assert_eq!(naive, (1.0 - 1.0 / 3.0) + 1.0 / 5.0);
        let kahan = combine_partials(&partials, SummationMode::Compensated);
        assert!((kahan - naive).abs() < 1e-15);
        assert_eq!(combine_partials::<f64>(&[], SummationMode::Compensated), 0.0);
    }

    #[test]
    fn test_sequential_reference_converges() {
        let pi = sequential_pi::<f64>(1_000_000, SummationMode::Naive);
        assert!((pi - std::f64::consts::PI).abs() < 1e-5);
        let pi32 = sequential_pi_with(Precision::Single, 1_000_000, SummationMode::Naive);
        assert!((pi32 - std::f64::consts::PI).abs() < 1e-3);
    }

    #[test]
    fn test_remainder_policy_parse() {
        assert_eq!(
            "absorb".parse::<RemainderPolicy>().unwrap(),
            RemainderPolicy::AbsorbIntoLast
        );
        assert_eq!(
            "Truncate".parse::<RemainderPolicy>().unwrap(),
            RemainderPolicy::Truncate
        );
        assert!("spread".parse::<RemainderPolicy>().is_err());
    }
}
