//! Parallel Reducer
//!
//! Spawn one job per partition on a fresh pool, join them all, then combine
//! the partial results in partition order.
//!
//! ```text
//! plan_partitions ──▶ [r0, r1, .., rN-1]
//!                          │   │       │      one job each (rayon::scope)
//!                          ▼   ▼       ▼
//!                  slots: [s0, s1, .., sN-1]   pre-sized, one owner per slot
//!                          │
//!                          ▼  join barrier
//!                  combine_partials(s0..sN-1) × 4
//! ```
//!
//! Each job receives a `&mut` to its own slot, so the write path needs no
//! lock and the slot vector is never resized while jobs run. The combine step
//! reads slots by index, which keeps the result independent of completion
//! order.

use crate::error::SeriesError;
use crate::measure::{ChunkClock, ChunkSpan};
use crate::precision::{Precision, SeriesFloat};
use crate::series::{
    RemainderPolicy, SummationMode, combine_partials, evaluate_chunk, evaluate_chunk_timed,
    plan_partitions,
};
use std::panic::AssertUnwindSafe;
use tracing::debug;

/// Map every item on its own job in a pool of `threads` threads, wait for all
/// of them, and hand the results to `combine` in item order.
///
/// A panic in any job fails the whole call with [`SeriesError::WorkerPanicked`].
pub fn parallel_map_reduce<T, R, O, M, C>(
    threads: usize,
    items: &[T],
    map: M,
    combine: C,
) -> Result<O, SeriesError>
where
    T: Sync,
    R: Send,
    M: Fn(usize, &T) -> R + Sync,
    C: FnOnce(Vec<R>) -> O,
{
    if threads == 0 {
        return Err(SeriesError::ZeroThreads);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("pibench-worker-{}", i))
        .build()?;

    let mut slots: Vec<Option<R>> = Vec::with_capacity(items.len());
    slots.resize_with(items.len(), || None);

    let map = &map;
    let joined = std::panic::catch_unwind(AssertUnwindSafe(|| {
        pool.scope(|s| {
            for (index, (slot, item)) in slots.iter_mut().zip(items).enumerate() {
                s.spawn(move |_| {
                    *slot = Some(map(index, item));
                });
            }
        });
    }));

    if let Err(panic) = joined {
        let message = if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        return Err(SeriesError::WorkerPanicked(message));
    }

    let results = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or(SeriesError::MissingPartial(index)))
        .collect::<Result<Vec<R>, _>>()?;

    Ok(combine(results))
}

/// Parameters of one reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReduceRequest {
    /// Series length
    pub steps: u64,
    /// Partition (and worker thread) count
    pub threads: usize,
    /// Summation discipline for chunks and for the combine step
    pub mode: SummationMode,
    /// Floating-point width
    pub precision: Precision,
    /// Handling of `steps % threads`
    pub remainder: RemainderPolicy,
}

impl ReduceRequest {
    /// Naive, double precision, truncating request
    pub fn new(steps: u64, threads: usize) -> Self {
        Self {
            steps,
            threads,
            mode: SummationMode::default(),
            precision: Precision::default(),
            remainder: RemainderPolicy::default(),
        }
    }

    /// Set the summation mode
    pub fn with_mode(mut self, mode: SummationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the floating-point width
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Set the remainder policy
    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }
}

/// Outcome of one reduction
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// π estimate, computed in the requested width and widened to `f64`
    pub pi: f64,
    /// Terms left out by the partition plan
    pub dropped_terms: u64,
    /// One span per partition, in partition order (empty unless a clock was given)
    pub chunk_spans: Vec<ChunkSpan>,
}

/// Run one parallel reduction.
///
/// When `clock` is set every chunk evaluation is timed and its span returned
/// in [`Reduction::chunk_spans`]; the numeric result is unaffected.
pub fn reduce(
    request: &ReduceRequest,
    clock: Option<ChunkClock>,
) -> Result<Reduction, SeriesError> {
    match request.precision {
        Precision::Single => reduce_in::<f32>(request, clock),
        Precision::Double => reduce_in::<f64>(request, clock),
    }
}

/// π estimate for `(steps, threads, mode)` in double precision
pub fn reduce_pi(steps: u64, threads: usize, mode: SummationMode) -> Result<f64, SeriesError> {
    let request = ReduceRequest::new(steps, threads).with_mode(mode);
    Ok(reduce(&request, None)?.pi)
}

fn reduce_in<F: SeriesFloat>(
    request: &ReduceRequest,
    clock: Option<ChunkClock>,
) -> Result<Reduction, SeriesError> {
    let plan = plan_partitions(request.steps, request.threads, request.remainder)?;
    let mode = request.mode;

    debug!(
        steps = request.steps,
        threads = request.threads,
        precision = %request.precision,
        dropped = plan.dropped_terms,
        "reducing"
    );

    let (sum, chunk_spans) = parallel_map_reduce(
        request.threads,
        &plan.ranges,
        |partition, &range| match clock {
            Some(clock) => {
                let (sum, span) = evaluate_chunk_timed::<F>(partition, range, mode, &clock);
                (sum, Some(span))
            }
            None => (evaluate_chunk::<F>(range, mode), None),
        },
        |outcomes: Vec<(F, Option<ChunkSpan>)>| {
            let (partials, spans): (Vec<F>, Vec<Option<ChunkSpan>>) =
                outcomes.into_iter().unzip();
            let spans: Vec<ChunkSpan> = spans.into_iter().flatten().collect();
            (combine_partials(&partials, mode), spans)
        },
    )?;

    Ok(Reduction {
        pi: (F::FOUR * sum).to_f64(),
        dropped_terms: plan.dropped_terms,
        chunk_spans,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::sequential_pi_with;
    use std::time::Instant;

    const MODES: [SummationMode; 2] = [SummationMode::Naive, SummationMode::Compensated];
    const WIDTHS: [Precision; 2] = [Precision::Single, Precision::Double];

    #[test]
    fn test_single_thread_matches_sequential_bitwise() {
        for steps in [1u64, 2, 17, 1000, 123_457] {
            for mode in MODES {
                for precision in WIDTHS {
                    let request = ReduceRequest::new(steps, 1)
                        .with_mode(mode)
                        .with_precision(precision);
                    let reduced = reduce(&request, None).unwrap().pi;
                    let reference = sequential_pi_with(precision, steps, mode);
                    assert_eq!(
                        reduced.to_bits(),
                        reference.to_bits(),
                        "steps={steps} mode={mode:?} precision={precision}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_reduction_is_deterministic() {
        for mode in MODES {
            let request = ReduceRequest::new(200_003, 8).with_mode(mode);
            let first = reduce(&request, None).unwrap().pi;
            for _ in 0..5 {
                assert_eq!(reduce(&request, None).unwrap().pi.to_bits(), first.to_bits());
            }
        }
    }

    #[test]
    fn test_four_threads_converge() {
        let pi = reduce_pi(1_000_000, 4, SummationMode::Naive).unwrap();
        assert!((pi - std::f64::consts::PI).abs() < 1e-5);

        let request = ReduceRequest::new(1_000_000, 4).with_precision(Precision::Single);
        let pi32 = reduce(&request, None).unwrap().pi;
        assert!((pi32 - std::f64::consts::PI).abs() < 1e-3);
    }

    #[test]
    fn test_remainder_policies() {
        let truncated = reduce(&ReduceRequest::new(100, 7), None).unwrap();
        assert_eq!(truncated.dropped_terms, 2);
        let reference_98 = sequential_pi_with(Precision::Double, 98, SummationMode::Naive);
        assert!((truncated.pi - reference_98).abs() < 1e-12);

        let request = ReduceRequest::new(100, 7).with_remainder(RemainderPolicy::AbsorbIntoLast);
        let absorbed = reduce(&request, None).unwrap();
        assert_eq!(absorbed.dropped_terms, 0);
        let reference_100 = sequential_pi_with(Precision::Double, 100, SummationMode::Naive);
        assert!((absorbed.pi - reference_100).abs() < 1e-12);
    }

    #[test]
    fn test_chunk_spans_recorded() {
        let clock = ChunkClock::new(Instant::now(), 4);
        let request = ReduceRequest::new(10_000, 3);
        let timed = reduce(&request, Some(clock)).unwrap();
        let untimed = reduce(&request, None).unwrap();

        assert_eq!(timed.pi.to_bits(), untimed.pi.to_bits());
        assert!(untimed.chunk_spans.is_empty());
        assert_eq!(timed.chunk_spans.len(), 3);
        for (partition, span) in timed.chunk_spans.iter().enumerate() {
            assert_eq!(span.partition, partition);
            assert_eq!(span.trial, 4);
            assert!(span.stop_ns >= span.start_ns);
        }
    }

    #[test]
    fn test_map_reduce_preserves_order() {
        let items: Vec<u64> = (0..16).collect();
        let out = parallel_map_reduce(
            4,
            &items,
            |index, &item| {
                // Later items finish first
                std::thread::sleep(std::time::Duration::from_micros(200 * (16 - item)));
                (index, item * 10)
            },
            |results| results,
        )
        .unwrap();

        for (i, (index, value)) in out.into_iter().enumerate() {
            assert_eq!(index, i);
            assert_eq!(value, i as u64 * 10);
        }
    }

    #[test]
    fn test_worker_panic_fails_reduction() {
        let items = [0u32, 1, 2];
        let result = parallel_map_reduce(
            3,
            &items,
            |_, &item| {
                if item == 1 {
                    panic!("chunk exploded");
                }
                item
            },
            |results| results.len(),
        );

        match result {
            Err(SeriesError::WorkerPanicked(message)) => assert!(message.contains("chunk exploded")),
            other => panic!("expected WorkerPanicked, got {other:?}"),
        }
    }

    #[test]
    fn test_reduce_rejects_bad_shapes() {
        assert!(matches!(
            reduce_pi(5, 0, SummationMode::Naive),
            Err(SeriesError::ZeroThreads)
        ));
        assert!(matches!(
            reduce_pi(5, 6, SummationMode::Naive),
            Err(SeriesError::ThreadsExceedSteps { .. })
        ));
    }
}
