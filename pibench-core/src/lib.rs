#![warn(missing_docs)]
//! PiBench Core - Series Engine
//!
//! This crate computes the Leibniz series for π:
//! - `Precision` / `SeriesFloat` for runtime-selected `f32` or `f64` arithmetic
//! - Partition planning over `[0, steps)` with an explicit remainder policy
//! - Naive and Kahan-compensated chunk evaluation
//! - Parallel reduction on a per-call rayon pool with an index-owned result vector
//! - Wall-clock timers and per-chunk spans

mod error;
mod measure;
mod precision;
mod reducer;
mod series;

pub use error::SeriesError;
pub use measure::{ChunkClock, ChunkSpan, Timer};
pub use precision::{Precision, SeriesFloat};
pub use reducer::{ReduceRequest, Reduction, parallel_map_reduce, reduce, reduce_pi};
pub use series::{
    KahanSum, MAX_STEPS, PartitionPlan, RemainderPolicy, SeriesRange, SummationMode, combine_partials,
    evaluate_chunk, evaluate_chunk_timed, plan_partitions, sequential_pi, sequential_pi_with,
    validate_shape,
};
