//! Series engine errors

use thiserror::Error;

/// Errors raised while planning or reducing the series
#[derive(Debug, Error)]
pub enum SeriesError {
    /// The series must contain at least one term
    #[error("the number of steps must be at least 1")]
    ZeroSteps,

    /// At least one partition is required
    #[error("the number of threads must be at least 1")]
    ZeroThreads,

    /// More partitions than terms
    #[error(
        "the number of steps ({steps}) should be larger than the number of threads ({threads})"
    )]
    ThreadsExceedSteps {
        /// Requested series length
        steps: u64,
        /// Requested partition count
        threads: usize,
    },

    /// Denominators `2i + 1` would overflow `u64`
    #[error("the number of steps ({steps}) exceeds the maximum of {max}")]
    TooManySteps {
        /// Requested series length
        steps: u64,
        /// Largest supported series length
        max: u64,
    },

    /// The per-call worker pool could not be created
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A worker panicked; the whole reduction is discarded
    #[error("worker panicked: {0}")]
    WorkerPanicked(String),

    /// A worker finished without writing its slot
    #[error("partition {0} produced no result")]
    MissingPartial(usize),
}
