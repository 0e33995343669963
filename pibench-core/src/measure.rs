//! Wall-Clock Timing
//!
//! [`Timer`] brackets one end-to-end reduction. [`ChunkClock`] stamps the
//! start and stop of individual chunk evaluations relative to a shared epoch
//! so spans from different workers and trials line up on one time axis.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Timer for measuring one trial
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since [`Timer::start`]
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed nanoseconds, saturating at `u64::MAX`
    #[inline(always)]
    pub fn stop_nanos(&self) -> u64 {
        u64::try_from(self.stop().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Time reference handed to workers when per-chunk timing is requested
#[derive(Debug, Clone, Copy)]
pub struct ChunkClock {
    epoch: Instant,
    trial: usize,
}

impl ChunkClock {
    /// Clock anchored at `epoch`, stamping spans with `trial`
    pub fn new(epoch: Instant, trial: usize) -> Self {
        Self { epoch, trial }
    }

    /// Same epoch, next trial number
    pub fn for_trial(self, trial: usize) -> Self {
        Self { trial, ..self }
    }

    fn offset_ns(&self, at: Instant) -> u64 {
        u64::try_from(at.saturating_duration_since(self.epoch).as_nanos()).unwrap_or(u64::MAX)
    }

    /// Build the span of one chunk evaluation
    pub fn span(&self, partition: usize, started: Instant, stopped: Instant) -> ChunkSpan {
        ChunkSpan {
            partition,
            trial: self.trial,
            start_ns: self.offset_ns(started),
            stop_ns: self.offset_ns(stopped),
        }
    }
}

/// Wall-clock span of one chunk evaluation, keyed by (partition, trial)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSpan {
    /// Partition id
    pub partition: usize,
    /// Trial number within the configuration
    pub trial: usize,
    /// Start offset from the run epoch (ns)
    pub start_ns: u64,
    /// Stop offset from the run epoch (ns)
    pub stop_ns: u64,
}

impl ChunkSpan {
    /// Duration of the evaluation (ns)
    pub fn duration_ns(&self) -> u64 {
        self.stop_ns.saturating_sub(self.start_ns)
    }
}
