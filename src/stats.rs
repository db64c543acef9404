//! Rolling latency statistics.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;

/// At or below this sample count, p95 reports the maximum sample.
pub const P95_SPARSE_N: usize = 20;
/// At or below this sample count, p99 reports the maximum sample.
pub const P99_SPARSE_N: usize = 100;

/// Percentile summary over the current latency window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LatencySummary {
    /// Arithmetic mean of buffered samples.
    pub mean: Duration,
    /// Median (nearest-rank).
    pub p50: Duration,
    /// 95th percentile (nearest-rank, max fallback on sparse data).
    pub p95: Duration,
    /// 99th percentile (nearest-rank, max fallback on sparse data).
    pub p99: Duration,
}

/// Bounded FIFO buffer of latency samples with percentile computation.
///
/// Pushing beyond capacity evicts the oldest sample, so the buffer
/// always holds the most recent `capacity` observations.
#[derive(Debug, Clone)]
pub struct RollingStats {
    capacity: usize,
    samples: VecDeque<Duration>,
}

impl RollingStats {
    /// Create an empty buffer holding at most `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, evicting the oldest once full.
    pub fn push(&mut self, sample: Duration) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Buffered samples in push order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Duration> + '_ {
        self.samples.iter().copied()
    }

    /// Compute the percentile summary over the current buffer.
    ///
    /// Percentiles use the nearest-rank estimator: sort ascending and
    /// pick the sample at index floor(n * k), clamped to the last
    /// index. On sparse data the tail percentiles fall back to the
    /// maximum observed sample instead of an unstable estimate. An
    /// empty buffer yields all zeros.
    pub fn summary(&self) -> LatencySummary {
        if self.samples.is_empty() {
            return LatencySummary::default();
        }

        let mut sorted: Vec<Duration> = self.samples.iter().copied().collect();
        sorted.sort_unstable();
        let n = sorted.len();
        let max = sorted[n - 1];
        let nearest_rank = |k: f64| sorted[((n as f64 * k) as usize).min(n - 1)];

        let total: Duration = sorted.iter().sum();

        LatencySummary {
            mean: total / n as u32,
            p50: nearest_rank(0.50),
            p95: if n <= P95_SPARSE_N {
                max
            } else {
                nearest_rank(0.95)
            },
            p99: if n <= P99_SPARSE_N {
                max
            } else {
                nearest_rank(0.99)
            },
        }
    }
}
