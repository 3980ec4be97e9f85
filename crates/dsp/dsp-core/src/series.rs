//! Append-only price series with relative lookback.

use std::collections::VecDeque;

/// Ordered, append-only sequence of samples.
///
/// Lookback is by offset from the newest sample: `at(0)` is the latest bar,
/// `at(1)` the bar before it. With bounded retention the oldest samples are
/// evicted once the buffer is full; offsets beyond the retained range are
/// reported as `None`.
#[derive(Debug, Clone, Default)]
pub struct SeriesBuffer {
    samples: VecDeque<f64>,
    retention: Option<usize>,
    total: usize,
}

impl SeriesBuffer {
    /// Unbounded buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer that keeps at most `retention` samples (minimum 1).
    pub fn with_retention(retention: usize) -> Self {
        let retention = retention.max(1);
        Self {
            samples: VecDeque::with_capacity(retention),
            retention: Some(retention),
            total: 0,
        }
    }

    pub fn push(&mut self, sample: f64) {
        if let Some(limit) = self.retention {
            if self.samples.len() == limit {
                self.samples.pop_front();
            }
        }
        self.samples.push_back(sample);
        self.total += 1;
    }

    /// Sample `offset` bars back from the newest one.
    pub fn at(&self, offset: usize) -> Option<f64> {
        let len = self.samples.len();
        if offset >= len {
            return None;
        }
        self.samples.get(len - 1 - offset).copied()
    }

    /// Like [`at`](Self::at), substituting the newest sample when `offset`
    /// is not available yet.
    pub fn at_or_latest(&self, offset: usize) -> Option<f64> {
        self.at(offset).or_else(|| self.latest())
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples ever pushed, including evicted ones.
    pub fn total_pushed(&self) -> usize {
        self.total
    }

    pub fn retention(&self) -> Option<usize> {
        self.retention
    }

    /// `(highest, lowest)` over the retained samples.
    pub fn extremes(&self) -> Option<(f64, f64)> {
        if self.samples.is_empty() {
            return None;
        }
        let highest = self.samples.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let lowest = self.samples.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        Some((highest, lowest))
    }

    /// Retained samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.total = 0;
    }
}
