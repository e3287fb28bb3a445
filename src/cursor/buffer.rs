//! Sample Buffer
//!
//! Bounded, arrival-ordered history of samples for one remote cursor.
//!
//! The transport gives no ordering guarantee: position broadcasts and
//! slower metadata updates can be reordered or duplicated independently, so
//! the buffer enforces both a per-entity sequence check and a time-based
//! duplicate check. Rejected samples are dropped silently; they are network
//! noise, not errors.

use std::collections::VecDeque;

use tracing::trace;

use super::types::Sample;

/// Two buffered samples must be at least this far apart (ms)
pub const MIN_SAMPLE_SPACING_MS: i64 = 1;

/// Number of samples a cubic interpolation window holds
pub const INTERPOLATION_WINDOW: usize = 4;

/// Time-ordered ring buffer of raw samples
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
    last_seq: Option<u64>,
}

impl SampleBuffer {
    /// Create an empty buffer holding at most `capacity` samples (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
            last_seq: None,
        }
    }

    /// Insert a sample, keeping the buffer sorted by arrival time.
    ///
    /// Returns `false` when the sample was dropped: a sequence number at or
    /// below the last accepted one, an arrival time within
    /// [`MIN_SAMPLE_SPACING_MS`] of a buffered neighbour, or a non-finite
    /// coordinate.
    pub fn push(&mut self, sample: Sample) -> bool {
        if !sample.x.is_finite() || !sample.y.is_finite() {
            trace!("Dropping non-finite sample at {}ms", sample.arrive_ms);
            return false;
        }

        if let (Some(seq), Some(last)) = (sample.seq, self.last_seq) {
            if seq <= last {
                trace!("Dropping sample seq={} (last accepted {})", seq, last);
                return false;
            }
        }

        // Insertion point after every sample that arrived no later
        let index = self
            .samples
            .partition_point(|s| s.arrive_ms <= sample.arrive_ms);

        let too_close = |neighbour: Option<&Sample>| {
            neighbour.is_some_and(|n| {
                n.arrive_ms.abs_diff(sample.arrive_ms) < MIN_SAMPLE_SPACING_MS.unsigned_abs()
            })
        };
        let before = index.checked_sub(1).and_then(|i| self.samples.get(i));
        if too_close(before) || too_close(self.samples.get(index)) {
            trace!("Dropping duplicate sample at {}ms", sample.arrive_ms);
            return false;
        }

        self.samples.insert(index, sample);
        if sample.seq.is_some() {
            self.last_seq = sample.seq;
        }

        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }

        true
    }

    /// Up to [`INTERPOLATION_WINDOW`] consecutive samples around `target_ms`.
    ///
    /// The window is centred on the bracketing pair (the last sample at or
    /// before the target and the one after it) with one sample before the
    /// pair and one after; at either end of the buffer it shifts inward so
    /// it still holds as many samples as are available. Empty only when the
    /// buffer is empty.
    pub fn surrounding(&self, target_ms: i64) -> Vec<Sample> {
        let len = self.samples.len();
        if len == 0 {
            return Vec::new();
        }

        let at_or_before = self.samples.partition_point(|s| s.arrive_ms <= target_ms);
        let lower = at_or_before.saturating_sub(1);

        let start = lower
            .saturating_sub(1)
            .min(len.saturating_sub(INTERPOLATION_WINDOW));
        let end = (start + INTERPOLATION_WINDOW).min(len);

        self.samples.range(start..end).copied().collect()
    }

    /// Most recently arrived sample
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Oldest retained sample
    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    /// Drop every sample and forget the last sequence number
    pub fn clear(&mut self) {
        self.samples.clear();
        self.last_seq = None;
    }

    /// Number of buffered samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are buffered
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Last accepted sender sequence number
    pub fn last_seq(&self) -> Option<u64> {
        self.last_seq
    }

    /// Buffered samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}
