//! FIFO buffering of serialized event lines awaiting delivery.
//!
//! The aggregator is an append-only queue: lines are pushed as lifecycle
//! events arrive and removed from the front only after the collector has
//! confirmed acceptance of the batch containing them. Entries are never
//! reordered or deduplicated.

use std::collections::VecDeque;

/// Buffers serialized event lines in insertion order.
///
/// `peek_batch` and `trim_front` are paired per sync attempt: the flusher
/// peeks a bounded prefix, transmits it, and trims exactly that many entries
/// on success. The single-flight guard in the flusher guarantees no other
/// trim lands between the peek and its matching trim.
#[derive(Debug, Default)]
pub struct Aggregator {
    lines: VecDeque<String>,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a serialized line. O(1), unbounded, never blocks.
    pub fn push(&mut self, line: String) {
        self.lines.push_back(line);
    }

    /// Returns up to `max` oldest lines without removing them.
    #[must_use]
    pub fn peek_batch(&self, max: usize) -> Vec<String> {
        self.lines.iter().take(max).cloned().collect()
    }

    /// Removes the `count` oldest lines, previously obtained via
    /// [`Aggregator::peek_batch`].
    pub fn trim_front(&mut self, count: usize) {
        let count = count.min(self.lines.len());
        self.lines.drain(..count);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
