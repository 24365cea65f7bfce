//! `WakeHeap` — binary min-heap of schedulable items keyed by wake time.
//!
//! # Why this exists
//!
//! A worker owns thousands to tens of thousands of independently-scheduled
//! trackers and must repeatedly answer "who runs next?".  A binary min-heap
//! gives O(log n) push/pop and — crucially for startup latency — O(n)
//! construction from an unordered batch via bottom-up heapify, instead of
//! the O(n log n) of n sequential pushes.
//!
//! # Ordering contract
//!
//! Entries are ordered by `(wake_time, insertion_seq)`.  The sequence number
//! is a per-heap monotonic counter, so items with *equal* wake times pop in
//! insertion order (stable FIFO).  That tie-break does two jobs:
//!
//! - pop order is fully deterministic, which keeps tests exact, and
//! - a tracker that re-inserts itself at the *same* timestamp goes to the
//!   back of that timestamp's line, so it interleaves with its peers rather
//!   than starving them.
//!
//! A plain `std::collections::BinaryHeap` was not used because its ordering
//! is unstable among equal keys and it cannot express the second property
//! without embedding the counter in every element anyway.

use parcel_core::SimTime;

/// Implemented by anything the heap can schedule.
///
/// Only consulted when building a heap from a batch — after that, wake
/// times travel alongside the item as explicit keys (the scheduler decides
/// the re-insertion time, not the item).
pub trait Wake {
    /// The simulated timestamp at which this item next wants to run.
    fn wake_at(&self) -> SimTime;
}

// ── Entry ─────────────────────────────────────────────────────────────────────

struct Entry<T> {
    wake: SimTime,
    seq:  u64,
    item: T,
}

impl<T> Entry<T> {
    /// Composite ordering key: wake time first, insertion order second.
    #[inline]
    fn key(&self) -> (SimTime, u64) {
        (self.wake, self.seq)
    }
}

// ── WakeHeap ──────────────────────────────────────────────────────────────────

/// A binary min-heap keyed by `(wake_time, insertion_seq)`.
///
/// Owned by exactly one worker; all operations are `&mut self` and the type
/// is deliberately not `Clone` or shareable.
pub struct WakeHeap<T> {
    /// Implicit binary tree: children of `i` are `2i + 1` and `2i + 2`.
    entries:  Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for WakeHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WakeHeap<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_seq: 0 }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The smallest wake time currently held, without removing it.
    pub fn peek_wake(&self) -> Option<SimTime> {
        self.entries.first().map(|e| e.wake)
    }

    /// Schedule `item` to run at `wake`.  O(log n).
    pub fn push(&mut self, wake: SimTime, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { wake, seq, item });
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the item with the smallest key, together with its
    /// wake time.  O(log n).  `None` when empty.
    pub fn pop_min(&mut self) -> Option<(SimTime, T)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let entry = self.entries.pop()?;
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((entry.wake, entry.item))
    }

    // ── Sift operations ───────────────────────────────────────────────────

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.entries[i].key() >= self.entries[parent].key() {
                break;
            }
            self.entries.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < len && self.entries[right].key() < self.entries[left].key() {
                smallest = right;
            }
            if self.entries[smallest].key() >= self.entries[i].key() {
                break;
            }
            self.entries.swap(i, smallest);
            i = smallest;
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_heap_property(&self) {
        for i in 1..self.entries.len() {
            let parent = (i - 1) / 2;
            assert!(
                self.entries[parent].key() <= self.entries[i].key(),
                "heap property violated at index {i}"
            );
        }
    }
}

impl<T: Wake> WakeHeap<T> {
    /// Build a heap from an unordered batch in O(n).
    ///
    /// Sequence numbers are assigned in batch order, so items sharing a wake
    /// time pop in the order they appear in `items` — identical to pushing
    /// them sequentially, just cheaper.
    pub fn from_batch(items: Vec<T>) -> Self {
        let entries: Vec<Entry<T>> = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| Entry { wake: item.wake_at(), seq: i as u64, item })
            .collect();
        let next_seq = entries.len() as u64;
        let mut heap = Self { entries, next_seq };

        // Bottom-up heapify: sift down every internal node, last parent first.
        let len = heap.entries.len();
        if len > 1 {
            for i in (0..len / 2).rev() {
                heap.sift_down(i);
            }
        }
        heap
    }
}
