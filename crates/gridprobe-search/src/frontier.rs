//! The [`Frontier`]: an ordered multiset of candidate cells.
//!
//! Entries are keyed by `(priority, seq)` where `seq` is a monotonically
//! increasing insertion counter, so equal priorities pop in FIFO order.
//! An optional capacity bound evicts the single worst entry whenever an
//! insert overflows it (SMA*'s memory bound).

use std::collections::{BTreeSet, HashMap};

use gridprobe_core::Point;

/// A frontier entry. Derived ordering is priority first, then insertion
/// order, which gives stable FIFO tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    priority: i32,
    seq: u64,
    cell: Point,
}

/// Priority-ordered candidate set with stable ties and optional capacity.
#[derive(Debug, Default)]
pub struct Frontier {
    entries: BTreeSet<Entry>,
    /// Latest replaceable entry per cell, as its (priority, seq) key.
    index: HashMap<Point, (i32, u64)>,
    seq: u64,
    capacity: Option<usize>,
}

impl Frontier {
    /// Create an unbounded frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frontier holding at most `cap` entries.
    pub fn bounded(cap: usize) -> Self {
        Self {
            capacity: Some(cap.max(1)),
            ..Self::default()
        }
    }

    /// The capacity bound, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of entries (counting duplicates).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Insert-or-replace: any existing entry for `cell` is removed
    /// before the new one goes in, so relaxation replaces stale
    /// priorities instead of duplicating them.
    ///
    /// Returns the cell evicted by the capacity check, if any.
    pub fn insert(&mut self, cell: Point, priority: i32) -> Option<Point> {
        if let Some(&(old_priority, old_seq)) = self.index.get(&cell) {
            self.entries.remove(&Entry {
                priority: old_priority,
                seq: old_seq,
                cell,
            });
        }
        self.place(cell, priority)
    }

    /// Append an entry without displacing any existing entry for the
    /// same cell. Stale duplicates accumulate and must be skipped by the
    /// caller's visited check on pop.
    ///
    /// Returns the cell evicted by the capacity check, if any.
    pub fn push(&mut self, cell: Point, priority: i32) -> Option<Point> {
        self.place(cell, priority)
    }

    fn place(&mut self, cell: Point, priority: i32) -> Option<Point> {
        let seq = self.seq;
        self.seq += 1;
        self.entries.insert(Entry {
            priority,
            seq,
            cell,
        });
        self.index.insert(cell, (priority, seq));
        self.enforce_capacity()
    }

    /// Evict the worst-priority entry if the capacity bound is exceeded.
    fn enforce_capacity(&mut self) -> Option<Point> {
        let cap = self.capacity?;
        if self.entries.len() <= cap {
            return None;
        }
        let worst = *self.entries.last()?;
        self.entries.remove(&worst);
        if self.index.get(&worst.cell) == Some(&(worst.priority, worst.seq)) {
            self.index.remove(&worst.cell);
        }
        Some(worst.cell)
    }

    /// Extract the minimum-priority entry (FIFO among ties).
    pub fn pop(&mut self) -> Option<(Point, i32)> {
        let first = *self.entries.first()?;
        self.entries.remove(&first);
        if self.index.get(&first.cell) == Some(&(first.priority, first.seq)) {
            self.index.remove(&first.cell);
        }
        Some((first.cell, first.priority))
    }
}
