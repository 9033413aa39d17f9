//! Per-run trace state: visited set, parent map, exploration edges,
//! capped step log, and the ordered delta stream observers fold from.
//!
//! A [`RunTrace`] is created fresh for every run and never shared across
//! runs. The engine mutates it through a small set of recording methods;
//! each mutation also appends a [`Delta`], so an external observer can
//! fold the same sequence into its own copy at whatever cadence it likes
//! without ever racing the engine.

use std::collections::{HashMap, HashSet, VecDeque};

use gridprobe_core::Point;

/// Maximum number of step events retained; older events drop silently.
pub const STEP_LOG_CAP: usize = 30;

/// A human-readable progress event, optionally tied to a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepEvent {
    pub message: String,
    pub cell: Option<Point>,
    pub seq: u64,
}

/// Capped ring of the most recent [`STEP_LOG_CAP`] step events.
#[derive(Debug, Default)]
pub struct StepLog {
    events: VecDeque<StepEvent>,
    next_seq: u64,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, dropping the oldest one beyond the cap.
    pub fn push(&mut self, message: impl Into<String>, cell: Option<Point>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push_back(StepEvent {
            message: message.into(),
            cell,
            seq,
        });
        if self.events.len() > STEP_LOG_CAP {
            self.events.pop_front();
        }
    }

    /// Events in order, oldest first.
    pub fn events(&self) -> impl DoubleEndedIterator<Item = &StepEvent> + ExactSizeIterator {
        self.events.iter()
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total number of events ever pushed (including dropped ones).
    pub fn total(&self) -> u64 {
        self.next_seq
    }

    /// The cell carried by the most recent event, if any: the "current"
    /// marker the tree projection highlights.
    pub fn current(&self) -> Option<Point> {
        self.events.iter().rev().find_map(|e| e.cell)
    }
}

/// One frontier insertion (or DFS push / hill move), append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorationEdge {
    pub from: Point,
    pub to: Point,
    /// Path cost of `to` where the strategy tracks one (g-based
    /// strategies), `None` for heuristic-only strategies.
    pub cost: Option<i32>,
    pub seq: u64,
}

/// A discrete state change, in engine order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Delta {
    /// A cell was finalized/expanded.
    Expanded(Point),
    /// A cell entered the frontier (or was stepped to), attributed to a
    /// parent.
    Discovered {
        from: Point,
        to: Point,
        cost: Option<i32>,
    },
    /// A frontier entry was dropped under memory pressure.
    Evicted(Point),
}

/// All mutable state accumulated by one search run.
#[derive(Debug, Default)]
pub struct RunTrace {
    visited: HashSet<Point>,
    /// Child -> parent; the start maps to `None`. Entries are
    /// overwritten on re-attribution but never removed.
    parents: HashMap<Point, Option<Point>>,
    edges: Vec<ExplorationEdge>,
    steps: StepLog,
    deltas: Vec<Delta>,
    nodes_explored: usize,
    edge_seq: u64,
}

impl RunTrace {
    /// Fresh state rooted at `start` (which gets a `None` parent).
    pub fn begin(start: Point) -> Self {
        let mut t = Self::default();
        t.parents.insert(start, None);
        t
    }

    // -- recording ---------------------------------------------------------

    /// Mark a cell visited without counting it as an expansion.
    pub fn visit(&mut self, cell: Point) {
        self.visited.insert(cell);
    }

    /// Finalize a cell: mark visited, bump the expansion counter, emit a
    /// step event carrying the cell and the matching delta.
    pub fn expand(&mut self, cell: Point, message: impl Into<String>) {
        self.visited.insert(cell);
        self.nodes_explored += 1;
        self.steps.push(message, Some(cell));
        self.deltas.push(Delta::Expanded(cell));
    }

    /// Attribute `to` to parent `from` and log the exploration edge.
    /// Re-attribution overwrites the parent pointer; the edge log keeps
    /// every insertion.
    pub fn discover(&mut self, from: Point, to: Point, cost: Option<i32>) {
        self.parents.insert(to, Some(from));
        let seq = self.edge_seq;
        self.edge_seq += 1;
        self.edges.push(ExplorationEdge {
            from,
            to,
            cost,
            seq,
        });
        self.deltas.push(Delta::Discovered { from, to, cost });
    }

    /// Record a capacity eviction.
    pub fn evict(&mut self, cell: Point) {
        self.steps.push(format!("Forgot frontier entry {cell}"), None);
        self.deltas.push(Delta::Evicted(cell));
    }

    /// Emit a step event with no structural change.
    pub fn note(&mut self, message: impl Into<String>, cell: Option<Point>) {
        self.steps.push(message, cell);
    }

    // -- observation -------------------------------------------------------

    pub fn is_visited(&self, cell: Point) -> bool {
        self.visited.contains(&cell)
    }

    pub fn visited(&self) -> &HashSet<Point> {
        &self.visited
    }

    /// The parent of `cell`: `None` if unattributed, `Some(None)` for
    /// the start, `Some(Some(p))` otherwise.
    pub fn parent_of(&self, cell: Point) -> Option<Option<Point>> {
        self.parents.get(&cell).copied()
    }

    /// Whether `cell` has ever been attributed (start counts).
    pub fn is_discovered(&self, cell: Point) -> bool {
        self.parents.contains_key(&cell)
    }

    pub fn parents(&self) -> &HashMap<Point, Option<Point>> {
        &self.parents
    }

    pub fn edges(&self) -> &[ExplorationEdge] {
        &self.edges
    }

    pub fn steps(&self) -> &StepLog {
        &self.steps
    }

    /// The ordered delta stream since the run began.
    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    /// The "current" marker: the cell of the most recent step event.
    pub fn current(&self) -> Option<Point> {
        self.steps.current()
    }

    /// Walk parent links from `goal` back to the start and reverse.
    ///
    /// Returns an empty path if `goal` was never attributed. Relies on
    /// the run invariant that parent links are acyclic (a cell gains a
    /// parent only while unattributed, or is re-attributed before the
    /// link is followed); cycle-freedom is not re-validated here.
    pub fn reconstruct_path(&self, goal: Point) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = goal;
        loop {
            path.push(cur);
            match self.parents.get(&cur) {
                Some(Some(p)) => cur = *p,
                Some(None) => break,
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn step_log_caps_at_30() {
        let mut log = StepLog::new();
        for i in 0..40 {
            log.push(format!("step {i}"), None);
        }
        assert_eq!(log.len(), STEP_LOG_CAP);
        assert_eq!(log.total(), 40);
        let first = log.events().next().unwrap();
        assert_eq!(first.message, "step 10");
        assert_eq!(first.seq, 10);
        let last = log.events().last().unwrap();
        assert_eq!(last.seq, 39);
    }

    #[test]
    fn current_marker_follows_latest_cell() {
        let mut log = StepLog::new();
        assert_eq!(log.current(), None);
        log.push("a", Some(p(1, 1)));
        log.push("note without cell", None);
        assert_eq!(log.current(), Some(p(1, 1)));
        log.push("b", Some(p(2, 2)));
        assert_eq!(log.current(), Some(p(2, 2)));
    }

    #[test]
    fn reconstruct_path_walks_and_reverses() {
        let mut t = RunTrace::begin(p(0, 0));
        t.discover(p(0, 0), p(0, 1), Some(1));
        t.discover(p(0, 1), p(1, 1), Some(2));
        assert_eq!(
            t.reconstruct_path(p(1, 1)),
            vec![p(0, 0), p(0, 1), p(1, 1)]
        );
    }

    #[test]
    fn reconstruct_path_unattributed_goal_is_empty() {
        let t = RunTrace::begin(p(0, 0));
        assert!(t.reconstruct_path(p(3, 3)).is_empty());
    }

    #[test]
    fn reattribution_overwrites_parent_but_keeps_edges() {
        let mut t = RunTrace::begin(p(0, 0));
        t.discover(p(0, 0), p(1, 1), None);
        t.discover(p(0, 1), p(1, 1), None);
        assert_eq!(t.parent_of(p(1, 1)), Some(Some(p(0, 1))));
        assert_eq!(t.edges().len(), 2);
        assert_eq!(t.deltas().len(), 2);
    }

    #[test]
    fn expand_counts_and_marks() {
        let mut t = RunTrace::begin(p(0, 0));
        t.expand(p(0, 0), "Expanding (0, 0)");
        assert_eq!(t.nodes_explored(), 1);
        assert!(t.is_visited(p(0, 0)));
        assert_eq!(t.current(), Some(p(0, 0)));
        assert_eq!(t.deltas(), &[Delta::Expanded(p(0, 0))]);
    }
}
