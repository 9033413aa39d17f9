//! Hill Climbing: frontier-less local search by strict heuristic descent.

use gridprobe_core::{Grid, Point, manhattan};

use crate::result::SearchResult;
use crate::strategy::{Search, StepOutcome};
use crate::trace::RunTrace;

/// Hill Climbing. At each step the current cell moves to the neighbor
/// with the strictly lowest heuristic (first wins on ties); when no
/// neighbor strictly improves, the search halts at a local optimum and
/// reports failure even if the goal is still reachable elsewhere. That
/// is the point of the strategy, not a bug.
pub struct HillClimb {
    start: Point,
    goal: Point,
    current: Point,
    moves: usize,
    /// Hard stop; strict descent provably halts well before this.
    max_moves: usize,
    nbuf: Vec<Point>,
}

impl HillClimb {
    pub fn new(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            current: start,
            moves: 0,
            max_moves: 0,
            nbuf: Vec::with_capacity(4),
        }
    }
}

impl Search for HillClimb {
    fn begin(&mut self, grid: &Grid, trace: &mut RunTrace) {
        self.current = self.start;
        self.max_moves = (grid.width() * grid.height()).max(1) as usize;
        trace.visit(self.start);
        trace.note(
            format!("Hill climbing from {}", self.start),
            Some(self.start),
        );
    }

    fn step(&mut self, grid: &Grid, trace: &mut RunTrace) -> StepOutcome {
        if self.moves >= self.max_moves {
            trace.note("Move budget exhausted", Some(self.current));
            return StepOutcome::Finished(SearchResult::failure(trace.nodes_explored()));
        }

        self.nbuf.clear();
        grid.open_neighbors(self.current, &mut self.nbuf);
        if self.nbuf.is_empty() {
            trace.note(
                format!("No neighbors at {}, giving up", self.current),
                Some(self.current),
            );
            return StepOutcome::Finished(SearchResult::failure(trace.nodes_explored()));
        }

        let mut best = self.nbuf[0];
        let mut best_h = manhattan(best, self.goal);
        for &n in &self.nbuf[1..] {
            let h = manhattan(n, self.goal);
            if h < best_h {
                best = n;
                best_h = h;
            }
        }

        if best_h >= manhattan(self.current, self.goal) {
            trace.note(
                format!("Stuck at local optimum {}", self.current),
                Some(self.current),
            );
            return StepOutcome::Finished(SearchResult::failure(trace.nodes_explored()));
        }

        trace.discover(self.current, best, None);
        trace.expand(best, format!("Moved to {best} (h = {best_h})"));
        self.current = best;
        self.moves += 1;

        if best == self.goal {
            let path = trace.reconstruct_path(self.goal);
            return StepOutcome::Finished(SearchResult::success(path, trace.nodes_explored()));
        }

        StepOutcome::Pending
    }
}
