//! Greedy search: h-ordered like Best-First, but a cell is inserted
//! into the frontier at most once and stale entries are never displaced.

use gridprobe_core::{Grid, Point, manhattan};

use crate::frontier::Frontier;
use crate::result::SearchResult;
use crate::strategy::{Search, StepOutcome};
use crate::trace::RunTrace;

/// Greedy search. A neighbor already attributed a parent is never
/// re-inserted, even when a cheaper route to it appears later; this is
/// why greedy paths can be longer than A*'s.
pub struct Greedy {
    start: Point,
    goal: Point,
    frontier: Frontier,
    nbuf: Vec<Point>,
}

impl Greedy {
    pub fn new(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            frontier: Frontier::new(),
            nbuf: Vec::with_capacity(4),
        }
    }
}

impl Search for Greedy {
    fn begin(&mut self, _grid: &Grid, trace: &mut RunTrace) {
        self.frontier
            .push(self.start, manhattan(self.start, self.goal));
        trace.note(
            format!("Greedy search from {}", self.start),
            Some(self.start),
        );
    }

    fn step(&mut self, grid: &Grid, trace: &mut RunTrace) -> StepOutcome {
        let Some((cell, _)) = self.frontier.pop() else {
            trace.note("Frontier exhausted, no path exists", None);
            return StepOutcome::Finished(SearchResult::failure(trace.nodes_explored()));
        };

        if cell == self.goal {
            trace.note(format!("Goal reached at {cell}"), Some(cell));
            let path = trace.reconstruct_path(self.goal);
            return StepOutcome::Finished(SearchResult::success(path, trace.nodes_explored()));
        }

        if trace.is_visited(cell) {
            return StepOutcome::Pending;
        }

        trace.expand(
            cell,
            format!("Expanding {cell} (h = {})", manhattan(cell, self.goal)),
        );

        self.nbuf.clear();
        grid.open_neighbors(cell, &mut self.nbuf);
        for i in 0..self.nbuf.len() {
            let n = self.nbuf[i];
            if !trace.is_visited(n) && !trace.is_discovered(n) {
                trace.discover(cell, n, None);
                self.frontier.push(n, manhattan(n, self.goal));
            }
        }

        StepOutcome::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Runner;
    use crate::strategy::StrategyKind;
    use gridprobe_core::Terrain;

    /// A pocket facing the goal: greedy dives in and has to climb back
    /// out, A* goes around.
    fn trap_grid() -> (Grid, Point, Point) {
        let mut grid = Grid::new(9, 9);
        // U-shaped wall opening away from the goal.
        for y in 2..7 {
            grid.set(Point::new(5, y), Terrain::Wall);
        }
        for x in 2..6 {
            grid.set(Point::new(x, 2), Terrain::Wall);
            grid.set(Point::new(x, 6), Terrain::Wall);
        }
        (grid, Point::new(3, 4), Point::new(7, 4))
    }

    #[test]
    fn astar_never_longer_than_greedy() {
        let (grid, start, goal) = trap_grid();
        let runner = Runner::new(grid, start, goal).unwrap();
        let astar = runner.run(StrategyKind::AStar);
        let greedy = runner.run(StrategyKind::Greedy);
        assert!(astar.result.success);
        assert!(greedy.result.success);
        assert!(astar.result.path.len() <= greedy.result.path.len());
    }

    #[test]
    fn parent_attribution_is_first_discovery() {
        let runner = Runner::new(Grid::new(5, 5), Point::new(1, 1), Point::new(3, 3)).unwrap();
        let report = runner.run(StrategyKind::Greedy);
        assert!(report.result.success);
        // Every discovered cell has exactly one edge: no re-insertions.
        let mut seen = std::collections::HashSet::new();
        for e in report.trace.edges() {
            assert!(seen.insert(e.to), "cell {} re-inserted", e.to);
        }
    }
}
