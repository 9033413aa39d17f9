//! Best-First search: expansion ordered by the heuristic alone.

use gridprobe_core::{Grid, Point, manhattan};

use crate::frontier::Frontier;
use crate::result::SearchResult;
use crate::strategy::{Search, StepOutcome};
use crate::trace::RunTrace;

/// Best-First search. Priority is h only, so paths are not guaranteed
/// optimal; re-inserting a neighbor overwrites its parent attribution
/// even without any cost improvement.
pub struct BestFirst {
    start: Point,
    goal: Point,
    frontier: Frontier,
    nbuf: Vec<Point>,
}

impl BestFirst {
    pub fn new(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            frontier: Frontier::new(),
            nbuf: Vec::with_capacity(4),
        }
    }
}

impl Search for BestFirst {
    fn begin(&mut self, _grid: &Grid, trace: &mut RunTrace) {
        self.frontier
            .insert(self.start, manhattan(self.start, self.goal));
        trace.note(
            format!("Best-First search from {}", self.start),
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
            if !trace.is_visited(n) {
                trace.discover(cell, n, None);
                self.frontier.insert(n, manhattan(n, self.goal));
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

    #[test]
    fn reaches_goal_on_open_grid() {
        let runner = Runner::new(Grid::new(5, 5), Point::new(1, 1), Point::new(3, 3)).unwrap();
        let report = runner.run(StrategyKind::BestFirst);
        assert!(report.result.success);
        assert_eq!(report.result.path[0], Point::new(1, 1));
        assert_eq!(*report.result.path.last().unwrap(), Point::new(3, 3));
    }

    #[test]
    fn fails_cleanly_when_goal_unreachable() {
        let mut grid = Grid::new(7, 7);
        // Box the goal in.
        let goal = Point::new(5, 5);
        for d in gridprobe_core::Dir::ALL {
            grid.set(goal.step(d), Terrain::Wall);
        }
        let runner = Runner::new(grid, Point::new(1, 1), goal).unwrap();
        let report = runner.run(StrategyKind::BestFirst);
        assert!(!report.result.success);
        assert!(report.result.path.is_empty());
        assert!(report.result.nodes_explored >= 1);
    }
}
