//! IDA*: iterative-deepening A* as an explicit depth-first probe.
//!
//! The probe is a hand-rolled DFS stack rather than language recursion,
//! which keeps depth explicit and lets the driver suspend between
//! expansions like every other strategy.

use std::collections::HashSet;

use gridprobe_core::{Dir, Grid, Point, manhattan};

use crate::result::SearchResult;
use crate::strategy::{Search, StepOutcome};
use crate::trace::RunTrace;

#[derive(Debug)]
struct Frame {
    cell: Point,
    g: i32,
    /// Index into [`Dir::ALL`]; next neighbor direction to try.
    next_dir: usize,
    /// Whether entry processing (bound check, goal test, expansion) ran.
    entered: bool,
}

impl Frame {
    fn new(cell: Point, g: i32) -> Self {
        Self {
            cell,
            g,
            next_dir: 0,
            entered: false,
        }
    }
}

/// IDA* search. Memory-bounded and optimal: each iteration is a
/// depth-first probe pruned at `f > bound`, and the bound rises to the
/// smallest pruned f-value until the goal is found or no candidate bound
/// remains (no path).
pub struct IdaStar {
    start: Point,
    goal: Point,
    bound: i32,
    /// Minimum f-value that exceeded the bound this iteration.
    next_bound: Option<i32>,
    stack: Vec<Frame>,
    /// Cells on the current DFS path; the only revisit check IDA* does.
    on_path: HashSet<Point>,
}

impl IdaStar {
    pub fn new(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            bound: manhattan(start, goal),
            next_bound: None,
            stack: Vec::new(),
            on_path: HashSet::new(),
        }
    }

    fn restart(&mut self) {
        self.stack.clear();
        self.on_path.clear();
        self.stack.push(Frame::new(self.start, 0));
        self.on_path.insert(self.start);
    }
}

impl Search for IdaStar {
    fn begin(&mut self, _grid: &Grid, trace: &mut RunTrace) {
        self.restart();
        trace.note(
            format!("IDA* from {} with bound {}", self.start, self.bound),
            Some(self.start),
        );
    }

    fn step(&mut self, grid: &Grid, trace: &mut RunTrace) -> StepOutcome {
        let Some(top) = self.stack.last_mut() else {
            // Iteration exhausted: raise the bound or give up.
            return match self.next_bound.take() {
                Some(b) => {
                    self.bound = b;
                    self.restart();
                    trace.note(format!("Raising bound to {b}"), None);
                    StepOutcome::Pending
                }
                None => {
                    trace.note("Search space exhausted, no path exists", None);
                    StepOutcome::Finished(SearchResult::failure(trace.nodes_explored()))
                }
            };
        };

        if !top.entered {
            let cell = top.cell;
            let f = top.g + manhattan(cell, self.goal);
            if f > self.bound {
                // Prune; f becomes a candidate for the next bound.
                self.next_bound = Some(match self.next_bound {
                    Some(nb) => nb.min(f),
                    None => f,
                });
                self.on_path.remove(&cell);
                self.stack.pop();
                return StepOutcome::Pending;
            }
            if cell == self.goal {
                trace.note(format!("Goal reached at {cell}"), Some(cell));
                let path = trace.reconstruct_path(self.goal);
                return StepOutcome::Finished(SearchResult::success(
                    path,
                    trace.nodes_explored(),
                ));
            }
            top.entered = true;
            trace.expand(cell, format!("Expanding {cell} (g = {}, bound = {})", top.g, self.bound));
            return StepOutcome::Pending;
        }

        // Neighbor-scanning phase: descend into the next viable child.
        let (cell, g) = (top.cell, top.g);
        while let Some(frame) = self.stack.last_mut() {
            if frame.next_dir >= Dir::ALL.len() {
                break;
            }
            let d = Dir::ALL[frame.next_dir];
            frame.next_dir += 1;
            let n = cell.step(d);
            if grid.is_open(n) && !self.on_path.contains(&n) {
                trace.discover(cell, n, Some(g + 1));
                self.on_path.insert(n);
                self.stack.push(Frame::new(n, g + 1));
                return StepOutcome::Pending;
            }
        }

        // All children done; backtrack.
        self.on_path.remove(&cell);
        self.stack.pop();
        StepOutcome::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Runner;
    use crate::strategy::StrategyKind;
    use gridprobe_core::Terrain;

    fn optimal_len(grid: &Grid, start: Point, goal: Point) -> Option<usize> {
        let runner = Runner::new(grid.clone(), start, goal).unwrap();
        let r = runner.run(StrategyKind::AStar);
        r.result.success.then_some(r.result.path.len())
    }

    #[test]
    fn matches_astar_on_empty_grid() {
        let grid = Grid::new(5, 5);
        let (start, goal) = (Point::new(1, 1), Point::new(3, 3));
        let runner = Runner::new(grid.clone(), start, goal).unwrap();
        let ida = runner.run(StrategyKind::IdaStar);
        assert!(ida.result.success);
        assert_eq!(Some(ida.result.path.len()), optimal_len(&grid, start, goal));
        assert_eq!(ida.result.path.len(), 5);
    }

    #[test]
    fn matches_astar_through_a_maze() {
        let mut grid = Grid::new(9, 9);
        for y in 0..8 {
            grid.set(Point::new(3, y), Terrain::Wall);
        }
        for y in 1..9 {
            grid.set(Point::new(6, y), Terrain::Wall);
        }
        let (start, goal) = (Point::new(1, 4), Point::new(8, 4));
        let runner = Runner::new(grid.clone(), start, goal).unwrap();
        let ida = runner.run(StrategyKind::IdaStar);
        assert!(ida.result.success);
        assert_eq!(Some(ida.result.path.len()), optimal_len(&grid, start, goal));
    }

    #[test]
    fn walled_in_start_fails_after_one_expansion() {
        let mut grid = Grid::new(5, 5);
        let start = Point::new(2, 2);
        for d in Dir::ALL {
            grid.set(start.step(d), Terrain::Wall);
        }
        let runner = Runner::new(grid, start, Point::new(4, 4)).unwrap();
        let report = runner.run(StrategyKind::IdaStar);
        assert!(!report.result.success);
        assert!(report.result.path.is_empty());
        assert_eq!(report.result.nodes_explored, 1);
    }

    #[test]
    fn unreachable_goal_terminates() {
        let mut grid = Grid::new(6, 6);
        // Split the grid in two with a full wall column.
        for y in 0..6 {
            grid.set(Point::new(3, y), Terrain::Wall);
        }
        let runner = Runner::new(grid, Point::new(1, 2), Point::new(5, 2)).unwrap();
        let report = runner.run(StrategyKind::IdaStar);
        assert!(!report.result.success);
    }
}
