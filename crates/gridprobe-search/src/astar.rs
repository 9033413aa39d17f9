//! A* search: f = g + h with relaxation.

use std::collections::HashMap;

use gridprobe_core::{Grid, Point, manhattan};

use crate::frontier::Frontier;
use crate::result::SearchResult;
use crate::strategy::{Search, StepOutcome};
use crate::trace::RunTrace;

/// A* over the occupancy grid with the Manhattan heuristic.
///
/// Optimal: the heuristic is admissible and consistent for 4-directional
/// unit-cost movement.
pub struct AStar {
    start: Point,
    goal: Point,
    frontier: Frontier,
    g: HashMap<Point, i32>,
    nbuf: Vec<Point>,
}

impl AStar {
    pub fn new(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            frontier: Frontier::new(),
            g: HashMap::new(),
            nbuf: Vec::with_capacity(4),
        }
    }
}

impl Search for AStar {
    fn begin(&mut self, _grid: &Grid, trace: &mut RunTrace) {
        self.g.insert(self.start, 0);
        self.frontier
            .insert(self.start, manhattan(self.start, self.goal));
        trace.note(format!("A* search from {}", self.start), Some(self.start));
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

        let g_cell = self.g.get(&cell).copied().unwrap_or(0);
        trace.expand(
            cell,
            format!("Expanding {cell} (f = {})", g_cell + manhattan(cell, self.goal)),
        );

        self.nbuf.clear();
        grid.open_neighbors(cell, &mut self.nbuf);
        for i in 0..self.nbuf.len() {
            let n = self.nbuf[i];
            let tentative = g_cell + 1;
            let improved = match self.g.get(&n) {
                Some(&old) => tentative < old,
                None => true,
            };
            if improved {
                self.g.insert(n, tentative);
                trace.discover(cell, n, Some(tentative));
                self.frontier.insert(n, tentative + manhattan(n, self.goal));
            }
        }

        StepOutcome::Pending
    }
}
