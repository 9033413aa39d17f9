//! SMA*: A* under a bounded frontier.
//!
//! When an insert overflows the configured capacity, the single worst
//! frontier entry is forgotten. The victim's g-score is dropped too so a
//! later route can re-discover it, but no backed-up f-value is
//! propagated to its parent; this is a deliberate approximation of
//! canonical SMA*, and under heavy eviction pressure the search may
//! report "no path" even when one exists.

use std::collections::HashMap;

use gridprobe_core::{Grid, Point, manhattan};

use crate::frontier::Frontier;
use crate::result::SearchResult;
use crate::strategy::{Search, StepOutcome};
use crate::trace::RunTrace;

/// Memory-bounded A*.
pub struct SmaStar {
    start: Point,
    goal: Point,
    frontier: Frontier,
    g: HashMap<Point, i32>,
    nbuf: Vec<Point>,
}

impl SmaStar {
    pub fn new(start: Point, goal: Point, frontier_cap: usize) -> Self {
        Self {
            start,
            goal,
            frontier: Frontier::bounded(frontier_cap),
            g: HashMap::new(),
            nbuf: Vec::with_capacity(4),
        }
    }
}

impl Search for SmaStar {
    fn begin(&mut self, _grid: &Grid, trace: &mut RunTrace) {
        self.g.insert(self.start, 0);
        self.frontier
            .insert(self.start, manhattan(self.start, self.goal));
        trace.note(
            format!(
                "SMA* search from {} (frontier capped at {})",
                self.start,
                self.frontier.capacity().unwrap_or(0)
            ),
            Some(self.start),
        );
    }

    fn step(&mut self, grid: &Grid, trace: &mut RunTrace) -> StepOutcome {
        let Some((cell, _)) = self.frontier.pop() else {
            trace.note("Frontier exhausted, no path found", None);
            return StepOutcome::Finished(SearchResult::failure(trace.nodes_explored()));
        };

        // Goal test before the revisit check.
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
            if !improved {
                continue;
            }
            self.g.insert(n, tentative);
            trace.discover(cell, n, Some(tentative));
            if let Some(victim) = self.frontier.insert(n, tentative + manhattan(n, self.goal)) {
                log::trace!("SMA* forgot {victim} under memory pressure");
                // Forget the victim entirely so it can be re-discovered.
                self.g.remove(&victim);
                trace.evict(victim);
            }
        }

        StepOutcome::Pending
    }
}
