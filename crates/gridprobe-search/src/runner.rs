//! The run driver: validates endpoints, owns the shared read-only grid,
//! and advances a strategy step by step with observation, pacing,
//! cooperative cancellation, and panic containment.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use gridprobe_core::{Grid, GridError, Point};

use crate::result::{RunReport, SearchResult};
use crate::strategy::{DEFAULT_FRONTIER_CAP, Search, StepOutcome, StrategyKind};
use crate::trace::RunTrace;

/// Knobs that do not change what a strategy computes.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Frontier capacity for SMA*.
    pub frontier_cap: usize,
    /// Invoke the observer every this many suspension points. Pacing
    /// only affects how often the consumer gets to look, never the
    /// expansion order.
    pub observe_every: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frontier_cap: DEFAULT_FRONTIER_CAP,
            observe_every: 1,
        }
    }
}

/// Drives searches over one grid/start/goal configuration.
///
/// The grid is validated once and read-only afterwards, so one `Runner`
/// can serve any number of sequential runs; every run gets a fresh
/// [`RunTrace`], which is what makes runs non-re-entrant by
/// construction.
#[derive(Debug, Clone)]
pub struct Runner {
    grid: Grid,
    start: Point,
    goal: Point,
}

impl Runner {
    /// Validate the configuration and force the endpoints open (the only
    /// silent correction allowed; everything else is rejected).
    pub fn new(mut grid: Grid, start: Point, goal: Point) -> Result<Self, GridError> {
        grid.check_endpoints(start, goal)?;
        grid.force_open(start);
        grid.force_open(goal);
        Ok(Self { grid, start, goal })
    }

    /// The grid being searched.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Run a strategy to completion with default pacing and no observer.
    pub fn run(&self, kind: StrategyKind) -> RunReport {
        self.run_with(kind, &RunConfig::default(), |_| true)
    }

    /// Run a strategy, letting `observer` look at the trace at every
    /// pacing interval. The observer returns `false` to cancel the run
    /// cooperatively at the next suspension point.
    ///
    /// Any panic escaping the strategy is caught here, surfaced as a
    /// final step event, and turned into a failed report; it never
    /// crosses the run boundary.
    pub fn run_with(
        &self,
        kind: StrategyKind,
        cfg: &RunConfig,
        observer: impl FnMut(&RunTrace) -> bool,
    ) -> RunReport {
        let search = kind.build(self.start, self.goal, cfg.frontier_cap);
        self.run_strategy(kind.label(), search, cfg, observer)
    }

    /// Drive an arbitrary [`Search`] implementation. This is the actual
    /// run boundary: [`run`](Runner::run) and [`run_with`](Runner::run_with)
    /// delegate here.
    pub fn run_strategy(
        &self,
        label: &str,
        mut search: Box<dyn Search>,
        cfg: &RunConfig,
        mut observer: impl FnMut(&RunTrace) -> bool,
    ) -> RunReport {
        let started = Instant::now();
        let mut trace = RunTrace::begin(self.start);
        let pace = cfg.observe_every.max(1);

        log::debug!(
            "{label} run: {} -> {} on {}x{} grid",
            self.start,
            self.goal,
            self.grid.width(),
            self.grid.height()
        );

        search.begin(&self.grid, &mut trace);

        let mut steps: u64 = 0;
        let result = loop {
            let outcome = catch_unwind(AssertUnwindSafe(|| search.step(&self.grid, &mut trace)));
            match outcome {
                Ok(StepOutcome::Finished(result)) => break result,
                Ok(StepOutcome::Pending) => {}
                Err(panic) => {
                    let what = panic_message(&*panic);
                    trace.note(format!("Internal fault: {what}"), None);
                    log::warn!("{label} run aborted by internal fault: {what}");
                    break SearchResult::failure(trace.nodes_explored());
                }
            }
            steps += 1;
            if steps % pace as u64 == 0 && !observer(&trace) {
                trace.note("Run cancelled", None);
                break SearchResult::failure(trace.nodes_explored());
            }
        };

        let elapsed = started.elapsed();
        log::debug!(
            "{label} finished: success={} path_len={} explored={} in {elapsed:?}",
            result.success,
            result.path.len(),
            result.nodes_explored
        );

        RunReport {
            result,
            elapsed,
            trace,
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StepOutcome;
    use crate::tree::exploration_tree;
    use gridprobe_core::{Dir, Terrain};

    #[test]
    fn rejects_invalid_endpoints() {
        assert!(Runner::new(Grid::new(5, 5), Point::new(1, 1), Point::new(9, 9)).is_err());
        assert!(Runner::new(Grid::new(5, 5), Point::new(2, 2), Point::new(2, 2)).is_err());
    }

    #[test]
    fn forces_endpoints_open() {
        let mut grid = Grid::new(5, 5);
        grid.set(Point::new(1, 1), Terrain::Wall);
        grid.set(Point::new(3, 3), Terrain::Wall);
        let runner = Runner::new(grid, Point::new(1, 1), Point::new(3, 3)).unwrap();
        assert!(runner.grid().is_open(Point::new(1, 1)));
        assert!(runner.grid().is_open(Point::new(3, 3)));
    }

    #[test]
    fn every_strategy_handles_walled_in_start() {
        let mut grid = Grid::new(6, 6);
        let start = Point::new(2, 2);
        for d in Dir::ALL {
            grid.set(start.step(d), Terrain::Wall);
        }
        let runner = Runner::new(grid, start, Point::new(4, 4)).unwrap();
        for kind in StrategyKind::ALL {
            let report = runner.run(kind);
            assert!(!report.result.success, "{kind} should fail");
            assert!(report.result.path.is_empty(), "{kind} path not empty");
            let expected = if kind == StrategyKind::HillClimbing { 0 } else { 1 };
            assert_eq!(
                report.result.nodes_explored, expected,
                "{kind} explored count"
            );
        }
    }

    #[test]
    fn every_strategy_succeeds_on_open_grid() {
        let runner = Runner::new(Grid::new(7, 7), Point::new(1, 1), Point::new(5, 5)).unwrap();
        for kind in StrategyKind::ALL {
            let report = runner.run(kind);
            assert!(report.result.success, "{kind} should succeed");
            assert_eq!(report.result.path[0], Point::new(1, 1));
            assert_eq!(*report.result.path.last().unwrap(), Point::new(5, 5));
            assert!(report.result.nodes_explored >= 1);
            // Path includes both endpoints.
            assert!(report.result.path.len() >= 2);
        }
    }

    #[test]
    fn observer_sees_monotone_progress_and_can_cancel() {
        let runner = Runner::new(Grid::new(11, 11), Point::new(1, 1), Point::new(9, 9)).unwrap();
        let mut observations = 0usize;
        let mut last_deltas = 0usize;
        let report = runner.run_with(StrategyKind::AStar, &RunConfig::default(), |trace| {
            observations += 1;
            assert!(trace.deltas().len() >= last_deltas);
            last_deltas = trace.deltas().len();
            observations < 5
        });
        assert_eq!(observations, 5);
        assert!(!report.result.success);
        let cancelled = report
            .trace
            .steps()
            .events()
            .any(|e| e.message == "Run cancelled");
        assert!(cancelled);
    }

    #[test]
    fn pacing_does_not_change_the_result() {
        let mut grid = Grid::new(9, 9);
        for y in 2..9 {
            grid.set(Point::new(5, y), Terrain::Wall);
        }
        let runner = Runner::new(grid, Point::new(1, 4), Point::new(7, 4)).unwrap();
        let fast = runner.run_with(
            StrategyKind::AStar,
            &RunConfig {
                observe_every: 7,
                ..RunConfig::default()
            },
            |_| true,
        );
        let slow = runner.run(StrategyKind::AStar);
        assert_eq!(fast.result, slow.result);
        assert_eq!(fast.trace.parents(), slow.trace.parents());
    }

    #[test]
    fn panicking_strategy_is_contained() {
        struct Bomb;
        impl Search for Bomb {
            fn begin(&mut self, _grid: &Grid, _trace: &mut RunTrace) {}
            fn step(&mut self, _grid: &Grid, _trace: &mut RunTrace) -> StepOutcome {
                panic!("boom");
            }
        }
        let runner = Runner::new(Grid::new(5, 5), Point::new(1, 1), Point::new(3, 3)).unwrap();
        let report =
            runner.run_strategy("bomb", Box::new(Bomb), &RunConfig::default(), |_| true);
        assert!(!report.result.success);
        assert!(report.result.path.is_empty());
        let faulted = report
            .trace
            .steps()
            .events()
            .any(|e| e.message.contains("Internal fault: boom"));
        assert!(faulted);
    }

    #[test]
    fn tree_projection_covers_the_final_path() {
        let runner = Runner::new(Grid::new(7, 7), Point::new(1, 1), Point::new(5, 5)).unwrap();
        let report = runner.run(StrategyKind::AStar);
        let tree = exploration_tree(&report.trace, runner.start(), &report.result.path);
        assert_eq!(tree.cell, runner.start());
        assert!(tree.in_path);
        // Every path cell appears in the projection.
        fn contains(node: &crate::tree::TreeNode, cell: Point) -> bool {
            node.cell == cell || node.children.iter().any(|c| contains(c, cell))
        }
        for &cell in &report.result.path {
            assert!(contains(&tree, cell), "path cell {cell} missing from tree");
        }
    }
}
