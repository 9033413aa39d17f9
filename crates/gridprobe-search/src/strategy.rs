//! The strategy selector and the shared per-step search interface.

use std::fmt;
use std::str::FromStr;

use gridprobe_core::{Grid, Point};

use crate::astar::AStar;
use crate::best_first::BestFirst;
use crate::greedy::Greedy;
use crate::hill::HillClimb;
use crate::ida::IdaStar;
use crate::result::SearchResult;
use crate::sma::SmaStar;
use crate::trace::RunTrace;

/// Default frontier capacity for SMA*.
pub const DEFAULT_FRONTIER_CAP: usize = 100;

/// The six search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    AStar,
    BestFirst,
    Greedy,
    HillClimbing,
    IdaStar,
    SmaStar,
}

impl StrategyKind {
    /// All strategies, in display order.
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::AStar,
        StrategyKind::BestFirst,
        StrategyKind::Greedy,
        StrategyKind::HillClimbing,
        StrategyKind::IdaStar,
        StrategyKind::SmaStar,
    ];

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::AStar => "A*",
            StrategyKind::BestFirst => "Best-First",
            StrategyKind::Greedy => "Greedy",
            StrategyKind::HillClimbing => "Hill Climbing",
            StrategyKind::IdaStar => "IDA*",
            StrategyKind::SmaStar => "SMA*",
        }
    }

    /// Instantiate the strategy for a start/goal pair.
    ///
    /// `frontier_cap` only affects SMA*.
    pub fn build(self, start: Point, goal: Point, frontier_cap: usize) -> Box<dyn Search> {
        match self {
            StrategyKind::AStar => Box::new(AStar::new(start, goal)),
            StrategyKind::BestFirst => Box::new(BestFirst::new(start, goal)),
            StrategyKind::Greedy => Box::new(Greedy::new(start, goal)),
            StrategyKind::HillClimbing => Box::new(HillClimb::new(start, goal)),
            StrategyKind::IdaStar => Box::new(IdaStar::new(start, goal)),
            StrategyKind::SmaStar => Box::new(SmaStar::new(start, goal, frontier_cap)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "astar" | "a*" => Ok(StrategyKind::AStar),
            "bestfirst" => Ok(StrategyKind::BestFirst),
            "greedy" => Ok(StrategyKind::Greedy),
            "hillclimbing" | "hillclimb" | "hill" => Ok(StrategyKind::HillClimbing),
            "idastar" | "ida*" | "ida" => Ok(StrategyKind::IdaStar),
            "smastar" | "sma*" | "sma" => Ok(StrategyKind::SmaStar),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Outcome of driving a strategy one step forward.
#[derive(Debug)]
pub enum StepOutcome {
    /// More work remains; the driver may let an observer look between
    /// steps.
    Pending,
    /// The run terminated.
    Finished(SearchResult),
}

/// The shared per-step search lifecycle.
///
/// `begin` seeds the strategy's state into a fresh trace; each `step`
/// performs at most one expansion, so the driving loop's calls are the
/// engine's suspension points. Strategies borrow the grid read-only and
/// own all of their per-run state.
pub trait Search {
    fn begin(&mut self, grid: &Grid, trace: &mut RunTrace);
    fn step(&mut self, grid: &Grid, trace: &mut RunTrace) -> StepOutcome;
}
