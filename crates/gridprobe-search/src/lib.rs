//! Traced informed-search strategies for 2D occupancy grids.
//!
//! Six strategies explore a shared read-only [`Grid`](gridprobe_core::Grid)
//! between fixed start and goal cells, producing a structured trace
//! (step log, parent map, exploration edges, delta stream) for external
//! visualization:
//!
//! | Strategy | Priority | Revisit policy | Optimality |
//! |---|---|---|---|
//! | [`AStar`] | g + h | relax on cheaper g | optimal |
//! | [`BestFirst`] | h | skip visited, re-attribute on re-insert | not guaranteed |
//! | [`Greedy`] | h | skip visited, never re-insert | not guaranteed |
//! | [`HillClimb`] | h, no frontier | strict descent only | may fail at a local optimum |
//! | [`IdaStar`] | g + h, depth-first | current-path cycle check | optimal, bounded memory |
//! | [`SmaStar`] | g + h | relax; frontier capacity-bounded | approximate |
//!
//! All runs go through [`Runner`], which validates the configuration,
//! drives a strategy one expansion at a time, and hands observers the
//! live [`RunTrace`] between expansions. [`exploration_tree`] projects
//! the accumulated parent map into a render-ready tree on demand.

mod astar;
mod best_first;
mod frontier;
mod greedy;
mod hill;
mod ida;
mod result;
mod runner;
mod sma;
mod strategy;
mod trace;
mod tree;

pub use astar::AStar;
pub use best_first::BestFirst;
pub use frontier::Frontier;
pub use greedy::Greedy;
pub use hill::HillClimb;
pub use ida::IdaStar;
pub use result::{RunReport, SearchResult};
pub use runner::{RunConfig, Runner};
pub use sma::SmaStar;
pub use strategy::{DEFAULT_FRONTIER_CAP, Search, StepOutcome, StrategyKind};
pub use trace::{Delta, ExplorationEdge, RunTrace, STEP_LOG_CAP, StepEvent, StepLog};
pub use tree::{TreeNode, exploration_tree};
