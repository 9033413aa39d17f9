//! Exploration-tree projection.
//!
//! The tree is a pure, read-only view derived from the current parent
//! map, path, and "current" marker. It is rebuilt from scratch on every
//! call and never mutates the trace, so it cannot diverge from the
//! source state no matter how often (or rarely) a consumer asks for it.

use std::collections::{HashMap, HashSet};

use gridprobe_core::Point;

use crate::trace::RunTrace;

/// A node of the derived exploration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    pub cell: Point,
    pub children: Vec<TreeNode>,
    /// Parent hops to the root.
    pub depth: usize,
    /// Whether this cell lies on the reconstructed path.
    pub in_path: bool,
    /// Whether this cell is the active "current" marker.
    pub is_current: bool,
}

impl TreeNode {
    /// Total number of nodes in this subtree (including self).
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

/// Build the exploration tree rooted at `start` from the trace's parent
/// map.
///
/// Children are ordered by their latest discovery sequence. A parent-map
/// entry whose parent chain does not reach the root is dropped from this
/// projection (it reappears once the chain is complete).
pub fn exploration_tree(trace: &RunTrace, start: Point, path: &[Point]) -> TreeNode {
    // Latest discovery sequence per cell, for deterministic child order.
    let mut order: HashMap<Point, u64> = HashMap::new();
    for e in trace.edges() {
        order.insert(e.to, e.seq);
    }

    let mut children: HashMap<Point, Vec<Point>> = HashMap::new();
    for (&child, &parent) in trace.parents() {
        if let Some(parent) = parent {
            children.entry(parent).or_default().push(child);
        }
    }
    for list in children.values_mut() {
        list.sort_by_key(|c| (order.get(c).copied().unwrap_or(u64::MAX), *c));
    }

    let path_set: HashSet<Point> = path.iter().copied().collect();
    let current = trace.current();

    attach(start, 0, &children, &path_set, current)
}

fn attach(
    cell: Point,
    depth: usize,
    children: &HashMap<Point, Vec<Point>>,
    path_set: &HashSet<Point>,
    current: Option<Point>,
) -> TreeNode {
    let kids = children
        .get(&cell)
        .map(|list| {
            list.iter()
                .map(|&c| attach(c, depth + 1, children, path_set, current))
                .collect()
        })
        .unwrap_or_default();
    TreeNode {
        cell,
        children: kids,
        depth,
        in_path: path_set.contains(&cell),
        is_current: current == Some(cell),
    }
}
