//! Precondition errors rejected before a run starts.

use std::fmt;

use crate::geom::Point;

/// Why a grid/endpoint configuration cannot be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// An endpoint lies outside the grid bounds.
    OutOfBounds { pos: Point },
    /// Start and goal are the same cell.
    StartEqualsGoal(Point),
    /// The grid cannot hold two distinct cells.
    TooSmall { width: i32, height: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { pos } => {
                write!(f, "endpoint {pos} is outside the grid")
            }
            GridError::StartEqualsGoal(p) => {
                write!(f, "start and goal are both {p}")
            }
            GridError::TooSmall { width, height } => {
                write!(f, "grid {width}x{height} is too small to search")
            }
        }
    }
}

impl std::error::Error for GridError {}
