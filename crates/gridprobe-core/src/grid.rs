//! The occupancy [`Grid`]: a width×height matrix of [`Terrain`] flags.

use crate::error::GridError;
use crate::geom::{Dir, Point};

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Open,
    Wall,
}

/// A rectangular occupancy grid.
///
/// The grid is created once per run-reset and is read-only while a
/// search runs, so it can be shared freely across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Terrain>,
}

impl Grid {
    /// Create a new all-open grid. Negative dimensions are clamped to 0.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            width: w,
            height: h,
            cells: vec![Terrain::Open; (w * h) as usize],
        }
    }

    /// Width of the grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` is inside the grid bounds.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    /// The terrain at `p`, or `None` if out of bounds.
    pub fn terrain(&self, p: Point) -> Option<Terrain> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is in bounds and open.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        matches!(self.terrain(p), Some(Terrain::Open))
    }

    /// Whether `p` is in bounds and a wall.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        matches!(self.terrain(p), Some(Terrain::Wall))
    }

    /// Set the terrain at `p`. No-op if `p` is out of bounds.
    pub fn set(&mut self, p: Point, t: Terrain) {
        if let Some(i) = self.index(p) {
            self.cells[i] = t;
        }
    }

    /// Fill every cell with `t`.
    pub fn fill(&mut self, t: Terrain) {
        self.cells.fill(t);
    }

    /// Force a cell open. No-op if out of bounds.
    #[inline]
    pub fn force_open(&mut self, p: Point) {
        self.set(p, Terrain::Open);
    }

    /// Append the in-bounds, open neighbors of `p` to `buf`, in the
    /// fixed [`Dir::ALL`] order (down, right, up, left). The caller
    /// clears `buf` before calling.
    pub fn open_neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for d in Dir::ALL {
            let n = p.step(d);
            if self.is_open(n) {
                buf.push(n);
            }
        }
    }

    /// Validate search endpoints before a run starts.
    ///
    /// Rejects out-of-bounds endpoints, `start == goal`, and grids too
    /// small to hold two distinct cells. Forcing the endpoints open is
    /// the caller's job (the only silent correction allowed).
    pub fn check_endpoints(&self, start: Point, goal: Point) -> Result<(), GridError> {
        if self.width < 2 && self.height < 2 {
            return Err(GridError::TooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if !self.contains(start) {
            return Err(GridError::OutOfBounds { pos: start });
        }
        if !self.contains(goal) {
            return Err(GridError::OutOfBounds { pos: goal });
        }
        if start == goal {
            return Err(GridError::StartEqualsGoal(start));
        }
        Ok(())
    }
}
