//! Core types for the gridprobe search engine.
//!
//! This crate holds everything the search strategies consume but do not
//! own: the integer [`Point`] geometry, the read-only occupancy [`Grid`]
//! with its fixed-order neighbor enumeration, the Manhattan [`manhattan`]
//! heuristic, random wall scattering, and the precondition error
//! taxonomy ([`GridError`]).

mod distance;
mod error;
mod geom;
mod grid;
mod scatter;

pub use distance::manhattan;
pub use error::GridError;
pub use geom::{Dir, Point};
pub use grid::{Grid, Terrain};
pub use scatter::scatter_walls;
