//! Random wall scattering for demo and test grids.

use rand::{Rng, RngExt};

use crate::geom::Point;
use crate::grid::{Grid, Terrain};

/// Scatter walls over `grid`, turning each cell into a wall with
/// probability `wall_pct` (clamped to 0.0–1.0).
///
/// Cells listed in `keep_open` are re-opened afterward, whatever the
/// dice said; the engine relies on this to keep start and goal open
/// regardless of random generation.
///
/// Returns the number of walls this call placed (after re-opening);
/// walls already present in the grid are left alone and not counted.
pub fn scatter_walls(
    grid: &mut Grid,
    wall_pct: f64,
    rng: &mut impl Rng,
    keep_open: &[Point],
) -> usize {
    let p = wall_pct.clamp(0.0, 1.0);
    let pre_walled: Vec<bool> = keep_open.iter().map(|&c| grid.is_wall(c)).collect();
    let mut placed = 0usize;

    // One dice roll per cell whatever the terrain, so a given seed
    // yields the same roll sequence on pre-walled grids too. Cells that
    // are already walls stay walls and are never counted.
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = Point::new(x, y);
            if rng.random_bool(p) && grid.is_open(cell) {
                grid.set(cell, Terrain::Wall);
                placed += 1;
            }
        }
    }

    for (&cell, &was_wall) in keep_open.iter().zip(&pre_walled) {
        // Only walls placed by this call were counted above.
        if !was_wall && grid.is_wall(cell) {
            placed -= 1;
        }
        grid.force_open(cell);
    }

    placed
}
