use glam::IVec2;
use rayon::prelude::*;

use crate::beam::{energize, Beam, Direction};
use crate::grid::Contraption;

/// Every beam that can enter from an edge, pointing inward.
///
/// Edges are enumerated independently, so each corner shows up once per
/// edge it belongs to. An empty contraption has no candidates.
pub fn entry_candidates(grid: &Contraption) -> Vec<Beam> {
    let (width, height) = grid.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let (max_x, max_y) = (width as i32 - 1, height as i32 - 1);

    let from_sides = (0..height as i32).flat_map(|y| {
        [
            Beam::new(IVec2::new(0, y), Direction::Right),
            Beam::new(IVec2::new(max_x, y), Direction::Left),
        ]
    });
    let from_ends = (0..width as i32).flat_map(|x| {
        [
            Beam::new(IVec2::new(x, 0), Direction::Down),
            Beam::new(IVec2::new(x, max_y), Direction::Up),
        ]
    });

    from_sides.chain(from_ends).collect()
}

/// Largest number of energized cells reachable from a single entry beam.
#[tracing::instrument(skip(grid), fields(width = grid.dimensions().0, height = grid.dimensions().1))]
pub fn find_max_energized(grid: &Contraption) -> usize {
    let candidates = entry_candidates(grid);
    tracing::debug!(candidates = candidates.len(), "tracing entry beams");

    // Each run owns its energized set and memo; only the grid is shared
    candidates
        .par_iter()
        .map(|&beam| energize(grid, beam).count())
        .max()
        .unwrap_or(0)
}
