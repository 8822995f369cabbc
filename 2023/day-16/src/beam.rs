use std::fmt;

use bitvec::prelude::*;
use glam::IVec2;
use itertools::Itertools;

use crate::grid::{Contraption, Tile};

/// Rows grow downward, so `Up` is `(0, -1)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Bounce off a `/` mirror: `(dx, dy) -> (-dy, -dx)`.
    pub fn reflect_forward(self) -> Self {
        match self {
            Direction::Right => Direction::Up,
            Direction::Left => Direction::Down,
            Direction::Up => Direction::Right,
            Direction::Down => Direction::Left,
        }
    }

    /// Bounce off a `\` mirror: `(dx, dy) -> (dy, dx)`.
    pub fn reflect_backward(self) -> Self {
        match self {
            Direction::Right => Direction::Down,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Left,
            Direction::Down => Direction::Right,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A beam head: where it is and where it is going. Two beams with the same
/// state trace the same future path.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Beam {
    pub position: IVec2,
    pub heading: Direction,
}

impl Beam {
    pub fn new(position: IVec2, heading: Direction) -> Self {
        Self { position, heading }
    }

    fn step(self) -> Self {
        Self::new(self.position + self.heading.delta(), self.heading)
    }

    /// Leaves the current cell in `heading`.
    fn launch(self, heading: Direction) -> Self {
        Self::new(self.position, heading).step()
    }
}

enum Deflection {
    Continue(Direction),
    Split(Direction, Direction),
}

fn deflect(tile: Tile, heading: Direction) -> Deflection {
    match tile {
        Tile::Empty => Deflection::Continue(heading),
        Tile::ForwardMirror => Deflection::Continue(heading.reflect_forward()),
        Tile::BackwardMirror => Deflection::Continue(heading.reflect_backward()),
        Tile::HorizontalSplitter if !heading.is_horizontal() => {
            Deflection::Split(Direction::Left, Direction::Right)
        }
        Tile::VerticalSplitter if heading.is_horizontal() => {
            Deflection::Split(Direction::Up, Direction::Down)
        }
        Tile::HorizontalSplitter | Tile::VerticalSplitter => Deflection::Continue(heading),
    }
}

/// Cells entered by at least one beam during a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Energized {
    width: usize,
    cells: BitVec,
}

impl Energized {
    pub fn new(grid: &Contraption) -> Self {
        let (width, height) = grid.dimensions();
        Self {
            width,
            cells: bitvec![0; width * height],
        }
    }

    pub fn count(&self) -> usize {
        self.cells.count_ones()
    }

    /// Whether an in-bounds `(column, row)` cell is energized.
    pub fn is_energized(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }
}

impl fmt::Display for Energized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        let picture = self
            .cells
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|lit| if *lit { '#' } else { '.' })
                    .collect::<String>()
            })
            .join("\n");
        f.write_str(&picture)
    }
}

/// Beam states already walked during a single run, one bit per
/// `(cell, direction)`.
#[derive(Debug, Clone)]
pub struct Visited {
    states: BitVec,
}

impl Visited {
    pub fn new(grid: &Contraption) -> Self {
        let (width, height) = grid.dimensions();
        Self {
            states: bitvec![0; width * height * Direction::ALL.len()],
        }
    }

    /// Records an in-bounds beam state. Returns `false` if it was already
    /// recorded.
    fn insert(&mut self, grid: &Contraption, beam: Beam) -> bool {
        let idx = grid.index(beam.position) * Direction::ALL.len() + beam.heading.index();
        !self.states.replace(idx, true)
    }

    pub fn len(&self) -> usize {
        self.states.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.states.not_any()
    }
}

/// Traces `start` and every beam split off from it through `grid`, marking
/// the cells it passes in `energized`.
///
/// Each `(position, direction)` state is walked at most once per `visited`
/// memo, which bounds the run by `width * height * 4` states even when
/// mirrors and splitters close a loop. Split branches are queued on a local
/// stack rather than recursed into.
pub fn propagate(
    grid: &Contraption,
    energized: &mut Energized,
    visited: &mut Visited,
    start: Beam,
) {
    let mut pending = vec![start];

    while let Some(mut beam) = pending.pop() {
        while grid.contains(beam.position) && visited.insert(grid, beam) {
            energized.cells.set(grid.index(beam.position), true);

            match deflect(grid.tile_at(beam.position), beam.heading) {
                Deflection::Continue(heading) => beam = beam.launch(heading),
                Deflection::Split(first, second) => {
                    pending.push(beam.launch(second));
                    pending.push(beam.launch(first));
                    break;
                }
            }
        }
    }
}

/// Runs a single beam on fresh state and returns what it energized.
pub fn energize(grid: &Contraption, start: Beam) -> Energized {
    let mut energized = Energized::new(grid);
    let mut visited = Visited::new(grid);
    propagate(grid, &mut energized, &mut visited, start);
    energized
}
