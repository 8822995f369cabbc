use std::str::FromStr;

use chumsky::prelude::*;
use glam::IVec2;
use miette::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,
    /// `/`
    ForwardMirror,
    /// `\`
    BackwardMirror,
    /// `-`
    HorizontalSplitter,
    /// `|`
    VerticalSplitter,
}

/// The tile layout of the contraption, stored row-major.
#[derive(Debug, Clone)]
pub struct Contraption {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

type Row = (Vec<Tile>, SimpleSpan);

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Row>, extra::Err<Rich<'a, char>>> {
    let tile = choice((
        just('.').to(Tile::Empty),
        just('/').to(Tile::ForwardMirror),
        just('\\').to(Tile::BackwardMirror),
        just('-').to(Tile::HorizontalSplitter),
        just('|').to(Tile::VerticalSplitter),
    ));

    tile.repeated()
        .collect::<Vec<_>>()
        .map_with(|row, e| (row, e.span()))
        .separated_by(text::newline())
        .allow_trailing()
        .collect()
}

impl Contraption {
    pub fn parse(input: &str) -> Result<Self> {
        let rows = parser().parse(input).into_result().map_err(|errors| {
            let labels = errors
                .iter()
                .map(|e| {
                    let span = e.span();
                    LabeledSpan::at(span.start..span.end, e.to_string())
                })
                .collect::<Vec<_>>();
            miette!(labels = labels, "Parse failed: not a contraption layout")
                .with_source_code(input.to_string())
        })?;

        Self::from_rows(rows).map_err(|report| report.with_source_code(input.to_string()))
    }

    fn from_rows(rows: Vec<Row>) -> Result<Self> {
        // Blank lines around the layout (a trailing newline, an empty input)
        // carry no tiles; blank lines inside it fail the width check below
        let mut rows = rows;
        while rows.last().is_some_and(|(row, _)| row.is_empty()) {
            rows.pop();
        }
        let leading = rows.iter().take_while(|(row, _)| row.is_empty()).count();
        rows.drain(..leading);

        let height = rows.len();
        let width = rows.first().map(|(row, _)| row.len()).unwrap_or(0);

        if let Some((y, (row, span))) = rows
            .iter()
            .enumerate()
            .find(|(_, (row, _))| row.len() != width)
        {
            return Err(miette!(
                labels = vec![LabeledSpan::at(
                    span.start..span.end,
                    format!("{} tiles", row.len())
                )],
                "Row {} has {} tiles, expected {}",
                y,
                row.len(),
                width
            ));
        }

        let tiles = rows.into_iter().flat_map(|(row, _)| row).collect();

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    /// Row-major index of an in-bounds position.
    pub(crate) fn index(&self, pos: IVec2) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    /// # Panics
    ///
    /// If `pos` lies outside the contraption. The beam walk checks bounds
    /// before every lookup.
    pub fn tile_at(&self, pos: IVec2) -> Tile {
        assert!(
            self.contains(pos),
            "tile lookup at {pos} outside a {}x{} contraption",
            self.width,
            self.height
        );
        self.tiles[self.index(pos)]
    }
}

impl FromStr for Contraption {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
