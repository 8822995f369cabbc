use glam::IVec2;
use miette::*;

use crate::beam::{energize, Beam, Direction};
use crate::grid::Contraption;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid = Contraption::parse(input)?;

    // The beam enters the top-left corner heading right
    let energized = energize(&grid, Beam::new(IVec2::ZERO, Direction::Right));

    Ok(energized.count().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";
        assert_eq!("46", process(input)?);
        Ok(())
    }

    #[test]
    fn empty_input() -> Result<()> {
        assert_eq!("0", process("")?);
        Ok(())
    }

    #[test]
    fn rejects_unknown_tile() {
        assert!(process(".#.").is_err());
    }
}
