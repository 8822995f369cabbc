use miette::*;

use crate::grid::Contraption;
use crate::search::find_max_energized;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid = Contraption::parse(input)?;
    Ok(find_max_energized(&grid).to_string())
}
