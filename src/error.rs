//! Errors reported by the grid and the engine.

use crate::Coord;
use thiserror::Error;

/// Every failure the engine can report
///
/// All of these are raised before any cell is written, so a failed call
/// leaves the grid exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Height and width must both be positive.
    #[error("invalid grid dimensions {height}x{width}, both must be positive")]
    InvalidDimension { height: usize, width: usize },
    /// The coordinate lies outside the grid.
    #[error("cell {coord} is outside the {height}x{width} grid")]
    OutOfBounds {
        coord: Coord,
        height: usize,
        width: usize,
    },
    /// Probabilities must lie in `[0, 1]`.
    #[error("probability {probability} is outside [0, 1]")]
    InvalidArgument { probability: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
