use crate::{Coord, Error, Result};
use rand::Rng;
use std::fmt;

/// The state of a single grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}
impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Self::Alive => Self::Dead,
            Self::Dead => Self::Alive,
        }
    }
}
impl From<bool> for Cell {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}

/// Bit of the center cell in a [`Grid::neighborhood`] mask
pub(crate) const CENTER: usize = 0b000_010_000;

/// A fixed-size `height x width` matrix of [`Cell`]s, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-dead grid
    pub fn new(height: usize, width: usize) -> Result<Self> {
        let len = Self::cell_count(height, width)?;
        Ok(Self {
            height,
            width,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Number of cells in a `height x width` grid, rejecting empty or
    /// overflowing dimensions
    pub(crate) fn cell_count(height: usize, width: usize) -> Result<usize> {
        match height.checked_mul(width) {
            Some(len) if len > 0 => Ok(len),
            _ => Err(Error::InvalidDimension { height, width }),
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if !self.contains(row, col) {
            return Err(Error::OutOfBounds {
                coord: Coord::new(row, col),
                height: self.height,
                width: self.width,
            });
        }
        Ok(row * self.width + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Makes each cell independently alive with the given probability
    ///
    /// The probability is checked before anything is written.
    pub fn fill_random<R: Rng>(&mut self, probability: f64, rng: &mut R) -> Result<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::InvalidArgument { probability });
        }
        for cell in &mut self.cells {
            *cell = Cell::from(rng.random_bool(probability));
        }
        Ok(())
    }

    pub fn fill_dead(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Counts the alive cells in the Moore neighborhood of `(row, col)`
    ///
    /// Positions past the edge count as dead, the grid never wraps.
    pub fn count_alive_neighbors(&self, row: usize, col: usize) -> Result<u8> {
        self.index(row, col)?;
        Ok((self.neighborhood(row, col) & !CENTER).count_ones() as u8)
    }

    /// Packs the 3x3 block centered on `(row, col)` into 9 bits
    ///
    /// Bit `(d_row + 1) * 3 + (d_col + 1)` is set when that neighbor is alive,
    /// so the cell itself is [`CENTER`]. Out-of-range positions are left as 0.
    pub(crate) fn neighborhood(&self, row: usize, col: usize) -> usize {
        let origin = Coord::new(row, col);
        let mut mask = 0;
        for d_row in -1..=1isize {
            for d_col in -1..=1isize {
                let Some(pos) = origin.offset(d_row, d_col) else {
                    continue;
                };
                if self.contains(pos.row, pos.col)
                    && self.cells[pos.row * self.width + pos.col].is_alive()
                {
                    mask |= 1usize << ((d_row + 1) * 3 + (d_col + 1));
                }
            }
        }
        mask
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterates over every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Coord::new(i / width, i % width), cell))
    }

    #[inline]
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }
    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                f.write_str(if cell.is_alive() { "█" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
