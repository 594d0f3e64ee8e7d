use std::{cmp::Ordering, fmt};

/// A `(row, col)` address on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}
impl Coord {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Moves this coordinate by a signed offset
    ///
    /// Returns [`None`] if either component would go below zero. Upper bounds
    /// are the grid's business, not ours.
    #[inline]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}
impl From<(usize, usize)> for Coord {
    #[inline]
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}
impl PartialOrd for Coord {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Coord {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major: compare rows first, then columns
        Ord::cmp(&self.row, &other.row).then(Ord::cmp(&self.col, &other.col))
    }
}
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
