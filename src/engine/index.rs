use crate::grid::{CENTER, Cell};
use std::sync::OnceLock;

/// The number of permutations for a 3x3 block of cells
const PERMUTATIONS: usize = 1 << 9;
type LifeIndex = [Cell; PERMUTATIONS];

/// Returns a singleton lookup table for the B3/S23 ruleset
///
/// Equivalent to calling [`generate_life_index`] once and storing the result
pub(super) fn life_index() -> &'static LifeIndex {
    static INDEX: OnceLock<LifeIndex> = OnceLock::new();
    INDEX.get_or_init(generate_life_index)
}

/// Looks up the next state of the center of a packed neighborhood
#[inline]
pub(super) fn next_state(neighborhood: usize) -> Cell {
    life_index()[neighborhood]
}

/// Creates a lookup table for the B3/S23 ruleset
///
/// The table is indexed by the 9-bit mask built by `Grid::neighborhood`.
/// The center cell is the middle-most bit, `1 << 4`.
///
/// Returns the state of the center cell in the next generation
fn generate_life_index() -> LifeIndex {
    let mut index = [Cell::Dead; PERMUTATIONS];
    for (i, next) in index.iter_mut().enumerate() {
        let neighbors = (i & !CENTER).count_ones();
        let alive = i & CENTER != 0;
        *next = match (alive, neighbors) {
            // survival on 2 or 3, birth on exactly 3
            (true, 2) | (_, 3) => Cell::Alive,
            _ => Cell::Dead,
        };
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(alive: bool, neighbors: usize) -> usize {
        const NEIGHBOR_BITS: [usize; 8] = [
            0b000_000_001,
            0b000_000_010,
            0b000_000_100,
            0b000_001_000,
            0b000_100_000,
            0b001_000_000,
            0b010_000_000,
            0b100_000_000,
        ];

        let mut value = if alive { CENTER } else { 0 };
        for bit in NEIGHBOR_BITS.iter().take(neighbors) {
            value |= bit;
        }
        value
    }

    #[test]
    fn rules_match_conway_life() {
        for neighbors in 0..=8 {
            let survives = neighbors == 2 || neighbors == 3;
            let born = neighbors == 3;

            assert_eq!(next_state(mask(true, neighbors)), Cell::from(survives));
            assert_eq!(next_state(mask(false, neighbors)), Cell::from(born));
        }
    }

    #[test]
    fn only_neighbor_count_matters() {
        // the same count spread over different positions gives the same answer
        let spread = 0b101_000_001;
        let packed = 0b000_000_111;

        assert_eq!(next_state(spread), Cell::Alive);
        assert_eq!(next_state(packed), Cell::Alive);
        assert_eq!(next_state(spread | CENTER), Cell::Alive);
        assert_eq!(next_state(0b101_001_001 | CENTER), Cell::Dead);
    }
}
