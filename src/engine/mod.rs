mod index;

use crate::{Cell, Config, Coord, Grid, Result};
use log::{debug, trace};
use rand::{Rng, rngs::StdRng};
use rayon::prelude::*;

/// Runs Conway's Game of Life on a bounded grid and tracks what changed
///
/// Besides the live grid, the engine keeps a snapshot of the state it last
/// handed to a renderer. [`Engine::changed_cells`] compares the two, so a
/// caller only has to repaint those positions after each mutating call.
#[derive(Debug)]
pub struct Engine<R = StdRng> {
    current: Grid,
    previous: Grid,
    // set when the snapshot can't be trusted, every position is reported
    repaint_all: bool,
    generation: u64,
    rng: R,
}

impl<R: Rng> Engine<R> {
    /// Creates a randomly filled engine from the given settings
    ///
    /// The first [`Engine::changed_cells`] reports every position, so the
    /// initial frame is drawn in full.
    pub fn new(config: &Config, mut rng: R) -> Result<Self> {
        config.validate()?;
        let mut grid = Grid::new(config.height, config.width)?;
        grid.fill_random(config.alive_probability, &mut rng)?;
        debug!(
            "created {}x{} engine with {} alive cells",
            config.height,
            config.width,
            grid.alive_count()
        );
        Ok(Self::from_grid(grid, rng))
    }

    /// Starts from an existing grid, `rng` is only used by [`Engine::randomize`]
    pub fn from_grid(grid: Grid, rng: R) -> Self {
        let mut previous = grid.clone();
        previous.fill_dead();
        Self {
            current: grid,
            previous,
            repaint_all: true,
            generation: 0,
            rng,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.current
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.current.height()
    }
    #[inline]
    pub fn width(&self) -> usize {
        self.current.width()
    }
    #[inline]
    pub fn alive_count(&self) -> usize {
        self.current.alive_count()
    }
    /// Number of steps taken since creation or the last clear/randomize
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        self.current.get(row, col)
    }

    /// Overwrites a single cell
    ///
    /// When the state flips, the snapshot takes the old value at that position
    /// only, so the next [`Engine::changed_cells`] reports it. Writing the
    /// same value changes nothing, pending changes included.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        let old = self.current.get(row, col)?;
        if old == cell {
            return Ok(());
        }
        self.previous.set(row, col, old)?;
        self.current.set(row, col, cell)
    }

    /// Flips a single cell, which is then reported by [`Engine::changed_cells`]
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<()> {
        let old = self.current.get(row, col)?;
        self.set(row, col, old.toggled())
    }

    /// Advances the grid by one generation
    pub fn step(&mut self) {
        self.snapshot();

        // read only from the snapshot so no cell sees an updated neighbor
        let previous = &self.previous;
        let width = previous.width();
        for (i, cell) in self.current.cells_mut().iter_mut().enumerate() {
            *cell = index::next_state(previous.neighborhood(i / width, i % width));
        }
        self.finish_step();
    }

    /// Same as [`Engine::step`], with rows fanned out to the global rayon pool
    ///
    /// Opt-in only. Every row reads the same snapshot, so the result is
    /// bit-identical to [`Engine::step`] and the call still returns only once
    /// the whole generation is done.
    pub fn step_parallel(&mut self) {
        self.snapshot();

        let previous = &self.previous;
        let width = previous.width();
        self.current
            .cells_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                for (col, cell) in out.iter_mut().enumerate() {
                    *cell = index::next_state(previous.neighborhood(row, col));
                }
            });
        self.finish_step();
    }

    /// Kills every cell
    ///
    /// Only positions that were alive before the clear are reported as changed.
    pub fn clear(&mut self) {
        self.previous.cells_mut().copy_from_slice(self.current.cells());
        self.current.fill_dead();
        self.generation = 0;
        debug!("cleared grid");
    }

    /// Refills the grid at random and schedules a full repaint
    pub fn randomize(&mut self, probability: f64) -> Result<()> {
        self.current.fill_random(probability, &mut self.rng)?;
        self.repaint_all = true;
        self.generation = 0;
        debug!(
            "randomized grid with p={probability}, {} alive",
            self.current.alive_count()
        );
        Ok(())
    }

    /// Every position whose state differs from the snapshot, in row-major order
    ///
    /// This does not touch any state, calling it again returns the same list.
    pub fn changed_cells(&self) -> Vec<Coord> {
        if self.repaint_all {
            return self.current.iter().map(|(pos, _)| pos).collect();
        }
        self.current
            .iter()
            .zip(self.previous.cells())
            .filter(|((_, now), before)| now != *before)
            .map(|((pos, _), _)| pos)
            .collect()
    }

    fn snapshot(&mut self) {
        self.previous.cells_mut().copy_from_slice(self.current.cells());
        self.repaint_all = false;
    }

    fn finish_step(&mut self) {
        self.generation += 1;
        trace!("generation {} complete", self.generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use rand::SeedableRng;

    fn coords(list: &[(usize, usize)]) -> Vec<Coord> {
        list.iter().copied().map(Coord::from).collect()
    }

    fn engine_with(height: usize, width: usize, alive: &[(usize, usize)]) -> Engine {
        let mut grid = Grid::new(height, width).expect("valid dimensions");
        for &(row, col) in alive {
            grid.set(row, col, Cell::Alive).expect("in bounds");
        }
        Engine::from_grid(grid, StdRng::seed_from_u64(0))
    }

    fn alive_cells(engine: &Engine) -> Vec<Coord> {
        engine
            .grid()
            .iter()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(pos, _)| pos)
            .collect()
    }

    #[test]
    fn birth_on_exactly_three() {
        let mut engine = engine_with(3, 3, &[(0, 0), (0, 2), (2, 1)]);

        engine.step();

        assert_eq!(engine.get(1, 1), Ok(Cell::Alive));
    }

    #[test]
    fn no_birth_on_two_or_eight() {
        let mut pair = engine_with(3, 3, &[(0, 0), (2, 2)]);
        let ring: Vec<_> = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .filter(|&pos| pos != (1, 1))
            .collect();
        let mut crowded = engine_with(3, 3, &ring);

        pair.step();
        crowded.step();

        assert_eq!(pair.get(1, 1), Ok(Cell::Dead));
        assert_eq!(crowded.get(1, 1), Ok(Cell::Dead));
    }

    #[test]
    fn survival_on_two() {
        let mut engine = engine_with(3, 3, &[(1, 1), (0, 0), (2, 2)]);

        engine.step();

        assert_eq!(engine.get(1, 1), Ok(Cell::Alive));
    }

    #[test]
    fn isolated_cell_dies() {
        let mut engine = engine_with(5, 5, &[(2, 2)]);

        engine.step();

        assert_eq!(engine.alive_count(), 0);
    }

    #[test]
    fn overcrowded_cell_dies() {
        let mut engine = engine_with(3, 3, &[(1, 1), (0, 0), (0, 2), (2, 0), (2, 2)]);

        engine.step();

        assert_eq!(engine.get(1, 1), Ok(Cell::Dead));
    }

    #[test]
    fn corner_counts_only_in_bounds_neighbors() {
        // with wraparound (0, 0) would see six neighbors and stay dead
        let mut engine = engine_with(5, 5, &[(0, 1), (1, 0), (1, 1), (0, 4), (4, 0), (4, 4)]);

        engine.step();

        assert_eq!(engine.get(0, 0), Ok(Cell::Alive));
    }

    #[test]
    fn step_reads_a_consistent_snapshot() {
        // a blinker flips between horizontal and vertical, which fails if
        // later cells see neighbors already updated within the same step
        let mut engine = engine_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);

        engine.step();
        assert_eq!(alive_cells(&engine), coords(&[(1, 2), (2, 2), (3, 2)]));
        assert_eq!(
            engine.changed_cells(),
            coords(&[(1, 2), (2, 1), (2, 3), (3, 2)])
        );

        engine.step();
        assert_eq!(alive_cells(&engine), coords(&[(2, 1), (2, 2), (2, 3)]));
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn new_engine_repaints_everything() {
        let config = Config {
            height: 4,
            width: 6,
            ..Config::default()
        };
        let engine = Engine::new(&config, StdRng::seed_from_u64(3)).expect("valid config");

        let changed = engine.changed_cells();

        assert_eq!(changed.len(), 24);
        assert!(changed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn new_rejects_bad_config() {
        let flat = Config {
            width: 0,
            ..Config::default()
        };
        let certain = Config {
            alive_probability: -1.0,
            ..Config::default()
        };

        assert!(matches!(
            Engine::new(&flat, StdRng::seed_from_u64(0)),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            Engine::new(&certain, StdRng::seed_from_u64(0)),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn step_reports_exactly_the_changed_cells() {
        // two diagonal cells each have one neighbor, both die and nothing is born
        let mut engine = engine_with(4, 4, &[(2, 2), (1, 1)]);

        engine.step();

        assert_eq!(engine.changed_cells(), coords(&[(1, 1), (2, 2)]));
    }

    #[test]
    fn clear_reports_previously_alive_cells() {
        let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
        let mut engine = engine_with(4, 4, &block);
        engine.step();
        assert!(engine.changed_cells().is_empty());

        engine.clear();

        assert_eq!(engine.changed_cells(), coords(&block));
        assert_eq!(engine.alive_count(), 0);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn toggle_reports_only_that_cell() {
        let mut engine = engine_with(6, 6, &[]);
        engine.step();
        assert!(engine.changed_cells().is_empty());

        engine.toggle(3, 4).expect("in bounds");
        assert_eq!(engine.changed_cells(), coords(&[(3, 4)]));
        assert_eq!(engine.get(3, 4), Ok(Cell::Alive));

        engine.toggle(3, 4).expect("in bounds");
        assert_eq!(engine.changed_cells(), coords(&[(3, 4)]));
        assert_eq!(engine.get(3, 4), Ok(Cell::Dead));
    }

    #[test]
    fn toggle_keeps_pending_step_changes() {
        let mut engine = engine_with(4, 4, &[(1, 1), (2, 2)]);
        engine.step();

        engine.toggle(0, 3).expect("in bounds");

        assert_eq!(engine.changed_cells(), coords(&[(0, 3), (1, 1), (2, 2)]));
    }

    #[test]
    fn set_only_reports_real_changes() {
        let mut engine = engine_with(3, 3, &[(0, 0)]);
        engine.clear();
        engine.step();

        engine.set(1, 1, Cell::Dead).expect("in bounds");
        assert!(engine.changed_cells().is_empty());

        engine.set(1, 1, Cell::Alive).expect("in bounds");
        assert_eq!(engine.changed_cells(), coords(&[(1, 1)]));
    }

    #[test]
    fn set_same_value_keeps_pending_step_change() {
        // (1, 1) dies on the step; writing Dead again must still report it
        let mut engine = engine_with(4, 4, &[(1, 1), (2, 2)]);
        engine.step();

        engine.set(1, 1, Cell::Dead).expect("in bounds");

        assert_eq!(engine.changed_cells(), coords(&[(1, 1), (2, 2)]));
    }

    #[test]
    fn out_of_bounds_leaves_state_alone() {
        let mut engine = engine_with(3, 3, &[(1, 1)]);
        engine.step();
        let before = engine.grid().clone();

        assert!(matches!(engine.toggle(3, 0), Err(Error::OutOfBounds { .. })));
        assert!(matches!(engine.set(0, 3, Cell::Alive), Err(Error::OutOfBounds { .. })));
        assert!(engine.get(5, 5).is_err());

        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.changed_cells(), coords(&[(1, 1)]));
    }

    #[test]
    fn randomize_repaints_everything() {
        let mut engine = engine_with(3, 4, &[]);
        engine.step();

        engine.randomize(0.5).expect("valid probability");

        assert_eq!(engine.changed_cells().len(), 12);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn randomize_rejects_bad_probability() {
        let mut engine = engine_with(3, 3, &[(0, 1)]);
        engine.step();
        let before = engine.grid().clone();

        assert!(matches!(
            engine.randomize(1.5),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.changed_cells(), coords(&[(0, 1)]));
    }

    #[test]
    fn changed_cells_is_idempotent() {
        let mut engine = engine_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        engine.step();

        let first = engine.changed_cells();
        let second = engine.changed_cells();

        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn seeded_runs_are_identical() {
        let config = Config {
            height: 32,
            width: 32,
            alive_probability: 0.35,
            ..Config::default()
        };
        let run = || {
            let mut engine =
                Engine::new(&config, StdRng::seed_from_u64(7)).expect("valid config");
            engine.randomize(0.35).expect("valid probability");
            for _ in 0..25 {
                engine.step();
            }
            engine.grid().clone()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn parallel_step_matches_serial() {
        let config = Config {
            height: 40,
            width: 27,
            alive_probability: 0.3,
            ..Config::default()
        };
        let mut serial = Engine::new(&config, StdRng::seed_from_u64(11)).expect("valid config");
        let mut parallel =
            Engine::new(&config, StdRng::seed_from_u64(11)).expect("valid config");

        for _ in 0..20 {
            serial.step();
            parallel.step_parallel();
            assert_eq!(serial.grid(), parallel.grid());
            assert_eq!(serial.changed_cells(), parallel.changed_cells());
        }
    }
}
