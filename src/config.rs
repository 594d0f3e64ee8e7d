use crate::{Error, Grid, Result};
use std::time::Duration;

/// Settings a host application hands to the engine and its scheduler
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub height: usize,
    pub width: usize,
    /// Chance for each cell to start alive
    pub alive_probability: f64,
    /// Time between generations while the simulation is running
    pub tick_interval: Duration,
}

impl Config {
    pub const DEFAULT_SIZE: usize = 80;
    pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.1;
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Checks the settings the same way the grid would on construction
    pub fn validate(&self) -> Result<()> {
        Grid::cell_count(self.height, self.width)?;
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(Error::InvalidArgument {
                probability: self.alive_probability,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            height: Self::DEFAULT_SIZE,
            width: Self::DEFAULT_SIZE,
            alive_probability: Self::DEFAULT_ALIVE_PROBABILITY,
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
        }
    }
}
