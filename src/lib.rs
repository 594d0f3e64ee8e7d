//! Core library for Conway's Game of Life on a bounded grid.

pub mod config;
pub mod coord;
pub mod engine;
pub mod error;
pub mod grid;

pub use config::Config;
pub use coord::Coord;
pub use engine::Engine;
pub use error::{Error, Result};
pub use grid::{Cell, Grid};
