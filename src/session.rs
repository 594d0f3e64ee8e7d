use crate::{console::ConsoleCommand, ticker::Ticker};
use lifegrid::{Config, Coord, Engine};
use std::{collections::BTreeSet, time::Instant};

/// What the host loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Exit,
    /// A generation was computed
    Stepped,
    /// Something visible changed
    Changed,
    Idle,
}

/// Applies console commands and ticks to the engine
///
/// The changed cells are collected right after every mutating call, so a
/// later step in the same frame can't hide an earlier change from the
/// renderer.
pub struct Session {
    ticker: Ticker,
    alive_probability: f64,
    threads: bool,
    max_steps: usize,
    steps: usize,
    repaint: BTreeSet<Coord>,
}

impl Session {
    pub fn new(config: &Config, game: &Engine, threads: bool, max_steps: usize) -> Self {
        let mut session = Self {
            ticker: Ticker::new(config.tick_interval),
            alive_probability: config.alive_probability,
            threads,
            max_steps,
            steps: 0,
            repaint: BTreeSet::new(),
        };
        session.collect(game);
        session
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }
    #[inline]
    pub fn timeout(&self, now: Instant) -> std::time::Duration {
        self.ticker.timeout(now)
    }

    fn collect(&mut self, game: &Engine) {
        self.repaint.extend(game.changed_cells());
    }

    fn advance(&mut self, game: &mut Engine) {
        if self.threads {
            game.step_parallel();
        } else {
            game.step();
        }
        self.collect(game);
    }

    pub fn handle(
        &mut self,
        game: &mut Engine,
        cmd: ConsoleCommand,
        now: Instant,
    ) -> lifegrid::Result<Flow> {
        match cmd {
            ConsoleCommand::Exit => return Ok(Flow::Exit),
            ConsoleCommand::Handled => return Ok(Flow::Idle),
            ConsoleCommand::Redraw => {}
            ConsoleCommand::StartStop => self.ticker.toggle(now),
            ConsoleCommand::Step => {
                self.advance(game);
                return Ok(Flow::Stepped);
            }
            ConsoleCommand::Clear => {
                // clearing also stops the simulation
                self.ticker.stop();
                game.clear();
                self.collect(game);
            }
            ConsoleCommand::Randomize => {
                game.randomize(self.alive_probability)?;
                self.collect(game);
            }
            ConsoleCommand::Toggle(pos) => {
                game.toggle(pos.row, pos.col)?;
                self.collect(game);
            }
        }
        Ok(Flow::Changed)
    }

    /// Steps the engine if a tick is due, stopping once the cap is reached
    pub fn tick(&mut self, game: &mut Engine, now: Instant) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        if self.steps >= self.max_steps {
            self.ticker.stop();
            return false;
        }
        self.steps += 1;
        self.advance(game);
        true
    }

    /// Cells to repaint since the last call, in row-major order
    pub fn take_repaint(&mut self) -> Vec<Coord> {
        std::mem::take(&mut self.repaint).into_iter().collect()
    }
}
