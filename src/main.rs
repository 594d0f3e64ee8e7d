use std::{thread, time::Instant};

mod console;
mod options;
mod session;
mod stats;
mod ticker;

use anyhow::Context;
use console::ConsoleRender;
use lifegrid::{Config, Engine};
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use session::{Flow, Session};
use stats::Recorder;

fn advance(game: &mut Engine, threads: bool) {
    if threads {
        game.step_parallel();
    } else {
        game.step();
    }
}

fn run_headless(args: &options::Args, game: &mut Engine) -> anyhow::Result<()> {
    let threads = args.multithreading();
    let sleep = args.sleep()?;

    let mut stats = Recorder::new(game.alive_count());
    for _ in 0..args.generations()? {
        advance(game, threads);
        stats.record(game.generation(), game.alive_count(), game.changed_cells().len());
        if stats.has_report() {
            println!("{}", stats.report());
        }
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    println!("{}", stats.report());

    if args.print() {
        print!("{}", game.grid());
    }
    Ok(())
}

fn run_console(args: &options::Args, config: &Config, game: &mut Engine) -> anyhow::Result<()> {
    let mut console = ConsoleRender::new(game.height(), game.width())
        .context("failed to set up the terminal")?;
    let mut session = Session::new(config, game, args.multithreading(), args.generations()?);
    let mut stats = Recorder::new(game.alive_count());
    let mut dirty = true;

    loop {
        let mut stepped = false;
        if let Some(cmd) = console.poll_events(session.timeout(Instant::now()))? {
            match session.handle(game, cmd, Instant::now())? {
                Flow::Exit => break,
                Flow::Stepped => stepped = true,
                Flow::Changed => dirty = true,
                Flow::Idle => {}
            }
        }
        stepped |= session.tick(game, Instant::now());
        if stepped {
            let changed = game.changed_cells().len();
            stats.record(game.generation(), game.alive_count(), changed);
            dirty = true;
        }

        if stats.has_report() {
            console.set_report(stats.report());
            dirty = true;
        }

        // repaint only what changed since the last frame
        if dirty {
            let changed = session.take_repaint();
            console.render(game, &changed, session.is_running())?;
            dirty = false;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };
    let config = args.config()?;
    let rng = match args.seed()? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut game = Engine::new(&config, rng)?;
    info!(
        "{}x{} grid, {} alive, tick every {:?}",
        config.width,
        config.height,
        game.alive_count(),
        config.tick_interval
    );

    if args.console() {
        run_console(&args, &config, &mut game)
    } else {
        run_headless(&args, &mut game)
    }
}
