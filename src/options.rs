use anyhow::{Context, bail};
use lifegrid::Config;
use regex::Regex;
use std::{str::FromStr, time::Duration};

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    /// Parses the arguments, or returns `Ok(None)` after printing help
    fn new<T: AsRef<str>>(args: &[T]) -> anyhow::Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run the interactive console");
        opts.optflag("t", "threads", "compute generations on all cores");
        opts.optflag("", "print", "print the final grid in headless mode");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("", "size", "set grid size", "WIDTHxHEIGHT");
        opts.optopt("p", "fill", "chance of a cell starting alive", "PROB");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "seed", "seed for the random fill", "SEED");

        let matches = opts
            .parse(args.iter().map(T::as_ref))
            .context("invalid arguments")?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifegrid [options]"));
            return Ok(None);
        }
        Ok(Some(Self { matches }))
    }
    pub fn from_env() -> anyhow::Result<Option<Self>> {
        let env = std::env::args().skip(1).collect::<Vec<_>>();
        Self::new(&env)
    }

    fn opt<T>(&self, name: &str) -> anyhow::Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.matches
            .opt_get(name)
            .with_context(|| format!("invalid value for --{name}"))
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }
    pub fn print(&self) -> bool {
        self.matches.opt_present("print")
    }

    /// Generation cap, the console runs until closed unless one is given
    pub fn generations(&self) -> anyhow::Result<usize> {
        let default = if self.console() { usize::MAX } else { 100 };
        Ok(self.opt("gens")?.unwrap_or(default))
    }
    /// Delay between headless generations, also overrides the console tick interval
    pub fn sleep(&self) -> anyhow::Result<Option<Duration>> {
        Ok(self.opt("sleep")?.map(Duration::from_millis))
    }
    pub fn seed(&self) -> anyhow::Result<Option<u64>> {
        self.opt("seed")
    }

    fn size(&self) -> anyhow::Result<Option<(usize, usize)>> {
        let Some(size) = self.matches.opt_str("size") else {
            return Ok(None);
        };
        let re = Regex::new(r"^(\d+)[xX](\d+)$")?;
        let Some((_, [w, h])) = re.captures(size.trim()).map(|c| c.extract()) else {
            bail!("invalid value for --size: {size:?}, expected WIDTHxHEIGHT");
        };
        Ok(Some((w.parse()?, h.parse()?)))
    }

    /// Builds the engine settings, explicit width/height win over `--size`
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::default();
        if let Some((width, height)) = self.size()? {
            config.width = width;
            config.height = height;
        }
        if let Some(width) = self.opt("width")? {
            config.width = width;
        }
        if let Some(height) = self.opt("height")? {
            config.height = height;
        }
        if let Some(probability) = self.opt("fill")? {
            config.alive_probability = probability;
        }
        if let Some(sleep) = self.sleep()? {
            config.tick_interval = sleep;
        }
        config.validate()?;
        Ok(config)
    }
}
