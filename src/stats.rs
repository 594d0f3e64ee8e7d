use std::time::{Duration, Instant};

/// Tracks generation throughput between periodic reports
pub struct Recorder {
    gens: u64,
    alive: usize,
    changed: usize,
    gens_in_report: usize,
    last_report: Instant,
}
impl Recorder {
    const REPORT_EVERY: Duration = Duration::from_millis(500);

    pub fn new(alive: usize) -> Self {
        Self {
            gens: 0,
            alive,
            changed: 0,
            gens_in_report: 0,
            last_report: Instant::now(),
        }
    }

    pub fn record(&mut self, gens: u64, alive: usize, changed: usize) {
        self.gens = gens;
        self.gens_in_report += 1;
        self.alive = alive;
        self.changed = changed;
    }

    pub fn has_report(&self) -> bool {
        self.last_report.elapsed() >= Self::REPORT_EVERY
    }
    pub fn report(&mut self) -> String {
        let gens_per_sec = self.gens_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        // reset stats for next report
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        format!(
            "{:.02}gen/s gens:{}, alive:{}, changed:{}",
            gens_per_sec, self.gens, self.alive, self.changed
        )
    }
}
