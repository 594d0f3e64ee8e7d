use std::time::{Duration, Instant};

/// Fixed-interval scheduler deciding when the next generation is due
///
/// The ticker owns the running/stopped mode; the engine never sees it.
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    /// How long to wait for input while stopped
    const IDLE: Duration = Duration::from_millis(50);

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + self.interval);
        }
    }
    pub fn stop(&mut self) {
        self.next = None;
    }
    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Returns whether a tick is due, scheduling the following one if so
    ///
    /// Missed ticks are dropped rather than replayed in a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now >= next => {
                let following = next + self.interval;
                self.next = Some(if following > now {
                    following
                } else {
                    now + self.interval
                });
                true
            }
            _ => false,
        }
    }

    /// How long the host may block before the next tick is due
    pub fn timeout(&self, now: Instant) -> Duration {
        match self.next {
            Some(next) => next.saturating_duration_since(now),
            None => Self::IDLE,
        }
    }
}
