use serde::{Deserialize, Serialize};

/// Elapsed-time gate shared by every timed action: marching, dropping,
/// firing and spawning. Ready once `|last - now| >= interval`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    interval: f64,
    last: f64,
}

impl Cooldown {
    pub fn new(interval: f64) -> Self {
        Cooldown { interval, last: 0.0 }
    }

    pub fn ready(&self, now: f64) -> bool {
        (self.last - now).abs() >= self.interval
    }

    pub fn fire(&mut self, now: f64) {
        self.last = now;
    }

    /// Forget the last firing; the next check measures from time zero.
    pub fn reset(&mut self) {
        self.last = 0.0;
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn set_interval(&mut self, interval: f64) {
        self.interval = interval;
    }
}
