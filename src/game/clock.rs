use std::time::Duration;

/// Turns irregular frame deltas into ticks at a fixed cadence.
///
/// At most one tick is released per `advance` call. Whatever time is left
/// over is carried into the next frame, clamped below one interval so a long
/// stall does not queue up extra moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickClock {
    interval: Duration,
    accumulated: Duration,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Add elapsed frame time; returns true when a tick is due
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.accumulated += delta;
        if self.accumulated < self.interval {
            return false;
        }

        self.accumulated -= self.interval;
        if self.accumulated >= self.interval {
            self.accumulated = self.interval - Duration::from_nanos(1);
        }
        true
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
