//! Wall-clock pacing for the game tick.
//!
//! The game clock counts whole milliseconds. `TickClock` hands out only the
//! whole milliseconds that have passed and keeps the remainder, so the game
//! clock never falls behind wall time however the poll wakeups jitter.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    last: Instant,
    period: Duration,
}

impl TickClock {
    pub fn new(now: Instant, period: Duration) -> Self {
        Self { last: now, period }
    }

    /// Time left until the next tick is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.period
            .checked_sub(now.saturating_duration_since(self.last))
            .unwrap_or(Duration::ZERO)
    }

    /// Whole milliseconds to feed the game, once a period has passed.
    pub fn advance(&mut self, now: Instant) -> Option<u32> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.period {
            return None;
        }
        let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        self.last += Duration::from_millis(ms as u64);
        Some(ms)
    }
}
