use std::time::{Duration, Instant};

/// Per-turn clock. Expiry is checked when input arrives, not by interrupt.
#[derive(Debug, Clone, Copy)]
pub struct TurnTimer {
    started: Instant,
    limit: Duration,
}

impl TurnTimer {
    pub fn start(limit: Duration) -> Self {
        Self::started_at(Instant::now(), limit)
    }

    pub fn started_at(started: Instant, limit: Duration) -> Self {
        Self { started, limit }
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.elapsed_at(now) > self.limit
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.limit.saturating_sub(self.elapsed_at(now))
    }
}
