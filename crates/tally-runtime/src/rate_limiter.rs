//! Minimum-spacing rate limiter for user-triggered actions.

use std::time::{Duration, Instant};

use tally_core::limits::RATE_LIMIT_DELAY;

/// Drops calls that arrive sooner than `min_interval` after the last
/// accepted one. Rejected calls are not queued and do not move the window.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last_accepted: Option<Instant>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RATE_LIMIT_DELAY)
    }
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: None,
        }
    }

    /// Try to pass the limiter at `now`.
    pub fn try_acquire_at(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
