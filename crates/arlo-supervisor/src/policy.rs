//! Retry timing policy

use std::time::Duration;

/// Default initial backoff between login attempts (seconds)
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(15);
/// Default backoff ceiling (seconds)
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(300);

/// Capped exponential backoff policy.
///
/// The delay doubles after every failed attempt until it reaches
/// `max_delay`, then holds there. There is no attempt limit; the supervisor
/// retries until it succeeds or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            base_delay,
            max_delay,
        }
    }

    /// The delay to use after the one just slept
    pub fn next_delay(&self, current: Duration) -> Duration {
        (current * 2).min(self.max_delay)
    }
}
