//! Retry delays for failing background operations
//!
//! The delay doubles after every failure, up to a ceiling, and starts over
//! once the operation succeeded.

/// Delay before the first retry
pub const MIN_DELAY_SECS: u64 = 1;

/// Longest delay between two attempts
pub const MAX_DELAY_SECS: u64 = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Backoff {
    next_secs: u64,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

impl Backoff {
    pub const fn new() -> Self {
        Self {
            next_secs: MIN_DELAY_SECS,
        }
    }

    /// Seconds to wait after a failure. Never zero.
    pub fn next_delay_secs(&mut self) -> u64 {
        let delay = self.next_secs;
        self.next_secs = (delay * 2).min(MAX_DELAY_SECS);
        delay
    }

    /// Start over after a success
    pub fn reset(&mut self) {
        self.next_secs = MIN_DELAY_SECS;
    }
}
