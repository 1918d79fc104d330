//! Capped exponential backoff.

use std::time::Duration;

/// Exponential backoff policy: `min(base * 2^retries, cap)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
}

impl Backoff {
    /// Creates a policy with the given base delay and ceiling.
    ///
    /// A cap below the base is raised to the base.
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            base,
            cap: cap.max(base),
        }
    }

    /// Delay to wait after `retries` consecutive failures.
    pub fn delay(&self, retries: u32) -> Duration {
        // shift is clamped so the factor fits in u32
        let factor = 1u32 << retries.min(31);
        self.base
            .checked_mul(factor)
            .map_or(self.cap, |d| d.min(self.cap))
    }

    /// Base delay.
    pub fn base(&self) -> Duration {
        self.base
    }

    /// Delay ceiling.
    pub fn cap(&self) -> Duration {
        self.cap
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(30))
    }
}
