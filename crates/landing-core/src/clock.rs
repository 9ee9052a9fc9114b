#![forbid(unsafe_code)]

//! Host-driven monotonic time.
//!
//! The page never reads the wall clock. The embedding host (JS, or a test)
//! advances time explicitly, which keeps every timer in the page
//! deterministic and replayable.

use core::time::Duration;

/// Source of monotonic time for page timers.
pub trait Clock {
    /// Current monotonic time since page load.
    fn now_mono(&self) -> Duration;
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    ///
    /// Time never moves backwards; an earlier value is ignored.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl Clock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_at_zero() {
        assert_eq!(DeterministicClock::new().now_mono(), Duration::ZERO);
    }

    #[test]
    fn advance_accumulates() {
        let mut clock = DeterministicClock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(34));
        assert_eq!(clock.now_mono(), Duration::from_millis(50));
    }

    #[test]
    fn set_is_monotonic() {
        let mut clock = DeterministicClock::new();
        clock.set(Duration::from_secs(3));
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now_mono(), Duration::from_secs(3));
    }
}
