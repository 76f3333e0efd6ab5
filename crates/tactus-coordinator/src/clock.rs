//! Production clock handler.
//!
//! Deterministic clocks for tests live in `tactus-testkit`.

use std::time::Instant;
use tactus_core::ClockEffects;

/// Monotonic clock over the operating system's steady timer.
///
/// Readings count milliseconds since the handler was created; the episode
/// machinery only ever compares readings, so the origin is arbitrary.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock anchored at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockEffects for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_readings_are_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now_ms();
        std::thread::sleep(Duration::from_millis(5));
        let second = clock.now_ms();
        assert!(second >= first);
    }
}
