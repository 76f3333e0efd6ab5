//! Manually-advanced clock for deterministic suppression-window tests.

use parking_lot::Mutex;
use tactus_core::ClockEffects;

/// Clock whose reading only moves when the test says so.
///
/// Share one instance (via `Arc`) between the coordinator and the test body,
/// then `advance` it past interesting deadlines.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Mutex<u64>,
}

impl ManualClock {
    /// Create a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with an initial reading.
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms: Mutex::new(now_ms),
        }
    }

    /// Move the reading forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        let mut now_ms = self.now_ms.lock();
        *now_ms = now_ms.saturating_add(delta_ms);
    }

    /// Set the reading. Readings never move backwards; a smaller value than
    /// the current reading is ignored to preserve monotonicity.
    pub fn set(&self, now_ms: u64) {
        let mut current = self.now_ms.lock();
        if now_ms > *current {
            *current = now_ms;
        }
    }
}

impl ClockEffects for ManualClock {
    fn now_ms(&self) -> u64 {
        *self.now_ms.lock()
    }
}
