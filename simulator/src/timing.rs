//! Wall-clock helpers for the simulator loop.
//!
//! The common crate works in wrapping `u32` milliseconds; this module produces
//! them from `std::time::Instant`, which is not available in `no_std`.

use std::time::{Duration, Instant};

use monitor_common::time::Millis;

/// Sleep between loop iterations, matching the firmware's yield.
pub const LOOP_PERIOD: Duration = Duration::from_millis(5);

/// Frame period for the splash card.
pub const SPLASH_FRAME: Duration = Duration::from_millis(16);

/// Millisecond clock started at construction.
pub struct SimClock {
    start: Instant,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since start, wrapping like the firmware's counter.
    pub fn now(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }
}

impl Default for SimClock {
    fn default() -> Self { Self::new() }
}
