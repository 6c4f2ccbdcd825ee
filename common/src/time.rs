//! Millisecond timestamps that tolerate counter wraparound.
//!
//! Every timer in the monitor is a `u32` millisecond counter. Elapsed time is
//! always computed with `wrapping_sub`, so a counter rolling over after ~49 days
//! does not stall or fire early.

/// Milliseconds since boot, wrapping at `u32::MAX`.
pub type Millis = u32;

/// Milliseconds elapsed from `since` to `now`, wrapping-safe.
#[inline]
pub const fn elapsed(
    now: Millis,
    since: Millis,
) -> u32 {
    now.wrapping_sub(since)
}

/// Periodic gate that opens once per `period` milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalTimer {
    period: u32,
    last: Millis,
}

impl IntervalTimer {
    /// Create a timer whose first period starts at `now`.
    pub const fn new(
        period: u32,
        now: Millis,
    ) -> Self {
        Self { period, last: now }
    }

    /// Returns `true` and restarts the period if at least `period` ms passed since the last fire.
    #[inline]
    pub fn poll(
        &mut self,
        now: Millis,
    ) -> bool {
        if elapsed(now, self.last) >= self.period {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Start a fresh period at `now` without firing.
    #[inline]
    pub fn restart(
        &mut self,
        now: Millis,
    ) {
        self.last = now;
    }
}
