//! Inactivity timeout.
//!
//! Tracks the time since the last user interaction. Once the timeout elapses while
//! the dashboard is showing, [`InactivityMonitor::poll`] fires exactly once; it
//! re-arms only on the next [`InactivityMonitor::on_interaction`].

use crate::mode::Mode;
use crate::time::{Millis, elapsed};

/// Idle timer feeding the Dashboard → Screensaver transition.
#[derive(Clone, Copy, Debug)]
pub struct InactivityMonitor {
    threshold: u32,
    baseline: Millis,
    fired: bool,
}

impl InactivityMonitor {
    /// Create a monitor whose idle period starts at `now`.
    pub const fn new(
        threshold: u32,
        now: Millis,
    ) -> Self {
        Self {
            threshold,
            baseline: now,
            fired: false,
        }
    }

    /// Record a user interaction: restart the idle period and re-arm.
    pub fn on_interaction(
        &mut self,
        now: Millis,
    ) {
        self.baseline = now;
        self.fired = false;
    }

    /// Whether the idle period has reached the threshold at `now`.
    #[inline]
    pub const fn is_expired(
        &self,
        now: Millis,
    ) -> bool {
        elapsed(now, self.baseline) >= self.threshold
    }

    /// Edge-triggered expiry check.
    ///
    /// Returns `true` once per dashboard session when the timeout elapses. Always
    /// `false` outside [`Mode::Dashboard`].
    pub fn poll(
        &mut self,
        now: Millis,
        mode: Mode,
    ) -> bool {
        if mode != Mode::Dashboard || self.fired || !self.is_expired(now) {
            return false;
        }
        self.fired = true;
        true
    }

    /// Timestamp of the last interaction.
    #[inline]
    pub const fn baseline(&self) -> Millis { self.baseline }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::INACTIVITY_TIMEOUT_MS;

    #[test]
    fn test_expiry_boundary() {
        let monitor = InactivityMonitor::new(INACTIVITY_TIMEOUT_MS, 0);
        assert!(!monitor.is_expired(119_999));
        assert!(monitor.is_expired(120_000));
    }

    #[test]
    fn test_interaction_resets_baseline() {
        let mut monitor = InactivityMonitor::new(1000, 0);
        monitor.on_interaction(900);
        assert!(!monitor.is_expired(1500));
        assert!(monitor.is_expired(1900));
        assert_eq!(monitor.baseline(), 900);
    }

    #[test]
    fn test_poll_fires_once_per_session() {
        let mut monitor = InactivityMonitor::new(1000, 0);
        assert!(!monitor.poll(999, Mode::Dashboard));
        assert!(monitor.poll(1000, Mode::Dashboard));
        assert!(!monitor.poll(1001, Mode::Dashboard));
        assert!(!monitor.poll(5000, Mode::Dashboard));

        // Back on the dashboard after a touch: armed again
        monitor.on_interaction(6000);
        assert!(!monitor.poll(6500, Mode::Dashboard));
        assert!(monitor.poll(7000, Mode::Dashboard));
    }

    #[test]
    fn test_poll_silent_in_screensaver() {
        let mut monitor = InactivityMonitor::new(1000, 0);
        assert!(!monitor.poll(2000, Mode::Screensaver));
        // Still armed for the dashboard
        assert!(monitor.poll(2000, Mode::Dashboard));
    }

    #[test]
    fn test_expiry_across_counter_wrap() {
        let monitor = InactivityMonitor::new(1000, u32::MAX - 499);
        assert!(!monitor.is_expired(499));
        assert!(monitor.is_expired(500));
    }
}
