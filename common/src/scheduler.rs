//! Frame scheduler.
//!
//! Called once per loop iteration, it answers "does anything need drawing now?".
//! Each engine has its own [`IntervalTimer`]; only the engine belonging to the
//! current [`Mode`] is eligible, so the arrows never step under the rain and
//! vice versa.

use crate::config::Config;
use crate::mode::Mode;
use crate::time::{IntervalTimer, Millis};

/// Which engine is due this iteration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Due {
    /// Advance the flow arrows.
    Animation,
    /// Advance the screensaver rain.
    Screensaver,
}

/// Elapsed-time gate for the two drawing engines.
#[derive(Clone, Copy, Debug)]
pub struct FrameScheduler {
    animation: IntervalTimer,
    screensaver: IntervalTimer,
}

impl FrameScheduler {
    /// Create a scheduler with both periods starting at `now`.
    pub const fn new(
        config: &Config,
        now: Millis,
    ) -> Self {
        Self {
            animation: IntervalTimer::new(config.animation_interval_ms, now),
            screensaver: IntervalTimer::new(config.screensaver_interval_ms, now),
        }
    }

    /// Decide which engine (if any) steps at `now`.
    ///
    /// Never blocks. The timer of the ineligible engine is left untouched.
    pub fn tick(
        &mut self,
        now: Millis,
        mode: Mode,
    ) -> Option<Due> {
        match mode {
            Mode::Dashboard => self.animation.poll(now).then_some(Due::Animation),
            Mode::Screensaver => self.screensaver.poll(now).then_some(Due::Screensaver),
        }
    }

    /// Re-arm both timers at `now` (called on mode change).
    pub fn restart(
        &mut self,
        now: Millis,
    ) {
        self.animation.restart(now);
        self.screensaver.restart(now);
    }
}

/// Pause flag checked at the top of an engine step.
///
/// Ownership of the display already serialises drawing; the gate only says
/// whether an engine is allowed to advance. The engine that does not belong to
/// the current mode is kept paused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineGate {
    paused: bool,
}

impl EngineGate {
    /// A gate that lets the engine run.
    pub const fn new() -> Self { Self { paused: false } }

    /// A gate that starts paused.
    pub const fn paused() -> Self { Self { paused: true } }

    /// Stop the engine from advancing.
    #[inline]
    pub fn pause(&mut self) { self.paused = true; }

    /// Let the engine advance again.
    #[inline]
    pub fn resume(&mut self) { self.paused = false; }

    /// Whether the engine is currently held.
    #[inline]
    pub const fn is_paused(&self) -> bool { self.paused }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> FrameScheduler { FrameScheduler::new(&Config::default(), 0) }

    #[test]
    fn test_nothing_due_before_interval() {
        let mut sched = scheduler();
        assert_eq!(sched.tick(10, Mode::Dashboard), None);
        assert_eq!(sched.tick(49, Mode::Dashboard), None);
    }

    #[test]
    fn test_animation_due_in_dashboard() {
        let mut sched = scheduler();
        assert_eq!(sched.tick(50, Mode::Dashboard), Some(Due::Animation));
        assert_eq!(sched.tick(60, Mode::Dashboard), None);
        assert_eq!(sched.tick(100, Mode::Dashboard), Some(Due::Animation));
    }

    #[test]
    fn test_screensaver_due_only_in_screensaver() {
        let mut sched = scheduler();
        assert_eq!(sched.tick(200, Mode::Screensaver), Some(Due::Screensaver));
        // Animation period elapsed too, but it is not eligible in this mode
        assert_eq!(sched.tick(260, Mode::Screensaver), None);
        assert_eq!(sched.tick(400, Mode::Screensaver), Some(Due::Screensaver));
    }

    #[test]
    fn test_ticks_per_second() {
        let mut sched = scheduler();
        let steps = (1..=1000).filter(|&t| sched.tick(t, Mode::Dashboard).is_some()).count();
        assert_eq!(steps, 20);
    }

    #[test]
    fn test_engine_gate() {
        let mut gate = EngineGate::default();
        assert!(!gate.is_paused());
        gate.pause();
        assert!(gate.is_paused());
        gate.resume();
        assert!(!gate.is_paused());
        assert!(EngineGate::paused().is_paused());
    }

    #[test]
    fn test_restart_suppresses_stale_tick() {
        let mut sched = scheduler();
        sched.restart(500);
        assert_eq!(sched.tick(520, Mode::Screensaver), None);
        assert_eq!(sched.tick(700, Mode::Screensaver), Some(Due::Screensaver));
    }
}
