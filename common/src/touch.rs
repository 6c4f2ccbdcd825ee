//! Touch input.
//!
//! [`TouchSource`] is the seam to the hardware (or the simulator's mouse).
//! [`TouchLatch`] turns the raw per-iteration samples into press edges so a finger
//! held on the toggle button switches mode once, not on every loop iteration.

use embedded_graphics::prelude::Point;

use crate::time::{Millis, elapsed};

/// Polled touch input.
pub trait TouchSource {
    /// Current touch position in screen coordinates, if the panel is pressed.
    ///
    /// Must not block. Read failures are reported as `None`.
    fn poll(&mut self) -> Option<Point>;
}

/// Press-edge detection with time-based debounce.
pub struct TouchLatch {
    debounce_ms: u32,
    was_pressed: bool,
    last_change: Option<Millis>,
}

impl TouchLatch {
    /// Create a latch in the released state.
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            was_pressed: false,
            last_change: None,
        }
    }

    /// Feed one sample; returns the touch point only on the press edge.
    ///
    /// A state change within `debounce_ms` of the previous accepted change is
    /// treated as contact bounce and ignored.
    pub fn update(
        &mut self,
        now: Millis,
        sample: Option<Point>,
    ) -> Option<Point> {
        let pressed = sample.is_some();
        if pressed == self.was_pressed {
            return None;
        }

        if let Some(last) = self.last_change
            && elapsed(now, last) < self.debounce_ms
        {
            return None;
        }

        self.was_pressed = pressed;
        self.last_change = Some(now);
        sample
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const P: Point = Point::new(400, 20);

    #[test]
    fn test_press_edge_reported_once() {
        let mut latch = TouchLatch::new(50);
        assert_eq!(latch.update(0, Some(P)), Some(P));
        assert_eq!(latch.update(10, Some(P)), None);
        assert_eq!(latch.update(500, Some(P)), None);
    }

    #[test]
    fn test_release_then_press_again() {
        let mut latch = TouchLatch::new(50);
        latch.update(0, Some(P));
        assert_eq!(latch.update(100, None), None);
        assert_eq!(latch.update(200, Some(P)), Some(P));
    }

    #[test]
    fn test_bounce_ignored() {
        let mut latch = TouchLatch::new(50);
        latch.update(0, Some(P));
        // Release within the debounce window is ignored
        assert_eq!(latch.update(20, None), None);
        // So a re-press inside the window is not a new edge
        assert_eq!(latch.update(30, Some(P)), None);
        // A release after the window is accepted
        assert_eq!(latch.update(100, None), None);
        assert_eq!(latch.update(200, Some(P)), Some(P));
    }

    #[test]
    fn test_no_touch_no_edge() {
        let mut latch = TouchLatch::new(50);
        assert_eq!(latch.update(0, None), None);
        assert_eq!(latch.update(1000, None), None);
    }
}
