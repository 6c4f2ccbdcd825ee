//! Mouse as the touch panel.

use embedded_graphics::prelude::Point;
use embedded_graphics_simulator::SimulatorEvent;
use embedded_graphics_simulator::sdl2::MouseButton;
use monitor_common::TouchSource;

/// Left button held down counts as a touch at the cursor.
#[derive(Default)]
pub struct MouseTouch {
    pressed: bool,
    position: Point,
}

impl MouseTouch {
    pub fn new() -> Self { Self::default() }

    /// Track button and cursor state; returns `true` if the event was consumed.
    pub fn handle(
        &mut self,
        event: &SimulatorEvent,
    ) -> bool {
        match *event {
            SimulatorEvent::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                point,
            } => {
                self.pressed = true;
                self.position = point;
                true
            }
            SimulatorEvent::MouseButtonUp {
                mouse_btn: MouseButton::Left,
                point,
            } => {
                self.pressed = false;
                self.position = point;
                true
            }
            SimulatorEvent::MouseMove { point } => {
                self.position = point;
                true
            }
            _ => false,
        }
    }
}

impl TouchSource for MouseTouch {
    fn poll(&mut self) -> Option<Point> { self.pressed.then_some(self.position) }
}
