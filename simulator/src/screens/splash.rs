//! Splash card held on screen before the dashboard starts.

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics_simulator::{SimulatorDisplay, SimulatorEvent, Window};
use monitor_common::splash::draw_splash;

use crate::timing::SPLASH_FRAME;

/// Show the splash for `duration`. Returns `false` if the window was closed.
pub fn run_splash_screen(
    display: &mut SimulatorDisplay<Rgb565>,
    window: &mut Window,
    duration: Duration,
) -> bool {
    draw_splash(display);

    let start = Instant::now();
    while start.elapsed() < duration {
        window.update(display);
        for ev in window.events() {
            if matches!(ev, SimulatorEvent::Quit) {
                return false;
            }
        }
        thread::sleep(SPLASH_FRAME);
    }
    true
}
