//! Full-screen compositions for each mode.
//!
//! # Dashboard Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ Home Energy                                           [ SAVER ]  │
//! │                           /\                              ┬      │
//! │   \ | /                  /  \                            /│\     │
//! │  -( O )-  ▶ ▶ ▶ ▶ ▶     /    \          ◀ ◀ ◀ ◀ ◀       / │ \    │
//! │   / | \                │ ▒  ▮ │         ▶ ▶ ▶ ▶ ▶      /  │  \   │
//! │   SOLAR                │  HOUSE│          +850 W         GRID    │
//! │   1200 W                       │          HEAT ON       ┌────┐   │
//! │ ┌────────────────────────────┐ └───────── ▶ ▶ ▶ ▶ ▶ ▶   │~~~~│   │
//! │ │ log panel (7 lines)        │                          └────┘   │
//! │ └────────────────────────────┘                          WATER    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use crate::colors::BLACK;
use crate::flow::FlowArrows;
use crate::log_buffer::LogBuffer;
use crate::power::PowerFlow;
use crate::styles::TITLE_STYLE;
use crate::widgets::{
    LogPanel,
    draw_house,
    draw_pylon,
    draw_sun,
    draw_tank,
    draw_toggle_button,
    draw_value_labels,
};

const TITLE_POS: Point = Point::new(10, 26);

/// Redraw the whole dashboard: icons, empty tracks, readouts, button and log panel.
///
/// Track positions restart at their origins since the bands are repainted empty.
pub fn draw_dashboard<D>(
    display: &mut D,
    arrows: &mut FlowArrows,
    panel: &mut LogPanel,
    log: &LogBuffer,
    flow: &PowerFlow,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    Text::new("Home Energy", TITLE_POS, TITLE_STYLE).draw(display).ok();
    draw_toggle_button(display);

    draw_sun(display);
    draw_house(display);
    draw_pylon(display);
    draw_tank(display, flow.heating);

    arrows.draw_tracks(display);
    draw_value_labels(display, flow);
    panel.draw(log, display);
}

/// Blank the screen for the rain.
pub fn draw_screensaver_background<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::{PANEL_BG, TEAL, TRACK};
    use crate::config::{LOG_PANEL_ORIGIN, SCREEN_HEIGHT, SCREEN_WIDTH, TOGGLE_AREA};
    use crate::flow::FlowKind;

    #[test]
    fn test_dashboard_composition() {
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        let mut arrows = FlowArrows::new();
        let mut panel = LogPanel::new();
        draw_dashboard(&mut display, &mut arrows, &mut panel, &LogBuffer::new(), &PowerFlow::default());

        assert_eq!(display.get_pixel(TOGGLE_AREA.top_left + Point::new(8, 4)), TEAL);
        assert_eq!(display.get_pixel(LOG_PANEL_ORIGIN + Point::new(2, 2)), PANEL_BG);

        // Every track band shows the empty rail
        for kind in FlowKind::ALL {
            let band = arrows.track(kind).band();
            assert!(band.points().any(|p| display.get_pixel(p) == TRACK), "{}", kind.label());
        }
    }

    #[test]
    fn test_screensaver_background_is_black() {
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        crate::splash::draw_splash(&mut display);
        draw_screensaver_background(&mut display);
        assert!(display.bounding_box().points().all(|p| display.get_pixel(p) == BLACK));
    }
}
