//! Power readouts next to the icons.
//!
//! Each label owns a fixed box that is cleared before the new value is drawn, so
//! a shorter value never leaves digits of the previous one behind.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::colors::{BLACK, EXPORT, GREY, IMPORT, ORANGE};
use crate::power::PowerFlow;
use crate::styles::{CENTERED, VALUE_FONT, VALUE_STYLE};

const SOLAR_BOX: Rectangle = Rectangle::new(Point::new(0, 148), Size::new(100, 24));
const GRID_BOX: Rectangle = Rectangle::new(Point::new(310, 170), Size::new(88, 24));
const HEATING_BOX: Rectangle = Rectangle::new(Point::new(310, 234), Size::new(88, 22));

/// Distance from the top of a label box to the text baseline.
const BASELINE_OFFSET: i32 = 17;

const CLEAR_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

fn draw_label<D>(
    display: &mut D,
    area: Rectangle,
    text: &str,
    style: MonoTextStyle<'_, Rgb565>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    area.into_styled(CLEAR_STYLE).draw(display).ok();
    let pos = Point::new(area.center().x, area.top_left.y + BASELINE_OFFSET);
    Text::with_text_style(text, pos, style, CENTERED).draw(display).ok();
}

/// Format a wattage as e.g. `1200 W`, `+850 W` or `-1800 W`.
pub fn format_watts(
    watts: i32,
    signed: bool,
) -> String<16> {
    let mut s = String::new();
    if signed && watts > 0 {
        write!(s, "+{watts} W").ok();
    } else {
        write!(s, "{watts} W").ok();
    }
    s
}

/// Redraw all three readouts from a power-flow snapshot.
pub fn draw_value_labels<D>(
    display: &mut D,
    flow: &PowerFlow,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let solar = format_watts(flow.solar_w.min(i32::MAX as u32) as i32, false);
    draw_label(display, SOLAR_BOX, &solar, VALUE_STYLE);

    let grid_color = match flow.grid_w {
        w if w > 0 => IMPORT,
        w if w < 0 => EXPORT,
        _ => GREY,
    };
    let grid = format_watts(flow.grid_w, true);
    draw_label(display, GRID_BOX, &grid, MonoTextStyle::new(VALUE_FONT, grid_color));

    let (heating, heating_color) = if flow.heating { ("HEAT ON", ORANGE) } else { ("HEAT OFF", GREY) };
    draw_label(display, HEATING_BOX, heating, MonoTextStyle::new(VALUE_FONT, heating_color));
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

    #[test]
    fn test_format_watts() {
        assert_eq!(format_watts(1200, false).as_str(), "1200 W");
        assert_eq!(format_watts(850, true).as_str(), "+850 W");
        assert_eq!(format_watts(-1800, true).as_str(), "-1800 W");
        assert_eq!(format_watts(0, true).as_str(), "0 W");
    }

    #[test]
    fn test_grid_label_color_follows_direction() {
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));

        draw_value_labels(&mut display, &PowerFlow::new(0, 500, false));
        assert!(GRID_BOX.points().any(|p| display.get_pixel(p) == IMPORT));

        draw_value_labels(&mut display, &PowerFlow::new(0, -500, false));
        assert!(GRID_BOX.points().any(|p| display.get_pixel(p) == EXPORT));
        assert!(GRID_BOX.points().all(|p| display.get_pixel(p) != IMPORT));
    }

    #[test]
    fn test_heating_label() {
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        draw_value_labels(&mut display, &PowerFlow::new(0, 0, true));
        assert!(HEATING_BOX.points().any(|p| display.get_pixel(p) == ORANGE));
    }
}
