//! Touch controls and touch-calibration prompts.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};

use crate::colors::{BLACK, GREEN, MAGENTA, TEAL, WHITE};
use crate::config::{CENTER_X, CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH, TOGGLE_AREA};
use crate::styles::{BUTTON_STYLE, CAPTION_STYLE, CENTERED, LOG_FONT};

const BUTTON_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(TEAL);
const BUTTON_CORNER: Size = Size::new(6, 6);

const BUTTON_TEXT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Length of each arm of a calibration corner marker.
const MARKER_ARM: i32 = 15;

const MARKER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(MAGENTA, 1);
const MARKER_CLEAR: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

const PROMPT_POS: Point = Point::new(CENTER_X, CENTER_Y);
const PROMPT_DETAIL_POS: Point = Point::new(CENTER_X, CENTER_Y + 16);

/// Draw the screensaver toggle button in [`TOGGLE_AREA`].
pub fn draw_toggle_button<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    RoundedRectangle::with_equal_corners(TOGGLE_AREA, BUTTON_CORNER)
        .into_styled(BUTTON_FILL)
        .draw(display)
        .ok();
    Text::with_text_style("SAVER", TOGGLE_AREA.center(), BUTTON_STYLE, BUTTON_TEXT)
        .draw(display)
        .ok();
}

/// Screen corner for calibration sample `index` (top-left, bottom-left, top-right, bottom-right).
pub const fn calibration_corner(index: usize) -> Point {
    let right = (SCREEN_WIDTH - 1) as i32;
    let bottom = (SCREEN_HEIGHT - 1) as i32;
    match index {
        0 => Point::new(0, 0),
        1 => Point::new(0, bottom),
        2 => Point::new(right, 0),
        _ => Point::new(right, bottom),
    }
}

/// Show the calibration instructions and the marker for corner `index`.
///
/// Previous markers are erased so only the corner to touch is visible.
pub fn draw_calibration_prompt<D>(
    display: &mut D,
    index: usize,
) where
    D: DrawTarget<Color = Rgb565>,
{
    for i in 0..4 {
        marker_box(calibration_corner(i)).into_styled(MARKER_CLEAR).draw(display).ok();
    }

    Text::with_text_style("Touch corners as indicated", PROMPT_POS, CAPTION_STYLE, CENTERED)
        .draw(display)
        .ok();

    let corner = calibration_corner(index);
    let dx = if corner.x == 0 { MARKER_ARM } else { -MARKER_ARM };
    let dy = if corner.y == 0 { MARKER_ARM } else { -MARKER_ARM };
    Line::new(corner, corner + Point::new(dx, 0)).into_styled(MARKER_STYLE).draw(display).ok();
    Line::new(corner, corner + Point::new(0, dy)).into_styled(MARKER_STYLE).draw(display).ok();
    Line::new(corner, corner + Point::new(dx, dy)).into_styled(MARKER_STYLE).draw(display).ok();
}

fn marker_box(corner: Point) -> Rectangle {
    let x = if corner.x == 0 { 0 } else { corner.x - MARKER_ARM };
    let y = if corner.y == 0 { 0 } else { corner.y - MARKER_ARM };
    Rectangle::new(Point::new(x, y), Size::new(MARKER_ARM as u32 + 1, MARKER_ARM as u32 + 1))
}

/// Confirm a finished calibration and show the packed parameters.
pub fn draw_calibration_done<D>(
    display: &mut D,
    words: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();
    let done = MonoTextStyle::new(LOG_FONT, GREEN);
    Text::with_text_style("Calibration complete!", PROMPT_POS, done, CENTERED)
        .draw(display)
        .ok();
    let detail = MonoTextStyle::new(LOG_FONT, WHITE);
    Text::with_text_style(words, PROMPT_DETAIL_POS, detail, CENTERED)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;

    fn display() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)) }

    #[test]
    fn test_button_fills_toggle_area() {
        let mut d = display();
        draw_toggle_button(&mut d);
        let inside = TOGGLE_AREA.top_left + Point::new(8, 4);
        assert_eq!(d.get_pixel(inside), TEAL);
    }

    #[test]
    fn test_corner_order() {
        assert_eq!(calibration_corner(0), Point::new(0, 0));
        assert_eq!(calibration_corner(1), Point::new(0, 319));
        assert_eq!(calibration_corner(2), Point::new(479, 0));
        assert_eq!(calibration_corner(3), Point::new(479, 319));
    }

    #[test]
    fn test_only_current_marker_visible() {
        let mut d = display();
        draw_calibration_prompt(&mut d, 0);
        assert_eq!(d.get_pixel(Point::new(5, 0)), MAGENTA);

        draw_calibration_prompt(&mut d, 3);
        assert_ne!(d.get_pixel(Point::new(5, 0)), MAGENTA);
        assert_eq!(d.get_pixel(Point::new(474, 319)), MAGENTA);
    }
}
