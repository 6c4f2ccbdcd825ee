//! Low-level drawing primitives shared across widgets and engines.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, Triangle};

use crate::colors::{BLACK, TRACK};
use crate::config::{GLYPH_WIDTH, TRACK_HEIGHT};

const BLACK_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);
const TRACK_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(TRACK);

/// Thickness of the neutral rail running through a track band.
const RAIL_HEIGHT: u32 = 2;

/// Draw the neutral track tile over `area`: black band with a thin centre rail.
///
/// This is the filler that replaces arrow glyphs when they move on, wrap, or
/// their track is switched off.
pub fn draw_track_tile<D>(
    display: &mut D,
    area: Rectangle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if area.is_zero_sized() {
        return;
    }
    area.into_styled(BLACK_FILL).draw(display).ok();

    let rail_y = area.top_left.y + (area.size.height / 2) as i32 - 1;
    Rectangle::new(Point::new(area.top_left.x, rail_y), Size::new(area.size.width, RAIL_HEIGHT))
        .intersection(&area)
        .into_styled(TRACK_FILL)
        .draw(display)
        .ok();
}

/// Cell occupied by an arrow glyph whose left edge is at `x` on the band starting at `y`.
#[inline]
pub const fn glyph_cell(
    x: i32,
    y: i32,
) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(GLYPH_WIDTH, TRACK_HEIGHT))
}

/// Draw a solid chevron pointing right or left inside the glyph cell at `x`.
///
/// The cell is cleared to the track tile first so the chevron never smears.
pub fn draw_arrow_glyph<D>(
    display: &mut D,
    x: i32,
    y: i32,
    pointing_right: bool,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_track_tile(display, glyph_cell(x, y));

    let w = GLYPH_WIDTH as i32 - 1;
    let h = TRACK_HEIGHT as i32 - 1;
    let mid = y + h / 2;
    let (back, tip) = if pointing_right { (x, x + w) } else { (x + w, x) };

    Triangle::new(Point::new(back, y + 1), Point::new(tip, mid), Point::new(back, y + h - 1))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::GREEN;

    fn display() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(64, 32)) }

    #[test]
    fn test_track_tile_has_rail() {
        let mut d = display();
        draw_track_tile(&mut d, Rectangle::new(Point::new(0, 0), Size::new(16, TRACK_HEIGHT)));
        assert_eq!(d.get_pixel(Point::new(4, 0)), BLACK);
        assert_eq!(d.get_pixel(Point::new(4, 5)), TRACK);
        assert_eq!(d.get_pixel(Point::new(4, 6)), TRACK);
        assert_eq!(d.get_pixel(Point::new(4, 11)), BLACK);
    }

    #[test]
    fn test_arrow_tip_direction() {
        let mut d = display();
        draw_arrow_glyph(&mut d, 0, 0, true, GREEN);
        // Right-pointing: the back edge is solid, the tip is on the right at mid-height
        assert_eq!(d.get_pixel(Point::new(0, 2)), GREEN);
        assert_eq!(d.get_pixel(Point::new(5, 5)), GREEN);
        assert_ne!(d.get_pixel(Point::new(7, 1)), GREEN);

        let mut d = display();
        draw_arrow_glyph(&mut d, 0, 0, false, GREEN);
        assert_eq!(d.get_pixel(Point::new(7, 2)), GREEN);
        assert_eq!(d.get_pixel(Point::new(2, 5)), GREEN);
        assert_ne!(d.get_pixel(Point::new(0, 1)), GREEN);
    }
}
