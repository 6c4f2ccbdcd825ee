//! Static dashboard icons: sun, house, pylon and water tank.
//!
//! Positions are fixed and line up with the flow track bands in [`crate::flow`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle};
use embedded_graphics::text::Text;

use crate::colors::{BLACK, BLUE, BRICK, GREY, ORANGE, ROOF, TRACK, WHITE, YELLOW};
use crate::styles::{CAPTION_STYLE, CENTERED};

// =============================================================================
// Layout
// =============================================================================

const SUN_CENTER: Point = Point::new(50, 96);
const SUN_DIAMETER: u32 = 40;
const SUN_RAY_INNER: i32 = 25;
const SUN_RAY_OUTER: i32 = 33;

const HOUSE_BODY: Rectangle = Rectangle::new(Point::new(195, 104), Size::new(105, 86));
const HOUSE_DOOR: Rectangle = Rectangle::new(Point::new(236, 152), Size::new(22, 38));
const HOUSE_WINDOW: Rectangle = Rectangle::new(Point::new(206, 118), Size::new(20, 18));
const ROOF_LEFT: Point = Point::new(188, 104);
const ROOF_PEAK: Point = Point::new(247, 58);
const ROOF_RIGHT: Point = Point::new(307, 104);

/// Hot-water pipe from the house down to the heating track.
const PIPE_TOP: Point = Point::new(292, 190);
const PIPE_BEND: Point = Point::new(292, 267);
const PIPE_END: Point = Point::new(299, 267);

const PYLON_TOP: Point = Point::new(430, 66);
const PYLON_LEFT_FOOT: Point = Point::new(410, 200);
const PYLON_RIGHT_FOOT: Point = Point::new(450, 200);

const TANK: Rectangle = Rectangle::new(Point::new(400, 232), Size::new(50, 70));
const TANK_WATER: Rectangle = Rectangle::new(Point::new(403, 252), Size::new(44, 47));
const TANK_CORNER: Size = Size::new(8, 8);

const SUN_CAPTION: Point = Point::new(50, 140);
const HOUSE_CAPTION: Point = Point::new(247, 204);
const GRID_CAPTION: Point = Point::new(430, 214);
const TANK_CAPTION: Point = Point::new(425, 314);

const BLACK_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);
const YELLOW_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(YELLOW);
const YELLOW_STROKE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(YELLOW, 2);
const BRICK_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BRICK);
const ROOF_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(ROOF);
const GREY_STROKE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GREY, 2);
const PIPE_STROKE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(TRACK, 2);
const WHITE_STROKE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(WHITE, 2);
const BLUE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLUE);

/// Ray direction vectors (scaled by 10) for the eight sun rays.
const RAYS: [(i32, i32); 8] = [(10, 0), (7, 7), (0, 10), (-7, 7), (-10, 0), (-7, -7), (0, -10), (7, -7)];

// =============================================================================
// Icons
// =============================================================================

/// Sun with eight rays, feeding the solar track.
pub fn draw_sun<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    Circle::with_center(SUN_CENTER, SUN_DIAMETER)
        .into_styled(YELLOW_FILL)
        .draw(display)
        .ok();

    for (dx, dy) in RAYS {
        let inner = SUN_CENTER + Point::new(dx * SUN_RAY_INNER / 10, dy * SUN_RAY_INNER / 10);
        let outer = SUN_CENTER + Point::new(dx * SUN_RAY_OUTER / 10, dy * SUN_RAY_OUTER / 10);
        Line::new(inner, outer).into_styled(YELLOW_STROKE).draw(display).ok();
    }

    Text::with_text_style("SOLAR", SUN_CAPTION, CAPTION_STYLE, CENTERED)
        .draw(display)
        .ok();
}

/// House outline with roof, door and window.
pub fn draw_house<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    HOUSE_BODY.into_styled(BRICK_FILL).draw(display).ok();
    Triangle::new(ROOF_LEFT, ROOF_PEAK, ROOF_RIGHT)
        .into_styled(ROOF_FILL)
        .draw(display)
        .ok();
    HOUSE_DOOR.into_styled(BLACK_FILL).draw(display).ok();
    HOUSE_WINDOW.into_styled(YELLOW_FILL).draw(display).ok();

    Line::new(PIPE_TOP, PIPE_BEND).into_styled(PIPE_STROKE).draw(display).ok();
    Line::new(PIPE_BEND, PIPE_END).into_styled(PIPE_STROKE).draw(display).ok();

    Text::with_text_style("HOUSE", HOUSE_CAPTION, CAPTION_STYLE, CENTERED)
        .draw(display)
        .ok();
}

/// Lattice transmission pylon.
pub fn draw_pylon<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(PYLON_LEFT_FOOT, PYLON_TOP).into_styled(GREY_STROKE).draw(display).ok();
    Line::new(PYLON_RIGHT_FOOT, PYLON_TOP).into_styled(GREY_STROKE).draw(display).ok();

    // Cross arms carrying the lines
    Line::new(Point::new(400, 92), Point::new(460, 92))
        .into_styled(GREY_STROKE)
        .draw(display)
        .ok();
    Line::new(Point::new(406, 114), Point::new(454, 114))
        .into_styled(GREY_STROKE)
        .draw(display)
        .ok();

    // Bracing between the legs
    Line::new(Point::new(422, 120), Point::new(442, 160))
        .into_styled(GREY_STROKE)
        .draw(display)
        .ok();
    Line::new(Point::new(438, 120), Point::new(418, 160))
        .into_styled(GREY_STROKE)
        .draw(display)
        .ok();
    Line::new(Point::new(418, 160), Point::new(446, 196))
        .into_styled(GREY_STROKE)
        .draw(display)
        .ok();
    Line::new(Point::new(442, 160), Point::new(414, 196))
        .into_styled(GREY_STROKE)
        .draw(display)
        .ok();

    Text::with_text_style("GRID", GRID_CAPTION, CAPTION_STYLE, CENTERED)
        .draw(display)
        .ok();
}

/// Hot-water tank. The element glows orange while heating.
pub fn draw_tank<D>(
    display: &mut D,
    heating: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    RoundedRectangle::with_equal_corners(TANK, TANK_CORNER)
        .into_styled(WHITE_STROKE)
        .draw(display)
        .ok();
    TANK_WATER.into_styled(BLUE_FILL).draw(display).ok();
    draw_heating_element(display, heating);

    Text::with_text_style("WATER", TANK_CAPTION, CAPTION_STYLE, CENTERED)
        .draw(display)
        .ok();
}

/// Redraw only the zig-zag element inside the tank.
pub fn draw_heating_element<D>(
    display: &mut D,
    heating: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyle::with_stroke(if heating { ORANGE } else { GREY }, 2);
    let mut prev = Point::new(410, 290);
    for i in 1..=6 {
        let next = Point::new(410 + i * 5, if i % 2 == 0 { 290 } else { 280 });
        Line::new(prev, next).into_styled(style).draw(display).ok();
        prev = next;
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

    fn display() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)) }

    #[test]
    fn test_sun_centre_is_yellow() {
        let mut d = display();
        draw_sun(&mut d);
        assert_eq!(d.get_pixel(SUN_CENTER), YELLOW);
    }

    #[test]
    fn test_house_body_and_door() {
        let mut d = display();
        draw_house(&mut d);
        assert_eq!(d.get_pixel(Point::new(280, 180)), BRICK);
        assert_eq!(d.get_pixel(Point::new(245, 170)), BLACK);
        assert_eq!(d.get_pixel(Point::new(247, 80)), ROOF);
    }

    #[test]
    fn test_heating_element_color() {
        let element = Rectangle::new(Point::new(406, 276), Size::new(38, 18));
        let mut d = display();

        draw_heating_element(&mut d, true);
        assert!(element.points().any(|p| d.get_pixel(p) == ORANGE));

        draw_heating_element(&mut d, false);
        assert!(element.points().all(|p| d.get_pixel(p) != ORANGE));
        assert!(element.points().any(|p| d.get_pixel(p) == GREY));
    }
}
