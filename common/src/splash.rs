//! Boot splash card, shown for [`SPLASH_MS`](crate::config::SPLASH_MS) before the dashboard.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, RoundedRectangle};
use embedded_graphics::text::Text;

use crate::colors::{BLACK, GREY, TEAL};
use crate::config::{CENTER_X, CENTER_Y};
use crate::styles::{CAPTION_STYLE, CENTERED, LOG_FONT, TITLE_STYLE};

const CARD: Rectangle = Rectangle::new(Point::new(CENTER_X - 150, CENTER_Y - 50), Size::new(300, 100));
const CARD_CORNER: Size = Size::new(10, 10);

const TITLE_POS: Point = Point::new(CENTER_X, CENTER_Y - 8);
const SUBTITLE_POS: Point = Point::new(CENTER_X, CENTER_Y + 16);
const VERSION_POS: Point = Point::new(CENTER_X, CENTER_Y + 32);

/// Clear the screen and draw the title card.
pub fn draw_splash<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    let card_style = PrimitiveStyleBuilder::new()
        .stroke_color(TEAL)
        .stroke_width(2)
        .fill_color(BLACK)
        .build();
    RoundedRectangle::with_equal_corners(CARD, CARD_CORNER)
        .into_styled(card_style)
        .draw(display)
        .ok();

    Text::with_text_style("Home Energy Monitor", TITLE_POS, TITLE_STYLE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style("solar / grid / hot water", SUBTITLE_POS, CAPTION_STYLE, CENTERED)
        .draw(display)
        .ok();

    let version = MonoTextStyle::new(LOG_FONT, GREY);
    Text::with_text_style(concat!("v", env!("CARGO_PKG_VERSION")), VERSION_POS, version, CENTERED)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

    #[test]
    fn test_splash_draws_card_border() {
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        draw_splash(&mut display);
        assert!(CARD.points().any(|p| display.get_pixel(p) == TEAL));
        assert_eq!(display.get_pixel(Point::new(2, 2)), BLACK);
    }
}
