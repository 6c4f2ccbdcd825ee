//! On-screen log panel.
//!
//! The panel is composed off-screen in a [`Framebuffer`] ("sprite") and blitted
//! in one [`Image`] draw, so a refresh never shows a half-cleared panel.

use embedded_graphics::framebuffer::{Framebuffer, buffer_size};
use embedded_graphics::image::Image;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::{LittleEndian, RawU16};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::colors::{GREY, PANEL_BG};
use crate::config::{LOG_LINE_HEIGHT, LOG_PANEL_HEIGHT, LOG_PANEL_ORIGIN, LOG_PANEL_WIDTH};
use crate::log_buffer::LogBuffer;
use crate::styles::{LOG_FONT, TOP_LEFT};

type Sprite = Framebuffer<
    Rgb565,
    RawU16,
    LittleEndian,
    LOG_PANEL_WIDTH,
    LOG_PANEL_HEIGHT,
    { buffer_size::<Rgb565>(LOG_PANEL_WIDTH, LOG_PANEL_HEIGHT) },
>;

const BORDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GREY, 1);
const TEXT_INSET: Point = Point::new(4, 3);

/// Log panel with its own off-screen buffer.
pub struct LogPanel {
    sprite: Sprite,
}

impl LogPanel {
    /// Create a panel with an empty sprite.
    pub fn new() -> Self { Self { sprite: Framebuffer::new() } }

    /// Compose the current log lines into the sprite, oldest at the top.
    pub fn render(
        &mut self,
        log: &LogBuffer,
    ) {
        self.sprite.clear(PANEL_BG).ok();
        Rectangle::new(Point::zero(), self.sprite.size())
            .into_styled(BORDER_STYLE)
            .draw(&mut self.sprite)
            .ok();

        for (i, entry) in log.iter().enumerate() {
            let pos = TEXT_INSET + Point::new(0, (i as u32 * LOG_LINE_HEIGHT) as i32);
            let style = MonoTextStyle::new(LOG_FONT, entry.level.color());
            Text::with_text_style(entry.message.as_str(), pos, style, TOP_LEFT)
                .draw(&mut self.sprite)
                .ok();
        }
    }

    /// Render the log and blit the sprite to its place on the dashboard.
    pub fn draw<D>(
        &mut self,
        log: &LogBuffer,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.render(log);
        Image::new(&self.sprite.as_image(), LOG_PANEL_ORIGIN).draw(display).ok();
    }
}

impl Default for LogPanel {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::{GREEN, RED};
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::log_buffer::LogLevel;

    fn line_has_color(
        display: &SimulatorDisplay<Rgb565>,
        line: u32,
        color: Rgb565,
    ) -> bool {
        let top = LOG_PANEL_ORIGIN + TEXT_INSET + Point::new(0, (line * LOG_LINE_HEIGHT) as i32);
        Rectangle::new(top, Size::new(LOG_PANEL_WIDTH as u32 - 8, 10))
            .points()
            .any(|p| display.get_pixel(p) == color)
    }

    #[test]
    fn test_panel_background_and_lines() {
        let mut log = LogBuffer::new();
        log.push(LogLevel::Info, "Dashboard ready", 0);
        log.push(LogLevel::Error, "Touch read failed", 5);

        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        let mut panel = LogPanel::new();
        panel.draw(&log, &mut display);

        assert_eq!(display.get_pixel(LOG_PANEL_ORIGIN), GREY);
        assert_eq!(display.get_pixel(LOG_PANEL_ORIGIN + Point::new(2, 2)), PANEL_BG);
        assert!(line_has_color(&display, 0, GREEN));
        assert!(line_has_color(&display, 1, RED));
        assert!(!line_has_color(&display, 2, GREEN));
    }

    #[test]
    fn test_rerender_drops_evicted_lines() {
        let mut log = LogBuffer::new();
        log.push(LogLevel::Error, "old", 0);
        for i in 0..7 {
            log.push(LogLevel::Info, "new", i);
        }

        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        let mut panel = LogPanel::new();
        panel.draw(&log, &mut display);

        for line in 0..7 {
            assert!(!line_has_color(&display, line, RED));
        }
    }
}
