//! Color constants for the home monitor.
//!
//! Standard colors come from the `RgbColor` trait constants; the rest are tuned
//! RGB565 values (5 bits red, 6 bits green, 5 bits blue).

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Dashboard and screensaver background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Labels and the leading glyph of a rain stream.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Error log lines.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Info log lines and calibration success.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. Sun icon and warning log lines.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Pure blue. Water in the tank icon.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Magenta. Calibration corner markers.
pub const MAGENTA: Rgb565 = Rgb565::MAGENTA;

// =============================================================================
// Custom Colors
// =============================================================================

/// Grey (0x5AEB). Pylon lattice and debug log lines.
pub const GREY: Rgb565 = Rgb565::new(11, 23, 11);

/// Teal (0x028A, RGB 0/80/80). Default text color on the splash screen.
pub const TEAL: Rgb565 = Rgb565::new(0, 20, 10);

/// Orange (255/127/0). Water heating arrows and the boiler element.
pub const ORANGE: Rgb565 = Rgb565::new(31, 31, 0);

/// Dark grey. Neutral track tile under the flow arrows.
pub const TRACK: Rgb565 = Rgb565::new(4, 8, 4);

/// Brick red. House walls.
pub const BRICK: Rgb565 = Rgb565::new(20, 12, 6);

/// Roof tiles.
pub const ROOF: Rgb565 = Rgb565::new(14, 6, 3);

/// Log panel background.
pub const PANEL_BG: Rgb565 = Rgb565::new(2, 4, 3);

/// Import arrows (power drawn from the grid).
pub const IMPORT: Rgb565 = Rgb565::new(31, 20, 4);

/// Export and solar arrows (power flowing out of the panels).
pub const EXPORT: Rgb565 = Rgb565::new(6, 58, 6);

// =============================================================================
// Screensaver Shades
// =============================================================================

/// Map a rain brightness (0-63) to a green shade.
///
/// Peak brightness renders white so the leading glyph stands out.
#[inline]
pub fn rain_shade(brightness: u8) -> Rgb565 {
    if brightness >= 63 {
        WHITE
    } else {
        Rgb565::new(0, brightness.min(63), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_shade_peak_is_white() {
        assert_eq!(rain_shade(63), WHITE);
    }

    #[test]
    fn test_rain_shade_scales_green() {
        assert_eq!(rain_shade(0), BLACK);
        assert_eq!(rain_shade(30).g(), 30);
        assert_eq!(rain_shade(30).r(), 0);
    }
}
