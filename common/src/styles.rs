//! Pre-computed static text styles.
//!
//! `MonoTextStyle` and `TextStyle` are built as `const` so draw functions reference
//! them directly instead of constructing a style per call. Styles that need a dynamic
//! color use the exposed font references with `MonoTextStyle::new(FONT, color)`.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X15, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_14_POINT;

use crate::colors::{BLACK, TEAL, WHITE, YELLOW};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text. Used for icon captions and the splash card.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text with a top baseline. Used for log lines and rain glyphs.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Font References
// =============================================================================

/// Log panel font (6x10). 44 characters fit in 264px.
pub const LOG_FONT: &MonoFont = &FONT_6X10;

/// Screensaver glyph font (9x15), drawn in a 12x16 cell.
pub const RAIN_FONT: &MonoFont = &FONT_9X15;

/// Power readout font, for labels whose color follows the flow direction.
pub const VALUE_FONT: &MonoFont = &PROFONT_14_POINT;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Small white captions under icons.
pub const CAPTION_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Title across the top of the dashboard.
pub const TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, TEAL);

/// Power readouts next to the icons (`ProFont` 14pt).
pub const VALUE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_14_POINT, YELLOW);

/// Text on the toggle button.
pub const BUTTON_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, BLACK);
