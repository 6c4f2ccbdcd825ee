//! Display layout constants and runtime timing configuration.
//!
//! Layout values are `const` and computed at compile time; anything a deployment
//! might tune (intervals, timeouts, touch policy) lives in [`Config`].

use core::fmt;

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ILI9486 in landscape: 480x320).
pub const SCREEN_WIDTH: u32 = 480;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 320;

/// Screen center X coordinate.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

// =============================================================================
// Screensaver Grid
// =============================================================================

/// Width of one rain glyph cell in pixels.
pub const CHAR_WIDTH: u32 = 12;

/// Height of one rain glyph cell in pixels.
pub const CHAR_HEIGHT: u32 = 16;

/// Number of rain columns across the screen.
pub const MAX_COL: usize = (SCREEN_WIDTH / CHAR_WIDTH) as usize;

/// Number of glyph rows per rain column.
pub const MAX_CHR: usize = (SCREEN_HEIGHT / CHAR_HEIGHT) as usize;

/// Columns below this index may spawn new streams (first 60% of the screen).
pub const MAX_COL_DOT6: usize = MAX_COL * 6 / 10;

/// Brightness of a freshly spawned glyph.
pub const PEAK_BRIGHTNESS: u8 = 63;

// =============================================================================
// Flow Tracks
// =============================================================================

/// Width of an arrow glyph in pixels.
pub const GLYPH_WIDTH: u32 = 8;

/// Height of the band an arrow track occupies.
pub const TRACK_HEIGHT: u32 = 12;

// =============================================================================
// Log Panel
// =============================================================================

/// Number of lines kept in the log ring (and shown on the panel).
pub const LOG_LINES: usize = 7;

/// Maximum characters per log line.
pub const LOG_LINE_CHARS: usize = 44;

/// Height of one log line on the panel.
pub const LOG_LINE_HEIGHT: u32 = 12;

/// Log panel width: 44 glyphs of 6px plus padding.
pub const LOG_PANEL_WIDTH: usize = LOG_LINE_CHARS * 6 + 8;

/// Log panel height: 7 lines plus padding.
pub const LOG_PANEL_HEIGHT: usize = LOG_LINES * LOG_LINE_HEIGHT as usize + 6;

/// Top-left corner of the log panel on screen.
pub const LOG_PANEL_ORIGIN: Point = Point::new(8, 222);

// =============================================================================
// Touch
// =============================================================================

/// Area of the screensaver toggle button (top-right corner).
///
/// The same area switches back from the screensaver.
pub const TOGGLE_AREA: Rectangle = Rectangle::new(Point::new(392, 6), Size::new(80, 28));

/// Raw readings above this pressure count as a touch.
pub const TOUCH_PRESSURE_THRESHOLD: u16 = 350;

// =============================================================================
// Timing Defaults
// =============================================================================

/// Flow arrow step interval.
pub const ANIMATION_INTERVAL_MS: u32 = 50;

/// Screensaver step interval.
pub const SCREENSAVER_INTERVAL_MS: u32 = 200;

/// Idle time before the screensaver starts (2 minutes).
pub const INACTIVITY_TIMEOUT_MS: u32 = 120_000;

/// Minimum time between accepted touch edges.
pub const TOUCH_DEBOUNCE_MS: u32 = 50;

/// How long the splash screen stays up at boot.
pub const SPLASH_MS: u32 = 4_000;

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Runtime-tunable timing and touch policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Milliseconds between flow arrow steps.
    pub animation_interval_ms: u32,
    /// Milliseconds between screensaver steps.
    pub screensaver_interval_ms: u32,
    /// Idle milliseconds before the screensaver takes over.
    pub inactivity_timeout_ms: u32,
    /// Reset the inactivity baseline on any touch, not just the toggle button.
    pub any_touch_resets_inactivity: bool,
    /// Debounce applied to touch press edges.
    pub touch_debounce_ms: u32,
}

impl Config {
    /// Check the configuration for values that would stall or thrash the loop.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.animation_interval_ms == 0 {
            return Err(ConfigError::ZeroAnimationInterval);
        }
        if self.screensaver_interval_ms == 0 {
            return Err(ConfigError::ZeroScreensaverInterval);
        }
        if self.inactivity_timeout_ms < self.animation_interval_ms {
            return Err(ConfigError::TimeoutTooShort);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation_interval_ms: ANIMATION_INTERVAL_MS,
            screensaver_interval_ms: SCREENSAVER_INTERVAL_MS,
            inactivity_timeout_ms: INACTIVITY_TIMEOUT_MS,
            any_touch_resets_inactivity: false,
            touch_debounce_ms: TOUCH_DEBOUNCE_MS,
        }
    }
}

/// Reasons a [`Config`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Animation interval of zero would step the arrows every iteration.
    ZeroAnimationInterval,
    /// Screensaver interval of zero would step the rain every iteration.
    ZeroScreensaverInterval,
    /// Inactivity timeout shorter than one animation step.
    TimeoutTooShort,
}

impl fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::ZeroAnimationInterval => f.write_str("animation interval must be non-zero"),
            Self::ZeroScreensaverInterval => f.write_str("screensaver interval must be non-zero"),
            Self::TimeoutTooShort => f.write_str("inactivity timeout is shorter than the animation interval"),
        }
    }
}

impl core::error::Error for ConfigError {}

// =============================================================================
// Unit Tests
// =============================================================================
