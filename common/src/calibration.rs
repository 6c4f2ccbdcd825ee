//! Resistive touch calibration.
//!
//! The XPT2046 reports raw 12-bit readings whose axes may be swapped or inverted
//! relative to the panel, depending on how the glass is mounted and the display
//! rotation. Calibration samples the four screen corners and derives:
//!
//! - per-axis origin and span in raw units,
//! - whether the raw axes are swapped relative to the screen,
//! - whether either axis runs backwards.
//!
//! The five parameters pack into `[u16; 5]` words (origin x, span x, origin y,
//! span y, flags) so they can be printed once and pasted back in as defaults.
//!
//! # Corner order
//!
//! Samples are taken top-left, bottom-left, top-right, bottom-right.

use embedded_graphics::prelude::{Point, Size};

/// A raw, unscaled touch reading.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPoint {
    /// Raw X channel reading (0-4095).
    pub x: u16,
    /// Raw Y channel reading (0-4095).
    pub y: u16,
}

impl RawPoint {
    /// Create a raw point.
    pub const fn new(
        x: u16,
        y: u16,
    ) -> Self {
        Self { x, y }
    }
}

/// Flag bit: raw X drives screen Y and vice versa.
const FLAG_SWAP_XY: u16 = 1 << 0;
/// Flag bit: screen X grows as raw readings shrink.
const FLAG_INVERT_X: u16 = 1 << 1;
/// Flag bit: screen Y grows as raw readings shrink.
const FLAG_INVERT_Y: u16 = 1 << 2;

/// Stored calibration used when the panel is not recalibrated at boot.
pub const DEFAULT_CALIBRATION: TouchCalibration = TouchCalibration::from_words([310, 3420, 260, 3480, FLAG_SWAP_XY | FLAG_INVERT_Y]);

/// Mapping from raw touch readings to screen pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchCalibration {
    x_origin: u16,
    x_span: u16,
    y_origin: u16,
    y_span: u16,
    swap_xy: bool,
    invert_x: bool,
    invert_y: bool,
}

impl TouchCalibration {
    /// Rebuild a calibration from its packed words.
    ///
    /// Zero spans are bumped to 1 so mapping never divides by zero.
    pub const fn from_words(words: [u16; 5]) -> Self {
        Self {
            x_origin: words[0],
            x_span: if words[1] == 0 { 1 } else { words[1] },
            y_origin: words[2],
            y_span: if words[3] == 0 { 1 } else { words[3] },
            swap_xy: words[4] & FLAG_SWAP_XY != 0,
            invert_x: words[4] & FLAG_INVERT_X != 0,
            invert_y: words[4] & FLAG_INVERT_Y != 0,
        }
    }

    /// Pack the calibration into five words (origin x, span x, origin y, span y, flags).
    pub const fn as_words(&self) -> [u16; 5] {
        let mut flags = 0;
        if self.swap_xy {
            flags |= FLAG_SWAP_XY;
        }
        if self.invert_x {
            flags |= FLAG_INVERT_X;
        }
        if self.invert_y {
            flags |= FLAG_INVERT_Y;
        }
        [self.x_origin, self.x_span, self.y_origin, self.y_span, flags]
    }

    /// Derive a calibration from averaged corner samples.
    ///
    /// `corners` are in the order top-left, bottom-left, top-right, bottom-right.
    pub fn from_corners(corners: [RawPoint; 4]) -> Self {
        let [tl, bl, tr, br] = corners.map(|p| (i32::from(p.x), i32::from(p.y)));

        // Going from top-left to bottom-left only moves screen Y. If the raw X
        // reading changed more than raw Y did, the axes are swapped.
        let swap_xy = (tl.0 - bl.0).abs() > (tl.1 - bl.1).abs();

        let (mut x0, mut x1, mut y0, mut y1) = if swap_xy {
            ((tl.1 + bl.1) / 2, (tr.1 + br.1) / 2, (tl.0 + tr.0) / 2, (bl.0 + br.0) / 2)
        } else {
            ((tl.0 + bl.0) / 2, (tr.0 + br.0) / 2, (tl.1 + tr.1) / 2, (bl.1 + br.1) / 2)
        };

        let invert_x = x0 > x1;
        if invert_x {
            core::mem::swap(&mut x0, &mut x1);
        }
        let invert_y = y0 > y1;
        if invert_y {
            core::mem::swap(&mut y0, &mut y1);
        }

        Self {
            x_origin: x0.max(1) as u16,
            x_span: (x1 - x0).max(1) as u16,
            y_origin: y0.max(1) as u16,
            y_span: (y1 - y0).max(1) as u16,
            swap_xy,
            invert_x,
            invert_y,
        }
    }

    /// Convert a raw reading to screen coordinates.
    ///
    /// Returns `None` for readings that land outside the screen.
    pub fn map(
        &self,
        raw: RawPoint,
        screen: Size,
    ) -> Option<Point> {
        let (along_x, along_y) = if self.swap_xy { (raw.y, raw.x) } else { (raw.x, raw.y) };

        let width = screen.width as i32;
        let height = screen.height as i32;

        let mut x = (i32::from(along_x) - i32::from(self.x_origin)) * width / i32::from(self.x_span);
        let mut y = (i32::from(along_y) - i32::from(self.y_origin)) * height / i32::from(self.y_span);

        if self.invert_x {
            x = width - 1 - x;
        }
        if self.invert_y {
            y = height - 1 - y;
        }

        ((0..width).contains(&x) && (0..height).contains(&y)).then(|| Point::new(x, y))
    }
}

impl Default for TouchCalibration {
    fn default() -> Self { DEFAULT_CALIBRATION }
}

// =============================================================================
// Unit Tests
// =============================================================================
