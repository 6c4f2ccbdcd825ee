//! Falling-glyph screensaver ("matrix rain").
//!
//! The screen is a grid of [`MAX_COL`] x [`MAX_CHR`] cells. Each tick visits
//! [`MAX_COL`] randomly chosen columns (with replacement). A visit shifts the
//! column down one row, ages every brightness, may spawn a new bright leading
//! glyph, and redraws the column.
//!
//! Brightness only moves down along a glyph's path: values above 20 fall by 4
//! per visit, values at or below 20 by 1, and a cell reaching 0 goes blank.
//! The only way up is a spawn, which sets row 0 to [`PEAK_BRIGHTNESS`].

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use rand::{Rng, RngCore};

use crate::colors::{BLACK, rain_shade};
use crate::config::{CHAR_HEIGHT, CHAR_WIDTH, MAX_CHR, MAX_COL, MAX_COL_DOT6, PEAK_BRIGHTNESS};
use crate::scheduler::EngineGate;
use crate::styles::{RAIN_FONT, TOP_LEFT};

/// Above this brightness a cell decays quickly.
const RAPID_DECAY_ABOVE: u8 = 20;
const RAPID_DECAY: u8 = 4;
const SLOW_DECAY: u8 = 1;

/// One in this many visits to a spawning column starts a new stream.
const SPAWN_ODDS: u32 = 20;

/// Printable ASCII range used for glyphs.
const GLYPH_MIN: u8 = 33;
const GLYPH_MAX: u8 = 126;

const CELL_BG: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

/// One grid cell. A glyph of 0 is blank.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    /// ASCII glyph, or 0 for blank.
    pub glyph: u8,
    /// Brightness 0-63.
    pub brightness: u8,
}

impl Cell {
    const BLANK: Self = Self { glyph: 0, brightness: 0 };

    /// Whether nothing is drawn in this cell.
    #[inline]
    pub const fn is_blank(&self) -> bool { self.glyph == 0 }
}

type Column = [Cell; MAX_CHR];

#[inline]
const fn age(brightness: u8) -> u8 {
    if brightness > RAPID_DECAY_ABOVE {
        brightness - RAPID_DECAY
    } else {
        brightness.saturating_sub(SLOW_DECAY)
    }
}

/// Screensaver engine state.
pub struct MatrixRain<R> {
    grid: [Column; MAX_COL],
    rng: R,
    gate: EngineGate,
}

impl<R: RngCore> MatrixRain<R> {
    /// Create a cleared, paused screensaver drawing randomness from `rng`.
    pub fn new(rng: R) -> Self {
        let mut rain = Self {
            grid: [[Cell::BLANK; MAX_CHR]; MAX_COL],
            rng,
            gate: EngineGate::paused(),
        };
        rain.clear();
        rain
    }

    /// Reset the grid: every cell blank, except row 0 of each column primed at peak brightness.
    pub fn clear(&mut self) {
        for column in &mut self.grid {
            *column = [Cell::BLANK; MAX_CHR];
            column[0].brightness = PEAK_BRIGHTNESS;
        }
    }

    /// Read one cell.
    #[inline]
    pub const fn cell(
        &self,
        col: usize,
        row: usize,
    ) -> Cell {
        self.grid[col][row]
    }

    fn random_glyph(&mut self) -> u8 { self.rng.random_range(GLYPH_MIN..=GLYPH_MAX) }

    /// Update one column's state. Returns `true` if a new stream was spawned.
    pub fn advance_column(
        &mut self,
        col: usize,
    ) -> bool {
        let lead = self.grid[col][0];
        if lead.is_blank() || lead.brightness == PEAK_BRIGHTNESS {
            self.grid[col][0].glyph = self.random_glyph();
        }

        let column = &mut self.grid[col];
        for row in (1..MAX_CHR).rev() {
            column[row] = column[row - 1];
        }

        for cell in column.iter_mut() {
            cell.brightness = age(cell.brightness);
            if cell.brightness == 0 {
                cell.glyph = 0;
            }
        }

        let spawned = col < MAX_COL_DOT6 && self.rng.random_range(0..SPAWN_ODDS) == 0;
        if spawned {
            let glyph = self.random_glyph();
            self.grid[col][0] = Cell {
                glyph,
                brightness: PEAK_BRIGHTNESS,
            };
        }
        spawned
    }

    /// Run one screensaver tick: [`MAX_COL`] random column visits.
    ///
    /// A paused engine draws nothing.
    pub fn step<D>(
        &mut self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.gate.is_paused() {
            return;
        }
        for _ in 0..MAX_COL {
            let col = self.rng.random_range(0..MAX_COL);
            self.advance_column(col);
            self.draw_column(col, display);
        }
    }

    /// Draw every cell of one column.
    pub fn draw_column<D>(
        &self,
        col: usize,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let x = (col as u32 * CHAR_WIDTH) as i32;
        for (row, cell) in self.grid[col].iter().enumerate() {
            let origin = Point::new(x, (row as u32 * CHAR_HEIGHT) as i32);
            Rectangle::new(origin, Size::new(CHAR_WIDTH, CHAR_HEIGHT))
                .into_styled(CELL_BG)
                .draw(display)
                .ok();

            if cell.is_blank() {
                continue;
            }
            let bytes = [cell.glyph];
            if let Ok(text) = core::str::from_utf8(&bytes) {
                let style = MonoTextStyle::new(RAIN_FONT, rain_shade(cell.brightness));
                Text::with_text_style(text, origin, style, TOP_LEFT).draw(display).ok();
            }
        }
    }

    /// Mutable access to the pause gate.
    #[inline]
    pub fn gate_mut(&mut self) -> &mut EngineGate { &mut self.gate }

    /// Whether the engine is paused.
    #[inline]
    pub const fn is_paused(&self) -> bool { self.gate.is_paused() }
}

// =============================================================================
// Unit Tests
// =============================================================================
