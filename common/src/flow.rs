//! Power-flow arrows (the dashboard animation engine).
//!
//! Each [`FlowTrack`] moves a chevron along a horizontal band between two icons.
//! A tick draws the chevron at the current position, advances it by the signed
//! step, and once it has travelled the full track width paints the neutral
//! track tile over the cell it just drew and restarts at the origin.
//!
//! ```text
//!  origin (right-moving)                     origin (left-moving)
//!  │                                                       │
//!  start ──▶ ──▶ ──▶ ──▶ ──▶ ──▶ ──▶ ──▶ ──▶ ──▶ start + width
//! ```
//!
//! The position always stays within `[start, start + width]`.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::{EXPORT, IMPORT, ORANGE, YELLOW};
use crate::config::{GLYPH_WIDTH, TRACK_HEIGHT};
use crate::scheduler::EngineGate;
use crate::widgets::{draw_arrow_glyph, draw_track_tile, glyph_cell};

// =============================================================================
// Track Layout
// =============================================================================

/// Solar panels → house.
const SOLAR_TRACK: FlowTrack = FlowTrack::new(100, 90, 80, 5, YELLOW);
/// Pylon → house (importing).
const IMPORT_TRACK: FlowTrack = FlowTrack::new(310, 124, 80, -5, IMPORT);
/// House → pylon (exporting).
const EXPORT_TRACK: FlowTrack = FlowTrack::new(310, 150, 80, 5, EXPORT);
/// House → water tank (immersion heater on).
const HEATING_TRACK: FlowTrack = FlowTrack::new(300, 262, 90, 5, ORANGE);

/// The four animated flows on the dashboard.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlowKind {
    /// Solar generation into the house.
    Solar,
    /// Power drawn from the grid.
    GridImport,
    /// Surplus pushed to the grid.
    GridExport,
    /// Surplus diverted to the water heater.
    WaterHeating,
}

impl FlowKind {
    /// All kinds in track order.
    pub const ALL: [Self; 4] = [Self::Solar, Self::GridImport, Self::GridExport, Self::WaterHeating];

    #[inline]
    const fn index(self) -> usize {
        match self {
            Self::Solar => 0,
            Self::GridImport => 1,
            Self::GridExport => 2,
            Self::WaterHeating => 3,
        }
    }

    /// Short name for log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::GridImport => "import",
            Self::GridExport => "export",
            Self::WaterHeating => "heating",
        }
    }
}

// =============================================================================
// Flow Track
// =============================================================================

/// What a single [`FlowTrack::advance`] did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Advance {
    /// Left edge of the cell drawn this tick.
    pub drawn: i32,
    /// Whether the track wrapped back to its origin.
    pub wrapped: bool,
}

/// One animated directional indicator on a bounded horizontal track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowTrack {
    start: i32,
    y: i32,
    width: i32,
    step: i32,
    color: Rgb565,
    pos: i32,
    enabled: bool,
    last_drawn: Option<i32>,
}

impl FlowTrack {
    /// Create a disabled track positioned at its origin.
    ///
    /// A positive `step` moves right from `start`, a negative one moves left from
    /// `start + width`.
    pub const fn new(
        start: i32,
        y: i32,
        width: i32,
        step: i32,
        color: Rgb565,
    ) -> Self {
        let origin = if step >= 0 { start } else { start + width };
        Self {
            start,
            y,
            width,
            step,
            color,
            pos: origin,
            enabled: false,
            last_drawn: None,
        }
    }

    /// Where the chevron starts and restarts.
    #[inline]
    pub const fn origin(&self) -> i32 { if self.step >= 0 { self.start } else { self.start + self.width } }

    /// Current position (left edge of the next cell to draw).
    #[inline]
    pub const fn position(&self) -> i32 { self.pos }

    /// Left bound of the track.
    #[inline]
    pub const fn start(&self) -> i32 { self.start }

    /// Travel distance before wrapping.
    #[inline]
    pub const fn width(&self) -> i32 { self.width }

    /// Signed pixels per tick.
    #[inline]
    pub const fn step(&self) -> i32 { self.step }

    /// Whether the track animates.
    #[inline]
    pub const fn is_enabled(&self) -> bool { self.enabled }

    #[inline]
    const fn moves_right(&self) -> bool { self.step >= 0 }

    /// Full band the track may paint: every cell from `start` to `start + width`.
    pub const fn band(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.start, self.y),
            Size::new(self.width as u32 + GLYPH_WIDTH, TRACK_HEIGHT),
        )
    }

    /// Advance the position by one step, wrapping once the full width is travelled.
    ///
    /// Pure state update; [`FlowTrack::tick`] does the drawing around it.
    pub fn advance(&mut self) -> Advance {
        let drawn = self.pos;
        self.pos += self.step;

        let travelled = (self.pos - self.origin()).abs();
        let wrapped = travelled >= self.width;
        if wrapped {
            self.pos = self.origin();
        }
        Advance { drawn, wrapped }
    }

    /// Run one animation tick. Returns `true` if the track wrapped (and a filler was drawn).
    pub fn tick<D>(
        &mut self,
        display: &mut D,
    ) -> bool
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.enabled {
            return false;
        }

        self.draw_trail(display);
        draw_arrow_glyph(display, self.pos, self.y, self.moves_right(), self.color);

        let outcome = self.advance();
        if outcome.wrapped {
            draw_track_tile(display, glyph_cell(outcome.drawn, self.y));
            self.last_drawn = None;
        } else {
            self.last_drawn = Some(outcome.drawn);
        }
        outcome.wrapped
    }

    /// Clear the strip the previous glyph occupied behind the current one.
    fn draw_trail<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let gap = self.step.unsigned_abs();
        let x = if self.moves_right() { self.pos - gap as i32 } else { self.pos + GLYPH_WIDTH as i32 };
        let strip = Rectangle::new(Point::new(x, self.y), Size::new(gap, TRACK_HEIGHT)).intersection(&self.band());
        draw_track_tile(display, strip);
    }

    /// Switch the track on or off.
    ///
    /// Disabling paints the filler over the last glyph. Enabling restarts the
    /// chevron at the origin. Setting the current state again does nothing.
    pub fn set_enabled<D>(
        &mut self,
        enabled: bool,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        if enabled == self.enabled {
            return;
        }
        if !enabled && let Some(x) = self.last_drawn {
            draw_track_tile(display, glyph_cell(x, self.y));
        }
        self.set_enabled_quiet(enabled);
    }

    /// Switch the track on or off without drawing.
    ///
    /// For use while the track is not on screen; the next full redraw repaints the band.
    pub fn set_enabled_quiet(
        &mut self,
        enabled: bool,
    ) {
        if enabled != self.enabled {
            self.enabled = enabled;
            self.rewind();
        }
    }

    /// Forget drawn state and restart at the origin (after a full-screen redraw).
    pub fn rewind(&mut self) {
        self.pos = self.origin();
        self.last_drawn = None;
    }
}

// =============================================================================
// Flow Arrows Engine
// =============================================================================

/// The dashboard's set of independent flow tracks.
pub struct FlowArrows {
    tracks: [FlowTrack; 4],
    gate: EngineGate,
}

impl FlowArrows {
    /// Tracks at their dashboard positions, all disabled.
    pub const fn new() -> Self {
        Self {
            tracks: [SOLAR_TRACK, IMPORT_TRACK, EXPORT_TRACK, HEATING_TRACK],
            gate: EngineGate::new(),
        }
    }

    /// Access one track.
    #[inline]
    pub const fn track(
        &self,
        kind: FlowKind,
    ) -> &FlowTrack {
        &self.tracks[kind.index()]
    }

    /// Enable or disable one track.
    pub fn set_enabled<D>(
        &mut self,
        kind: FlowKind,
        enabled: bool,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.tracks[kind.index()].set_enabled(enabled, display);
    }

    /// Enable or disable one track without drawing (dashboard not visible).
    pub fn set_enabled_quiet(
        &mut self,
        kind: FlowKind,
        enabled: bool,
    ) {
        self.tracks[kind.index()].set_enabled_quiet(enabled);
    }

    /// Advance every enabled track once. Returns the number of wraps (filler draws).
    ///
    /// A paused engine draws nothing.
    pub fn step<D>(
        &mut self,
        display: &mut D,
    ) -> usize
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.gate.is_paused() {
            return 0;
        }
        let mut wraps = 0;
        for track in &mut self.tracks {
            if track.tick(display) {
                wraps += 1;
            }
        }
        wraps
    }

    /// Paint the empty bands of all tracks and restart them at their origins.
    pub fn draw_tracks<D>(
        &mut self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        for track in &mut self.tracks {
            draw_track_tile(display, track.band());
            track.rewind();
        }
    }

    /// Mutable access to the pause gate.
    #[inline]
    pub fn gate_mut(&mut self) -> &mut EngineGate { &mut self.gate }

    /// Whether the engine is paused.
    #[inline]
    pub const fn is_paused(&self) -> bool { self.gate.is_paused() }
}

impl Default for FlowArrows {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;
    use proptest::prelude::*;

    use super::*;
    use crate::colors::{GREEN, TRACK};
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

    fn display() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)) }

    fn enabled(track: FlowTrack) -> (FlowTrack, SimulatorDisplay<Rgb565>) {
        let mut d = display();
        let mut t = track;
        t.set_enabled(true, &mut d);
        (t, d)
    }

    #[test]
    fn test_scenario_step5_width80() {
        let (mut t, mut d) = enabled(FlowTrack::new(10, 40, 80, 5, GREEN));
        for _ in 0..14 {
            assert!(!t.tick(&mut d));
        }
        assert_eq!(t.position(), 80);

        assert!(!t.tick(&mut d)); // tick 15
        assert_eq!(t.position(), 85);
        assert!(t.tick(&mut d)); // tick 16 wraps
        assert_eq!(t.position(), 10);
    }

    #[test]
    fn test_wrap_paints_filler_over_last_cell() {
        let (mut t, mut d) = enabled(FlowTrack::new(10, 40, 80, 5, GREEN));
        for _ in 0..16 {
            t.tick(&mut d);
        }
        // The tick-16 glyph at x=85 was replaced by the track tile
        let centre = Point::new(85 + 4, 40 + 5);
        assert_eq!(d.get_pixel(centre), TRACK);
        assert_ne!(d.get_pixel(Point::new(85 + 2, 40 + 3)), GREEN);
    }

    #[test]
    fn test_left_moving_track() {
        let (mut t, mut d) = enabled(FlowTrack::new(300, 40, 20, -5, GREEN));
        assert_eq!(t.position(), 320);
        assert!(!t.tick(&mut d));
        assert_eq!(t.position(), 315);
        t.tick(&mut d);
        t.tick(&mut d);
        assert_eq!(t.position(), 305);
        assert!(t.tick(&mut d));
        assert_eq!(t.position(), 320);
    }

    #[test]
    fn test_trail_cleared_behind_glyph() {
        let (mut t, mut d) = enabled(FlowTrack::new(10, 40, 80, 5, GREEN));
        t.tick(&mut d); // glyph at 10
        t.tick(&mut d); // glyph at 15, strip [10, 15) cleared
        assert_ne!(d.get_pixel(Point::new(10, 42)), GREEN);
        assert_eq!(d.get_pixel(Point::new(15, 42)), GREEN);
    }

    #[test]
    fn test_trail_clipped_to_band() {
        let mut d = display();
        Rectangle::new(Point::new(0, 40), Size::new(10, 12))
            .into_styled(embedded_graphics::primitives::PrimitiveStyle::with_fill(GREEN))
            .draw(&mut d)
            .ok();
        let mut t = FlowTrack::new(10, 40, 80, 5, YELLOW);
        t.set_enabled(true, &mut d);
        t.tick(&mut d);
        // Icon to the left of the track start is untouched
        assert_eq!(d.get_pixel(Point::new(7, 42)), GREEN);
    }

    #[test]
    fn test_disabled_track_does_not_move() {
        let mut d = display();
        let mut t = FlowTrack::new(10, 40, 80, 5, GREEN);
        assert!(!t.tick(&mut d));
        assert_eq!(t.position(), 10);
    }

    #[test]
    fn test_disable_clears_last_glyph_and_reenable_restarts() {
        let (mut t, mut d) = enabled(FlowTrack::new(10, 40, 80, 5, GREEN));
        for _ in 0..5 {
            t.tick(&mut d);
        }
        // Last glyph was drawn at 30
        assert_eq!(d.get_pixel(Point::new(32, 45)), GREEN);
        t.set_enabled(false, &mut d);
        assert_eq!(d.get_pixel(Point::new(32, 45)), TRACK);

        t.set_enabled(true, &mut d);
        assert_eq!(t.position(), 10);
    }

    #[test]
    fn test_engine_steps_only_enabled_tracks() {
        let mut d = display();
        let mut arrows = FlowArrows::new();
        arrows.set_enabled(FlowKind::Solar, true, &mut d);
        arrows.set_enabled(FlowKind::GridImport, true, &mut d);

        arrows.step(&mut d);
        let solar = arrows.track(FlowKind::Solar);
        assert_eq!(solar.position(), solar.origin() + solar.step());
        let import = arrows.track(FlowKind::GridImport);
        assert_eq!(import.position(), import.origin() + import.step());
        let export = arrows.track(FlowKind::GridExport);
        assert_eq!(export.position(), export.origin());
    }

    #[test]
    fn test_paused_engine_draws_nothing() {
        let mut d = display();
        let mut arrows = FlowArrows::new();
        arrows.set_enabled(FlowKind::Solar, true, &mut d);
        arrows.gate_mut().pause();

        assert_eq!(arrows.step(&mut d), 0);
        let solar = arrows.track(FlowKind::Solar);
        assert_eq!(solar.position(), solar.origin());
    }

    #[test]
    fn test_engine_counts_wraps() {
        let mut d = display();
        let mut arrows = FlowArrows::new();
        for kind in FlowKind::ALL {
            arrows.set_enabled(kind, true, &mut d);
        }
        // Solar, import and export are 80/5 = 16 ticks long, heating 90/5 = 18
        let wraps: usize = (0..16).map(|_| arrows.step(&mut d)).sum();
        assert_eq!(wraps, 3);
        let wraps: usize = (0..2).map(|_| arrows.step(&mut d)).sum();
        assert_eq!(wraps, 1);
    }

    #[test]
    fn test_engine_wraps_only_counted_for_enabled_tracks() {
        let mut d = display();
        let mut arrows = FlowArrows::new();
        arrows.set_enabled(FlowKind::Solar, true, &mut d);
        arrows.set_enabled(FlowKind::WaterHeating, true, &mut d);

        assert_eq!(arrows.step(&mut d), 0);
        let solar = arrows.track(FlowKind::Solar);
        assert_eq!(solar.position(), solar.origin() + solar.step());
        let heating = arrows.track(FlowKind::WaterHeating);
        assert_eq!(heating.position(), heating.origin() + heating.step());

        // Solar wraps on its 16th tick, heating on its 18th
        let wraps: usize = (1..16).map(|_| arrows.step(&mut d)).sum();
        assert_eq!(wraps, 1);
        assert_eq!(arrows.track(FlowKind::Solar).position(), arrows.track(FlowKind::Solar).origin());
        let wraps: usize = (0..2).map(|_| arrows.step(&mut d)).sum();
        assert_eq!(wraps, 1);
        assert_eq!(arrows.track(FlowKind::GridImport).position(), arrows.track(FlowKind::GridImport).origin());
    }

    #[test]
    fn test_layout_widths_are_step_multiples() {
        let arrows = FlowArrows::new();
        for kind in FlowKind::ALL {
            let t = arrows.track(kind);
            assert_eq!(t.width() % t.step().abs(), 0, "{}", kind.label());
        }
    }

    proptest! {
        #[test]
        fn prop_position_congruent_and_wraps_counted(
            start in 0i32..300,
            step_abs in 1i32..10,
            cells in 1i32..30,
            right in any::<bool>(),
            n in 0i32..400,
        ) {
            let width = step_abs * cells;
            let step = if right { step_abs } else { -step_abs };
            let mut t = FlowTrack::new(start, 0, width, step, GREEN);

            let mut wraps = 0;
            for _ in 0..n {
                if t.advance().wrapped {
                    wraps += 1;
                }
                prop_assert!(t.position() >= start && t.position() <= start + width);
            }

            prop_assert_eq!((t.position() - start - n * step).rem_euclid(width), 0);
            prop_assert_eq!(wraps, n / cells);
        }
    }
}
