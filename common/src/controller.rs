//! The dashboard controller: one context object owning all runtime state.
//!
//! Each loop iteration calls [`DashboardController::poll`] with the current time
//! and touch sample. The controller:
//!
//! 1. Turns the sample into a press edge ([`TouchLatch`])
//! 2. Feeds the edge and the clock to the [`InactivityMonitor`] and [`Mode`] machine
//! 3. Performs the one-time drawing for any mode change
//! 4. Asks the [`FrameScheduler`] which engine is due and steps it
//!
//! The caller owns the display and lends it per call, so drawing is serialised
//! by the borrow. The engine that does not belong to the current mode is held
//! by its [`EngineGate`](crate::scheduler::EngineGate).

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use rand::RngCore;

use crate::config::{Config, TOGGLE_AREA};
use crate::flow::{FlowArrows, FlowKind};
use crate::inactivity::InactivityMonitor;
use crate::log_buffer::{LogBuffer, LogLevel};
use crate::matrix::MatrixRain;
use crate::mode::{Mode, ModeEvent};
use crate::power::PowerFlow;
use crate::scene::{draw_dashboard, draw_screensaver_background};
use crate::scheduler::{Due, FrameScheduler};
use crate::time::Millis;
use crate::touch::TouchLatch;
use crate::widgets::{LogPanel, draw_heating_element, draw_value_labels, format_watts};

/// A mode change performed by [`DashboardController::poll`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Mode before the change.
    pub from: Mode,
    /// Mode after the change.
    pub to: Mode,
    /// What triggered it.
    pub event: ModeEvent,
    /// When it happened.
    pub at: Millis,
}

impl Transition {
    /// Human-readable trigger for log lines.
    pub const fn reason(&self) -> &'static str {
        match self.event {
            ModeEvent::ToggleTouched => "touch",
            ModeEvent::InactivityExpired => "inactivity",
        }
    }
}

/// What one [`DashboardController::poll`] did.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PollOutcome {
    /// Mode change, if any.
    pub transition: Option<Transition>,
    /// Engine stepped this iteration, if any.
    pub stepped: Option<Due>,
}

/// Owner of the mode, timers, engines and log.
pub struct DashboardController<R> {
    config: Config,
    mode: Mode,
    scheduler: FrameScheduler,
    inactivity: InactivityMonitor,
    latch: TouchLatch,
    arrows: FlowArrows,
    rain: MatrixRain<R>,
    log: LogBuffer,
    panel: LogPanel,
    log_dirty: bool,
    flow: PowerFlow,
}

impl<R: RngCore> DashboardController<R> {
    /// Create a controller in [`Mode::Dashboard`] with all timers starting at `now`.
    ///
    /// An invalid `config` is replaced by [`Config::default`] and a warning is logged.
    pub fn new(
        config: Config,
        rng: R,
        now: Millis,
    ) -> Self {
        let mut log = LogBuffer::new();
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log.push_fmt(LogLevel::Warn, now, format_args!("Config rejected: {e}"));
                Config::default()
            }
        };

        Self {
            config,
            mode: Mode::Dashboard,
            scheduler: FrameScheduler::new(&config, now),
            inactivity: InactivityMonitor::new(config.inactivity_timeout_ms, now),
            latch: TouchLatch::new(config.touch_debounce_ms),
            arrows: FlowArrows::new(),
            rain: MatrixRain::new(rng),
            log,
            panel: LogPanel::new(),
            log_dirty: true,
            flow: PowerFlow::default(),
        }
    }

    /// Draw the initial dashboard.
    pub fn start<D>(
        &mut self,
        now: Millis,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.log.push(LogLevel::Info, "Dashboard ready", now);
        self.redraw_dashboard(display);
        self.scheduler.restart(now);
        self.inactivity.on_interaction(now);
    }

    /// Run one loop iteration.
    ///
    /// Never blocks; the drawing done is bounded by one engine step plus at most
    /// one full-screen redraw on a mode change.
    pub fn poll<D>(
        &mut self,
        now: Millis,
        touch: Option<Point>,
        display: &mut D,
    ) -> PollOutcome
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut event = None;

        if let Some(point) = self.latch.update(now, touch) {
            if self.config.any_touch_resets_inactivity {
                self.inactivity.on_interaction(now);
            }
            if TOGGLE_AREA.contains(point) {
                event = Some(ModeEvent::ToggleTouched);
            }
        }

        if event.is_none() && self.inactivity.poll(now, self.mode) {
            event = Some(ModeEvent::InactivityExpired);
        }

        let transition = event.and_then(|e| self.apply(e, now, display));

        let stepped = self.scheduler.tick(now, self.mode);
        match stepped {
            Some(Due::Animation) => {
                self.arrows.step(display);
            }
            Some(Due::Screensaver) => self.rain.step(display),
            None => {}
        }

        if self.mode == Mode::Dashboard && self.log_dirty {
            self.panel.draw(&self.log, display);
            self.log_dirty = false;
        }

        PollOutcome { transition, stepped }
    }

    /// Feed an event to the mode machine and perform the transition drawing.
    fn apply<D>(
        &mut self,
        event: ModeEvent,
        now: Millis,
        display: &mut D,
    ) -> Option<Transition>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let from = self.mode;
        let to = from.transition(event);
        if to == from {
            return None;
        }

        let transition = Transition { from, to, event, at: now };
        match to {
            Mode::Screensaver => {
                self.rain.clear();
                draw_screensaver_background(display);
                self.mode = Mode::Screensaver;
                self.arrows.gate_mut().pause();
                self.rain.gate_mut().resume();
                self.log_line(LogLevel::Info, now, format_args!("Screensaver on ({})", transition.reason()));
            }
            Mode::Dashboard => {
                self.inactivity.on_interaction(now);
                self.mode = Mode::Dashboard;
                self.rain.gate_mut().pause();
                self.arrows.gate_mut().resume();
                self.log_line(LogLevel::Info, now, format_args!("Dashboard on ({})", transition.reason()));
                self.redraw_dashboard(display);
            }
        }
        self.scheduler.restart(now);
        Some(transition)
    }

    fn redraw_dashboard<D>(
        &mut self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        draw_dashboard(display, &mut self.arrows, &mut self.panel, &self.log, &self.flow);
        self.log_dirty = false;
    }

    /// Take a new power-flow snapshot: switch tracks, update readouts and log the change.
    ///
    /// While the screensaver runs only the state changes; the dashboard picks it up
    /// on its next full redraw.
    pub fn apply_power_flow<D>(
        &mut self,
        flow: PowerFlow,
        now: Millis,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        if flow == self.flow {
            return;
        }
        self.flow = flow;

        let visible = self.mode == Mode::Dashboard;
        for kind in FlowKind::ALL {
            let active = flow.is_active(kind);
            if visible {
                self.arrows.set_enabled(kind, active, display);
            } else {
                self.arrows.set_enabled_quiet(kind, active);
            }
        }

        if visible {
            draw_value_labels(display, &flow);
            draw_heating_element(display, flow.heating);
        }

        let solar = format_watts(flow.solar_w.min(i32::MAX as u32) as i32, false);
        let grid = format_watts(flow.grid_w, true);
        let heat = if flow.heating { "on" } else { "off" };
        self.log_line(LogLevel::Info, now, format_args!("Solar {solar} grid {grid} heat {heat}"));
    }

    /// Append a line to the on-screen log. The panel refreshes on the next poll.
    pub fn log_line(
        &mut self,
        level: LogLevel,
        now: Millis,
        args: core::fmt::Arguments<'_>,
    ) {
        self.log.push_fmt(level, now, args);
        self.log_dirty = true;
    }

    /// Current mode.
    #[inline]
    pub const fn mode(&self) -> Mode { self.mode }

    /// Active configuration (after validation).
    #[inline]
    pub const fn config(&self) -> &Config { &self.config }

    /// On-screen log contents.
    #[inline]
    pub const fn log(&self) -> &LogBuffer { &self.log }

    /// Flow arrow engine.
    #[inline]
    pub const fn arrows(&self) -> &FlowArrows { &self.arrows }

    /// Screensaver engine.
    #[inline]
    pub const fn rain(&self) -> &MatrixRain<R> { &self.rain }

    /// Inactivity monitor.
    #[inline]
    pub const fn inactivity(&self) -> &InactivityMonitor { &self.inactivity }

    /// Last applied power flow.
    #[inline]
    pub const fn power_flow(&self) -> &PowerFlow { &self.flow }
}

// =============================================================================
// Unit Tests
// =============================================================================
