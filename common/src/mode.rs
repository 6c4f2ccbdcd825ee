//! Display mode state machine.
//!
//! The monitor is always in exactly one of two modes. All transitions are a pure
//! function of the current mode and an event; the drawing that accompanies a
//! transition is done by [`DashboardController`](crate::DashboardController).
//!
//! ```text
//!              ToggleTouched / InactivityExpired
//!   Dashboard ──────────────────────────────────▶ Screensaver
//!       ▲                                              │
//!       └──────────────── ToggleTouched ◀──────────────┘
//! ```

/// Top-level display mode.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Power-flow dashboard with icons, arrows and log panel.
    #[default]
    Dashboard,
    /// Full-screen falling-glyph rain.
    Screensaver,
}

/// Inputs that can change the mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    /// The user pressed the toggle button.
    ToggleTouched,
    /// No interaction for the configured timeout.
    InactivityExpired,
}

impl Mode {
    /// Process an event and return the next mode.
    pub const fn transition(
        self,
        event: ModeEvent,
    ) -> Self {
        match (self, event) {
            (Self::Dashboard, ModeEvent::ToggleTouched | ModeEvent::InactivityExpired) => Self::Screensaver,
            (Self::Screensaver, ModeEvent::ToggleTouched) => Self::Dashboard,
            (Self::Screensaver, ModeEvent::InactivityExpired) => Self::Screensaver,
        }
    }

    /// Short name for log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Screensaver => "Screensaver",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
