//! Common logic for the home electricity monitor.
//!
//! This crate holds everything that does not touch hardware, shared between the
//! desktop simulator and the ESP32 firmware:
//!
//! - [`config`]: Screen layout constants and runtime timing [`Config`]
//! - [`colors`] / [`styles`]: RGB565 palette and pre-computed text styles
//! - [`time`]: Wrapping millisecond arithmetic and interval timers
//! - [`scheduler`]: Frame scheduler deciding which engine steps this iteration
//! - [`inactivity`]: Inactivity timeout that hands over to the screensaver
//! - [`mode`]: Dashboard / Screensaver state machine
//! - [`touch`]: Touch source trait and press-edge latch
//! - [`calibration`]: Corner-based resistive touch calibration
//! - [`flow`]: Power-flow arrow tracks (the dashboard animation)
//! - [`matrix`]: Falling-glyph screensaver
//! - [`log_buffer`]: Seven-line log ring shown on the dashboard
//! - [`power`]: Power-flow snapshot driving which arrows run
//! - [`widgets`] / [`scene`] / [`splash`]: Static drawing
//! - [`controller`]: The [`DashboardController`] tying it all together
//!
//! # Testing
//!
//! ```bash
//! cargo test -p monitor-common
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), the firmware builds it as `no_std`.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod calibration;
pub mod colors;
pub mod config;
pub mod controller;
pub mod flow;
pub mod inactivity;
pub mod log_buffer;
pub mod matrix;
pub mod mode;
pub mod power;
pub mod scene;
pub mod scheduler;
pub mod splash;
pub mod styles;
pub mod time;
pub mod touch;
pub mod widgets;

// Re-export commonly used items
pub use config::{Config, ConfigError};
pub use controller::{DashboardController, PollOutcome, Transition};
pub use mode::{Mode, ModeEvent};
pub use power::PowerFlow;
pub use touch::TouchSource;
