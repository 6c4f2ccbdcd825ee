//! Home electricity monitor simulator for desktop.
//!
//! Runs the shared [`DashboardController`] against an SDL window. The left
//! mouse button is the touch panel; keys `1`-`4` switch the demo power flow.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

mod mouse;
mod screens;
mod timing;

use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use monitor_common::config::{
    ANIMATION_INTERVAL_MS,
    INACTIVITY_TIMEOUT_MS,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
    SCREENSAVER_INTERVAL_MS,
    SPLASH_MS,
    TOUCH_DEBOUNCE_MS,
};
use monitor_common::power::DEMO_SCENARIOS;
use monitor_common::{Config, DashboardController, TouchSource};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::mouse::MouseTouch;
use crate::screens::run_splash_screen;
use crate::timing::{LOOP_PERIOD, SimClock};

/// Desktop simulator for the home electricity monitor.
#[derive(Parser, Debug)]
#[command(name = "simulator", version, about)]
struct Args {
    /// Milliseconds between flow arrow steps
    #[arg(long, default_value_t = ANIMATION_INTERVAL_MS)]
    animation_ms: u32,

    /// Milliseconds between matrix rain steps
    #[arg(long, default_value_t = SCREENSAVER_INTERVAL_MS)]
    screensaver_ms: u32,

    /// Idle milliseconds before the screensaver starts
    #[arg(long, default_value_t = INACTIVITY_TIMEOUT_MS)]
    timeout_ms: u32,

    /// Touch debounce in milliseconds
    #[arg(long, default_value_t = TOUCH_DEBOUNCE_MS)]
    debounce_ms: u32,

    /// Any touch resets the inactivity timer, not only the toggle button
    #[arg(long)]
    any_touch_resets: bool,

    /// Seed for the matrix rain; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Window pixel scale
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Skip the splash card
    #[arg(long)]
    no_splash: bool,
}

impl Args {
    const fn config(&self) -> Config {
        Config {
            animation_interval_ms: self.animation_ms,
            screensaver_interval_ms: self.screensaver_ms,
            inactivity_timeout_ms: self.timeout_ms,
            any_touch_resets_inactivity: self.any_touch_resets,
            touch_debounce_ms: self.debounce_ms,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = args.config();
    if let Err(e) = config.validate() {
        log::warn!("{e}; using defaults");
    }

    let rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(args.scale).build();
    let mut window = Window::new("Home Energy Monitor", &output_settings);

    if !args.no_splash && !run_splash_screen(&mut display, &mut window, Duration::from_millis(u64::from(SPLASH_MS))) {
        return Ok(());
    }

    let clock = SimClock::new();
    let mut mouse = MouseTouch::new();
    let mut controller = DashboardController::new(config, rng, clock.now());
    controller.start(clock.now(), &mut display);
    log::info!("Dashboard ready: click SAVER to toggle, keys 1-4 pick a power scenario");

    'running: loop {
        window.update(&display);

        for event in window.events() {
            if mouse.handle(&event) {
                continue;
            }
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown {
                    keycode, repeat: false, ..
                } => {
                    let index = match keycode {
                        Keycode::Num1 => 0,
                        Keycode::Num2 => 1,
                        Keycode::Num3 => 2,
                        Keycode::Num4 => 3,
                        Keycode::Escape => break 'running,
                        _ => continue,
                    };
                    let scenario = &DEMO_SCENARIOS[index];
                    log::info!("Scenario: {}", scenario.name);
                    controller.apply_power_flow(scenario.flow, clock.now(), &mut display);
                }
                _ => {}
            }
        }

        let touch = mouse.poll();
        let outcome = controller.poll(clock.now(), touch, &mut display);
        if let Some(t) = outcome.transition {
            log::info!("{:?} -> {:?} ({}) at {} ms", t.from, t.to, t.reason(), t.at);
        }
        if let Some(due) = outcome.stepped {
            log::trace!("stepped {due:?}");
        }

        thread::sleep(LOOP_PERIOD);
    }

    log::info!("Window closed");
    Ok(())
}
