//! Home Electricity Monitor firmware for ESP32.
//!
//! Drives a 480x320 ILI9486 TFT with XPT2046 touch, showing solar, grid and
//! hot-water power flows with animated arrows and a matrix-rain screensaver.
//!
//! # Architecture
//!
//! - Main task: owns the display and the [`DashboardController`]. Each iteration
//!   drains queued log lines, applies the latest power-flow snapshot, polls touch,
//!   runs one controller step, then yields for [`LOOP_PERIOD_MS`].
//! - Demo task: publishes power-flow snapshots through a [`Watch`].
//!
//! Display and touch share one SPI bus behind a blocking mutex.
//!
//! # Touch Controls
//!
//! - **SAVER** (top right): toggle between dashboard and screensaver

#![no_std]
#![no_main]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

#[macro_use]
mod log;
mod calibrate;
mod display;

use core::cell::RefCell;

use defmt::{error, info};
use embassy_embedded_hal::shared_bus::blocking::spi::SpiDeviceWithConfig;
use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::watch::{DynSender, Watch};
use embassy_time::{Delay, Instant, Timer};
use esp_hal::Blocking;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::rng::Rng;
use esp_hal::spi::master::Spi;
use esp_hal::timer::timg::TimerGroup;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9486Rgb565;
use mipidsi::options::{ColorOrder, Orientation, Rotation};
use monitor_common::calibration::DEFAULT_CALIBRATION;
use monitor_common::config::SPLASH_MS;
use monitor_common::splash::draw_splash;
use monitor_common::time::Millis;
use monitor_common::{Config, DashboardController, PowerFlow, TouchSource};
use monitor_esp32::demo::{DEMO_HOLD_MS, DemoCycle};
use monitor_esp32::xpt2046::Xpt2046;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use static_cell::StaticCell;
use {esp_backtrace as _, esp_println as _};

use crate::display::{INTERFACE_BUFFER, NATIVE_HEIGHT, NATIVE_WIDTH, display_spi_config, touch_spi_config};
use crate::log::drain_pending;

esp_bootloader_esp_idf::esp_app_desc!();

/// Run the four-corner touch calibration before the splash and show the result.
const RECALIBRATE_ON_BOOT: bool = false;

/// Yield between loop iterations.
const LOOP_PERIOD_MS: u64 = 5;

type SpiBus = Mutex<CriticalSectionRawMutex, RefCell<Spi<'static, Blocking>>>;

static SPI_BUS: StaticCell<SpiBus> = StaticCell::new();

/// Kept out of the main task's future: the log panel sprite alone is ~48 KiB.
static CONTROLLER: StaticCell<DashboardController<SmallRng>> = StaticCell::new();

// =============================================================================
// Demo Power Flow (generated by separate async task)
// =============================================================================

/// Latest power-flow snapshot. The demo task writes, the main task reads.
static POWER_FLOW: Watch<CriticalSectionRawMutex, PowerFlow, 1> = Watch::new();

/// Cycle the demo scenarios, holding each for [`DEMO_HOLD_MS`].
#[embassy_executor::task]
async fn demo_flow_task(sender: DynSender<'static, PowerFlow>) {
    info!("Demo flow task started");

    for scenario in DemoCycle::new() {
        log_info!("Demo: {}", scenario.name);
        sender.send(scenario.flow);
        Timer::after_millis(u64::from(DEMO_HOLD_MS)).await;
    }
}

#[inline]
fn now_ms() -> Millis { Instant::now().as_millis() as Millis }

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    info!("Home energy monitor starting...");

    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_hal_embassy::init(timg0.timer0);

    let mut rng = Rng::new(peripherals.RNG);

    // ===== Shared SPI bus =====
    let spi = match Spi::new(peripherals.SPI2, display_spi_config()) {
        Ok(spi) => spi
            .with_sck(peripherals.GPIO18)
            .with_mosi(peripherals.GPIO23)
            .with_miso(peripherals.GPIO19),
        Err(e) => {
            error!("SPI config rejected: {}", defmt::Debug2Format(&e));
            return;
        }
    };
    let spi_bus: &'static SpiBus = SPI_BUS.init(Mutex::new(RefCell::new(spi)));

    // ===== Display =====
    let display_cs = Output::new(peripherals.GPIO5, Level::High, OutputConfig::default());
    let display_device = SpiDeviceWithConfig::new(spi_bus, display_cs, display_spi_config());
    let display_dc = Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default());
    let mut interface_buffer = [0u8; INTERFACE_BUFFER];
    let interface = SpiInterface::new(display_device, display_dc, &mut interface_buffer);

    let display_reset = Output::new(peripherals.GPIO4, Level::Low, OutputConfig::default());
    let mut backlight = Output::new(peripherals.GPIO22, Level::Low, OutputConfig::default());
    let mut delay = Delay;
    let mut display = match mipidsi::Builder::new(ILI9486Rgb565, interface)
        .display_size(NATIVE_WIDTH, NATIVE_HEIGHT)
        .orientation(Orientation::new().rotate(Rotation::Deg270))
        .color_order(ColorOrder::Bgr)
        .reset_pin(display_reset)
        .init(&mut delay)
    {
        Ok(display) => display,
        Err(_) => {
            error!("Display init failed");
            return;
        }
    };
    backlight.set_high();
    info!("Display initialized");

    // ===== Touch =====
    let touch_cs = Output::new(peripherals.GPIO21, Level::High, OutputConfig::default());
    let touch_device = SpiDeviceWithConfig::new(spi_bus, touch_cs, touch_spi_config());
    let mut touch = Xpt2046::new(touch_device, DEFAULT_CALIBRATION);

    if RECALIBRATE_ON_BOOT {
        let calibration = calibrate::run_calibration(&mut touch, &mut display).await;
        touch.set_calibration(calibration);
    }

    draw_splash(&mut display);
    Timer::after_millis(u64::from(SPLASH_MS)).await;

    // ===== Tasks =====
    let mut flow_receiver = POWER_FLOW.dyn_receiver();
    if flow_receiver.is_none() {
        log_error!("No power flow receiver");
    }
    match spawner.spawn(demo_flow_task(POWER_FLOW.dyn_sender())) {
        Ok(()) => info!("Demo flow task spawned"),
        Err(_) => log_error!("Failed to spawn demo task"),
    }

    // ===== Controller =====
    let seed = (u64::from(rng.random()) << 32) | u64::from(rng.random());
    let controller = CONTROLLER.init(DashboardController::new(
        Config::default(),
        SmallRng::seed_from_u64(seed),
        now_ms(),
    ));
    controller.start(now_ms(), &mut display);
    info!("Dashboard ready");

    loop {
        let now = now_ms();

        drain_pending(|level, line| controller.log_line(level, now, format_args!("{}", line)));

        if let Some(receiver) = flow_receiver.as_mut()
            && let Some(flow) = receiver.try_changed()
        {
            controller.apply_power_flow(flow, now, &mut display);
        }

        let outcome = controller.poll(now, touch.poll(), &mut display);
        if let Some(t) = outcome.transition {
            info!("{} -> {} ({}) at {} ms", t.from, t.to, t.reason(), t.at);
        }

        Timer::after_millis(LOOP_PERIOD_MS).await;
    }
}
