//! Interactive four-corner touch calibration, run at boot when enabled.

use core::fmt::Write;

use defmt::{debug, info};
use embassy_time::Timer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal::spi::SpiDevice;
use heapless::String;
use monitor_common::calibration::{RawPoint, TouchCalibration};
use monitor_common::colors::BLACK;
use monitor_common::widgets::{draw_calibration_done, draw_calibration_prompt};
use monitor_esp32::xpt2046::Xpt2046;

/// Stable readings averaged per corner.
const SAMPLES_PER_CORNER: u32 = 8;

/// Consecutive untouched readings that count as a release.
const RELEASE_READS: u32 = 5;

const SAMPLE_INTERVAL_MS: u64 = 10;

/// How long the result stays on screen.
const DONE_HOLD_MS: u64 = 3_000;

/// Walk the user through the four corners and derive a calibration.
pub async fn run_calibration<SPI, D>(
    touch: &mut Xpt2046<SPI>,
    display: &mut D,
) -> TouchCalibration
where
    SPI: SpiDevice,
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    let mut corners = [RawPoint::default(); 4];
    for (index, corner) in corners.iter_mut().enumerate() {
        draw_calibration_prompt(display, index);
        *corner = sample_corner(touch).await;
        wait_for_release(touch).await;
        debug!("Corner {}: raw ({}, {})", index, corner.x, corner.y);
    }

    let calibration = TouchCalibration::from_corners(corners);
    let [x0, xs, y0, ys, flags] = calibration.as_words();

    let mut text: String<48> = String::new();
    let _ = write!(text, "{{ {}, {}, {}, {}, {} }}", x0, xs, y0, ys, flags);
    draw_calibration_done(display, &text);
    info!("Touch calibration: [{}, {}, {}, {}, {}]", x0, xs, y0, ys, flags);

    Timer::after_millis(DONE_HOLD_MS).await;
    calibration
}

/// Average `SAMPLES_PER_CORNER` stable readings.
async fn sample_corner<SPI: SpiDevice>(touch: &mut Xpt2046<SPI>) -> RawPoint {
    let (mut sum_x, mut sum_y, mut taken) = (0u32, 0u32, 0u32);
    while taken < SAMPLES_PER_CORNER {
        match touch.read_raw() {
            Ok(Some(raw)) => {
                sum_x += u32::from(raw.x);
                sum_y += u32::from(raw.y);
                taken += 1;
            }
            Ok(None) => {}
            Err(e) => debug!("Touch read failed: {}", defmt::Debug2Format(&e)),
        }
        Timer::after_millis(SAMPLE_INTERVAL_MS).await;
    }
    RawPoint::new((sum_x / taken) as u16, (sum_y / taken) as u16)
}

async fn wait_for_release<SPI: SpiDevice>(touch: &mut Xpt2046<SPI>) {
    let mut released = 0;
    while released < RELEASE_READS {
        released = if matches!(touch.read_raw(), Ok(None)) { released + 1 } else { 0 };
        Timer::after_millis(SAMPLE_INTERVAL_MS).await;
    }
}
