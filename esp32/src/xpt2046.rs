//! XPT2046 resistive touch controller over an `embedded-hal` [`SpiDevice`].
//!
//! Every reading is one 3-byte transfer: the command byte selects the channel and
//! the 12-bit result comes back left-aligned in the two bytes that follow.
//!
//! A touch counts only when the pressure estimate clears the threshold and two
//! consecutive position samples agree, which filters out the noisy readings taken
//! while the finger is landing or lifting.

use core::fmt;

use embedded_graphics::prelude::{Point, Size};
use embedded_hal::spi::SpiDevice;
use monitor_common::TouchSource;
use monitor_common::calibration::{RawPoint, TouchCalibration};
use monitor_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TOUCH_PRESSURE_THRESHOLD};

// ===== Channel commands (12-bit, differential reference) =====
const CMD_X: u8 = 0xD0;
const CMD_Y: u8 = 0x90;
const CMD_Z1: u8 = 0xB0;
const CMD_Z2: u8 = 0xC0;

const SCREEN: Size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);

/// Largest difference between two samples of one axis that still counts as stable.
pub const RAW_ERROR: u16 = 20;

/// Touch driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchError<E> {
    /// The SPI transfer failed.
    Spi(E),
}

impl<E: fmt::Debug> fmt::Display for TouchError<E> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "touch SPI transfer failed: {e:?}"),
        }
    }
}

/// Extract the 12-bit conversion result from a 3-byte response.
#[inline]
pub const fn decode_sample(rx: [u8; 3]) -> u16 { ((((rx[1] as u16) << 8) | rx[2] as u16) >> 3) & 0x0FFF }

/// Pressure estimate from the two Z readings. Zero means no contact.
///
/// With nothing touching the panel both readings float together, which lands
/// exactly on full scale; that case is reported as zero.
pub const fn pressure(
    z1: u16,
    z2: u16,
) -> u16 {
    let z = 0x0FFF + z1 as i32 - z2 as i32;
    if z == 0x0FFF || z < 0 { 0 } else { z as u16 }
}

/// Whether two consecutive samples of one axis agree.
#[inline]
pub const fn is_stable(
    a: u16,
    b: u16,
) -> bool {
    a.abs_diff(b) <= RAW_ERROR
}

/// XPT2046 driver with calibration applied.
pub struct Xpt2046<SPI> {
    spi: SPI,
    calibration: TouchCalibration,
    threshold: u16,
    errors: u32,
}

impl<SPI: SpiDevice> Xpt2046<SPI> {
    /// Create a driver on an SPI device that owns the touch chip-select.
    pub const fn new(
        spi: SPI,
        calibration: TouchCalibration,
    ) -> Self {
        Self {
            spi,
            calibration,
            threshold: TOUCH_PRESSURE_THRESHOLD,
            errors: 0,
        }
    }

    /// Replace the calibration, e.g. after an interactive run.
    pub fn set_calibration(
        &mut self,
        calibration: TouchCalibration,
    ) {
        self.calibration = calibration;
    }

    /// Failed reads seen by [`TouchSource::poll`].
    #[inline]
    pub const fn error_count(&self) -> u32 { self.errors }

    fn sample(
        &mut self,
        command: u8,
    ) -> Result<u16, TouchError<SPI::Error>> {
        let mut rx = [0u8; 3];
        self.spi.transfer(&mut rx, &[command, 0, 0]).map_err(TouchError::Spi)?;
        Ok(decode_sample(rx))
    }

    /// Current pressure estimate.
    pub fn read_pressure(&mut self) -> Result<u16, TouchError<SPI::Error>> {
        let z1 = self.sample(CMD_Z1)?;
        let z2 = self.sample(CMD_Z2)?;
        Ok(pressure(z1, z2))
    }

    /// Raw position, if the panel is pressed firmly and the samples agree.
    pub fn read_raw(&mut self) -> Result<Option<RawPoint>, TouchError<SPI::Error>> {
        if self.read_pressure()? < self.threshold {
            return Ok(None);
        }

        let x1 = self.sample(CMD_X)?;
        let y1 = self.sample(CMD_Y)?;
        let x2 = self.sample(CMD_X)?;
        let y2 = self.sample(CMD_Y)?;
        if !is_stable(x1, x2) || !is_stable(y1, y2) {
            return Ok(None);
        }

        Ok(Some(RawPoint::new(x1.midpoint(x2), y1.midpoint(y2))))
    }

    /// Touch position in screen coordinates.
    pub fn read_point(&mut self) -> Result<Option<Point>, TouchError<SPI::Error>> {
        Ok(self.read_raw()?.and_then(|raw| self.calibration.map(raw, SCREEN)))
    }
}

impl<SPI: SpiDevice> TouchSource for Xpt2046<SPI> {
    fn poll(&mut self) -> Option<Point> {
        match self.read_point() {
            Ok(point) => point,
            Err(_e) => {
                self.errors = self.errors.wrapping_add(1);
                #[cfg(target_arch = "xtensa")]
                defmt::debug!("Touch read failed: {}", defmt::Debug2Format(&_e));
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_hal::spi::{ErrorKind, ErrorType, Operation};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    impl embedded_hal::spi::Error for BusFault {
        fn kind(&self) -> ErrorKind { ErrorKind::Other }
    }

    /// Panel answering every channel with a fixed value; X drifts by `x_drift` per read.
    struct FakePanel {
        x: u16,
        y: u16,
        z1: u16,
        z2: u16,
        x_drift: u16,
        fail: bool,
    }

    impl FakePanel {
        fn pressed(
            x: u16,
            y: u16,
        ) -> Self {
            Self {
                x,
                y,
                z1: 600,
                z2: 3000,
                x_drift: 0,
                fail: false,
            }
        }

        fn released() -> Self {
            Self {
                z1: 0,
                z2: 4095,
                ..Self::pressed(0, 0)
            }
        }
    }

    impl ErrorType for FakePanel {
        type Error = BusFault;
    }

    impl SpiDevice for FakePanel {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), BusFault> {
            if self.fail {
                return Err(BusFault);
            }
            for op in operations {
                if let Operation::Transfer(read, write) = op {
                    let value = match write[0] {
                        CMD_X => {
                            let x = self.x;
                            self.x += self.x_drift;
                            x
                        }
                        CMD_Y => self.y,
                        CMD_Z1 => self.z1,
                        CMD_Z2 => self.z2,
                        _ => 0,
                    };
                    let word = value << 3;
                    read[0] = 0;
                    read[1] = (word >> 8) as u8;
                    read[2] = word as u8;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_decode_sample() {
        assert_eq!(decode_sample([0, 0x7F, 0xF8]), 0x0FFF);
        assert_eq!(decode_sample([0, 0x3E, 0x80]), 2000);
        assert_eq!(decode_sample([0xFF, 0, 0x07]), 0);
    }

    #[test]
    fn test_pressure() {
        assert_eq!(pressure(0, 4095), 0);
        assert_eq!(pressure(1000, 1000), 0); // floating
        assert_eq!(pressure(400, 3000), 1495);
    }

    #[test]
    fn test_read_raw_pressed() {
        let mut touch = Xpt2046::new(FakePanel::pressed(2000, 1500), TouchCalibration::default());
        assert_eq!(touch.read_raw(), Ok(Some(RawPoint::new(2000, 1500))));
    }

    #[test]
    fn test_read_raw_light_touch_ignored() {
        let mut panel = FakePanel::pressed(2000, 1500);
        panel.z1 = 100;
        panel.z2 = 3900; // pressure 295
        let mut touch = Xpt2046::new(panel, TouchCalibration::default());
        assert_eq!(touch.read_raw(), Ok(None));

        let mut touch = Xpt2046::new(FakePanel::released(), TouchCalibration::default());
        assert_eq!(touch.read_raw(), Ok(None));
    }

    #[test]
    fn test_read_raw_unstable_samples_rejected() {
        let mut panel = FakePanel::pressed(2000, 1500);
        panel.x_drift = 50;
        let mut touch = Xpt2046::new(panel, TouchCalibration::default());
        assert_eq!(touch.read_raw(), Ok(None));

        let mut panel = FakePanel::pressed(2000, 1500);
        panel.x_drift = 10;
        let mut touch = Xpt2046::new(panel, TouchCalibration::default());
        assert_eq!(touch.read_raw(), Ok(Some(RawPoint::new(2005, 1500))));
    }

    #[test]
    fn test_read_point_calibrated() {
        let mut touch = Xpt2046::new(FakePanel::pressed(2000, 2000), TouchCalibration::default());
        let point = touch.read_point().unwrap().unwrap();
        assert!((0..480).contains(&point.x));
        assert!((0..320).contains(&point.y));
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut panel = FakePanel::pressed(2000, 1500);
        panel.fail = true;
        let mut touch = Xpt2046::new(panel, TouchCalibration::default());
        assert_eq!(touch.read_raw(), Err(TouchError::Spi(BusFault)));
    }

    #[test]
    fn test_poll_maps_errors_to_no_touch() {
        let mut panel = FakePanel::pressed(2000, 1500);
        panel.fail = true;
        let mut touch = Xpt2046::new(panel, TouchCalibration::default());
        assert_eq!(touch.poll(), None);
        assert_eq!(touch.poll(), None);
        assert_eq!(touch.error_count(), 2);
    }
}
