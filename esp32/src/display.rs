//! Wiring for the 3.5" ILI9486 480x320 TFT with XPT2046 touch on an ESP32-WROOM-32.
//!
//! Display and touch share VSPI (SPI2 in esp-hal):
//! - SCLK: GPIO18
//! - MOSI: GPIO23
//! - MISO: GPIO19 (touch only, not wired to the LCD)
//! - TFT CS: GPIO5, DC: GPIO2, RST: GPIO4, backlight: GPIO22
//! - Touch CS: GPIO21

use esp_hal::spi::Mode;
use esp_hal::spi::master::Config as SpiConfig;
use esp_hal::time::Rate;

/// ILI9486 write clock. The panel's serial interface tops out around 27 MHz.
pub const DISPLAY_SPI_MHZ: u32 = 26;

/// XPT2046 clock; the ADC needs a slow bus for settled conversions.
pub const TOUCH_SPI_MHZ: u32 = 2;

/// Panel size as wired in the controller's native portrait orientation.
pub const NATIVE_WIDTH: u16 = 320;
pub const NATIVE_HEIGHT: u16 = 480;

/// Bytes buffered by the mipidsi SPI interface per transfer.
pub const INTERFACE_BUFFER: usize = 512;

/// SPI configuration for the ILI9486.
pub fn display_spi_config() -> SpiConfig {
    SpiConfig::default()
        .with_mode(Mode::_0)
        .with_frequency(Rate::from_mhz(DISPLAY_SPI_MHZ))
}

/// SPI configuration for the XPT2046.
pub fn touch_spi_config() -> SpiConfig {
    SpiConfig::default()
        .with_mode(Mode::_0)
        .with_frequency(Rate::from_mhz(TOUCH_SPI_MHZ))
}
