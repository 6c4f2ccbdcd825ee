//! Monitor firmware library - host-testable pieces of the ESP32 build.
//!
//! The binary (`main.rs`) adds the peripherals, the embassy tasks and logging.
//!
//! # Testing
//!
//! `.cargo/config.toml` selects the Xtensa target, so tests need an explicit host target:
//! ```bash
//! cargo +stable test -p monitor-esp32 --lib --target x86_64-unknown-linux-gnu
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod demo;
pub mod xpt2046;
