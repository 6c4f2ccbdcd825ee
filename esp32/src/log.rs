//! Firmware logging: `defmt` over esp-println, mirrored to the on-screen log.
//!
//! Only the render loop owns the controller, so lines logged from other tasks are
//! queued here and drained into the controller's log once per iteration.
//!
//! # Usage
//!
//! ```ignore
//! log_info!("Demo: {}", scenario.name);
//! log_warn!("Touch calibration skipped");
//! log_error!("Failed to spawn demo task");
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use heapless::{Deque, String};
use monitor_common::config::LOG_LINE_CHARS;
use monitor_common::log_buffer::LogLevel;

/// Lines held between drains; the oldest is dropped when full.
pub const PENDING_LINES: usize = 8;

/// One queued on-screen line.
pub type LogLine = String<LOG_LINE_CHARS>;

static PENDING: Mutex<CriticalSectionRawMutex, Deque<(LogLevel, LogLine), PENDING_LINES>> = Mutex::new(Deque::new());

/// Queue a line for the on-screen log.
///
/// Non-blocking: if the queue is locked the line only reaches `defmt`.
pub fn push_log(
    level: LogLevel,
    line: LogLine,
) {
    if let Ok(mut queue) = PENDING.try_lock() {
        if queue.is_full() {
            queue.pop_front();
        }
        queue.push_back((level, line)).ok();
    }
}

/// Hand every queued line to `sink`, oldest first.
pub fn drain_pending(mut sink: impl FnMut(LogLevel, &str)) {
    if let Ok(mut queue) = PENDING.try_lock() {
        while let Some((level, line)) = queue.pop_front() {
            sink(level, &line);
        }
    }
}

/// Log a message at Info level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: $crate::log::LogLine = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::log::push_log(monitor_common::log_buffer::LogLevel::Info, buf);
        defmt::info!($($arg)*);
    }};
}

/// Log a message at Warn level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: $crate::log::LogLine = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::log::push_log(monitor_common::log_buffer::LogLevel::Warn, buf);
        defmt::warn!($($arg)*);
    }};
}

/// Log a message at Error level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: $crate::log::LogLine = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::log::push_log(monitor_common::log_buffer::LogLevel::Error, buf);
        defmt::error!($($arg)*);
    }};
}
