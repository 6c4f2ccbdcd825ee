//! Log buffer shown in the dashboard's log panel.
//!
//! A fixed ring of the seven most recent lines. Each entry carries a level, a
//! message truncated to 44 characters, and the timestamp it was pushed at.
//!
//! # Log Levels
//!
//! - `Debug`: Grey - touch noise, ignored events
//! - `Info`: Green - mode changes, power flow updates
//! - `Warn`: Yellow - rejected configuration
//! - `Error`: Red - hardware faults

use core::fmt::{self, Write};

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{Deque, String};

use crate::colors::{GREY, GREEN, RED, YELLOW};
use crate::config::{LOG_LINE_CHARS, LOG_LINES};
use crate::time::Millis;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LogLevel {
    /// Debug information (grey)
    Debug = 0,
    /// Normal operation (green)
    #[default]
    Info = 1,
    /// Warnings (yellow)
    Warn = 2,
    /// Errors (red)
    Error = 3,
}

impl LogLevel {
    /// Get the display color for this log level.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Debug => GREY,
            Self::Info => GREEN,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }

    /// Get the single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// One log line.
#[derive(Clone, Debug)]
pub struct LogEntry {
    /// Log severity level.
    pub level: LogLevel,
    /// Log message (truncated to `LOG_LINE_CHARS`).
    pub message: String<LOG_LINE_CHARS>,
    /// Milliseconds since boot when the line was pushed.
    pub timestamp_ms: Millis,
}

impl LogEntry {
    /// Create a new log entry, truncating the message.
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp_ms: Millis,
    ) -> Self {
        let mut line = Truncating(String::new());
        line.write_str(message).ok();
        Self {
            level,
            message: line.0,
            timestamp_ms,
        }
    }
}

/// `fmt::Write` adapter that drops characters past the capacity instead of failing.
struct Truncating(String<LOG_LINE_CHARS>);

impl Write for Truncating {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Ring of the most recent log lines (oldest first).
pub struct LogBuffer {
    entries: Deque<LogEntry, LOG_LINES>,
}

impl LogBuffer {
    /// Create a new empty log buffer.
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
        }
    }

    /// Push a line. If the buffer is full, the oldest line is dropped.
    pub fn push(
        &mut self,
        level: LogLevel,
        message: &str,
        now: Millis,
    ) {
        self.push_entry(LogEntry::new(level, message, now));
    }

    /// Push a formatted line without allocating.
    ///
    /// ```ignore
    /// log.push_fmt(LogLevel::Info, now, format_args!("Solar {} W", watts));
    /// ```
    pub fn push_fmt(
        &mut self,
        level: LogLevel,
        now: Millis,
        args: fmt::Arguments<'_>,
    ) {
        let mut line = Truncating(String::new());
        line.write_fmt(args).ok();
        self.push_entry(LogEntry {
            level,
            message: line.0,
            timestamp_ms: now,
        });
    }

    fn push_entry(
        &mut self,
        entry: LogEntry,
    ) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        self.entries.push_back(entry).ok();
    }

    /// Get the number of entries in the buffer.
    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Iterate over entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.entries.iter() }

    /// Most recently pushed entry.
    pub fn latest(&self) -> Option<&LogEntry> { self.entries.back() }
}

impl Default for LogBuffer {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_len() {
        let mut log = LogBuffer::new();
        assert!(log.is_empty());

        log.push(LogLevel::Info, "Boot", 0);
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().unwrap().message.as_str(), "Boot");
    }

    #[test]
    fn test_eighth_push_evicts_oldest() {
        let mut log = LogBuffer::new();
        for i in 0..8u32 {
            log.push_fmt(LogLevel::Info, i * 10, format_args!("line {i}"));
        }
        assert_eq!(log.len(), LOG_LINES);

        let first = log.iter().next().unwrap();
        assert_eq!(first.message.as_str(), "line 1");
        assert_eq!(first.timestamp_ms, 10);
        assert_eq!(log.latest().unwrap().message.as_str(), "line 7");
    }

    #[test]
    fn test_long_line_truncated() {
        let mut log = LogBuffer::new();
        let long_msg = "This message is much longer than the forty-four characters a line holds";
        log.push(LogLevel::Warn, long_msg, 0);

        let stored = log.latest().unwrap();
        assert_eq!(stored.message.len(), LOG_LINE_CHARS);
        assert!(long_msg.starts_with(stored.message.as_str()));
    }

    #[test]
    fn test_formatted_line_truncated_not_dropped() {
        let mut log = LogBuffer::new();
        let tail = "x".repeat(60);
        log.push_fmt(LogLevel::Info, 0, format_args!("Start {tail}"));

        let stored = log.latest().unwrap();
        assert!(stored.message.starts_with("Start x"));
        assert_eq!(stored.message.len(), LOG_LINE_CHARS);
    }

    #[test]
    fn test_level_colors_and_prefixes() {
        assert_eq!(LogLevel::Info.color(), GREEN);
        assert_eq!(LogLevel::Error.color(), RED);
        assert_eq!(LogLevel::Warn.prefix(), 'W');
        assert_eq!(LogLevel::Debug.prefix(), 'D');
    }
}
