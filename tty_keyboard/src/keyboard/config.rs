// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

/// Silence after the last byte before an ambiguous sequence is resolved.
pub const DEFAULT_KEYPRESS_TIMEOUT: Duration = Duration::from_millis(100);

/// Readiness wait when nothing is in flight.
pub const DEFAULT_READ_BLOCKING_TIME: Duration = Duration::from_millis(100);

/// Readiness wait while an escape sequence is mid-flight.
pub const DEFAULT_READ_BLOCKING_TIME_SHORT: Duration = Duration::from_millis(5);

/// Settings for [`Keyboard`]. Fill it in before construction; [`Keyboard`] also has
/// setters for changing them later.
///
/// [`Keyboard`]: crate::Keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardConfig {
    pub keypress_timeout: Duration,
    pub read_blocking_time: Duration,
    pub read_blocking_time_short: Duration,
    /// Decode multi-byte UTF-8. When off, every byte is a Latin-1 character.
    pub utf8_input: bool,
    /// Detect mouse reports. When off, they are decoded like any other bytes.
    pub mouse_support: bool,
    /// When off, readiness polling skips the immediate check and always waits for
    /// `read_blocking_time`.
    pub non_blocking_input_support: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            keypress_timeout: DEFAULT_KEYPRESS_TIMEOUT,
            read_blocking_time: DEFAULT_READ_BLOCKING_TIME,
            read_blocking_time_short: DEFAULT_READ_BLOCKING_TIME_SHORT,
            utf8_input: true,
            mouse_support: true,
            non_blocking_input_support: true,
        }
    }
}
