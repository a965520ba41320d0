// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! What the decoder calls when something happens. All calls are synchronous and run on
//! the decoding thread, so implementations must not block for long.

use crate::{DEBUG_KEYBOARD, Key, KeyBuffer, MouseProtocol, MouseReport};
use std::sync::{Arc,
                atomic::{AtomicBool, Ordering}};

/// The four reaction sinks.
pub trait KeyboardReactions {
    fn key_pressed(&mut self, key: Key);

    fn key_released(&mut self, key: Key);

    /// A lone `ESC` was followed by silence.
    fn escape_pressed(&mut self) {}

    /// A mouse report of `protocol` is at the front of `buffer`.
    ///
    /// The decoder doesn't consume the report. The default implementation pops and
    /// discards it with [`MouseReport::extract()`] so that keys behind it still decode.
    fn mouse_tracking(&mut self, protocol: MouseProtocol, buffer: &mut KeyBuffer) {
        let report = MouseReport::extract(protocol, buffer);
        DEBUG_KEYBOARD.then(|| {
            tracing::debug!(message = "🖱️ Mouse report discarded", report = ?report);
        });
    }
}

/// Cooperative shutdown flag shared between the host and the reaction sinks. The
/// dispatch loop checks it after every press and release.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<AtomicBool>,
}

impl ShutdownSignal {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn request(&self) { self.inner.store(true, Ordering::Release); }

    pub fn reset(&self) { self.inner.store(false, Ordering::Release); }

    #[must_use]
    pub fn is_requested(&self) -> bool { self.inner.load(Ordering::Acquire) }
}
