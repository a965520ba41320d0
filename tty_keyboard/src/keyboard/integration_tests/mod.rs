// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end tests for [`Keyboard`]. Bytes are written into a pipe and read back
//! through the real [`NonBlockingReader`], so the same `poll(2)` / `fcntl(2)` paths run
//! as against a terminal.
//!
//! - [`decode_test`] - plain characters, known sequences, UTF-8, mouse reports.
//! - [`timeout_test`] - lone `ESC`, deferred `ESC O|[|]`, stale buffer cleanup.
//! - [`dispatch_test`] - press / release order, queue backpressure, shutdown.
//!
//! Tests that sleep past the keypress timeout are `#[serial]` so that a busy machine
//! running many of them in parallel doesn't stretch the "before timeout" windows.
//!
//! [`Keyboard`]: crate::Keyboard
//! [`NonBlockingReader`]: crate::NonBlockingReader

#[cfg(test)]
mod decode_test;


#[cfg(test)]
mod timeout_test;

#[cfg(test)]
mod test_helpers {
    use crate::{Key, KeyBuffer, Keyboard, KeyboardConfig, KeyboardReactions,
                MouseProtocol, MouseReport, ShutdownSignal};
    use rustix::{fd::OwnedFd, pipe::pipe};
    use std::time::Duration;

    /// Short enough to keep the suite fast, long enough that two back to back writes
    /// land well inside it.
    pub const TEST_KEYPRESS_TIMEOUT: Duration = Duration::from_millis(20);

    /// Comfortably past [`TEST_KEYPRESS_TIMEOUT`].
    pub const PAST_TIMEOUT: Duration = Duration::from_millis(60);

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        Pressed(Key),
        Released(Key),
        Escape,
        Mouse(MouseProtocol, Vec<u8>),
    }

    /// Records every reaction in order. Optionally requests shutdown when a given key
    /// is pressed.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub events: Vec<Event>,
        pub stop_on: Option<Key>,
        pub shutdown: ShutdownSignal,
    }

    impl KeyboardReactions for Recorder {
        fn key_pressed(&mut self, key: Key) {
            self.events.push(Event::Pressed(key));
            if self.stop_on == Some(key) {
                self.shutdown.request();
            }
        }

        fn key_released(&mut self, key: Key) { self.events.push(Event::Released(key)); }

        fn escape_pressed(&mut self) { self.events.push(Event::Escape); }

        fn mouse_tracking(&mut self, protocol: MouseProtocol, buffer: &mut KeyBuffer) {
            let bytes = MouseReport::extract(protocol, buffer)
                .map(|it| it.bytes.to_vec())
                .unwrap_or_default();
            self.events.push(Event::Mouse(protocol, bytes));
        }
    }

    pub type TestKeyboard = Keyboard<OwnedFd, Recorder>;

    pub fn test_config() -> KeyboardConfig {
        KeyboardConfig {
            keypress_timeout: TEST_KEYPRESS_TIMEOUT,
            read_blocking_time: Duration::from_millis(10),
            read_blocking_time_short: Duration::from_millis(1),
            ..KeyboardConfig::default()
        }
    }

    /// A decoder reading from the read end of a fresh pipe, plus the write end.
    pub fn create_keyboard(config: KeyboardConfig) -> (TestKeyboard, OwnedFd) {
        let (read_end, write_end) = pipe().unwrap();
        let keyboard = Keyboard::new(read_end, Recorder::default(), config).unwrap();
        let shutdown = keyboard.reactions().shutdown.clone();
        (keyboard.with_shutdown_signal(shutdown), write_end)
    }

    pub fn send(write_end: &OwnedFd, bytes: &[u8]) {
        let mut written = 0;
        while written < bytes.len() {
            written += rustix::io::write(write_end, &bytes[written..]).unwrap();
        }
    }

    /// Write `bytes`, read and classify them, then dispatch.
    pub fn send_and_process(keyboard: &mut TestKeyboard, write_end: &OwnedFd, bytes: &[u8]) {
        send(write_end, bytes);
        keyboard.fetch_key_code();
        keyboard.process_queued_input();
    }

    /// Run the timeout steps of the event loop, then dispatch.
    pub fn resolve_after_timeout(keyboard: &mut TestKeyboard) {
        std::thread::sleep(PAST_TIMEOUT);
        keyboard.escape_key_handling();
        keyboard.resolve_on_timeout();
        keyboard.process_queued_input();
    }

    pub fn take_events(keyboard: &mut TestKeyboard) -> Vec<Event> {
        std::mem::take(&mut keyboard.reactions_mut().events)
    }

    pub fn press_release(key: Key) -> [Event; 2] {
        [Event::Pressed(key), Event::Released(key)]
    }
}
