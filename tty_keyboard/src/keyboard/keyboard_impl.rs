// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The keyboard decoder: reader, byte buffer, classifier, key queue, and dispatch
//! wired together.
//!
//! ```text
//! descriptor ──▶ NonBlockingReader ──▶ KeyBuffer ──▶ classify() ─┬─▶ KeyCorrection ──▶ key queue
//!                (one byte per read)   (ring, 512)   (per byte)  │                        │
//!                                                                └─▶ mouse_tracking()     ▼
//!                                                                                process_queued_input()
//!                                                                                key_pressed / key_released
//! ```
//!
//! A host event loop calls [`Keyboard::process_keyboard_event()`], or the individual
//! steps it is made of, in this order:
//!
//! 1. [`Keyboard::is_key_pressed()`] then [`Keyboard::fetch_key_code()`] – pull bytes.
//! 2. [`Keyboard::escape_key_handling()`] – resolve a lone `ESC` or `ESC O|[|]` once the
//!    keypress timeout has passed.
//! 3. Resolve any other leftover bytes once the timeout has passed.
//! 4. [`Keyboard::process_queued_input()`] – dispatch to [`KeyboardReactions`].

use crate::{ANSI_ESC, ByteRingBuffer, Classification, ClassifierOptions, DEBUG_KEYBOARD,
            FIFO_BUF_SIZE, IdentityKeyCorrection, Key, KeyCapTable, KeyCorrection,
            KeyName, KeyTables, KeyboardConfig, KeyboardError, KeyboardReactions,
            NonBlockingReader, ShutdownSignal, classify, key_name, meta_substring_key};
use rustix::{fd::AsFd, io::Errno};
use std::{collections::VecDeque,
          time::{Duration, Instant}};

/// The byte buffer the decoder owns.
pub type KeyBuffer = ByteRingBuffer<FIFO_BUF_SIZE>;

/// Capacity of the decoded-key queue. Reading stops while it is full.
pub const MAX_QUEUE_SIZE: usize = 4096;

/// Decodes keys from `Fd` and reports them to `R`.
///
/// Single-threaded: the buffer and queue belong to the thread that drives the
/// decoder. Only the [`ShutdownSignal`] is meant to be shared.
///
/// ```no_run
/// use tty_keyboard::{Key, Keyboard, KeyboardConfig, KeyboardReactions, key_name};
///
/// struct Printer;
///
/// impl KeyboardReactions for Printer {
///     fn key_pressed(&mut self, key: Key) { println!("{}", key_name(key)); }
///     fn key_released(&mut self, _key: Key) {}
/// }
///
/// let mut keyboard = Keyboard::new(std::io::stdin(), Printer, KeyboardConfig::default())?;
/// let shutdown = keyboard.shutdown_signal();
/// while !shutdown.is_requested() {
///     keyboard.process_keyboard_event();
/// }
/// # Ok::<(), tty_keyboard::KeyboardError>(())
/// ```
#[derive(Debug)]
pub struct Keyboard<Fd: AsFd, R: KeyboardReactions> {
    reader: NonBlockingReader<Fd>,
    reactions: R,
    config: KeyboardConfig,
    key_tables: KeyTables,
    fifo_buf: KeyBuffer,
    fkey_queue: VecDeque<Key>,
    current_key: Option<Key>,
    key_correction: Box<dyn KeyCorrection>,
    /// When the last byte was appended. `None` until the first byte arrives, which
    /// counts as timed out.
    time_keypressed: Option<Instant>,
    shutdown: ShutdownSignal,
}

impl<Fd: AsFd, R: KeyboardReactions> Keyboard<Fd, R> {
    /// Build a decoder with an empty capability table and no key correction.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::DescriptorFlags`] if the descriptor's status flags
    /// can't be read.
    pub fn new(fd: Fd, reactions: R, config: KeyboardConfig) -> Result<Self, KeyboardError> {
        let mut reader = NonBlockingReader::new(fd)?;
        reader.set_non_blocking_input_support(config.non_blocking_input_support);

        Ok(Self {
            reader,
            reactions,
            config,
            key_tables: KeyTables::default(),
            fifo_buf: KeyBuffer::new(),
            fkey_queue: VecDeque::new(),
            current_key: None,
            key_correction: Box::new(IdentityKeyCorrection),
            time_keypressed: None,
            shutdown: ShutdownSignal::new(),
        })
    }

    #[must_use]
    pub fn with_key_cap_table(mut self, table: KeyCapTable) -> Self {
        self.set_key_cap_table(table);
        self
    }

    #[must_use]
    pub fn with_key_correction(mut self, key_correction: Box<dyn KeyCorrection>) -> Self {
        self.key_correction = key_correction;
        self
    }

    #[must_use]
    pub fn with_shutdown_signal(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn set_key_cap_table(&mut self, table: KeyCapTable) {
        self.key_tables.key_cap = table;
    }

    pub fn set_key_correction(&mut self, key_correction: Box<dyn KeyCorrection>) {
        self.key_correction = key_correction;
    }

    // Configuration.

    #[must_use]
    pub fn config(&self) -> &KeyboardConfig { &self.config }

    pub fn set_keypress_timeout(&mut self, timeout: Duration) {
        self.config.keypress_timeout = timeout;
    }

    pub fn set_read_blocking_time(&mut self, blocking_time: Duration) {
        self.config.read_blocking_time = blocking_time;
    }

    pub fn set_read_blocking_time_short(&mut self, blocking_time: Duration) {
        self.config.read_blocking_time_short = blocking_time;
    }

    pub fn set_non_blocking_input_support(&mut self, enable: bool) {
        self.config.non_blocking_input_support = enable;
        self.reader.set_non_blocking_input_support(enable);
    }

    pub fn enable_utf8(&mut self) { self.config.utf8_input = true; }

    pub fn disable_utf8(&mut self) { self.config.utf8_input = false; }

    pub fn enable_mouse_tracking(&mut self) { self.config.mouse_support = true; }

    pub fn disable_mouse_tracking(&mut self) { self.config.mouse_support = false; }

    // Inspection.

    /// The key whose press / release is being dispatched right now.
    #[must_use]
    pub fn current_key(&self) -> Option<Key> { self.current_key }

    #[must_use]
    pub fn key_name(&self, key: Key) -> KeyName { key_name(key) }

    /// Bytes are still buffered (an incomplete sequence, or a mouse report).
    #[must_use]
    pub fn has_unprocessed_input(&self) -> bool { self.fifo_buf.has_data() }

    #[must_use]
    pub fn has_data_in_queue(&self) -> bool { !self.fkey_queue.is_empty() }

    #[must_use]
    pub fn queue_len(&self) -> usize { self.fkey_queue.len() }

    #[must_use]
    pub fn is_queue_full(&self) -> bool { self.fkey_queue.len() >= MAX_QUEUE_SIZE }

    #[must_use]
    pub fn key_buffer(&self) -> &KeyBuffer { &self.fifo_buf }

    #[must_use]
    pub fn reactions(&self) -> &R { &self.reactions }

    pub fn reactions_mut(&mut self) -> &mut R { &mut self.reactions }

    #[must_use]
    pub fn shutdown_signal(&self) -> ShutdownSignal { self.shutdown.clone() }

    /// The keypress timeout has elapsed since the last byte arrived (or no byte ever
    /// did).
    #[must_use]
    pub fn is_keypress_timeout(&self) -> bool {
        self.time_keypressed
            .is_none_or(|it| it.elapsed() >= self.config.keypress_timeout)
    }

    // Input.

    /// Wait up to `blocking_time` for input. While a sequence is mid-flight the wait
    /// is cut to `read_blocking_time_short` so the timeout can resolve it promptly.
    pub fn is_key_pressed(&mut self, blocking_time: Duration) -> bool {
        let sequence_in_flight = self.fifo_buf.has_data() && !self.is_keypress_timeout();
        let short_wait = sequence_in_flight.then_some(self.config.read_blocking_time_short);
        self.reader.poll_ready(blocking_time, short_wait)
    }

    /// Read and classify everything that's available, unless the key queue is full.
    ///
    /// A lone `ESC` (or `ESC O|[|]`) that already timed out is resolved first, so it
    /// is never merged with bytes of the next keypress.
    pub fn fetch_key_code(&mut self) {
        self.escape_key_handling();
        if !self.is_queue_full() {
            self.parse_key_buffer();
        }
    }

    fn parse_key_buffer(&mut self) {
        self.drain_key_buffer();

        while !self.is_queue_full() {
            let byte = match self.reader.read_one_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(errno) => {
                    if errno != Errno::AGAIN {
                        DEBUG_KEYBOARD.then(|| {
                            tracing::debug!(message = "⌨️ read failed", errno = ?errno);
                        });
                    }
                    break;
                }
            };

            self.time_keypressed = Some(Instant::now());

            if !self.fifo_buf.push(byte) {
                DEBUG_KEYBOARD.then(|| {
                    tracing::debug!(
                        message = "⌨️ Key buffer full, byte dropped",
                        byte = %format_args!("{byte:#04x}")
                    );
                });
            }

            self.drain_key_buffer();
        }
    }

    /// Classify buffered bytes until the buffer is empty, a sequence is incomplete, a
    /// mouse report is handed off, or the queue fills.
    fn drain_key_buffer(&mut self) {
        let timed_out = self.is_keypress_timeout();
        let options = ClassifierOptions::from(&self.config);

        while !self.is_queue_full() {
            match classify(&mut self.fifo_buf, &self.key_tables, options, timed_out) {
                None | Some(Classification::Incomplete) => break,
                Some(Classification::Mouse(protocol)) => {
                    self.reactions.mouse_tracking(protocol, &mut self.fifo_buf);
                    break;
                }
                Some(Classification::Key(key)) => {
                    let key = self.key_correction.correct(key);
                    self.fkey_queue.push_back(key);

                    // `ESC ESC` after the timeout: the second one is a lone Escape.
                    if timed_out && self.is_lone_escape() {
                        self.fifo_buf.clear();
                        self.reactions.escape_pressed();
                        break;
                    }
                }
            }
        }
    }

    fn is_lone_escape(&self) -> bool {
        self.fifo_buf.len() == 1 && self.fifo_buf.front() == Some(ANSI_ESC)
    }

    // Timeout resolution.

    /// Once the keypress timeout has passed: a lone `ESC` becomes an
    /// [`KeyboardReactions::escape_pressed()`] call, and `ESC O`, `ESC [`, or `ESC ]`
    /// becomes the matching Meta key. Both clear the buffer.
    pub fn escape_key_handling(&mut self) {
        if self.is_lone_escape() && self.is_keypress_timeout() {
            self.fifo_buf.clear();
            self.reactions.escape_pressed();
        }

        self.substring_key_handling();
    }

    fn substring_key_handling(&mut self) {
        if self.fifo_buf.len() != 2
            || self.fifo_buf.front() != Some(ANSI_ESC)
            || !self.is_keypress_timeout()
        {
            return;
        }

        if let Some(key) = self.fifo_buf.get(1).and_then(meta_substring_key) {
            self.fkey_queue.push_back(key);
            self.fifo_buf.clear();
        }
    }

    /// Once the keypress timeout has passed, decode whatever is left in the buffer.
    /// Unmatched escape sequences come out one byte at a time, starting with `ESC`. A
    /// lone `ESC` left at the end is reported through
    /// [`KeyboardReactions::escape_pressed()`] right away, while the keys before it wait
    /// in the queue for [`Self::process_queued_input()`].
    pub fn resolve_on_timeout(&mut self) {
        if self.fifo_buf.has_data() && self.is_keypress_timeout() {
            self.drain_key_buffer();
        }
    }

    /// Drop everything in the buffer and forget the current key.
    pub fn clear_key_buffer(&mut self) {
        self.fifo_buf.clear();
        self.current_key = None;
    }

    /// [`Self::clear_key_buffer()`] once the keypress timeout has passed.
    pub fn clear_key_buffer_on_timeout(&mut self) {
        if self.fifo_buf.has_data() && self.is_keypress_timeout() {
            DEBUG_KEYBOARD.then(|| {
                tracing::debug!(message = "⌨️ Dropping stale bytes", buffer = ?self.fifo_buf);
            });
            self.clear_key_buffer();
        }
    }

    // Dispatch.

    /// Deliver queued keys in order: press, then release. Stops as soon as shutdown is
    /// requested, leaving the rest of the queue intact.
    pub fn process_queued_input(&mut self) {
        while !self.shutdown.is_requested() {
            let Some(key) = self.fkey_queue.pop_front() else {
                break;
            };

            self.current_key = Some(key);
            self.reactions.key_pressed(key);

            if self.shutdown.is_requested() {
                return;
            }

            self.reactions.key_released(key);

            if self.shutdown.is_requested() {
                return;
            }

            self.current_key = None;
        }
    }

    /// One iteration of a host event loop.
    pub fn process_keyboard_event(&mut self) {
        if self.is_key_pressed(self.config.read_blocking_time) {
            self.fetch_key_code();
        }
        self.escape_key_handling();
        self.resolve_on_timeout();
        self.process_queued_input();
    }
}
