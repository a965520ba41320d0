// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # tty_keyboard
//!
//! Turns the raw, unframed byte stream coming from a terminal in raw mode into typed
//! key events: plain and UTF-8 characters, function and cursor keys with their
//! modifiers, Meta combinations, and mouse reports.
//!
//! The hard part is that a terminal gives no framing. `ESC` alone is the Escape key,
//! `ESC [` is Meta+`[`, and `ESC [ A` is cursor up. The decoder accumulates bytes in a
//! fixed size ring buffer and, after every byte, asks whether the buffer holds a
//! complete key, a prefix of one, or a mouse report. Prefixes are resolved by a short
//! keypress timeout (100 ms by default): if nothing more arrives, what's there is what
//! the user typed.
//!
//! ```text
//! ┌────────────┐  one byte  ┌───────────┐ classify ┌───────────┐ press, release ┌──────────┐
//! │ terminal   ├───────────▶│ KeyBuffer ├─────────▶│ key queue ├───────────────▶│ reactions│
//! │ descriptor │  per read  │ (512)     │          │ (4096)    │                │          │
//! └────────────┘            └─────┬─────┘          └───────────┘                └──────────┘
//!                                 │ mouse report                                      ▲
//!                                 └───────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`core`](mod@crate::core) - the byte ring buffer, raw mode for the controlling terminal, and
//!   `tracing` setup.
//! - [`keyboard`](mod@crate::keyboard) - the decoder: [`Keyboard`], the key tables, the classifier, the
//!   UTF-8 decoder, and the non-blocking reader.
//!
//! # Usage
//!
//! Implement [`KeyboardReactions`] and drive [`Keyboard::process_keyboard_event()`] from
//! your event loop. The `tty_keylog` binary in this crate is a complete example.
//!
//! ```no_run
//! use tty_keyboard::{Key, Keyboard, KeyboardConfig, KeyboardReactions, RawModeGuard,
//!                    key_name, terminal_fd};
//!
//! struct Echo;
//!
//! impl KeyboardReactions for Echo {
//!     fn key_pressed(&mut self, key: Key) { print!("{}\r\n", key_name(key)); }
//!     fn key_released(&mut self, _key: Key) {}
//! }
//!
//! let _raw_mode = RawModeGuard::new()?;
//! let fd = terminal_fd().map_err(|e| miette::miette!("{e}"))?;
//! let mut keyboard = Keyboard::new(fd, Echo, KeyboardConfig::default())?;
//! loop {
//!     keyboard.process_keyboard_event();
//! }
//! # #[allow(unreachable_code)]
//! # Ok::<(), miette::Report>(())
//! ```

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod core;
pub mod keyboard;

// Re-export.
pub use crate::core::*;
pub use keyboard::*;
