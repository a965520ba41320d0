// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Decoding a raw terminal byte stream into keys and mouse reports. Start with
//! [`Keyboard`].

/// Module scoped debug flag. When `true`, the decoder logs dropped bytes, failed
/// syscalls and undecodable input with [`tracing::debug!`]. Nothing is written unless a
/// subscriber is installed, see [`try_initialize_logging_global()`].
///
/// [`try_initialize_logging_global()`]: crate::try_initialize_logging_global
pub const DEBUG_KEYBOARD: bool = true;

// Attach sources.
pub mod classifier;
pub mod config;
pub mod error;
pub mod key;
pub mod key_correction;
pub mod key_tables;
pub mod keyboard_impl;
pub mod mouse_report;
pub mod reactions;
pub mod reader;
pub mod utf8;

// Re-export.
pub use classifier::*;
pub use config::*;
pub use error::*;
pub use key::*;
pub use key_correction::*;
pub use key_tables::*;
pub use keyboard_impl::*;
pub use mouse_report::*;
pub use reactions::*;
pub use reader::*;
pub use utf8::*;

// Tests.
#[cfg(test)]
mod integration_tests;
