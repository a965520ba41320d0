// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Building blocks that aren't specific to keyboard decoding.

// Attach.
pub mod log;
pub mod raw_mode;
pub mod ring_buffer;

// Re-export.
pub use log::*;
pub use raw_mode::*;
pub use ring_buffer::*;
