// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Errors that make the keyboard decoder unusable.
///
/// Runtime read and poll failures are not errors at this level: they mean "no data
/// this cycle" and the next poll tries again. Only setup can fail.
///
/// | Variant             | Cause                                        | Recoverable? |
/// | :------------------ | :------------------------------------------- | :----------- |
/// | [`DescriptorFlags`] | `fcntl(F_GETFL)` failed on the input handle  | No           |
///
/// [`DescriptorFlags`]: KeyboardError::DescriptorFlags
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum KeyboardError {
    /// The input descriptor's status flags could not be read, so blocking mode can't be
    /// toggled. The terminal is unusable.
    #[error("Failed to query the status flags of the keyboard input descriptor")]
    #[diagnostic(
        code(tty_keyboard::keyboard::descriptor_flags),
        help(
            "The input handle must be an open, readable descriptor \
             (a terminal, `/dev/tty`, or a pipe)"
        )
    )]
    DescriptorFlags(#[source] std::io::Error),
}
