// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Raw mode for the controlling terminal.
//!
//! In cooked mode the line discipline buffers a whole line and interprets `Ctrl+C`,
//! `Ctrl+Z`, backspace and friends before the application sees anything. The keyboard
//! decoder needs every byte as soon as it is typed, so the demo binary switches the
//! terminal into raw mode with [`RawModeGuard`] before constructing a [`Keyboard`].
//!
//! [`Keyboard`]: crate::Keyboard

use miette::miette;
use rustix::{fd::{AsFd, BorrowedFd},
             termios::{self, OptionalActions, Termios}};
use std::{fs::File,
          io,
          sync::{LazyLock, Mutex}};

/// Settings in effect before the first [`enable_raw_mode()`], restored by
/// [`disable_raw_mode()`].
static ORIGINAL_TERMIOS: LazyLock<Mutex<Option<Termios>>> =
    LazyLock::new(|| Mutex::new(None));

/// The controlling terminal: stdin when it is a tty, otherwise `/dev/tty`.
///
/// This is also the handle the keyboard should read from, so that piping data into
/// the program doesn't take keyboard input away from it.
#[derive(Debug)]
pub enum TerminalFd {
    Stdin(io::Stdin),
    DevTty(File),
}

impl AsFd for TerminalFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.as_fd(),
            TerminalFd::DevTty(file) => file.as_fd(),
        }
    }
}

/// Open the controlling terminal.
///
/// # Errors
///
/// Returns an error if stdin is not a tty and `/dev/tty` cannot be opened.
pub fn terminal_fd() -> io::Result<TerminalFd> {
    let stdin = io::stdin();
    if termios::isatty(&stdin) {
        Ok(TerminalFd::Stdin(stdin))
    } else {
        let file = File::options().read(true).write(true).open("/dev/tty")?;
        Ok(TerminalFd::DevTty(file))
    }
}

/// Put the controlling terminal into raw mode (`cfmakeraw` semantics: no canonical
/// mode, no echo, no signal generation, `VMIN=1`, `VTIME=0`).
///
/// # Errors
///
/// Returns a diagnostic if the terminal can't be opened, its attributes can't be read
/// or written, or the saved-settings lock is poisoned.
pub fn enable_raw_mode() -> miette::Result<()> {
    let fd =
        terminal_fd().map_err(|e| miette!("failed to get terminal file descriptor: {e}"))?;

    let mut termios = termios::tcgetattr(&fd)
        .map_err(|e| miette!("failed to retrieve terminal attributes: {e}"))?;

    {
        let mut original = ORIGINAL_TERMIOS
            .lock()
            .map_err(|e| miette!("terminal settings lock poisoned: {e}"))?;
        if original.is_none() {
            *original = Some(termios.clone());
        }
    }

    termios.make_raw();

    termios::tcsetattr(&fd, OptionalActions::Now, &termios)
        .map_err(|e| miette!("failed to set terminal attributes: {e}"))?;

    Ok(())
}

/// Restore the settings saved by [`enable_raw_mode()`]. No-op if raw mode was never
/// enabled.
///
/// # Errors
///
/// Returns a diagnostic if the terminal can't be opened or its attributes can't be
/// written, or the saved-settings lock is poisoned.
pub fn disable_raw_mode() -> miette::Result<()> {
    let original = ORIGINAL_TERMIOS
        .lock()
        .map_err(|e| miette!("terminal settings lock poisoned: {e}"))?;

    if let Some(ref termios) = *original {
        let fd = terminal_fd()
            .map_err(|e| miette!("failed to get terminal file descriptor: {e}"))?;
        termios::tcsetattr(&fd, OptionalActions::Now, termios)
            .map_err(|e| miette!("failed to set terminal attributes: {e}"))?;
    }
    Ok(())
}

/// Enables raw mode on creation and restores the terminal when dropped, including
/// during a panic unwind.
#[derive(Debug)]
pub struct RawModeGuard;

impl RawModeGuard {
    /// # Errors
    ///
    /// See [`enable_raw_mode()`].
    pub fn new() -> miette::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) { drop(disable_raw_mode()); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disable_without_enable_is_a_no_op() {
        // Nothing was saved in this process, so no terminal is touched.
        if ORIGINAL_TERMIOS.lock().map(|it| it.is_none()).unwrap_or(false) {
            assert!(disable_raw_mode().is_ok());
        }
    }
}
