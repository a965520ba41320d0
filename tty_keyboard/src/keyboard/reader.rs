// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte-at-a-time acquisition from the input descriptor.
//!
//! The descriptor is only non-blocking for the duration of a single read. Other code
//! in the host may share the same descriptor and expect it to be in its original
//! blocking mode.

use crate::{DEBUG_KEYBOARD, KeyboardError};
use rustix::{event::{PollFd, PollFlags, Timespec, poll},
             fd::AsFd,
             fs::{OFlags, fcntl_getfl, fcntl_setfl},
             io::Errno};
use std::time::Duration;

/// Reads single bytes from `Fd` and waits for readiness with `poll(2)`.
#[derive(Debug)]
pub struct NonBlockingReader<Fd: AsFd> {
    fd: Fd,
    status_flags: OFlags,
    non_blocking: bool,
    non_blocking_input_support: bool,
    has_pending_input: bool,
}

impl<Fd: AsFd> NonBlockingReader<Fd> {
    /// # Errors
    ///
    /// Returns [`KeyboardError::DescriptorFlags`] if `F_GETFL` fails. This is fatal;
    /// without the flags blocking mode can't be toggled.
    pub fn new(fd: Fd) -> Result<Self, KeyboardError> {
        let status_flags =
            fcntl_getfl(&fd).map_err(|errno| KeyboardError::DescriptorFlags(errno.into()))?;
        Ok(Self {
            non_blocking: status_flags.contains(OFlags::NONBLOCK),
            fd,
            status_flags,
            non_blocking_input_support: true,
            has_pending_input: false,
        })
    }

    #[must_use]
    pub fn fd(&self) -> &Fd { &self.fd }

    #[must_use]
    pub fn is_non_blocking(&self) -> bool { self.non_blocking }

    #[must_use]
    pub fn has_pending_input(&self) -> bool { self.has_pending_input }

    pub fn set_non_blocking_input_support(&mut self, enable: bool) {
        self.non_blocking_input_support = enable;
    }

    /// Set or clear `O_NONBLOCK`. Returns the mode now in effect, which is unchanged if
    /// `F_SETFL` fails.
    pub fn set_non_blocking_input(&mut self, enable: bool) -> bool {
        if enable == self.non_blocking {
            return self.non_blocking;
        }

        let mut flags = self.status_flags;
        flags.set(OFlags::NONBLOCK, enable);

        match fcntl_setfl(&self.fd, flags) {
            Ok(()) => {
                self.status_flags = flags;
                self.non_blocking = enable;
            }
            Err(errno) => {
                DEBUG_KEYBOARD.then(|| {
                    tracing::debug!(message = "⌨️ F_SETFL failed", enable = ?enable, errno = ?errno);
                });
            }
        }

        self.non_blocking
    }

    /// Read exactly one byte without blocking, then restore the previous blocking mode.
    ///
    /// Returns `Ok(None)` at end of file. "No data right now" is `Err(Errno::AGAIN)`.
    ///
    /// # Errors
    ///
    /// Any error from `read(2)`. The caller treats all of them as "no data this cycle".
    pub fn read_one_byte(&mut self) -> Result<Option<u8>, Errno> {
        let was_non_blocking = self.non_blocking;
        self.set_non_blocking_input(true);

        let mut byte = [0_u8; 1];
        let result = rustix::io::read(&self.fd, &mut byte[..]);

        self.set_non_blocking_input(was_non_blocking);

        // Readiness is spent whatever the outcome.
        self.has_pending_input = false;

        result.map(|count| (count > 0).then_some(byte[0]))
    }

    /// Wait until a byte can be read.
    ///
    /// A zero-timeout check runs first. If nothing is ready, a second wait uses
    /// `blocking_time`, or `short_wait` when the caller has a sequence in flight. If
    /// non-blocking input support is off, the zero-timeout check is skipped and the
    /// wait is always `blocking_time`.
    pub fn poll_ready(&mut self, blocking_time: Duration, short_wait: Option<Duration>) -> bool {
        if self.has_pending_input {
            return true;
        }

        let supported = self.non_blocking_input_support;

        if supported && !blocking_time.is_zero() && self.wait_readable(Duration::ZERO) {
            self.has_pending_input = true;
            return true;
        }

        let wait = match short_wait {
            Some(short) if supported => short,
            _ => blocking_time,
        };

        if self.wait_readable(wait) {
            self.has_pending_input = true;
        }

        self.has_pending_input
    }

    fn wait_readable(&self, timeout: Duration) -> bool {
        let mut fds = [PollFd::new(&self.fd, PollFlags::IN)];
        let timeout = Timespec {
            tv_sec: timeout.as_secs().try_into().unwrap_or(i64::MAX),
            tv_nsec: timeout.subsec_nanos().into(),
        };

        match poll(&mut fds, Some(&timeout)) {
            Ok(ready) => ready > 0 && fds[0].revents().contains(PollFlags::IN),
            Err(errno) => {
                DEBUG_KEYBOARD.then(|| {
                    tracing::debug!(message = "⌨️ poll failed", errno = ?errno);
                });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rustix::pipe::pipe;

    #[test]
    fn test_read_one_byte_at_a_time() {
        let (read_end, write_end) = pipe().unwrap();
        let mut reader = NonBlockingReader::new(read_end).unwrap();

        rustix::io::write(&write_end, b"ab").unwrap();
        assert_eq!(reader.read_one_byte(), Ok(Some(b'a')));
        assert_eq!(reader.read_one_byte(), Ok(Some(b'b')));
        assert_eq!(reader.read_one_byte(), Err(Errno::AGAIN));

        drop(write_end);
        assert_eq!(reader.read_one_byte(), Ok(None));
    }

    #[test]
    fn test_read_restores_blocking_mode() {
        let (read_end, _write_end) = pipe().unwrap();
        let mut reader = NonBlockingReader::new(read_end).unwrap();
        assert!(!reader.is_non_blocking());

        let _unused = reader.read_one_byte();

        assert!(!reader.is_non_blocking());
        let flags = fcntl_getfl(reader.fd()).unwrap();
        assert!(!flags.contains(OFlags::NONBLOCK));
    }

    #[test]
    fn test_set_non_blocking_is_idempotent() {
        let (read_end, _write_end) = pipe().unwrap();
        let mut reader = NonBlockingReader::new(read_end).unwrap();
        assert!(reader.set_non_blocking_input(true));
        assert!(reader.set_non_blocking_input(true));
        assert!(fcntl_getfl(reader.fd()).unwrap().contains(OFlags::NONBLOCK));
        assert!(!reader.set_non_blocking_input(false));
    }

    #[test]
    fn test_poll_ready() {
        let (read_end, write_end) = pipe().unwrap();
        let mut reader = NonBlockingReader::new(read_end).unwrap();

        assert!(!reader.poll_ready(Duration::from_millis(1), None));

        rustix::io::write(&write_end, b"x").unwrap();
        assert!(reader.poll_ready(Duration::from_millis(100), None));
        assert!(reader.has_pending_input());
        // Still pending until the byte is read.
        assert!(reader.poll_ready(Duration::ZERO, None));

        assert_eq!(reader.read_one_byte(), Ok(Some(b'x')));
        assert!(!reader.has_pending_input());
        assert!(!reader.poll_ready(Duration::ZERO, Some(Duration::ZERO)));
    }

    #[test]
    fn test_eof_after_readiness_clears_pending_input() {
        let (read_end, write_end) = pipe().unwrap();
        let mut reader = NonBlockingReader::new(read_end).unwrap();

        rustix::io::write(&write_end, b"x").unwrap();
        assert!(reader.poll_ready(Duration::from_millis(100), None));

        // Someone else consumes the byte, then the writer hangs up.
        let mut sink = [0_u8; 1];
        assert_eq!(rustix::io::read(reader.fd(), &mut sink[..]), Ok(1));
        drop(write_end);

        assert_eq!(reader.read_one_byte(), Ok(None));
        assert!(!reader.has_pending_input());
    }

    #[test]
    fn test_failed_read_after_readiness_clears_pending_input() {
        let (read_end, write_end) = pipe().unwrap();
        let mut reader = NonBlockingReader::new(read_end).unwrap();

        rustix::io::write(&write_end, b"x").unwrap();
        assert!(reader.poll_ready(Duration::from_millis(100), None));

        let mut sink = [0_u8; 1];
        assert_eq!(rustix::io::read(reader.fd(), &mut sink[..]), Ok(1));

        assert_eq!(reader.read_one_byte(), Err(Errno::AGAIN));
        assert!(!reader.has_pending_input());
        assert!(!reader.poll_ready(Duration::from_millis(1), None));
    }

    #[test]
    fn test_poll_ready_without_non_blocking_support() {
        let (read_end, write_end) = pipe().unwrap();
        let mut reader = NonBlockingReader::new(read_end).unwrap();
        reader.set_non_blocking_input_support(false);

        rustix::io::write(&write_end, b"x").unwrap();
        assert!(reader.poll_ready(Duration::from_millis(50), Some(Duration::ZERO)));
    }
}
