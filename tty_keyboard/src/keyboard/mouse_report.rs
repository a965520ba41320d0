// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Removing a mouse report from the byte buffer.
//!
//! The classifier only *detects* a mouse report; it leaves the bytes in place for the
//! mouse-tracking sink. A sink that wants the payload calls [`MouseReport::extract()`],
//! which pops exactly one report so the next key behind it can be classified.

use crate::{ByteRingBuffer, MouseProtocol, X11_MOUSE_REPORT_LEN};
use smallvec::SmallVec;

/// X11 coordinates and button codes are offset by this to keep them printable.
const X11_MOUSE_OFFSET: u8 = 32;

/// The raw bytes of one mouse report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseReport {
    pub protocol: MouseProtocol,
    pub bytes: SmallVec<[u8; 32]>,
}

/// Button code and 1-based position, as encoded by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseReportFields {
    pub button: u16,
    pub col: u16,
    pub row: u16,
}

impl MouseReport {
    /// Length of the first complete report of `protocol` at the front of `buffer`.
    ///
    /// - X11: always 6 bytes.
    /// - SGR: through the first `M` or `m` after `ESC [ <`.
    /// - urxvt: through the first `M` after `ESC [`.
    #[must_use]
    pub fn report_len<const N: usize>(
        protocol: MouseProtocol,
        buffer: &ByteRingBuffer<N>,
    ) -> Option<usize> {
        match protocol {
            MouseProtocol::X11 => {
                (buffer.len() >= X11_MOUSE_REPORT_LEN).then_some(X11_MOUSE_REPORT_LEN)
            }
            MouseProtocol::Sgr(_) => buffer
                .iter()
                .skip(3)
                .position(|it| it == b'M' || it == b'm')
                .map(|it| it + 4),
            MouseProtocol::Urxvt => buffer
                .iter()
                .skip(2)
                .position(|it| it == b'M')
                .map(|it| it + 3),
        }
    }

    /// Pop one report from the front of `buffer`. Returns `None`, leaving the buffer
    /// untouched, if no complete report of that protocol is there.
    pub fn extract<const N: usize>(
        protocol: MouseProtocol,
        buffer: &mut ByteRingBuffer<N>,
    ) -> Option<Self> {
        let len = Self::report_len(protocol, buffer)?;
        let bytes: SmallVec<[u8; 32]> = buffer.iter().take(len).collect();
        buffer.pop(len).ok()?;
        Some(Self { protocol, bytes })
    }

    /// Decode the button code and position.
    ///
    /// ```
    /// use tty_keyboard::{ByteRingBuffer, MouseProtocol, MouseReport, MouseReportFields,
    ///                    SgrButtonState};
    ///
    /// let mut buffer = ByteRingBuffer::<32>::new();
    /// for byte in b"\x1b[<0;12;7m" {
    ///     buffer.push(*byte);
    /// }
    /// let protocol = MouseProtocol::Sgr(SgrButtonState::Released);
    /// let report = MouseReport::extract(protocol, &mut buffer).unwrap();
    /// assert_eq!(
    ///     report.fields(),
    ///     Some(MouseReportFields { button: 0, col: 12, row: 7 })
    /// );
    /// ```
    #[must_use]
    pub fn fields(&self) -> Option<MouseReportFields> {
        match self.protocol {
            MouseProtocol::X11 => {
                let &[_, _, _, button, col, row] = self.bytes.as_slice() else {
                    return None;
                };
                Some(MouseReportFields {
                    button: u16::from(button.checked_sub(X11_MOUSE_OFFSET)?),
                    col: u16::from(col.checked_sub(X11_MOUSE_OFFSET)?),
                    row: u16::from(row.checked_sub(X11_MOUSE_OFFSET)?),
                })
            }
            MouseProtocol::Sgr(_) => parse_semicolon_fields(self.bytes.get(3..)?),
            MouseProtocol::Urxvt => {
                let fields = parse_semicolon_fields(self.bytes.get(2..)?)?;
                Some(MouseReportFields {
                    button: fields.button.checked_sub(u16::from(X11_MOUSE_OFFSET))?,
                    ..fields
                })
            }
        }
    }
}

/// `b;x;yM` → fields. The final byte is dropped.
fn parse_semicolon_fields(payload: &[u8]) -> Option<MouseReportFields> {
    let (_, body) = payload.split_last()?;
    let text = std::str::from_utf8(body).ok()?;
    let mut parts = text.split(';').map(str::parse::<u16>);
    let button = parts.next()?.ok()?;
    let col = parts.next()?.ok()?;
    let row = parts.next()?.ok()?;
    parts.next().is_none().then_some(MouseReportFields { button, col, row })
}
