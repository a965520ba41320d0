// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns the front of the byte buffer into at most one key, or decides that it can't
//! yet.
//!
//! The terminal provides no framing, so the buffer may hold a complete sequence, a
//! truncated prefix of one, or several keys back to back. [`classify()`] looks only at
//! the *whole* buffer for escape-led input, since the caller invokes it after every
//! byte it appends. The caller owns the clock and passes in whether the keypress
//! timeout has elapsed.
//!
//! ```text
//! classify(buffer, tables, options, timed_out):
//! ┌────────────────────────────────────────────────────────────┐
//! │ front == ESC?                                              │
//! │  ├─ mouse report? (X11 / SGR / urxvt)  → Mouse (no pop)    │
//! │  ├─ capability string == buffer?       → Key (pop)         │
//! │  ├─ known sequence == buffer?                              │
//! │  │   ├─ ESC O | ESC [ | ESC ] and not timed out → Incomplete│
//! │  │   └─ otherwise                       → Key (pop)        │
//! │  └─ not timed out                       → Incomplete       │
//! ├────────────────────────────────────────────────────────────┤
//! │ single character (UTF-8 or Latin-1)                        │
//! │  ├─ multi-byte lead, short buffer, not timed out → Incomplete│
//! │  └─ otherwise                           → Key (pop 1..=4)  │
//! └────────────────────────────────────────────────────────────┘
//! ```

use crate::{ByteRingBuffer, DEBUG_KEYBOARD, Key, KeyCapTable, KeyTables, KeyboardConfig,
            KnownKeyTable, MouseProtocol, SgrButtonState, is_multi_byte_lead, utf8_decode,
            utf8_sequence_len};

pub const ANSI_ESC: u8 = 0x1B;
pub const ANSI_CSI_BRACKET: u8 = b'[';
pub const ANSI_SS3_O: u8 = b'O';
pub const ANSI_OSC_BRACKET: u8 = b']';
pub const ASCII_DEL: u8 = 0x7F;

/// Second bytes after `ESC` that start longer sequences as well as being Meta keys on
/// their own. A two-byte match on one of these waits for the keypress timeout.
pub const DEFERRED_META_BYTES: [u8; 3] = [ANSI_SS3_O, ANSI_CSI_BRACKET, ANSI_OSC_BRACKET];

/// X11 mouse reports are always `ESC [ M Cb Cx Cy`.
pub const X11_MOUSE_REPORT_LEN: usize = 6;

/// Shortest SGR or urxvt report worth probing, e.g. `ESC [ < 0 ; 1 ; 1 M`.
pub const MIN_EXTENDED_MOUSE_REPORT_LEN: usize = 9;

/// Outcome of one [`classify()`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A valid prefix of something longer. Wait for more bytes or for the timeout.
    Incomplete,
    /// A key. Its bytes have been removed from the buffer.
    Key(Key),
    /// A mouse report sits at the front of the buffer. Nothing was removed.
    Mouse(MouseProtocol),
}

/// Decoder switches the classifier needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierOptions {
    pub utf8_input: bool,
    pub mouse_support: bool,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            utf8_input: true,
            mouse_support: true,
        }
    }
}

impl From<&KeyboardConfig> for ClassifierOptions {
    fn from(config: &KeyboardConfig) -> Self {
        Self {
            utf8_input: config.utf8_input,
            mouse_support: config.mouse_support,
        }
    }
}

/// Classify the front of `buffer`. Returns `None` only when the buffer is empty.
///
/// `timed_out` means the keypress timeout has elapsed since the last byte arrived, so
/// no more bytes of the current sequence are expected.
///
/// ```
/// use tty_keyboard::{classify, ByteRingBuffer, Classification, ClassifierOptions, Key,
///                    KeyTables, SpecialKey};
///
/// let tables = KeyTables::default();
/// let mut buffer = ByteRingBuffer::<16>::new();
/// for byte in b"\x1b[A" {
///     buffer.push(*byte);
/// }
///
/// let result = classify(&mut buffer, &tables, ClassifierOptions::default(), false);
/// assert_eq!(result, Some(Classification::Key(Key::special(SpecialKey::Up))));
/// assert!(buffer.is_empty());
/// ```
pub fn classify<const N: usize>(
    buffer: &mut ByteRingBuffer<N>,
    tables: &KeyTables,
    options: ClassifierOptions,
    timed_out: bool,
) -> Option<Classification> {
    let lead = buffer.front()?;

    if lead == ANSI_ESC {
        if options.mouse_support
            && let Some(protocol) = mouse_protocol(buffer)
        {
            return Some(Classification::Mouse(protocol));
        }

        if let Some(key) = key_cap_key(buffer, &tables.key_cap) {
            return Some(Classification::Key(key));
        }

        if let Some(result) = known_key(buffer, &tables.known_keys, timed_out) {
            return Some(result);
        }

        if !timed_out {
            return Some(Classification::Incomplete);
        }
    }

    Some(single_key(buffer, options.utf8_input, timed_out))
}

/// Detect a mouse report at the front of the buffer without consuming it.
#[must_use]
pub fn mouse_protocol<const N: usize>(buffer: &ByteRingBuffer<N>) -> Option<MouseProtocol> {
    let len = buffer.len();
    if buffer.front() != Some(ANSI_ESC) || buffer.get(1) != Some(ANSI_CSI_BRACKET) {
        return None;
    }
    let third = buffer.get(2)?;
    let last = buffer.back()?;

    if len >= X11_MOUSE_REPORT_LEN && third == b'M' {
        return Some(MouseProtocol::X11);
    }

    if third == b'<' && len >= MIN_EXTENDED_MOUSE_REPORT_LEN {
        match last {
            b'M' => return Some(MouseProtocol::Sgr(SgrButtonState::Pressed)),
            b'm' => return Some(MouseProtocol::Sgr(SgrButtonState::Released)),
            _ => {}
        }
    }

    let fourth_is_digit = buffer.get(3).is_some_and(|it| it.is_ascii_digit());
    if (b'1'..=b'9').contains(&third)
        && fourth_is_digit
        && len >= MIN_EXTENDED_MOUSE_REPORT_LEN
        && last == b'M'
    {
        return Some(MouseProtocol::Urxvt);
    }

    None
}

/// The Meta key reported for a two-byte `ESC x` once the timeout has elapsed, for the
/// deferred second bytes only.
#[must_use]
pub fn meta_substring_key(second: u8) -> Option<Key> {
    DEFERRED_META_BYTES
        .contains(&second)
        .then(|| Key::Meta(char::from(second)))
}

fn key_cap_key<const N: usize>(buffer: &mut ByteRingBuffer<N>, table: &KeyCapTable) -> Option<Key> {
    let (key, len) = table.find(buffer).map(|it| (it.key, it.len()))?;
    consume(buffer, len);
    Some(key)
}

fn known_key<const N: usize>(
    buffer: &mut ByteRingBuffer<N>,
    table: &KnownKeyTable,
    timed_out: bool,
) -> Option<Classification> {
    let entry = table.find(buffer)?;

    let is_deferred = matches!(entry.bytes, [ANSI_ESC, second] if DEFERRED_META_BYTES.contains(second));
    if is_deferred && !timed_out {
        return Some(Classification::Incomplete);
    }

    consume(buffer, entry.len());
    Some(Classification::Key(entry.key))
}

/// Decode one character from the front of a non-empty buffer.
///
/// Anything that doesn't decode (a lead byte with no UTF-8 pattern, a sequence cut
/// short by the timeout, a value that isn't a Unicode scalar) becomes the lead byte as
/// a Latin-1 code point and only that byte is removed.
fn single_key<const N: usize>(
    buffer: &mut ByteRingBuffer<N>,
    utf8_input: bool,
    timed_out: bool,
) -> Classification {
    let Some(lead) = buffer.front() else {
        return Classification::Incomplete;
    };

    let (ch, consumed) = if utf8_input && is_multi_byte_lead(lead) {
        let len = utf8_sequence_len(lead);
        if buffer.len() < len && !timed_out {
            return Classification::Incomplete;
        }
        match utf8_decode(buffer.iter(), len).and_then(char::from_u32) {
            Some(ch) => (ch, len),
            None => {
                DEBUG_KEYBOARD.then(|| {
                    // % is Display, ? is Debug.
                    tracing::debug!(
                        message = "⌨️ Undecodable UTF-8, emitting lead byte",
                        lead = %format_args!("{lead:#04x}"),
                        buffered = ?buffer
                    );
                });
                (char::from(lead), 1)
            }
        }
    } else {
        (char::from(lead), 1)
    };

    consume(buffer, consumed);

    Classification::Key(match ch {
        '\0' => Key::CTRL_SPACE,
        '\u{7f}' => Key::BACKSPACE,
        ch => Key::Char(ch),
    })
}

/// Every caller computes `count` from a match against the current contents, so an
/// underflow means the buffer is inconsistent. It is logged and the buffer emptied.
fn consume<const N: usize>(buffer: &mut ByteRingBuffer<N>, count: usize) {
    if let Err(error) = buffer.pop(count) {
        DEBUG_KEYBOARD.then(|| {
            tracing::debug!(message = "⌨️ Classifier pop failed", error = ?error);
        });
        buffer.clear();
    }
}
