// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! UTF-8 decoding of buffered input bytes.
//!
//! ```text
//! Byte Pattern   Meaning              Detection Mask
//! ──────────────────────────────────────────────────
//! 0xxxxxxx       ASCII (1-byte)       byte & 0x80 == 0x00
//! 110xxxxx       2-byte start         byte & 0xE0 == 0xC0
//! 1110xxxx       3-byte start         byte & 0xF0 == 0xE0
//! 11110xxx       4-byte start         byte & 0xF8 == 0xF0
//! 10xxxxxx       Continuation         byte & 0xC0 == 0x80
//! ```
//!
//! [`utf8_decode()`] only decodes; it never consumes. The classifier pops the bytes once
//! it has decided what they mean.

/// Lead bytes of multi-byte sequences have both high bits set.
pub const UTF8_MULTI_BYTE_LEAD_MASK: u8 = 0b1100_0000;

pub const UTF8_CONTINUATION_MASK: u8 = 0b1100_0000;
pub const UTF8_CONTINUATION_PATTERN: u8 = 0b1000_0000;
pub const UTF8_CONTINUATION_DATA_MASK: u8 = 0b0011_1111;

pub const UTF8_2BYTE_LEAD_MASK: u8 = 0b1110_0000;
pub const UTF8_2BYTE_LEAD_PATTERN: u8 = 0b1100_0000;
pub const UTF8_2BYTE_DATA_MASK: u8 = 0b0001_1111;

pub const UTF8_3BYTE_LEAD_MASK: u8 = 0b1111_0000;
pub const UTF8_3BYTE_LEAD_PATTERN: u8 = 0b1110_0000;
pub const UTF8_3BYTE_DATA_MASK: u8 = 0b0000_1111;

pub const UTF8_4BYTE_LEAD_MASK: u8 = 0b1111_1000;
pub const UTF8_4BYTE_LEAD_PATTERN: u8 = 0b1111_0000;
pub const UTF8_4BYTE_DATA_MASK: u8 = 0b0000_0111;

/// `true` for `11xxxxxx`, the lead byte of a (possibly invalid) multi-byte sequence.
#[must_use]
pub const fn is_multi_byte_lead(byte: u8) -> bool {
    byte & UTF8_MULTI_BYTE_LEAD_MASK == UTF8_MULTI_BYTE_LEAD_MASK
}

/// Expected sequence length announced by a lead byte.
///
/// Lead bytes that match no pattern (`0xF8..=0xFF`, or a stray continuation byte)
/// announce a length of 1, so they can be emitted as a degenerate single byte.
#[must_use]
pub const fn utf8_sequence_len(lead: u8) -> usize {
    if lead & UTF8_2BYTE_LEAD_MASK == UTF8_2BYTE_LEAD_PATTERN {
        2
    } else if lead & UTF8_3BYTE_LEAD_MASK == UTF8_3BYTE_LEAD_PATTERN {
        3
    } else if lead & UTF8_4BYTE_LEAD_MASK == UTF8_4BYTE_LEAD_PATTERN {
        4
    } else {
        1
    }
}

/// Decode the first `len` bytes as one UTF-8 sequence into a raw code point.
///
/// Returns `None` for any byte pattern that is inconsistent with `len`: a lead byte of
/// the wrong kind, a tail byte that is not `10xxxxxx`, fewer than `len` bytes, or
/// `len` outside `1..=4`. The result is not checked for being a Unicode scalar value;
/// use [`char::from_u32`] for that.
///
/// ```
/// use tty_keyboard::utf8_decode;
///
/// assert_eq!(utf8_decode([0xC3, 0xA9], 2), Some(0xE9));
/// assert_eq!(utf8_decode([0xC3, 0x41], 2), None);
/// assert_eq!(utf8_decode([0x41, 0x42], 1), Some(0x41));
/// ```
#[must_use]
pub fn utf8_decode(bytes: impl IntoIterator<Item = u8>, len: usize) -> Option<u32> {
    if !(1..=4).contains(&len) {
        return None;
    }

    let mut code_point: u32 = 0;
    let mut decoded = 0;

    for (index, byte) in bytes.into_iter().take(len).enumerate() {
        code_point = if index == 0 {
            match len {
                1 if byte < 0x80 => u32::from(byte),
                2 if byte & UTF8_2BYTE_LEAD_MASK == UTF8_2BYTE_LEAD_PATTERN => {
                    u32::from(byte & UTF8_2BYTE_DATA_MASK)
                }
                3 if byte & UTF8_3BYTE_LEAD_MASK == UTF8_3BYTE_LEAD_PATTERN => {
                    u32::from(byte & UTF8_3BYTE_DATA_MASK)
                }
                4 if byte & UTF8_4BYTE_LEAD_MASK == UTF8_4BYTE_LEAD_PATTERN => {
                    u32::from(byte & UTF8_4BYTE_DATA_MASK)
                }
                _ => return None,
            }
        } else if byte & UTF8_CONTINUATION_MASK == UTF8_CONTINUATION_PATTERN {
            (code_point << 6) | u32::from(byte & UTF8_CONTINUATION_DATA_MASK)
        } else {
            return None;
        };
        decoded += 1;
    }

    (decoded == len).then_some(code_point)
}
