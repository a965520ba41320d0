// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Generic escape sequences that most terminals emit, independent of any capability
//! data. See [`KnownKeyTable`] for how these are matched.

use crate::{ByteRingBuffer, Key, KeyModifiers, SpecialKey};
use std::ops::Range;

/// Longest byte string in [`KNOWN_KEYS`] (`ESC [ 2 4 ; 8 ~`).
pub const MAX_KNOWN_KEY_LEN: usize = 7;

/// One generic escape-sequence mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownKeyEntry {
    pub key: Key,
    pub bytes: &'static [u8],
}

impl KnownKeyEntry {
    #[must_use]
    pub const fn new(key: Key, bytes: &'static [u8]) -> Self { Self { key, bytes } }

    #[must_use]
    pub const fn len(&self) -> usize { self.bytes.len() }

    #[must_use]
    pub const fn is_empty(&self) -> bool { self.bytes.is_empty() }
}

/// [`KNOWN_KEYS`] sorted by ascending length and indexed by exact length.
///
/// A sequence is only ever compared against entries of the same length as the whole
/// buffer, so a prefix of a longer sequence never matches a shorter entry by accident
/// and the scan touches a handful of candidates instead of the whole table.
#[derive(Debug, Clone)]
pub struct KnownKeyTable {
    sorted_entries: Vec<&'static KnownKeyEntry>,
    /// `ranges_by_len[n]` is the slice of `sorted_entries` holding entries of length `n`.
    ranges_by_len: [Range<usize>; MAX_KNOWN_KEY_LEN + 1],
}

impl Default for KnownKeyTable {
    fn default() -> Self { Self::new() }
}

impl KnownKeyTable {
    #[must_use]
    pub fn new() -> Self { Self::from_entries(KNOWN_KEYS) }

    /// Build a table from arbitrary entries. Entries longer than
    /// [`MAX_KNOWN_KEY_LEN`] or empty are ignored.
    #[must_use]
    pub fn from_entries(entries: &'static [KnownKeyEntry]) -> Self {
        let mut sorted_entries: Vec<&'static KnownKeyEntry> = entries
            .iter()
            .filter(|it| !it.is_empty() && it.len() <= MAX_KNOWN_KEY_LEN)
            .collect();
        sorted_entries.sort_by_key(|it| it.len());

        let mut ranges_by_len: [Range<usize>; MAX_KNOWN_KEY_LEN + 1] =
            std::array::from_fn(|_| 0..0);
        for (len, range) in ranges_by_len.iter_mut().enumerate() {
            let start = sorted_entries.partition_point(|it| it.len() < len);
            let end = sorted_entries.partition_point(|it| it.len() <= len);
            *range = start..end;
        }

        Self {
            sorted_entries,
            ranges_by_len,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.sorted_entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.sorted_entries.is_empty() }

    /// All entries whose byte string is exactly `len` bytes long.
    #[must_use]
    pub fn entries_of_len(&self, len: usize) -> &[&'static KnownKeyEntry] {
        match self.ranges_by_len.get(len) {
            Some(range) => &self.sorted_entries[range.clone()],
            None => &[],
        }
    }

    /// The entry whose byte string equals the entire buffer contents, if any. Does not
    /// consume anything.
    #[must_use]
    pub fn find<const N: usize>(
        &self,
        buffer: &ByteRingBuffer<N>,
    ) -> Option<&'static KnownKeyEntry> {
        self.entries_of_len(buffer.len())
            .iter()
            .find(|it| buffer.prefix_equals(it.bytes))
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static KnownKeyEntry> + '_ {
        self.sorted_entries.iter().copied()
    }
}

/// Escape sequences recognized without any capability data.
pub static KNOWN_KEYS: &[KnownKeyEntry] = &[
    // Unmodified cursor, editing, and function keys (xterm, VT220).
    KnownKeyEntry::new(Key::special(SpecialKey::Up), b"\x1b[A"),
    KnownKeyEntry::new(Key::special(SpecialKey::Up), b"\x1bOA"),
    KnownKeyEntry::new(Key::special(SpecialKey::Down), b"\x1b[B"),
    KnownKeyEntry::new(Key::special(SpecialKey::Down), b"\x1bOB"),
    KnownKeyEntry::new(Key::special(SpecialKey::Right), b"\x1b[C"),
    KnownKeyEntry::new(Key::special(SpecialKey::Right), b"\x1bOC"),
    KnownKeyEntry::new(Key::special(SpecialKey::Left), b"\x1b[D"),
    KnownKeyEntry::new(Key::special(SpecialKey::Left), b"\x1bOD"),
    KnownKeyEntry::new(Key::special(SpecialKey::Home), b"\x1b[H"),
    KnownKeyEntry::new(Key::special(SpecialKey::Home), b"\x1bOH"),
    KnownKeyEntry::new(Key::special(SpecialKey::End), b"\x1b[F"),
    KnownKeyEntry::new(Key::special(SpecialKey::End), b"\x1bOF"),
    KnownKeyEntry::new(Key::function(1), b"\x1bOP"),
    KnownKeyEntry::new(Key::function(2), b"\x1bOQ"),
    KnownKeyEntry::new(Key::function(3), b"\x1bOR"),
    KnownKeyEntry::new(Key::function(4), b"\x1bOS"),
    KnownKeyEntry::new(Key::special(SpecialKey::Insert), b"\x1b[2~"),
    KnownKeyEntry::new(Key::special(SpecialKey::Delete), b"\x1b[3~"),
    KnownKeyEntry::new(Key::special(SpecialKey::PageUp), b"\x1b[5~"),
    KnownKeyEntry::new(Key::special(SpecialKey::PageDown), b"\x1b[6~"),
    KnownKeyEntry::new(Key::function(5), b"\x1b[15~"),
    KnownKeyEntry::new(Key::function(6), b"\x1b[17~"),
    KnownKeyEntry::new(Key::function(7), b"\x1b[18~"),
    KnownKeyEntry::new(Key::function(8), b"\x1b[19~"),
    KnownKeyEntry::new(Key::function(9), b"\x1b[20~"),
    KnownKeyEntry::new(Key::function(10), b"\x1b[21~"),
    KnownKeyEntry::new(Key::function(11), b"\x1b[23~"),
    KnownKeyEntry::new(Key::function(12), b"\x1b[24~"),
    // Alternate encodings (Linux console, rxvt, VT100 keypad, VT220 F13-F20).
    KnownKeyEntry::new(Key::special(SpecialKey::Home), b"\x1b[1~"),
    KnownKeyEntry::new(Key::special(SpecialKey::End), b"\x1b[4~"),
    KnownKeyEntry::new(Key::special(SpecialKey::Home), b"\x1b[7~"),
    KnownKeyEntry::new(Key::special(SpecialKey::End), b"\x1b[8~"),
    KnownKeyEntry::new(Key::function(1), b"\x1b[11~"),
    KnownKeyEntry::new(Key::function(2), b"\x1b[12~"),
    KnownKeyEntry::new(Key::function(3), b"\x1b[13~"),
    KnownKeyEntry::new(Key::function(4), b"\x1b[14~"),
    KnownKeyEntry::new(Key::function(1), b"\x1b[[A"),
    KnownKeyEntry::new(Key::function(2), b"\x1b[[B"),
    KnownKeyEntry::new(Key::function(3), b"\x1b[[C"),
    KnownKeyEntry::new(Key::function(4), b"\x1b[[D"),
    KnownKeyEntry::new(Key::function(5), b"\x1b[[E"),
    KnownKeyEntry::new(Key::special(SpecialKey::BackTab), b"\x1b[Z"),
    KnownKeyEntry::new(Key::special(SpecialKey::Center), b"\x1b[E"),
    KnownKeyEntry::new(Key::special(SpecialKey::Center), b"\x1bOE"),
    KnownKeyEntry::new(Key::special(SpecialKey::KeypadEnter), b"\x1bOM"),
    KnownKeyEntry::new(Key::function(13), b"\x1b[25~"),
    KnownKeyEntry::new(Key::function(14), b"\x1b[26~"),
    KnownKeyEntry::new(Key::function(15), b"\x1b[28~"),
    KnownKeyEntry::new(Key::function(16), b"\x1b[29~"),
    KnownKeyEntry::new(Key::function(17), b"\x1b[31~"),
    KnownKeyEntry::new(Key::function(18), b"\x1b[32~"),
    KnownKeyEntry::new(Key::function(19), b"\x1b[33~"),
    KnownKeyEntry::new(Key::function(20), b"\x1b[34~"),
    // rxvt modified cursor and editing keys.
    KnownKeyEntry::new(Key::modified(SpecialKey::Up, KeyModifiers::SHIFT), b"\x1b[a"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Down, KeyModifiers::SHIFT), b"\x1b[b"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Right, KeyModifiers::SHIFT), b"\x1b[c"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Left, KeyModifiers::SHIFT), b"\x1b[d"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Up, KeyModifiers::CTRL), b"\x1bOa"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Down, KeyModifiers::CTRL), b"\x1bOb"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Right, KeyModifiers::CTRL), b"\x1bOc"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Left, KeyModifiers::CTRL), b"\x1bOd"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Insert, KeyModifiers::SHIFT), b"\x1b[2$"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Delete, KeyModifiers::SHIFT), b"\x1b[3$"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageUp, KeyModifiers::SHIFT), b"\x1b[5$"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageDown, KeyModifiers::SHIFT), b"\x1b[6$"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Home, KeyModifiers::SHIFT), b"\x1b[7$"),
    KnownKeyEntry::new(Key::modified(SpecialKey::End, KeyModifiers::SHIFT), b"\x1b[8$"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Insert, KeyModifiers::CTRL), b"\x1b[2^"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Delete, KeyModifiers::CTRL), b"\x1b[3^"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageUp, KeyModifiers::CTRL), b"\x1b[5^"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageDown, KeyModifiers::CTRL), b"\x1b[6^"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Home, KeyModifiers::CTRL), b"\x1b[7^"),
    KnownKeyEntry::new(Key::modified(SpecialKey::End, KeyModifiers::CTRL), b"\x1b[8^"),
    // xterm modifier parameter 2 (SHIFT).
    KnownKeyEntry::new(Key::modified(SpecialKey::Up, KeyModifiers::SHIFT), b"\x1b[1;2A"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Down, KeyModifiers::SHIFT), b"\x1b[1;2B"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Right, KeyModifiers::SHIFT), b"\x1b[1;2C"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Left, KeyModifiers::SHIFT), b"\x1b[1;2D"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Home, KeyModifiers::SHIFT), b"\x1b[1;2H"),
    KnownKeyEntry::new(Key::modified(SpecialKey::End, KeyModifiers::SHIFT), b"\x1b[1;2F"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(1), KeyModifiers::SHIFT), b"\x1b[1;2P"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(2), KeyModifiers::SHIFT), b"\x1b[1;2Q"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(3), KeyModifiers::SHIFT), b"\x1b[1;2R"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(4), KeyModifiers::SHIFT), b"\x1b[1;2S"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Insert, KeyModifiers::SHIFT), b"\x1b[2;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Delete, KeyModifiers::SHIFT), b"\x1b[3;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageUp, KeyModifiers::SHIFT), b"\x1b[5;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageDown, KeyModifiers::SHIFT), b"\x1b[6;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(5), KeyModifiers::SHIFT), b"\x1b[15;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(6), KeyModifiers::SHIFT), b"\x1b[17;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(7), KeyModifiers::SHIFT), b"\x1b[18;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(8), KeyModifiers::SHIFT), b"\x1b[19;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(9), KeyModifiers::SHIFT), b"\x1b[20;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(10), KeyModifiers::SHIFT), b"\x1b[21;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(11), KeyModifiers::SHIFT), b"\x1b[23;2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(12), KeyModifiers::SHIFT), b"\x1b[24;2~"),
    // xterm modifier parameter 3 (META).
    KnownKeyEntry::new(Key::modified(SpecialKey::Up, KeyModifiers::META), b"\x1b[1;3A"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Down, KeyModifiers::META), b"\x1b[1;3B"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Right, KeyModifiers::META), b"\x1b[1;3C"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Left, KeyModifiers::META), b"\x1b[1;3D"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Home, KeyModifiers::META), b"\x1b[1;3H"),
    KnownKeyEntry::new(Key::modified(SpecialKey::End, KeyModifiers::META), b"\x1b[1;3F"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(1), KeyModifiers::META), b"\x1b[1;3P"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(2), KeyModifiers::META), b"\x1b[1;3Q"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(3), KeyModifiers::META), b"\x1b[1;3R"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(4), KeyModifiers::META), b"\x1b[1;3S"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Insert, KeyModifiers::META), b"\x1b[2;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Delete, KeyModifiers::META), b"\x1b[3;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageUp, KeyModifiers::META), b"\x1b[5;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageDown, KeyModifiers::META), b"\x1b[6;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(5), KeyModifiers::META), b"\x1b[15;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(6), KeyModifiers::META), b"\x1b[17;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(7), KeyModifiers::META), b"\x1b[18;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(8), KeyModifiers::META), b"\x1b[19;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(9), KeyModifiers::META), b"\x1b[20;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(10), KeyModifiers::META), b"\x1b[21;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(11), KeyModifiers::META), b"\x1b[23;3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(12), KeyModifiers::META), b"\x1b[24;3~"),
    // xterm modifier parameter 4 (SHIFT_META).
    KnownKeyEntry::new(Key::modified(SpecialKey::Up, KeyModifiers::SHIFT_META), b"\x1b[1;4A"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Down, KeyModifiers::SHIFT_META), b"\x1b[1;4B"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Right, KeyModifiers::SHIFT_META), b"\x1b[1;4C"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Left, KeyModifiers::SHIFT_META), b"\x1b[1;4D"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Home, KeyModifiers::SHIFT_META), b"\x1b[1;4H"),
    KnownKeyEntry::new(Key::modified(SpecialKey::End, KeyModifiers::SHIFT_META), b"\x1b[1;4F"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(1), KeyModifiers::SHIFT_META), b"\x1b[1;4P"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(2), KeyModifiers::SHIFT_META), b"\x1b[1;4Q"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(3), KeyModifiers::SHIFT_META), b"\x1b[1;4R"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(4), KeyModifiers::SHIFT_META), b"\x1b[1;4S"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Insert, KeyModifiers::SHIFT_META), b"\x1b[2;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Delete, KeyModifiers::SHIFT_META), b"\x1b[3;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageUp, KeyModifiers::SHIFT_META), b"\x1b[5;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageDown, KeyModifiers::SHIFT_META), b"\x1b[6;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(5), KeyModifiers::SHIFT_META), b"\x1b[15;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(6), KeyModifiers::SHIFT_META), b"\x1b[17;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(7), KeyModifiers::SHIFT_META), b"\x1b[18;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(8), KeyModifiers::SHIFT_META), b"\x1b[19;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(9), KeyModifiers::SHIFT_META), b"\x1b[20;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(10), KeyModifiers::SHIFT_META), b"\x1b[21;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(11), KeyModifiers::SHIFT_META), b"\x1b[23;4~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(12), KeyModifiers::SHIFT_META), b"\x1b[24;4~"),
    // xterm modifier parameter 5 (CTRL).
    KnownKeyEntry::new(Key::modified(SpecialKey::Up, KeyModifiers::CTRL), b"\x1b[1;5A"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Down, KeyModifiers::CTRL), b"\x1b[1;5B"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Right, KeyModifiers::CTRL), b"\x1b[1;5C"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Left, KeyModifiers::CTRL), b"\x1b[1;5D"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Home, KeyModifiers::CTRL), b"\x1b[1;5H"),
    KnownKeyEntry::new(Key::modified(SpecialKey::End, KeyModifiers::CTRL), b"\x1b[1;5F"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(1), KeyModifiers::CTRL), b"\x1b[1;5P"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(2), KeyModifiers::CTRL), b"\x1b[1;5Q"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(3), KeyModifiers::CTRL), b"\x1b[1;5R"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(4), KeyModifiers::CTRL), b"\x1b[1;5S"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Insert, KeyModifiers::CTRL), b"\x1b[2;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Delete, KeyModifiers::CTRL), b"\x1b[3;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageUp, KeyModifiers::CTRL), b"\x1b[5;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageDown, KeyModifiers::CTRL), b"\x1b[6;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(5), KeyModifiers::CTRL), b"\x1b[15;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(6), KeyModifiers::CTRL), b"\x1b[17;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(7), KeyModifiers::CTRL), b"\x1b[18;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(8), KeyModifiers::CTRL), b"\x1b[19;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(9), KeyModifiers::CTRL), b"\x1b[20;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(10), KeyModifiers::CTRL), b"\x1b[21;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(11), KeyModifiers::CTRL), b"\x1b[23;5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(12), KeyModifiers::CTRL), b"\x1b[24;5~"),
    // xterm modifier parameter 6 (SHIFT_CTRL).
    KnownKeyEntry::new(Key::modified(SpecialKey::Up, KeyModifiers::SHIFT_CTRL), b"\x1b[1;6A"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Down, KeyModifiers::SHIFT_CTRL), b"\x1b[1;6B"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Right, KeyModifiers::SHIFT_CTRL), b"\x1b[1;6C"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Left, KeyModifiers::SHIFT_CTRL), b"\x1b[1;6D"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Home, KeyModifiers::SHIFT_CTRL), b"\x1b[1;6H"),
    KnownKeyEntry::new(Key::modified(SpecialKey::End, KeyModifiers::SHIFT_CTRL), b"\x1b[1;6F"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(1), KeyModifiers::SHIFT_CTRL), b"\x1b[1;6P"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(2), KeyModifiers::SHIFT_CTRL), b"\x1b[1;6Q"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(3), KeyModifiers::SHIFT_CTRL), b"\x1b[1;6R"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(4), KeyModifiers::SHIFT_CTRL), b"\x1b[1;6S"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Insert, KeyModifiers::SHIFT_CTRL), b"\x1b[2;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Delete, KeyModifiers::SHIFT_CTRL), b"\x1b[3;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageUp, KeyModifiers::SHIFT_CTRL), b"\x1b[5;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageDown, KeyModifiers::SHIFT_CTRL), b"\x1b[6;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(5), KeyModifiers::SHIFT_CTRL), b"\x1b[15;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(6), KeyModifiers::SHIFT_CTRL), b"\x1b[17;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(7), KeyModifiers::SHIFT_CTRL), b"\x1b[18;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(8), KeyModifiers::SHIFT_CTRL), b"\x1b[19;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(9), KeyModifiers::SHIFT_CTRL), b"\x1b[20;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(10), KeyModifiers::SHIFT_CTRL), b"\x1b[21;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(11), KeyModifiers::SHIFT_CTRL), b"\x1b[23;6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(12), KeyModifiers::SHIFT_CTRL), b"\x1b[24;6~"),
    // xterm modifier parameter 7 (CTRL_META).
    KnownKeyEntry::new(Key::modified(SpecialKey::Up, KeyModifiers::CTRL_META), b"\x1b[1;7A"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Down, KeyModifiers::CTRL_META), b"\x1b[1;7B"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Right, KeyModifiers::CTRL_META), b"\x1b[1;7C"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Left, KeyModifiers::CTRL_META), b"\x1b[1;7D"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Home, KeyModifiers::CTRL_META), b"\x1b[1;7H"),
    KnownKeyEntry::new(Key::modified(SpecialKey::End, KeyModifiers::CTRL_META), b"\x1b[1;7F"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(1), KeyModifiers::CTRL_META), b"\x1b[1;7P"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(2), KeyModifiers::CTRL_META), b"\x1b[1;7Q"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(3), KeyModifiers::CTRL_META), b"\x1b[1;7R"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(4), KeyModifiers::CTRL_META), b"\x1b[1;7S"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Insert, KeyModifiers::CTRL_META), b"\x1b[2;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Delete, KeyModifiers::CTRL_META), b"\x1b[3;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageUp, KeyModifiers::CTRL_META), b"\x1b[5;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageDown, KeyModifiers::CTRL_META), b"\x1b[6;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(5), KeyModifiers::CTRL_META), b"\x1b[15;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(6), KeyModifiers::CTRL_META), b"\x1b[17;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(7), KeyModifiers::CTRL_META), b"\x1b[18;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(8), KeyModifiers::CTRL_META), b"\x1b[19;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(9), KeyModifiers::CTRL_META), b"\x1b[20;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(10), KeyModifiers::CTRL_META), b"\x1b[21;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(11), KeyModifiers::CTRL_META), b"\x1b[23;7~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(12), KeyModifiers::CTRL_META), b"\x1b[24;7~"),
    // xterm modifier parameter 8 (SHIFT_CTRL_META).
    KnownKeyEntry::new(Key::modified(SpecialKey::Up, KeyModifiers::SHIFT_CTRL_META), b"\x1b[1;8A"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Down, KeyModifiers::SHIFT_CTRL_META), b"\x1b[1;8B"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Right, KeyModifiers::SHIFT_CTRL_META), b"\x1b[1;8C"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Left, KeyModifiers::SHIFT_CTRL_META), b"\x1b[1;8D"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Home, KeyModifiers::SHIFT_CTRL_META), b"\x1b[1;8H"),
    KnownKeyEntry::new(Key::modified(SpecialKey::End, KeyModifiers::SHIFT_CTRL_META), b"\x1b[1;8F"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(1), KeyModifiers::SHIFT_CTRL_META), b"\x1b[1;8P"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(2), KeyModifiers::SHIFT_CTRL_META), b"\x1b[1;8Q"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(3), KeyModifiers::SHIFT_CTRL_META), b"\x1b[1;8R"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(4), KeyModifiers::SHIFT_CTRL_META), b"\x1b[1;8S"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Insert, KeyModifiers::SHIFT_CTRL_META), b"\x1b[2;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Delete, KeyModifiers::SHIFT_CTRL_META), b"\x1b[3;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageUp, KeyModifiers::SHIFT_CTRL_META), b"\x1b[5;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageDown, KeyModifiers::SHIFT_CTRL_META), b"\x1b[6;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(5), KeyModifiers::SHIFT_CTRL_META), b"\x1b[15;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(6), KeyModifiers::SHIFT_CTRL_META), b"\x1b[17;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(7), KeyModifiers::SHIFT_CTRL_META), b"\x1b[18;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(8), KeyModifiers::SHIFT_CTRL_META), b"\x1b[19;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(9), KeyModifiers::SHIFT_CTRL_META), b"\x1b[20;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(10), KeyModifiers::SHIFT_CTRL_META), b"\x1b[21;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(11), KeyModifiers::SHIFT_CTRL_META), b"\x1b[23;8~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(12), KeyModifiers::SHIFT_CTRL_META), b"\x1b[24;8~"),
    // Meta sent as an ESC prefix on an unmodified sequence.
    KnownKeyEntry::new(Key::modified(SpecialKey::Up, KeyModifiers::META), b"\x1b\x1b[A"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Down, KeyModifiers::META), b"\x1b\x1b[B"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Right, KeyModifiers::META), b"\x1b\x1b[C"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Left, KeyModifiers::META), b"\x1b\x1b[D"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Home, KeyModifiers::META), b"\x1b\x1b[H"),
    KnownKeyEntry::new(Key::modified(SpecialKey::End, KeyModifiers::META), b"\x1b\x1b[F"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(1), KeyModifiers::META), b"\x1b\x1bOP"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(2), KeyModifiers::META), b"\x1b\x1bOQ"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(3), KeyModifiers::META), b"\x1b\x1bOR"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(4), KeyModifiers::META), b"\x1b\x1bOS"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Insert, KeyModifiers::META), b"\x1b\x1b[2~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Delete, KeyModifiers::META), b"\x1b\x1b[3~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageUp, KeyModifiers::META), b"\x1b\x1b[5~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::PageDown, KeyModifiers::META), b"\x1b\x1b[6~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(5), KeyModifiers::META), b"\x1b\x1b[15~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(6), KeyModifiers::META), b"\x1b\x1b[17~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(7), KeyModifiers::META), b"\x1b\x1b[18~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(8), KeyModifiers::META), b"\x1b\x1b[19~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(9), KeyModifiers::META), b"\x1b\x1b[20~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(10), KeyModifiers::META), b"\x1b\x1b[21~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(11), KeyModifiers::META), b"\x1b\x1b[23~"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Function(12), KeyModifiers::META), b"\x1b\x1b[24~"),
    // Meta + character.
    KnownKeyEntry::new(Key::Meta(' '), b"\x1b "),
    KnownKeyEntry::new(Key::Meta('!'), b"\x1b!"),
    KnownKeyEntry::new(Key::Meta('"'), b"\x1b\""),
    KnownKeyEntry::new(Key::Meta('#'), b"\x1b#"),
    KnownKeyEntry::new(Key::Meta('$'), b"\x1b$"),
    KnownKeyEntry::new(Key::Meta('%'), b"\x1b%"),
    KnownKeyEntry::new(Key::Meta('&'), b"\x1b&"),
    KnownKeyEntry::new(Key::Meta('\''), b"\x1b'"),
    KnownKeyEntry::new(Key::Meta('('), b"\x1b("),
    KnownKeyEntry::new(Key::Meta(')'), b"\x1b)"),
    KnownKeyEntry::new(Key::Meta('*'), b"\x1b*"),
    KnownKeyEntry::new(Key::Meta('+'), b"\x1b+"),
    KnownKeyEntry::new(Key::Meta(','), b"\x1b,"),
    KnownKeyEntry::new(Key::Meta('-'), b"\x1b-"),
    KnownKeyEntry::new(Key::Meta('.'), b"\x1b."),
    KnownKeyEntry::new(Key::Meta('/'), b"\x1b/"),
    KnownKeyEntry::new(Key::Meta('0'), b"\x1b0"),
    KnownKeyEntry::new(Key::Meta('1'), b"\x1b1"),
    KnownKeyEntry::new(Key::Meta('2'), b"\x1b2"),
    KnownKeyEntry::new(Key::Meta('3'), b"\x1b3"),
    KnownKeyEntry::new(Key::Meta('4'), b"\x1b4"),
    KnownKeyEntry::new(Key::Meta('5'), b"\x1b5"),
    KnownKeyEntry::new(Key::Meta('6'), b"\x1b6"),
    KnownKeyEntry::new(Key::Meta('7'), b"\x1b7"),
    KnownKeyEntry::new(Key::Meta('8'), b"\x1b8"),
    KnownKeyEntry::new(Key::Meta('9'), b"\x1b9"),
    KnownKeyEntry::new(Key::Meta(':'), b"\x1b:"),
    KnownKeyEntry::new(Key::Meta(';'), b"\x1b;"),
    KnownKeyEntry::new(Key::Meta('<'), b"\x1b<"),
    KnownKeyEntry::new(Key::Meta('='), b"\x1b="),
    KnownKeyEntry::new(Key::Meta('>'), b"\x1b>"),
    KnownKeyEntry::new(Key::Meta('?'), b"\x1b?"),
    KnownKeyEntry::new(Key::Meta('@'), b"\x1b@"),
    KnownKeyEntry::new(Key::Meta('A'), b"\x1bA"),
    KnownKeyEntry::new(Key::Meta('B'), b"\x1bB"),
    KnownKeyEntry::new(Key::Meta('C'), b"\x1bC"),
    KnownKeyEntry::new(Key::Meta('D'), b"\x1bD"),
    KnownKeyEntry::new(Key::Meta('E'), b"\x1bE"),
    KnownKeyEntry::new(Key::Meta('F'), b"\x1bF"),
    KnownKeyEntry::new(Key::Meta('G'), b"\x1bG"),
    KnownKeyEntry::new(Key::Meta('H'), b"\x1bH"),
    KnownKeyEntry::new(Key::Meta('I'), b"\x1bI"),
    KnownKeyEntry::new(Key::Meta('J'), b"\x1bJ"),
    KnownKeyEntry::new(Key::Meta('K'), b"\x1bK"),
    KnownKeyEntry::new(Key::Meta('L'), b"\x1bL"),
    KnownKeyEntry::new(Key::Meta('M'), b"\x1bM"),
    KnownKeyEntry::new(Key::Meta('N'), b"\x1bN"),
    KnownKeyEntry::new(Key::Meta('O'), b"\x1bO"),
    KnownKeyEntry::new(Key::Meta('P'), b"\x1bP"),
    KnownKeyEntry::new(Key::Meta('Q'), b"\x1bQ"),
    KnownKeyEntry::new(Key::Meta('R'), b"\x1bR"),
    KnownKeyEntry::new(Key::Meta('S'), b"\x1bS"),
    KnownKeyEntry::new(Key::Meta('T'), b"\x1bT"),
    KnownKeyEntry::new(Key::Meta('U'), b"\x1bU"),
    KnownKeyEntry::new(Key::Meta('V'), b"\x1bV"),
    KnownKeyEntry::new(Key::Meta('W'), b"\x1bW"),
    KnownKeyEntry::new(Key::Meta('X'), b"\x1bX"),
    KnownKeyEntry::new(Key::Meta('Y'), b"\x1bY"),
    KnownKeyEntry::new(Key::Meta('Z'), b"\x1bZ"),
    KnownKeyEntry::new(Key::Meta('['), b"\x1b["),
    KnownKeyEntry::new(Key::Meta('\\'), b"\x1b\\"),
    KnownKeyEntry::new(Key::Meta(']'), b"\x1b]"),
    KnownKeyEntry::new(Key::Meta('^'), b"\x1b^"),
    KnownKeyEntry::new(Key::Meta('_'), b"\x1b_"),
    KnownKeyEntry::new(Key::Meta('`'), b"\x1b`"),
    KnownKeyEntry::new(Key::Meta('a'), b"\x1ba"),
    KnownKeyEntry::new(Key::Meta('b'), b"\x1bb"),
    KnownKeyEntry::new(Key::Meta('c'), b"\x1bc"),
    KnownKeyEntry::new(Key::Meta('d'), b"\x1bd"),
    KnownKeyEntry::new(Key::Meta('e'), b"\x1be"),
    KnownKeyEntry::new(Key::Meta('f'), b"\x1bf"),
    KnownKeyEntry::new(Key::Meta('g'), b"\x1bg"),
    KnownKeyEntry::new(Key::Meta('h'), b"\x1bh"),
    KnownKeyEntry::new(Key::Meta('i'), b"\x1bi"),
    KnownKeyEntry::new(Key::Meta('j'), b"\x1bj"),
    KnownKeyEntry::new(Key::Meta('k'), b"\x1bk"),
    KnownKeyEntry::new(Key::Meta('l'), b"\x1bl"),
    KnownKeyEntry::new(Key::Meta('m'), b"\x1bm"),
    KnownKeyEntry::new(Key::Meta('n'), b"\x1bn"),
    KnownKeyEntry::new(Key::Meta('o'), b"\x1bo"),
    KnownKeyEntry::new(Key::Meta('p'), b"\x1bp"),
    KnownKeyEntry::new(Key::Meta('q'), b"\x1bq"),
    KnownKeyEntry::new(Key::Meta('r'), b"\x1br"),
    KnownKeyEntry::new(Key::Meta('s'), b"\x1bs"),
    KnownKeyEntry::new(Key::Meta('t'), b"\x1bt"),
    KnownKeyEntry::new(Key::Meta('u'), b"\x1bu"),
    KnownKeyEntry::new(Key::Meta('v'), b"\x1bv"),
    KnownKeyEntry::new(Key::Meta('w'), b"\x1bw"),
    KnownKeyEntry::new(Key::Meta('x'), b"\x1bx"),
    KnownKeyEntry::new(Key::Meta('y'), b"\x1by"),
    KnownKeyEntry::new(Key::Meta('z'), b"\x1bz"),
    KnownKeyEntry::new(Key::Meta('{'), b"\x1b{"),
    KnownKeyEntry::new(Key::Meta('|'), b"\x1b|"),
    KnownKeyEntry::new(Key::Meta('}'), b"\x1b}"),
    KnownKeyEntry::new(Key::Meta('~'), b"\x1b~"),
    KnownKeyEntry::new(Key::Meta('\t'), b"\x1b\t"),
    KnownKeyEntry::new(Key::Meta('\r'), b"\x1b\r"),
    KnownKeyEntry::new(Key::modified(SpecialKey::Backspace, KeyModifiers::META), b"\x1b\x7f"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use test_case::test_case;

    fn buffer_of(bytes: &[u8]) -> ByteRingBuffer<16> {
        let mut buffer = ByteRingBuffer::new();
        for byte in bytes {
            buffer.push(*byte);
        }
        buffer
    }

    #[test]
    fn test_byte_strings_are_unique_and_bounded() {
        let mut seen = HashSet::new();
        for entry in KNOWN_KEYS {
            assert!(seen.insert(entry.bytes), "duplicate sequence {:?}", entry.bytes);
            assert!((2..=MAX_KNOWN_KEY_LEN).contains(&entry.len()));
            assert_eq!(entry.bytes[0], 0x1b);
        }
    }

    #[test]
    fn test_table_is_sorted_by_length() {
        let table = KnownKeyTable::new();
        assert_eq!(table.len(), KNOWN_KEYS.len());
        let lens: Vec<usize> = table.iter().map(KnownKeyEntry::len).collect();
        assert!(lens.is_sorted());
        let total: usize = (0..=MAX_KNOWN_KEY_LEN)
            .map(|len| table.entries_of_len(len).len())
            .sum();
        assert_eq!(total, table.len());
        assert!(table.entries_of_len(0).is_empty());
        assert!(table.entries_of_len(MAX_KNOWN_KEY_LEN + 1).is_empty());
    }

    #[test_case(b"\x1b[A", Key::special(SpecialKey::Up) ; "up")]
    #[test_case(b"\x1bOP", Key::function(1) ; "f1_ss3")]
    #[test_case(b"\x1b[24~", Key::function(12) ; "f12")]
    #[test_case(b"\x1b[1;5C", Key::modified(SpecialKey::Right, KeyModifiers::CTRL) ; "ctrl_right")]
    #[test_case(b"\x1b[3;2~", Key::modified(SpecialKey::Delete, KeyModifiers::SHIFT) ; "shift_delete")]
    #[test_case(b"\x1b[24;8~", Key::modified(SpecialKey::Function(12), KeyModifiers::SHIFT_CTRL_META) ; "f12_all_modifiers")]
    #[test_case(b"\x1b\x1b[B", Key::modified(SpecialKey::Down, KeyModifiers::META) ; "meta_down_esc_prefix")]
    #[test_case(b"\x1b[[E", Key::function(5) ; "f5_linux_console")]
    #[test_case(b"\x1bx", Key::Meta('x') ; "meta_x")]
    #[test_case(b"\x1b\x7f", Key::modified(SpecialKey::Backspace, KeyModifiers::META) ; "meta_backspace")]
    fn test_find_exact_match(bytes: &[u8], expected: Key) {
        let table = KnownKeyTable::new();
        let entry = table.find(&buffer_of(bytes)).map(|it| it.key);
        assert_eq!(entry, Some(expected));
    }

    #[test]
    fn test_find_requires_whole_buffer() {
        let table = KnownKeyTable::new();
        // A prefix of `ESC [ 1 ; 5 A` is not a key.
        assert_eq!(table.find(&buffer_of(b"\x1b[1;5")), None);
        // A known key followed by extra bytes is not an exact match.
        assert_eq!(table.find(&buffer_of(b"\x1b[Ax")), None);
        assert_eq!(table.find(&buffer_of(b"")), None);
    }
}
