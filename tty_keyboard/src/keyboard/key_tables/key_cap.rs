// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal capability key strings.
//!
//! Terminal capability parsing happens elsewhere. This module only holds the result: a
//! list of `(key, byte string)` pairs that the classifier checks before the generic
//! [`KnownKeyTable`]. The table may be empty, in which case the decoder relies on the
//! generic table plus raw UTF-8 / ASCII decoding.
//!
//! [`KnownKeyTable`]: crate::KnownKeyTable

use crate::{ByteRingBuffer, Key, KeyModifiers, SpecialKey};
use smallstr::SmallString;
use smallvec::SmallVec;

/// Termcap capability name, e.g. `ku` or `@7`.
pub type CapName = SmallString<[u8; 4]>;

/// Byte string of a capability entry. Most fit inline.
pub type CapBytes = SmallVec<[u8; 16]>;

/// One terminal capability key mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCapEntry {
    pub key: Key,
    pub bytes: CapBytes,
    pub tname: Option<CapName>,
}

impl KeyCapEntry {
    pub fn new(key: Key, bytes: impl AsRef<[u8]>) -> Self {
        Self {
            key,
            bytes: CapBytes::from_slice(bytes.as_ref()),
            tname: None,
        }
    }

    #[must_use]
    pub fn with_tname(mut self, tname: &str) -> Self {
        self.tname = Some(CapName::from_str(tname));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize { self.bytes.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }
}

/// Capability key strings, matched against the whole buffer by exact length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCapTable {
    entries: Vec<KeyCapEntry>,
}

impl KeyCapTable {
    /// An empty table. Valid: the decoder falls back to the generic sequences.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Empty byte strings are dropped since they can never match.
    pub fn from_entries(entries: impl IntoIterator<Item = KeyCapEntry>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.push(entry);
        }
        table
    }

    /// Build from `(termcap name, byte string)` pairs, as read from a terminal
    /// capability database. Names that don't describe a key are ignored.
    ///
    /// ```
    /// use tty_keyboard::{Key, KeyCapTable, SpecialKey};
    ///
    /// let table = KeyCapTable::from_capabilities([
    ///     ("ku", b"\x1bOA".as_slice()),
    ///     ("k1", b"\x1bOP".as_slice()),
    ///     ("cm", b"\x1b[%i%p1%d;%p2%dH".as_slice()),
    /// ]);
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.iter().next().map(|it| it.key), Some(Key::special(SpecialKey::Up)));
    /// ```
    pub fn from_capabilities<'a>(
        capabilities: impl IntoIterator<Item = (&'a str, &'a [u8])>,
    ) -> Self {
        Self::from_entries(capabilities.into_iter().filter_map(|(name, bytes)| {
            key_for_cap_name(name).map(|key| KeyCapEntry::new(key, bytes).with_tname(name))
        }))
    }

    pub fn push(&mut self, entry: KeyCapEntry) {
        if !entry.is_empty() {
            self.entries.push(entry);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &KeyCapEntry> { self.entries.iter() }

    /// The first entry whose byte string equals the entire buffer. Never consumes.
    #[must_use]
    pub fn find<const N: usize>(&self, buffer: &ByteRingBuffer<N>) -> Option<&KeyCapEntry> {
        let len = buffer.len();
        self.entries
            .iter()
            .filter(|it| it.len() == len)
            .find(|it| buffer.prefix_equals(&it.bytes))
    }
}

/// The key a termcap key capability describes, e.g. `ku` → Up, `F3` → F13.
#[must_use]
pub fn key_for_cap_name(name: &str) -> Option<Key> {
    if let Some((_, key)) = CAP_NAME_KEYS.iter().find(|(cap, _)| *cap == name) {
        return Some(*key);
    }
    function_key_number(name).map(Key::function)
}

/// `k0`..`k9` and `k;` are F0..F10; `F1`..`F9`, `FA`..`FZ`, `Fa`..`Fr` continue at F11
/// through F63.
fn function_key_number(name: &str) -> Option<u8> {
    let &[prefix, suffix] = name.as_bytes() else {
        return None;
    };
    match (prefix, suffix) {
        (b'k', b'0'..=b'9') => Some(suffix - b'0'),
        (b'k', b';') => Some(10),
        (b'F', b'1'..=b'9') => Some(suffix - b'1' + 11),
        (b'F', b'A'..=b'Z') => Some(suffix - b'A' + 20),
        (b'F', b'a'..=b'r') => Some(suffix - b'a' + 46),
        _ => None,
    }
}

const fn plain(code: SpecialKey) -> Key { Key::special(code) }

const fn shifted(code: SpecialKey) -> Key { Key::modified(code, KeyModifiers::SHIFT) }

/// Termcap names of non-function keys.
const CAP_NAME_KEYS: &[(&str, Key)] = &[
    ("kb", plain(SpecialKey::Backspace)),
    ("ka", plain(SpecialKey::ClearAllTabs)),
    ("kC", plain(SpecialKey::Clear)),
    ("kt", plain(SpecialKey::ClearTab)),
    ("kD", plain(SpecialKey::Delete)),
    ("kL", plain(SpecialKey::DeleteLine)),
    ("kd", plain(SpecialKey::Down)),
    ("kM", plain(SpecialKey::ExitInsert)),
    ("kE", plain(SpecialKey::ClearEol)),
    ("kS", plain(SpecialKey::ClearEos)),
    ("kh", plain(SpecialKey::Home)),
    ("kI", plain(SpecialKey::Insert)),
    ("kA", plain(SpecialKey::InsertLine)),
    ("kl", plain(SpecialKey::Left)),
    ("kH", plain(SpecialKey::HomeDown)),
    ("kN", plain(SpecialKey::PageDown)),
    ("kP", plain(SpecialKey::PageUp)),
    ("kr", plain(SpecialKey::Right)),
    ("kF", plain(SpecialKey::ScrollForward)),
    ("kR", plain(SpecialKey::ScrollBackward)),
    ("kT", plain(SpecialKey::SetTab)),
    ("ku", plain(SpecialKey::Up)),
    ("K1", plain(SpecialKey::UpperLeft)),
    ("K2", plain(SpecialKey::Center)),
    ("K3", plain(SpecialKey::UpperRight)),
    ("K4", plain(SpecialKey::LowerLeft)),
    ("K5", plain(SpecialKey::LowerRight)),
    ("kB", plain(SpecialKey::BackTab)),
    ("@1", plain(SpecialKey::Begin)),
    ("@2", plain(SpecialKey::Cancel)),
    ("@3", plain(SpecialKey::Close)),
    ("@4", plain(SpecialKey::Command)),
    ("@5", plain(SpecialKey::Copy)),
    ("@6", plain(SpecialKey::Create)),
    ("@7", plain(SpecialKey::End)),
    ("@8", plain(SpecialKey::KeypadEnter)),
    ("@9", plain(SpecialKey::Exit)),
    ("@0", plain(SpecialKey::Find)),
    ("%1", plain(SpecialKey::Help)),
    ("%2", plain(SpecialKey::Mark)),
    ("%3", plain(SpecialKey::Message)),
    ("%4", plain(SpecialKey::Move)),
    ("%5", plain(SpecialKey::Next)),
    ("%6", plain(SpecialKey::Open)),
    ("%7", plain(SpecialKey::Options)),
    ("%8", plain(SpecialKey::Previous)),
    ("%9", plain(SpecialKey::Print)),
    ("%0", plain(SpecialKey::Redo)),
    ("&1", plain(SpecialKey::Reference)),
    ("&2", plain(SpecialKey::Refresh)),
    ("&3", plain(SpecialKey::Replace)),
    ("&4", plain(SpecialKey::Restart)),
    ("&5", plain(SpecialKey::Resume)),
    ("&6", plain(SpecialKey::Save)),
    ("&7", plain(SpecialKey::Suspend)),
    ("&8", plain(SpecialKey::Undo)),
    ("*6", plain(SpecialKey::Select)),
    ("&9", shifted(SpecialKey::Begin)),
    ("&0", shifted(SpecialKey::Cancel)),
    ("*1", shifted(SpecialKey::Command)),
    ("*2", shifted(SpecialKey::Copy)),
    ("*3", shifted(SpecialKey::Create)),
    ("*4", shifted(SpecialKey::Delete)),
    ("*5", shifted(SpecialKey::DeleteLine)),
    ("*7", shifted(SpecialKey::End)),
    ("*8", shifted(SpecialKey::ClearEol)),
    ("*9", shifted(SpecialKey::Exit)),
    ("*0", shifted(SpecialKey::Find)),
    ("#1", shifted(SpecialKey::Help)),
    ("#2", shifted(SpecialKey::Home)),
    ("#3", shifted(SpecialKey::Insert)),
    ("#4", shifted(SpecialKey::Left)),
    ("%a", shifted(SpecialKey::Message)),
    ("%b", shifted(SpecialKey::Move)),
    ("%c", shifted(SpecialKey::Next)),
    ("%d", shifted(SpecialKey::Options)),
    ("%e", shifted(SpecialKey::Previous)),
    ("%f", shifted(SpecialKey::Print)),
    ("%g", shifted(SpecialKey::Redo)),
    ("%h", shifted(SpecialKey::Replace)),
    ("%i", shifted(SpecialKey::Right)),
    ("%j", shifted(SpecialKey::Resume)),
    ("!1", shifted(SpecialKey::Save)),
    ("!2", shifted(SpecialKey::Suspend)),
    ("!3", shifted(SpecialKey::Undo)),
];
