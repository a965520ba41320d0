// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Human-readable key labels, for diagnostics and UI hints. Not used for decoding.

use crate::{Key, KeyModifiers};
use smallstr::SmallString;

/// A key label such as `Ctrl+A`, `Shift+Ctrl+Page-Down`, or `Meta+x`.
pub type KeyName = SmallString<[u8; 32]>;

/// Labels for character-valued keys that don't print as themselves.
pub const CHAR_KEY_NAMES: &[(char, &str)] = &[
    ('\u{01}', "Ctrl+A"),
    ('\u{02}', "Ctrl+B"),
    ('\u{03}', "Ctrl+C"),
    ('\u{04}', "Ctrl+D"),
    ('\u{05}', "Ctrl+E"),
    ('\u{06}', "Ctrl+F"),
    ('\u{07}', "Ctrl+G"),
    ('\u{08}', "Ctrl+H"),
    ('\t', "Tab"),
    ('\n', "Ctrl+J"),
    ('\u{0b}', "Ctrl+K"),
    ('\u{0c}', "Ctrl+L"),
    ('\r', "Enter"),
    ('\u{0e}', "Ctrl+N"),
    ('\u{0f}', "Ctrl+O"),
    ('\u{10}', "Ctrl+P"),
    ('\u{11}', "Ctrl+Q"),
    ('\u{12}', "Ctrl+R"),
    ('\u{13}', "Ctrl+S"),
    ('\u{14}', "Ctrl+T"),
    ('\u{15}', "Ctrl+U"),
    ('\u{16}', "Ctrl+V"),
    ('\u{17}', "Ctrl+W"),
    ('\u{18}', "Ctrl+X"),
    ('\u{19}', "Ctrl+Y"),
    ('\u{1a}', "Ctrl+Z"),
    ('\u{1b}', "Escape"),
    ('\u{1c}', "Ctrl+\\"),
    ('\u{1d}', "Ctrl+]"),
    ('\u{1e}', "Ctrl+^"),
    ('\u{1f}', "Ctrl+_"),
    (' ', "Space"),
];

/// The label for `key`.
///
/// Character keys without a table entry fall back to the literal character for
/// printable ASCII (`!` through `~`); anything else has no name and yields an empty
/// string.
///
/// ```
/// use tty_keyboard::{key_name, Key, KeyModifiers, SpecialKey};
///
/// assert_eq!(key_name(Key::Char('\u{1}')).as_str(), "Ctrl+A");
/// assert_eq!(key_name(Key::Char('q')).as_str(), "q");
/// assert_eq!(key_name(Key::Meta('q')).as_str(), "Meta+q");
/// assert_eq!(
///     key_name(Key::modified(SpecialKey::PageDown, KeyModifiers::SHIFT_CTRL)).as_str(),
///     "Shift+Ctrl+Page-Down"
/// );
/// assert_eq!(key_name(Key::Char('é')).as_str(), "");
/// ```
#[must_use]
pub fn key_name(key: Key) -> KeyName {
    let mut acc = KeyName::new();
    match key {
        Key::Char(ch) => push_char_name(&mut acc, ch),
        Key::Meta(ch) => {
            let mut inner = KeyName::new();
            push_char_name(&mut inner, ch);
            if !inner.is_empty() {
                acc.push_str("Meta+");
                acc.push_str(&inner);
            }
        }
        Key::Special { code, modifiers } => {
            push_modifier_prefix(&mut acc, modifiers);
            acc.push_str(&code.to_string());
        }
    }
    acc
}

fn push_char_name(acc: &mut KeyName, ch: char) {
    if let Some((_, name)) = CHAR_KEY_NAMES.iter().find(|(it, _)| *it == ch) {
        acc.push_str(name);
    } else if ('!'..='~').contains(&ch) {
        acc.push(ch);
    }
}

fn push_modifier_prefix(acc: &mut KeyName, modifiers: KeyModifiers) {
    if modifiers.shift {
        acc.push_str("Shift+");
    }
    if modifiers.ctrl {
        acc.push_str("Ctrl+");
    }
    if modifiers.meta {
        acc.push_str("Meta+");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpecialKey;
    use test_case::test_case;

    #[test_case(Key::Char('\t'), "Tab" ; "tab")]
    #[test_case(Key::ENTER, "Enter" ; "enter")]
    #[test_case(Key::ESCAPE, "Escape" ; "escape")]
    #[test_case(Key::Char(' '), "Space" ; "space")]
    #[test_case(Key::Char('\u{1a}'), "Ctrl+Z" ; "ctrl_z")]
    #[test_case(Key::Char('!'), "!" ; "bang")]
    #[test_case(Key::Char('~'), "~" ; "tilde")]
    #[test_case(Key::Char('\u{7f}'), "" ; "del_has_no_name")]
    #[test_case(Key::Char('\u{0}'), "" ; "nul_has_no_name")]
    #[test_case(Key::Char('ß'), "" ; "non_ascii_has_no_name")]
    #[test_case(Key::Meta('['), "Meta+[" ; "meta_bracket")]
    #[test_case(Key::Meta('\t'), "Meta+Tab" ; "meta_tab")]
    #[test_case(Key::Meta('\u{80}'), "" ; "meta_non_ascii")]
    #[test_case(Key::BACKSPACE, "Backspace" ; "backspace")]
    #[test_case(Key::CTRL_SPACE, "Ctrl+Space" ; "ctrl_space")]
    #[test_case(Key::function(11), "F11" ; "f11")]
    #[test_case(Key::modified(SpecialKey::Up, KeyModifiers::SHIFT_CTRL_META), "Shift+Ctrl+Meta+Up" ; "all_modifiers")]
    #[test_case(Key::modified(SpecialKey::Delete, KeyModifiers::META), "Meta+Del-Char" ; "meta_delete")]
    fn test_key_name(key: Key, expected: &str) {
        assert_eq!(key_name(key).as_str(), expected);
    }

    #[test]
    fn test_every_printable_ascii_has_a_name() {
        for byte in 33_u8..=126 {
            let ch = char::from(byte);
            assert_eq!(key_name(Key::Char(ch)).as_str(), ch.to_string());
        }
    }
}
