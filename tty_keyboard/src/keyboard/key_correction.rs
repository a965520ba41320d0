// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Post-decode remapping for terminals that drop modifier information.
//!
//! The Linux virtual console sends the same bytes for Up and Shift+Up. An application
//! that can read the live modifier state some other way (e.g. the `TIOCLINUX`
//! shift-state ioctl) plugs that in through [`LinuxConsoleKeyCorrection`]. Everywhere
//! else the decoder uses [`IdentityKeyCorrection`].

use crate::{Key, KeyModifiers, SpecialKey};
use std::fmt::{self, Debug};

/// Applied to every decoded key before it is queued.
pub trait KeyCorrection: Debug {
    fn correct(&self, key: Key) -> Key;
}

/// Leaves every key unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityKeyCorrection;

impl KeyCorrection for IdentityKeyCorrection {
    fn correct(&self, key: Key) -> Key { key }
}

/// Keys whose modified forms the Linux console can't encode.
pub const CONSOLE_MODIFIABLE_KEYS: [SpecialKey; 10] = [
    SpecialKey::Up,
    SpecialKey::Down,
    SpecialKey::Left,
    SpecialKey::Right,
    SpecialKey::Insert,
    SpecialKey::Delete,
    SpecialKey::Home,
    SpecialKey::End,
    SpecialKey::PageUp,
    SpecialKey::PageDown,
];

/// Adds live Shift / Ctrl / Alt state to cursor and editing keys, and turns Shift+Tab
/// into Back-Tab.
pub struct LinuxConsoleKeyCorrection<F> {
    modifier_state: F,
}

impl<F> LinuxConsoleKeyCorrection<F>
where
    F: Fn() -> KeyModifiers,
{
    /// `modifier_state` is queried once per decoded key.
    pub fn new(modifier_state: F) -> Self { Self { modifier_state } }
}

impl<F> Debug for LinuxConsoleKeyCorrection<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinuxConsoleKeyCorrection").finish_non_exhaustive()
    }
}

impl<F> KeyCorrection for LinuxConsoleKeyCorrection<F>
where
    F: Fn() -> KeyModifiers,
{
    fn correct(&self, key: Key) -> Key {
        match key {
            Key::Special { code, modifiers } if CONSOLE_MODIFIABLE_KEYS.contains(&code) => {
                let live = (self.modifier_state)();
                Key::modified(code, modifiers.union(live))
            }
            Key::TAB if (self.modifier_state)().shift => Key::special(SpecialKey::BackTab),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[test]
    fn test_identity() {
        let key = Key::special(SpecialKey::Up);
        assert_eq!(IdentityKeyCorrection.correct(key), key);
    }

    #[test]
    fn test_linux_console_adds_live_modifiers() {
        let live = Cell::new(KeyModifiers::NONE);
        let correction = LinuxConsoleKeyCorrection::new(|| live.get());

        let up = Key::special(SpecialKey::Up);
        assert_eq!(correction.correct(up), up);

        live.set(KeyModifiers::SHIFT_CTRL);
        assert_eq!(
            correction.correct(up),
            Key::modified(SpecialKey::Up, KeyModifiers::SHIFT_CTRL)
        );
        assert_eq!(correction.correct(Key::TAB), Key::special(SpecialKey::BackTab));
        assert_eq!(correction.correct(Key::Char('a')), Key::Char('a'));
        assert_eq!(correction.correct(Key::function(1)), Key::function(1));
    }
}
