// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key identifiers produced by the decoder.
//!
//! A decoded keypress is one of three shapes:
//!
//! | Shape                           | Example bytes      | [`Key`]                                     |
//! |:--------------------------------|:-------------------|:--------------------------------------------|
//! | A literal character             | `a`, `0xC3 0xA9`   | `Key::Char('a')`, `Key::Char('é')`          |
//! | A control character             | `0x01`, `0x0D`     | `Key::Char('\u{1}')` (Ctrl+A), `Key::Char('\r')` (Enter) |
//! | `ESC` followed by a character   | `ESC a`, `ESC O`   | `Key::Meta('a')`, `Key::Meta('O')`          |
//! | A function / navigation key     | `ESC [ 1 ; 5 A`    | `Key::Special { code: Up, modifiers: CTRL }` |
//!
//! Mouse reports are not keys; they are reported separately as a [`MouseProtocol`] so
//! the mouse-tracking sink can consume the payload from the buffer.

use std::fmt;
use strum_macros::{AsRefStr, Display};

/// Modifier keys encoded in an escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub const NONE: Self = Self::new(false, false, false);
    pub const SHIFT: Self = Self::new(true, false, false);
    pub const META: Self = Self::new(false, false, true);
    pub const SHIFT_META: Self = Self::new(true, false, true);
    pub const CTRL: Self = Self::new(false, true, false);
    pub const SHIFT_CTRL: Self = Self::new(true, true, false);
    pub const CTRL_META: Self = Self::new(false, true, true);
    pub const SHIFT_CTRL_META: Self = Self::new(true, true, true);

    #[must_use]
    pub const fn new(shift: bool, ctrl: bool, meta: bool) -> Self { Self { shift, ctrl, meta } }

    #[must_use]
    pub const fn is_empty(self) -> bool { !self.shift && !self.ctrl && !self.meta }

    /// Decode the xterm modifier parameter, the `m` in `CSI 1 ; m A`.
    ///
    /// `m - 1` is a bit set: `1` = Shift, `2` = Alt (Meta), `4` = Ctrl. Values outside
    /// `2..=8` carry no modifier information and return `None`.
    #[must_use]
    pub const fn from_xterm_param(param: u8) -> Option<Self> {
        if param < 2 || param > 8 {
            return None;
        }
        let bits = param - 1;
        Some(Self::new(bits & 1 != 0, bits & 4 != 0, bits & 2 != 0))
    }

    /// Inverse of [`Self::from_xterm_param`]. Returns `1` for no modifiers.
    #[must_use]
    pub const fn xterm_param(self) -> u8 {
        1 + (self.shift as u8) + ((self.meta as u8) << 1) + ((self.ctrl as u8) << 2)
    }

    /// Union of two modifier sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::new(
            self.shift || other.shift,
            self.ctrl || other.ctrl,
            self.meta || other.meta,
        )
    }
}

/// Function, navigation, and editing keys that have no character of their own.
///
/// The [`Display`](fmt::Display) labels are the human-readable names used by
/// [`key_name()`].
///
/// [`key_name()`]: crate::key_name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum SpecialKey {
    Backspace,
    /// Only reported with modifiers (`Ctrl+Space` arrives as a NUL byte).
    Space,
    #[strum(to_string = "Back-Tab")]
    BackTab,
    Insert,
    #[strum(to_string = "Del-Char")]
    Delete,
    Home,
    End,
    #[strum(to_string = "Page-Up")]
    PageUp,
    #[strum(to_string = "Page-Down")]
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function keys `F0` through `F63`.
    Function(u8),
    Begin,
    Cancel,
    Clear,
    #[strum(to_string = "Clear-All-Tabs")]
    ClearAllTabs,
    #[strum(to_string = "Clear-Tab")]
    ClearTab,
    #[strum(to_string = "Clear-EOL")]
    ClearEol,
    #[strum(to_string = "Clear-EOS")]
    ClearEos,
    Close,
    Command,
    Copy,
    Create,
    #[strum(to_string = "Del-Line")]
    DeleteLine,
    #[strum(to_string = "Keypad-Enter")]
    KeypadEnter,
    Exit,
    #[strum(to_string = "Exit-Insert")]
    ExitInsert,
    Find,
    Help,
    #[strum(to_string = "Home-Down")]
    HomeDown,
    #[strum(to_string = "Insert-Line")]
    InsertLine,
    Mark,
    Message,
    Move,
    Next,
    Open,
    Options,
    Previous,
    Print,
    Redo,
    Reference,
    Refresh,
    Replace,
    Restart,
    Resume,
    Save,
    #[strum(to_string = "Scroll-Forward")]
    ScrollForward,
    #[strum(to_string = "Scroll-Backward")]
    ScrollBackward,
    Select,
    #[strum(to_string = "Set-Tab")]
    SetTab,
    Suspend,
    Undo,
    #[strum(to_string = "Upper-Left")]
    UpperLeft,
    #[strum(to_string = "Upper-Right")]
    UpperRight,
    Center,
    #[strum(to_string = "Lower-Left")]
    LowerLeft,
    #[strum(to_string = "Lower-Right")]
    LowerRight,
}

impl fmt::Display for SpecialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(number) => write!(f, "F{number}"),
            other => f.pad(other.as_ref()),
        }
    }
}

/// A decoded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A literal code point, including control characters (`Ctrl+A` is `'\u{1}'`).
    Char(char),
    /// `ESC` immediately followed by this character (Meta / Alt + character).
    Meta(char),
    /// A key without a character, with the modifiers its sequence encodes.
    Special {
        code: SpecialKey,
        modifiers: KeyModifiers,
    },
}

impl Key {
    pub const TAB: Self = Self::Char('\t');
    pub const ENTER: Self = Self::Char('\r');
    pub const ESCAPE: Self = Self::Char('\u{1b}');
    pub const BACKSPACE: Self = Self::special(SpecialKey::Backspace);
    pub const CTRL_SPACE: Self = Self::modified(SpecialKey::Space, KeyModifiers::CTRL);

    #[must_use]
    pub const fn special(code: SpecialKey) -> Self {
        Self::Special {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[must_use]
    pub const fn modified(code: SpecialKey, modifiers: KeyModifiers) -> Self {
        Self::Special { code, modifiers }
    }

    #[must_use]
    pub const fn function(number: u8) -> Self { Self::special(SpecialKey::Function(number)) }

    /// The literal character, for [`Key::Char`] only.
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Char(ch) => Some(ch),
            Self::Meta(_) | Self::Special { .. } => None,
        }
    }

    /// The modifiers carried by this key. [`Key::Meta`] reports `META`.
    #[must_use]
    pub const fn modifiers(self) -> KeyModifiers {
        match self {
            Self::Char(_) => KeyModifiers::NONE,
            Self::Meta(_) => KeyModifiers::META,
            Self::Special { modifiers, .. } => modifiers,
        }
    }
}

impl From<char> for Key {
    fn from(ch: char) -> Self { Self::Char(ch) }
}

/// Press or release, as reported by the SGR mouse protocol's final byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SgrButtonState {
    /// Final byte `M`.
    Pressed,
    /// Final byte `m`.
    Released,
}

/// Which mouse-tracking protocol a buffered report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MouseProtocol {
    /// `ESC [ M Cb Cx Cy` (basic X11 encoding, 6 bytes).
    #[strum(to_string = "X11-Mouse")]
    X11,
    /// `ESC [ < Cb ; Cx ; Cy M|m` (SGR extended encoding).
    #[strum(to_string = "Extended-Mouse")]
    Sgr(SgrButtonState),
    /// `ESC [ Cb ; Cx ; Cy M` (urxvt encoding).
    #[strum(to_string = "Urxvt-Mouse")]
    Urxvt,
}
