//! Key codes
//!
//! Keys are identified by integers in the classic desktop key-symbol
//! numbering: printable keys use their lowercase ASCII value and the
//! remaining keys sit in the 256..323 block. Scripting hosts pass these
//! integers straight through, so the numbering is part of the public API.

use crate::app::error::SessionError;

/// Platform-neutral key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(u16);

impl KeyCode {
    /// Exclusive upper bound of the key-code space
    pub const LIMIT: u16 = 323;

    pub const BACKSPACE: Self = Self(8);
    pub const TAB: Self = Self(9);
    pub const ENTER: Self = Self(13);
    pub const PAUSE: Self = Self(19);
    pub const ESCAPE: Self = Self(27);
    pub const SPACE: Self = Self(32);
    pub const QUOTE: Self = Self(39);
    pub const COMMA: Self = Self(44);
    pub const MINUS: Self = Self(45);
    pub const PERIOD: Self = Self(46);
    pub const SLASH: Self = Self(47);
    pub const NUM_0: Self = Self(48);
    pub const SEMICOLON: Self = Self(59);
    pub const EQUALS: Self = Self(61);
    pub const LEFT_BRACKET: Self = Self(91);
    pub const BACKSLASH: Self = Self(92);
    pub const RIGHT_BRACKET: Self = Self(93);
    pub const BACKQUOTE: Self = Self(96);
    pub const A: Self = Self(97);
    pub const DELETE: Self = Self(127);

    pub const KEYPAD_0: Self = Self(256);
    pub const KEYPAD_PERIOD: Self = Self(266);
    pub const KEYPAD_DIVIDE: Self = Self(267);
    pub const KEYPAD_MULTIPLY: Self = Self(268);
    pub const KEYPAD_MINUS: Self = Self(269);
    pub const KEYPAD_PLUS: Self = Self(270);
    pub const KEYPAD_ENTER: Self = Self(271);
    pub const KEYPAD_EQUALS: Self = Self(272);

    pub const UP: Self = Self(273);
    pub const DOWN: Self = Self(274);
    pub const RIGHT: Self = Self(275);
    pub const LEFT: Self = Self(276);
    pub const INSERT: Self = Self(277);
    pub const HOME: Self = Self(278);
    pub const END: Self = Self(279);
    pub const PAGE_UP: Self = Self(280);
    pub const PAGE_DOWN: Self = Self(281);
    pub const F1: Self = Self(282);

    pub const NUM_LOCK: Self = Self(300);
    pub const CAPS_LOCK: Self = Self(301);
    pub const SCROLL_LOCK: Self = Self(302);
    pub const RIGHT_SHIFT: Self = Self(303);
    pub const LEFT_SHIFT: Self = Self(304);
    pub const RIGHT_CTRL: Self = Self(305);
    pub const LEFT_CTRL: Self = Self(306);
    pub const RIGHT_ALT: Self = Self(307);
    pub const LEFT_ALT: Self = Self(308);
    pub const LEFT_SUPER: Self = Self(311);
    pub const RIGHT_SUPER: Self = Self(312);
    pub const HELP: Self = Self(315);
    pub const PRINT: Self = Self(316);
    pub const MENU: Self = Self(319);
    pub const POWER: Self = Self(320);
    pub const UNDO: Self = Self(322);

    /// Returns the raw integer value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Letter key for `'a'..='z'` (either case)
    pub fn letter(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        c.is_ascii_lowercase().then(|| Self(c as u16))
    }

    /// Top-row digit key for `0..=9`
    pub fn digit(n: u8) -> Option<Self> {
        (n <= 9).then(|| Self(Self::NUM_0.0 + n as u16))
    }

    /// Keypad digit key for `0..=9`
    pub fn keypad_digit(n: u8) -> Option<Self> {
        (n <= 9).then(|| Self(Self::KEYPAD_0.0 + n as u16))
    }

    /// Function key for `1..=15`
    pub fn function(n: u8) -> Option<Self> {
        (1..=15)
            .contains(&n)
            .then(|| Self(Self::F1.0 + (n - 1) as u16))
    }

    /// Maps a winit physical key onto the key-code space.
    ///
    /// Keys with no counterpart in the numbering return `None`.
    pub fn from_winit(key: winit::keyboard::KeyCode) -> Option<Self> {
        use winit::keyboard::KeyCode as WK;

        let code = match key {
            WK::Backspace => Self::BACKSPACE,
            WK::Tab => Self::TAB,
            WK::Enter => Self::ENTER,
            WK::Pause => Self::PAUSE,
            WK::Escape => Self::ESCAPE,
            WK::Space => Self::SPACE,
            WK::Quote => Self::QUOTE,
            WK::Comma => Self::COMMA,
            WK::Minus => Self::MINUS,
            WK::Period => Self::PERIOD,
            WK::Slash => Self::SLASH,
            WK::Semicolon => Self::SEMICOLON,
            WK::Equal => Self::EQUALS,
            WK::BracketLeft => Self::LEFT_BRACKET,
            WK::Backslash => Self::BACKSLASH,
            WK::BracketRight => Self::RIGHT_BRACKET,
            WK::Backquote => Self::BACKQUOTE,
            WK::Delete => Self::DELETE,

            WK::Digit0 => return Self::digit(0),
            WK::Digit1 => return Self::digit(1),
            WK::Digit2 => return Self::digit(2),
            WK::Digit3 => return Self::digit(3),
            WK::Digit4 => return Self::digit(4),
            WK::Digit5 => return Self::digit(5),
            WK::Digit6 => return Self::digit(6),
            WK::Digit7 => return Self::digit(7),
            WK::Digit8 => return Self::digit(8),
            WK::Digit9 => return Self::digit(9),

            WK::KeyA => return Self::letter('a'),
            WK::KeyB => return Self::letter('b'),
            WK::KeyC => return Self::letter('c'),
            WK::KeyD => return Self::letter('d'),
            WK::KeyE => return Self::letter('e'),
            WK::KeyF => return Self::letter('f'),
            WK::KeyG => return Self::letter('g'),
            WK::KeyH => return Self::letter('h'),
            WK::KeyI => return Self::letter('i'),
            WK::KeyJ => return Self::letter('j'),
            WK::KeyK => return Self::letter('k'),
            WK::KeyL => return Self::letter('l'),
            WK::KeyM => return Self::letter('m'),
            WK::KeyN => return Self::letter('n'),
            WK::KeyO => return Self::letter('o'),
            WK::KeyP => return Self::letter('p'),
            WK::KeyQ => return Self::letter('q'),
            WK::KeyR => return Self::letter('r'),
            WK::KeyS => return Self::letter('s'),
            WK::KeyT => return Self::letter('t'),
            WK::KeyU => return Self::letter('u'),
            WK::KeyV => return Self::letter('v'),
            WK::KeyW => return Self::letter('w'),
            WK::KeyX => return Self::letter('x'),
            WK::KeyY => return Self::letter('y'),
            WK::KeyZ => return Self::letter('z'),

            WK::Numpad0 => return Self::keypad_digit(0),
            WK::Numpad1 => return Self::keypad_digit(1),
            WK::Numpad2 => return Self::keypad_digit(2),
            WK::Numpad3 => return Self::keypad_digit(3),
            WK::Numpad4 => return Self::keypad_digit(4),
            WK::Numpad5 => return Self::keypad_digit(5),
            WK::Numpad6 => return Self::keypad_digit(6),
            WK::Numpad7 => return Self::keypad_digit(7),
            WK::Numpad8 => return Self::keypad_digit(8),
            WK::Numpad9 => return Self::keypad_digit(9),
            WK::NumpadDecimal => Self::KEYPAD_PERIOD,
            WK::NumpadDivide => Self::KEYPAD_DIVIDE,
            WK::NumpadMultiply => Self::KEYPAD_MULTIPLY,
            WK::NumpadSubtract => Self::KEYPAD_MINUS,
            WK::NumpadAdd => Self::KEYPAD_PLUS,
            WK::NumpadEnter => Self::KEYPAD_ENTER,
            WK::NumpadEqual => Self::KEYPAD_EQUALS,

            WK::ArrowUp => Self::UP,
            WK::ArrowDown => Self::DOWN,
            WK::ArrowRight => Self::RIGHT,
            WK::ArrowLeft => Self::LEFT,
            WK::Insert => Self::INSERT,
            WK::Home => Self::HOME,
            WK::End => Self::END,
            WK::PageUp => Self::PAGE_UP,
            WK::PageDown => Self::PAGE_DOWN,

            WK::F1 => return Self::function(1),
            WK::F2 => return Self::function(2),
            WK::F3 => return Self::function(3),
            WK::F4 => return Self::function(4),
            WK::F5 => return Self::function(5),
            WK::F6 => return Self::function(6),
            WK::F7 => return Self::function(7),
            WK::F8 => return Self::function(8),
            WK::F9 => return Self::function(9),
            WK::F10 => return Self::function(10),
            WK::F11 => return Self::function(11),
            WK::F12 => return Self::function(12),
            WK::F13 => return Self::function(13),
            WK::F14 => return Self::function(14),
            WK::F15 => return Self::function(15),

            WK::NumLock => Self::NUM_LOCK,
            WK::CapsLock => Self::CAPS_LOCK,
            WK::ScrollLock => Self::SCROLL_LOCK,
            WK::ShiftRight => Self::RIGHT_SHIFT,
            WK::ShiftLeft => Self::LEFT_SHIFT,
            WK::ControlRight => Self::RIGHT_CTRL,
            WK::ControlLeft => Self::LEFT_CTRL,
            WK::AltRight => Self::RIGHT_ALT,
            WK::AltLeft => Self::LEFT_ALT,
            WK::SuperLeft => Self::LEFT_SUPER,
            WK::SuperRight => Self::RIGHT_SUPER,
            WK::Help => Self::HELP,
            WK::PrintScreen => Self::PRINT,
            WK::ContextMenu => Self::MENU,
            WK::Power => Self::POWER,
            WK::Undo => Self::UNDO,

            _ => return None,
        };

        Some(code)
    }
}

impl TryFrom<i64> for KeyCode {
    type Error = SessionError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match u16::try_from(code) {
            Ok(raw) if raw < Self::LIMIT => Ok(Self(raw)),
            _ => Err(SessionError::InvalidKeyCode {
                code,
                limit: Self::LIMIT,
            }),
        }
    }
}

impl From<KeyCode> for u16 {
    fn from(key: KeyCode) -> Self {
        key.0
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode as WK;

    #[test]
    fn test_printable_keys_use_ascii() {
        assert_eq!(KeyCode::ENTER.raw(), 13);
        assert_eq!(KeyCode::letter('a'), Some(KeyCode::A));
        assert_eq!(KeyCode::letter('Z').map(KeyCode::raw), Some(b'z' as u16));
        assert_eq!(KeyCode::digit(7).map(KeyCode::raw), Some(b'7' as u16));
        assert_eq!(KeyCode::letter('!'), None);
        assert_eq!(KeyCode::digit(10), None);
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(KeyCode::function(1), Some(KeyCode::F1));
        assert_eq!(KeyCode::function(15).map(KeyCode::raw), Some(296));
        assert_eq!(KeyCode::function(0), None);
        assert_eq!(KeyCode::function(16), None);
    }

    #[test]
    fn test_winit_mapping() {
        assert_eq!(KeyCode::from_winit(WK::Enter), Some(KeyCode::ENTER));
        assert_eq!(KeyCode::from_winit(WK::Escape), Some(KeyCode::ESCAPE));
        assert_eq!(KeyCode::from_winit(WK::KeyQ), KeyCode::letter('q'));
        assert_eq!(KeyCode::from_winit(WK::ArrowLeft), Some(KeyCode::LEFT));
        assert_eq!(KeyCode::from_winit(WK::Numpad3).map(KeyCode::raw), Some(259));
        assert_eq!(KeyCode::from_winit(WK::F12).map(KeyCode::raw), Some(293));
        assert_eq!(KeyCode::from_winit(WK::F24), None);
    }

    #[test]
    fn test_checked_conversion() {
        assert_eq!(KeyCode::try_from(13).ok(), Some(KeyCode::ENTER));
        assert_eq!(KeyCode::try_from(0).map(KeyCode::raw).ok(), Some(0));
        assert_eq!(
            KeyCode::try_from(322).map(KeyCode::raw).ok(),
            Some(322)
        );

        for bad in [-1, 323, 70_000, i64::MAX] {
            assert!(matches!(
                KeyCode::try_from(bad),
                Err(SessionError::InvalidKeyCode { code, limit: 323 }) if code == bad
            ));
        }
    }
}
