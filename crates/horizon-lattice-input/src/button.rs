//! Button identifiers for pointer buttons and keyboard keys.
//!
//! A [`Button`] names the physical control involved in a press or release.
//! The dispatcher routes on its kind: pointer buttons go to the regions under
//! the pointer, keyboard keys go to the focus region and global regions.
//!
//! Every button has a stable lowercase name (`mouse1`, `a`, `lshift`, ...)
//! used by the textual rendering of events.

use std::fmt;

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MouseButton {
    /// Primary button (usually left). Named `mouse1`.
    Left,
    /// Middle button (scroll wheel click). Named `mouse2`.
    Middle,
    /// Secondary button (usually right). Named `mouse3`.
    Right,
    /// Additional button 1 (e.g., browser back). Named `mouse4`.
    Back,
    /// Additional button 2 (e.g., browser forward). Named `mouse5`.
    Forward,
    /// Any further button, by platform index. Named `mouse<n>`.
    Other(u16),
}

impl MouseButton {
    /// The one-based button number used in the button's name.
    pub fn number(&self) -> u32 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::Back => 4,
            MouseButton::Forward => 5,
            MouseButton::Other(n) => u32::from(*n),
        }
    }
}

/// Keyboard keys.
///
/// This follows a similar structure to web `KeyboardEvent.code` values: keys
/// are named by position, not by the character they produce. Produced text
/// travels separately as keystroke events carrying a keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Modifiers
    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    MetaLeft, MetaRight,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab, Space,

    // Punctuation and symbols
    Minus, Equal,
    BracketLeft, BracketRight, Backslash,
    Semicolon, Quote,
    Comma, Period, Slash,
    Grave,

    // Control
    Escape,
    CapsLock, NumLock, ScrollLock,
    PrintScreen, Pause,

    // Numpad
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide,
    NumpadDecimal, NumpadEnter,

    // Unknown/unmapped key, by platform scan code
    Unknown(u16),
}

impl Key {
    /// The eight shift/control/alt/meta keys.
    pub const MODIFIERS: [Key; 8] = [
        Key::ShiftLeft,
        Key::ShiftRight,
        Key::ControlLeft,
        Key::ControlRight,
        Key::AltLeft,
        Key::AltRight,
        Key::MetaLeft,
        Key::MetaRight,
    ];

    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        Self::MODIFIERS.contains(self)
    }

    /// The stable name of this key, or `None` for [`Key::Unknown`].
    #[rustfmt::skip]
    pub fn name(&self) -> Option<&'static str> {
        let name = match self {
            Key::ShiftLeft => "lshift", Key::ShiftRight => "rshift",
            Key::ControlLeft => "lcontrol", Key::ControlRight => "rcontrol",
            Key::AltLeft => "lalt", Key::AltRight => "ralt",
            Key::MetaLeft => "lmeta", Key::MetaRight => "rmeta",
            Key::A => "a", Key::B => "b", Key::C => "c", Key::D => "d",
            Key::E => "e", Key::F => "f", Key::G => "g", Key::H => "h",
            Key::I => "i", Key::J => "j", Key::K => "k", Key::L => "l",
            Key::M => "m", Key::N => "n", Key::O => "o", Key::P => "p",
            Key::Q => "q", Key::R => "r", Key::S => "s", Key::T => "t",
            Key::U => "u", Key::V => "v", Key::W => "w", Key::X => "x",
            Key::Y => "y", Key::Z => "z",
            Key::Digit0 => "0", Key::Digit1 => "1", Key::Digit2 => "2",
            Key::Digit3 => "3", Key::Digit4 => "4", Key::Digit5 => "5",
            Key::Digit6 => "6", Key::Digit7 => "7", Key::Digit8 => "8",
            Key::Digit9 => "9",
            Key::F1 => "f1", Key::F2 => "f2", Key::F3 => "f3", Key::F4 => "f4",
            Key::F5 => "f5", Key::F6 => "f6", Key::F7 => "f7", Key::F8 => "f8",
            Key::F9 => "f9", Key::F10 => "f10", Key::F11 => "f11", Key::F12 => "f12",
            Key::ArrowUp => "arrow_up", Key::ArrowDown => "arrow_down",
            Key::ArrowLeft => "arrow_left", Key::ArrowRight => "arrow_right",
            Key::Home => "home", Key::End => "end",
            Key::PageUp => "page_up", Key::PageDown => "page_down",
            Key::Backspace => "backspace", Key::Delete => "delete",
            Key::Insert => "insert", Key::Enter => "enter",
            Key::Tab => "tab", Key::Space => "space",
            Key::Minus => "-", Key::Equal => "=",
            Key::BracketLeft => "[", Key::BracketRight => "]",
            Key::Backslash => "\\", Key::Semicolon => ";", Key::Quote => "'",
            Key::Comma => ",", Key::Period => ".", Key::Slash => "/",
            Key::Grave => "`",
            Key::Escape => "escape", Key::CapsLock => "caps_lock",
            Key::NumLock => "num_lock", Key::ScrollLock => "scroll_lock",
            Key::PrintScreen => "print_screen", Key::Pause => "pause",
            Key::Numpad0 => "num_0", Key::Numpad1 => "num_1", Key::Numpad2 => "num_2",
            Key::Numpad3 => "num_3", Key::Numpad4 => "num_4", Key::Numpad5 => "num_5",
            Key::Numpad6 => "num_6", Key::Numpad7 => "num_7", Key::Numpad8 => "num_8",
            Key::Numpad9 => "num_9",
            Key::NumpadAdd => "num_+", Key::NumpadSubtract => "num_-",
            Key::NumpadMultiply => "num_*", Key::NumpadDivide => "num_/",
            Key::NumpadDecimal => "num_.", Key::NumpadEnter => "num_enter",
            Key::Unknown(_) => return None,
        };
        Some(name)
    }
}

/// A pointer button or keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Button {
    /// A pointer button; routed by pointer position.
    Mouse(MouseButton),
    /// A keyboard key; routed to the focus and global regions.
    Key(Key),
}

impl Button {
    /// Check if this is a pointer button.
    pub fn is_pointer(&self) -> bool {
        matches!(self, Button::Mouse(_))
    }

    /// Check if this is a keyboard key.
    pub fn is_keyboard(&self) -> bool {
        matches!(self, Button::Key(_))
    }

    /// Check if this is one of the shift/control/alt/meta keys.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Button::Key(key) if key.is_modifier())
    }
}

impl From<MouseButton> for Button {
    fn from(button: MouseButton) -> Self {
        Button::Mouse(button)
    }
}

impl From<Key> for Button {
    fn from(key: Key) -> Self {
        Button::Key(key)
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mouse{}", self.number())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self) {
            (Some(name), _) => f.write_str(name),
            (None, Key::Unknown(code)) => write!(f, "key#{code}"),
            (None, _) => f.write_str("key#?"),
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Button::Mouse(button) => button.fmt(f),
            Button::Key(key) => key.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_kinds() {
        let left = Button::from(MouseButton::Left);
        let shift = Button::from(Key::ShiftLeft);
        let a = Button::from(Key::A);

        assert!(left.is_pointer());
        assert!(!left.is_keyboard());
        assert!(!left.is_modifier());

        assert!(shift.is_keyboard());
        assert!(shift.is_modifier());

        assert!(a.is_keyboard());
        assert!(!a.is_modifier());
    }

    #[test]
    fn test_button_names() {
        assert_eq!(Button::Mouse(MouseButton::Left).to_string(), "mouse1");
        assert_eq!(Button::Mouse(MouseButton::Right).to_string(), "mouse3");
        assert_eq!(Button::Mouse(MouseButton::Other(9)).to_string(), "mouse9");
        assert_eq!(Button::Key(Key::A).to_string(), "a");
        assert_eq!(Button::Key(Key::ControlRight).to_string(), "rcontrol");
        assert_eq!(Button::Key(Key::NumpadEnter).to_string(), "num_enter");
        assert_eq!(Button::Key(Key::Unknown(77)).to_string(), "key#77");
    }

    #[test]
    fn test_modifier_list() {
        assert!(Key::MODIFIERS.iter().all(Key::is_modifier));
        assert!(!Key::Space.is_modifier());
    }
}
