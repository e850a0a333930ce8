//! Conversion from winit window events into input samples.
//!
//! The dispatcher is platform independent. This module is the bridge for
//! applications running on winit: it translates window events into
//! [`InputSample`]s, converting pixel positions into normalized device
//! coordinates and IME byte ranges into character offsets.
//!
//! # Usage
//!
//! ```ignore
//! use horizon_lattice_input::platform::samples_from_window_event;
//!
//! fn window_event(dispatcher: &mut Dispatcher, window: &Window, event: &WindowEvent) {
//!     for sample in samples_from_window_event(event, window.inner_size()) {
//!         if let Err(err) = dispatcher.feed_sample(sample) {
//!             tracing::warn!("input rejected: {err}");
//!         }
//!     }
//! }
//! ```
//!
//! # Platform Notes
//!
//! - **Preedit cursor**: winit reports the preedit cursor as a byte range.
//!   The range becomes the highlight and its end becomes the edit cursor.
//!   A preedit without a range has an empty highlight and the cursor at the
//!   end of the text.
//! - **Commit**: committed text clears the composition and is then typed
//!   as one keystroke per character.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Ime, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::button::{Button, Key, MouseButton};
use crate::geometry::Point;
use crate::sample::{ButtonTransition, InputSample};

/// Converts a winit mouse button.
pub fn from_winit_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(n) => MouseButton::Other(n),
    }
}

/// Converts a winit physical key.
///
/// Physical keys represent the physical position on the keyboard,
/// independent of the keyboard layout.
pub fn from_winit_physical_key(physical: &PhysicalKey) -> Key {
    match physical {
        PhysicalKey::Code(code) => from_winit_key_code(*code),
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

/// Converts a winit key code.
pub fn from_winit_key_code(code: KeyCode) -> Key {
    match code {
        KeyCode::ShiftLeft => Key::ShiftLeft,
        KeyCode::ShiftRight => Key::ShiftRight,
        KeyCode::ControlLeft => Key::ControlLeft,
        KeyCode::ControlRight => Key::ControlRight,
        KeyCode::AltLeft => Key::AltLeft,
        KeyCode::AltRight => Key::AltRight,
        KeyCode::SuperLeft => Key::MetaLeft,
        KeyCode::SuperRight => Key::MetaRight,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Space => Key::Space,

        KeyCode::Minus => Key::Minus,
        KeyCode::Equal => Key::Equal,
        KeyCode::BracketLeft => Key::BracketLeft,
        KeyCode::BracketRight => Key::BracketRight,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Quote => Key::Quote,
        KeyCode::Comma => Key::Comma,
        KeyCode::Period => Key::Period,
        KeyCode::Slash => Key::Slash,
        KeyCode::Backquote => Key::Grave,

        KeyCode::Escape => Key::Escape,
        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::NumLock => Key::NumLock,
        KeyCode::ScrollLock => Key::ScrollLock,
        KeyCode::PrintScreen => Key::PrintScreen,
        KeyCode::Pause => Key::Pause,

        KeyCode::Numpad0 => Key::Numpad0,
        KeyCode::Numpad1 => Key::Numpad1,
        KeyCode::Numpad2 => Key::Numpad2,
        KeyCode::Numpad3 => Key::Numpad3,
        KeyCode::Numpad4 => Key::Numpad4,
        KeyCode::Numpad5 => Key::Numpad5,
        KeyCode::Numpad6 => Key::Numpad6,
        KeyCode::Numpad7 => Key::Numpad7,
        KeyCode::Numpad8 => Key::Numpad8,
        KeyCode::Numpad9 => Key::Numpad9,
        KeyCode::NumpadAdd => Key::NumpadAdd,
        KeyCode::NumpadSubtract => Key::NumpadSubtract,
        KeyCode::NumpadMultiply => Key::NumpadMultiply,
        KeyCode::NumpadDivide => Key::NumpadDivide,
        KeyCode::NumpadDecimal => Key::NumpadDecimal,
        KeyCode::NumpadEnter => Key::NumpadEnter,

        _ => Key::Unknown(0),
    }
}

/// Maps a pixel position in a window to normalized device coordinates.
///
/// Window pixels have their origin at the top-left with y growing down;
/// the result spans [-1, 1] with y growing up. Returns `None` for a window
/// with no area.
pub fn normalize_position(position: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> Option<Point> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    let x = position.x / f64::from(size.width) * 2.0 - 1.0;
    let y = 1.0 - position.y / f64::from(size.height) * 2.0;
    Some(Point::new(x as f32, y as f32))
}

/// Converts a byte offset into `text` to a character offset.
fn char_offset(text: &str, byte: usize) -> usize {
    match text.get(..byte) {
        Some(prefix) => prefix.chars().count(),
        None => text.chars().count(),
    }
}

/// Converts a winit IME event into the samples it implies.
pub fn samples_from_ime(ime: &Ime) -> Vec<InputSample> {
    match ime {
        Ime::Enabled => Vec::new(),
        Ime::Preedit(text, _) if text.is_empty() => vec![InputSample::clear_candidate()],
        Ime::Preedit(text, Some((start, end))) => {
            let start = char_offset(text, *start);
            let end = char_offset(text, *end);
            let (start, end) = (start.min(end), start.max(end));
            vec![InputSample::candidate(text.clone(), start, end, end)]
        }
        Ime::Preedit(text, None) => {
            let len = text.chars().count();
            vec![InputSample::candidate(text.clone(), 0, 0, len)]
        }
        Ime::Commit(text) => std::iter::once(InputSample::clear_candidate())
            .chain(text.chars().map(|c| InputSample::Keystroke(u32::from(c))))
            .collect(),
        Ime::Disabled => vec![InputSample::clear_candidate()],
    }
}

/// Converts a winit window event into the samples it implies.
///
/// Events that carry no input (resizes, redraws, ...) produce nothing.
pub fn samples_from_window_event(event: &WindowEvent, size: PhysicalSize<u32>) -> Vec<InputSample> {
    match event {
        WindowEvent::CursorMoved { position, .. } => normalize_position(*position, size)
            .map(InputSample::Position)
            .into_iter()
            .collect(),
        WindowEvent::CursorLeft { .. } => vec![InputSample::PointerLost],
        WindowEvent::MouseInput { state, button, .. } => {
            vec![button_sample(Button::Mouse(from_winit_mouse_button(*button)), *state, false, None)]
        }
        WindowEvent::KeyboardInput { event, .. } => {
            let key = Button::Key(from_winit_physical_key(&event.physical_key));
            let text = event.text.as_deref().unwrap_or("");
            let mut chars = text.chars();
            let keycode = match (chars.next(), chars.next()) {
                (Some(c), None) => Some(u32::from(c)),
                _ => None,
            };

            let mut samples = vec![button_sample(key, event.state, event.repeat, keycode)];
            if event.state == ElementState::Pressed {
                samples.extend(text.chars().map(|c| InputSample::Keystroke(u32::from(c))));
            }
            samples
        }
        WindowEvent::Ime(ime) => samples_from_ime(ime),
        _ => Vec::new(),
    }
}

fn button_sample(
    button: Button,
    state: ElementState,
    is_keyrepeat: bool,
    keycode: Option<u32>,
) -> InputSample {
    let transition = match state {
        ElementState::Pressed => ButtonTransition::Down,
        ElementState::Released => ButtonTransition::Up,
    };
    InputSample::Button {
        button,
        transition,
        is_keyrepeat: is_keyrepeat && transition == ButtonTransition::Down,
        keycode: keycode.filter(|_| transition == ButtonTransition::Down),
    }
}
