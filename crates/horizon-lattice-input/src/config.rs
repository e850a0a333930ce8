//! Dispatcher configuration.

use crate::button::{Button, Key};

/// Options controlling how a [`Dispatcher`](crate::Dispatcher) routes input.
///
/// # Example
///
/// ```
/// use horizon_lattice_input::{Button, Key, MouseButton, RouterConfig};
///
/// // Treat the middle mouse button as a modifier, and let enter/exit follow
/// // the pointer even while a button is held.
/// let config = RouterConfig::default()
///     .with_modifier_button(MouseButton::Middle)
///     .with_pointer_capture(false);
///
/// assert!(config.is_modifier(Button::Key(Key::ShiftLeft)));
/// assert!(config.is_modifier(Button::Mouse(MouseButton::Middle)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Buttons whose transitions are mirrored into the modifier state.
    pub modifier_buttons: Vec<Button>,
    /// Keep a pressed region entered until the button is released, even if
    /// the pointer leaves it in the meantime.
    pub pointer_capture: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            modifier_buttons: Key::MODIFIERS.iter().copied().map(Button::Key).collect(),
            pointer_capture: true,
        }
    }
}

impl RouterConfig {
    /// Replace the tracked modifier buttons.
    pub fn with_modifier_buttons(mut self, buttons: impl IntoIterator<Item = Button>) -> Self {
        self.modifier_buttons = buttons.into_iter().collect();
        self
    }

    /// Track one more modifier button.
    pub fn with_modifier_button(mut self, button: impl Into<Button>) -> Self {
        let button = button.into();
        if !self.modifier_buttons.contains(&button) {
            self.modifier_buttons.push(button);
        }
        self
    }

    pub fn with_pointer_capture(mut self, pointer_capture: bool) -> Self {
        self.pointer_capture = pointer_capture;
        self
    }

    /// Check if `button` is tracked as a modifier.
    pub fn is_modifier(&self, button: Button) -> bool {
        self.modifier_buttons.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::MouseButton;

    #[test]
    fn test_default_tracks_modifier_keys() {
        let config = RouterConfig::default();
        assert!(config.pointer_capture);
        assert_eq!(config.modifier_buttons.len(), 8);
        assert!(config.is_modifier(Button::Key(Key::AltRight)));
        assert!(!config.is_modifier(Button::Key(Key::A)));
    }

    #[test]
    fn test_builder() {
        let config = RouterConfig::default()
            .with_modifier_buttons([Button::Key(Key::CapsLock)])
            .with_modifier_button(MouseButton::Right)
            .with_modifier_button(MouseButton::Right)
            .with_pointer_capture(false);

        assert_eq!(
            config.modifier_buttons,
            vec![Button::Key(Key::CapsLock), Button::Mouse(MouseButton::Right)]
        );
        assert!(!config.pointer_capture);
    }
}
