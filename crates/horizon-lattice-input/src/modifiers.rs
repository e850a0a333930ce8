//! Tracking of held modifier buttons.

use std::collections::BTreeSet;
use std::fmt;

use crate::button::Button;

/// The set of modifier buttons currently held down.
///
/// Any button can be tracked, not only the shift/control/alt/meta keys; the
/// dispatcher mirrors whichever buttons its
/// [`RouterConfig`](crate::RouterConfig) lists. Buttons that were never set
/// read as not held.
///
/// Every [`EventParameter`](crate::EventParameter) carries a snapshot of this
/// state taken when the event was built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModifierState {
    held: BTreeSet<Button>,
}

impl ModifierState {
    /// Create a state with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether `button` is held.
    pub fn set(&mut self, button: impl Into<Button>, held: bool) {
        let button = button.into();
        if held {
            self.held.insert(button);
        } else {
            self.held.remove(&button);
        }
    }

    /// Check if `button` is held.
    pub fn is_held(&self, button: impl Into<Button>) -> bool {
        self.held.contains(&button.into())
    }

    /// Check if any button is held.
    pub fn any(&self) -> bool {
        !self.held.is_empty()
    }

    /// Release everything.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// The held buttons, in button order.
    pub fn held(&self) -> impl Iterator<Item = Button> + '_ {
        self.held.iter().copied()
    }

    /// A value copy of the current state.
    pub fn snapshot(&self) -> ModifierState {
        self.clone()
    }
}

/// Renders as `{lshift, lcontrol}` in button order, or `{}` when empty.
impl fmt::Display for ModifierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, button) in self.held.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{button}")?;
        }
        f.write_str("}")
    }
}
