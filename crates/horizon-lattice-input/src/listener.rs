//! Global listeners for keyboard and composition events.
//!
//! A listener receives every keyboard press and release, keystroke and
//! candidate update, independent of region bounds and focus. Listeners run
//! after the region targets of each event, in registration order.

use slotmap::new_key_type;

use crate::context::EventContext;
use crate::parameter::EventParameter;

new_key_type! {
    /// Identifies a registered listener.
    ///
    /// Returned by [`Dispatcher::add_listener`](crate::Dispatcher::add_listener)
    /// and used to remove it again.
    pub struct ListenerId;
}

/// Callbacks for global keyboard and IME events.
///
/// Every method has a no-op default. The context passed to a listener has
/// no target region.
pub trait InputListener: Send {
    /// A keyboard key was pressed (including auto-repeat).
    fn on_press(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {}

    /// A keyboard key was released.
    fn on_release(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {}

    /// A text-producing key was typed.
    fn on_keystroke(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {}

    /// The IME composition changed.
    fn on_candidate(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {}
}
