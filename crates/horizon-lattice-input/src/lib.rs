//! Region-based input routing for Horizon Lattice.
//!
//! This crate turns a raw stream of pointer positions, button transitions,
//! typed characters and IME composition updates into semantic events
//! delivered to application-registered *regions*:
//!
//! - **Regions**: named rectangles in normalized device coordinates
//!   ([-1, 1] on both axes, y up) with a sort key, an active flag and the
//!   *suppresses-below* and *global* behavior flags
//! - **Hit Testing**: overlapping regions are resolved by sort key; a
//!   suppressing region hides everything below it
//! - **Dispatcher**: the state machine tracking the entered regions, the
//!   keyboard focus and the in-progress composition
//! - **Event Parameters**: one value type carrying button, keycode,
//!   candidate, modifiers, pointer position and the outside flag
//! - **Sample Queue**: a channel for feeding a dispatcher from a device
//!   thread
//! - **Platform**: conversion of winit window events into samples
//!
//! # Example
//!
//! ```
//! use horizon_lattice_input::{
//!     Dispatcher, EventContext, EventParameter, Key, Point, Rect, Region, RegionHandler,
//! };
//!
//! struct TextField;
//!
//! impl RegionHandler for TextField {
//!     fn on_press(&mut self, param: &EventParameter, ctx: &mut EventContext<'_>) {
//!         // Clicking the field focuses it.
//!         if param.button().is_some_and(|b| b.is_pointer()) {
//!             let _ = ctx.set_focus("field");
//!         }
//!     }
//!
//!     fn on_keystroke(&mut self, param: &EventParameter, _ctx: &mut EventContext<'_>) {
//!         if let Some(c) = param.keycode_char() {
//!             print!("{c}");
//!         }
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .add_region_with_handler(Region::new("field", Rect::new(-0.5, 0.5, -0.1, 0.1)), TextField)
//!     .unwrap();
//!
//! dispatcher.feed_position(Point::new(0.0, 0.0));
//! dispatcher.feed_button_down(horizon_lattice_input::MouseButton::Left, None, false);
//! dispatcher.feed_button_up(horizon_lattice_input::MouseButton::Left);
//! assert_eq!(dispatcher.focus(), Some("field"));
//!
//! dispatcher.feed_button_down(Key::H, Some('h' as u32), false);
//! dispatcher.feed_keystroke('h' as u32);
//! dispatcher.feed_button_up(Key::H);
//! ```

mod button;
mod config;
mod context;
mod dispatcher;
mod error;
mod geometry;
mod index;
mod listener;
pub mod logging;
mod modifiers;
mod parameter;
pub mod platform;
mod region;
mod sample;

pub use button::{Button, Key, MouseButton};
pub use config::RouterConfig;
pub use context::EventContext;
pub use dispatcher::{Dispatcher, EventKind, SharedDispatcher};
pub use error::{CandidateError, InputError, Result};
pub use geometry::{Point, Rect};
pub use index::{RegionIndex, RegionKey};
pub use listener::{InputListener, ListenerId};
pub use modifiers::ModifierState;
pub use parameter::{Candidate, EventParameter};
pub use region::{Region, RegionHandler};
pub use sample::{sample_queue, ButtonTransition, InputSample, SampleReceiver, SampleSender};
