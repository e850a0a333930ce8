//! The input routing state machine.
//!
//! A [`Dispatcher`] turns raw device samples into events delivered to
//! regions and global listeners. It owns the [`RegionIndex`] and tracks:
//!
//! - the set of *entered* regions (pointer inside, or a button held since a
//!   press inside),
//! - the single *focus* region that receives keyboard events,
//! - the in-progress IME composition, if any,
//! - the held modifier buttons and the last known pointer position.
//!
//! # Event Flow
//!
//! Each `feed_*` call works in three steps:
//!
//! 1. **Snapshot**: the ordered list of regions to notify is computed from
//!    the current state before any callback runs.
//! 2. **Delivery**: callbacks are invoked in that order. Changes they request
//!    through their [`EventContext`] are queued, not applied.
//! 3. **Apply**: queued requests are applied in order. Requests that produce
//!    events of their own (removing an entered region, say) are delivered
//!    and drained the same way until the queue is empty.
//!
//! # Ordering
//!
//! For a pointer move, exits strictly precede enters. Exits run bottommost
//! first (ascending sort key), enters topmost first (descending sort key).
//! Presses and releases reach entered regions topmost first. Keyboard
//! events reach the focus region first, then the remaining global regions
//! topmost first, then global listeners in registration order.
//!
//! # Threading
//!
//! The dispatcher is single-threaded and never blocks. If devices are
//! polled elsewhere, send samples through a
//! [`sample_queue`](crate::sample_queue) and [`drain`](Dispatcher::drain) it
//! here; if regions must be registered from another thread, share the
//! dispatcher as a [`SharedDispatcher`].
//!
//! # Example
//!
//! ```
//! use horizon_lattice_input::{
//!     Dispatcher, EventContext, EventParameter, MouseButton, Point, Rect, Region, RegionHandler,
//! };
//!
//! struct Button;
//!
//! impl RegionHandler for Button {
//!     fn on_release(&mut self, param: &EventParameter, _ctx: &mut EventContext<'_>) {
//!         if !param.is_outside() {
//!             println!("clicked");
//!         }
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .add_region_with_handler(Region::new("ok", Rect::new(-0.2, 0.2, -0.1, 0.1)), Button)
//!     .unwrap();
//!
//! dispatcher.feed_position(Point::new(0.0, 0.0));
//! assert!(dispatcher.is_entered("ok"));
//!
//! dispatcher.feed_button_down(MouseButton::Left, None, false);
//! dispatcher.feed_button_up(MouseButton::Left);
//! ```

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::SlotMap;

use crate::button::{Button, MouseButton};
use crate::config::RouterConfig;
use crate::context::{EventContext, Request};
use crate::error::{InputError, Result};
use crate::geometry::Point;
use crate::index::{RegionIndex, RegionKey};
use crate::listener::{InputListener, ListenerId};
use crate::logging::targets;
use crate::modifiers::ModifierState;
use crate::parameter::{Candidate, EventParameter};
use crate::region::{Region, RegionHandler};
use crate::sample::{ButtonTransition, InputSample, SampleReceiver};

/// A dispatcher shared between threads.
///
/// The dispatcher itself has no internal locking; callers that register
/// regions from one thread and feed samples from another wrap it in a mutex.
pub type SharedDispatcher = Arc<Mutex<Dispatcher>>;

/// The kinds of events delivered to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Enter,
    Exit,
    Press,
    Release,
    Keystroke,
    Candidate,
}

impl EventKind {
    fn invoke_region(
        self,
        handler: &mut dyn RegionHandler,
        param: &EventParameter,
        ctx: &mut EventContext<'_>,
    ) {
        match self {
            EventKind::Enter => handler.on_enter(param, ctx),
            EventKind::Exit => handler.on_exit(param, ctx),
            EventKind::Press => handler.on_press(param, ctx),
            EventKind::Release => handler.on_release(param, ctx),
            EventKind::Keystroke => handler.on_keystroke(param, ctx),
            EventKind::Candidate => handler.on_candidate(param, ctx),
        }
    }

    fn invoke_listener(
        self,
        listener: &mut dyn InputListener,
        param: &EventParameter,
        ctx: &mut EventContext<'_>,
    ) {
        match self {
            EventKind::Press => listener.on_press(param, ctx),
            EventKind::Release => listener.on_release(param, ctx),
            EventKind::Keystroke => listener.on_keystroke(param, ctx),
            EventKind::Candidate => listener.on_candidate(param, ctx),
            // Listeners are position independent.
            EventKind::Enter | EventKind::Exit => {}
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventKind::Enter => "enter",
            EventKind::Exit => "exit",
            EventKind::Press => "press",
            EventKind::Release => "release",
            EventKind::Keystroke => "keystroke",
            EventKind::Candidate => "candidate",
        })
    }
}

/// Routes pointer and keyboard input to regions.
///
/// Each dispatcher is an independent router (one per window or viewport,
/// typically); there is no process-wide instance.
pub struct Dispatcher {
    index: RegionIndex,
    config: RouterConfig,
    entered: HashSet<RegionKey>,
    focus: Option<RegionKey>,
    candidate: Option<Candidate>,
    modifiers: ModifierState,
    mouse: Option<Point>,
    /// Regions that received the press of each held pointer button.
    captures: HashMap<MouseButton, Vec<RegionKey>>,
    listeners: SlotMap<ListenerId, Box<dyn InputListener>>,
    listener_order: Vec<ListenerId>,
    requests: VecDeque<Request>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a dispatcher with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        tracing::debug!(
            target: targets::INPUT,
            pointer_capture = config.pointer_capture,
            modifier_buttons = config.modifier_buttons.len(),
            "dispatcher created"
        );
        Self {
            index: RegionIndex::new(),
            config,
            entered: HashSet::new(),
            focus: None,
            candidate: None,
            modifiers: ModifierState::new(),
            mouse: None,
            captures: HashMap::new(),
            listeners: SlotMap::with_key(),
            listener_order: Vec::new(),
            requests: VecDeque::new(),
        }
    }

    /// Wrap the dispatcher for use from several threads.
    pub fn into_shared(self) -> SharedDispatcher {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a region.
    ///
    /// A new region is not entered until the next pointer sample or
    /// [`refresh`](Self::refresh), even if the pointer is already over it.
    pub fn add_region(&mut self, region: Region) -> Result<RegionKey> {
        self.index.add(region)
    }

    /// Register a region together with its handler.
    pub fn add_region_with_handler(
        &mut self,
        region: Region,
        handler: impl RegionHandler + 'static,
    ) -> Result<RegionKey> {
        self.index.add_with_handler(region, handler)
    }

    /// Install or replace the handler of a registered region.
    pub fn set_handler(&mut self, name: &str, handler: impl RegionHandler + 'static) -> Result<()> {
        self.index.set_handler(name, handler).map(|_| ())
    }

    /// Remove a region, returning its descriptor.
    ///
    /// If the region is entered it receives an exit event first. If it has
    /// focus, focus is cleared.
    pub fn remove_region(&mut self, name: &str) -> Result<Region> {
        let key = self
            .index
            .key(name)
            .ok_or_else(|| InputError::unknown_region(name))?;
        let region = self
            .remove_key(key)
            .ok_or_else(|| InputError::unknown_region(name))?;
        self.apply_requests();
        Ok(region)
    }

    /// Activate or deactivate a region.
    ///
    /// Deactivating an entered region delivers an exit event, exactly as if
    /// it had been removed, but the region stays registered. Focus is kept;
    /// an inactive focus region simply receives no keyboard events.
    pub fn set_active(&mut self, name: &str, active: bool) -> Result<()> {
        let key = self
            .index
            .key(name)
            .ok_or_else(|| InputError::unknown_region(name))?;
        self.set_active_key(key, active);
        self.apply_requests();
        Ok(())
    }

    /// Register a global listener.
    pub fn add_listener(&mut self, listener: impl InputListener + 'static) -> ListenerId {
        let id = self.listeners.insert(Box::new(listener));
        self.listener_order.push(id);
        id
    }

    /// Remove a global listener, returning whether it existed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listener_order.retain(|other| *other != id);
        self.listeners.remove(id).is_some()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Give keyboard focus to `name`, or clear it with `None`.
    ///
    /// Fails with [`InputError::UnknownRegion`] for an unregistered name,
    /// leaving focus unchanged.
    pub fn set_focus(&mut self, name: Option<&str>) -> Result<()> {
        let key = match name {
            Some(name) => Some(
                self.index
                    .key(name)
                    .ok_or_else(|| InputError::unknown_region(name))?,
            ),
            None => None,
        };
        self.change_focus(key);
        Ok(())
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus
            .and_then(|key| self.index.by_key(key))
            .map(Region::name)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn index(&self) -> &RegionIndex {
        &self.index
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.index.get(name)
    }

    /// Mutable access to a region's bounds, sort key and flags.
    ///
    /// Geometry changes take effect at the next pointer sample or
    /// [`refresh`](Self::refresh).
    pub fn region_mut(&mut self, name: &str) -> Option<&mut Region> {
        self.index.get_mut(name)
    }

    pub fn regions(&self) -> Vec<&Region> {
        self.index.regions()
    }

    pub fn hit_test(&self, point: Point) -> Vec<&Region> {
        self.index.hit_test(point)
    }

    pub fn is_entered(&self, name: &str) -> bool {
        self.index
            .key(name)
            .is_some_and(|key| self.entered.contains(&key))
    }

    /// Names of the entered regions, topmost first.
    pub fn entered(&self) -> Vec<&str> {
        let mut keys: Vec<RegionKey> = self.entered.iter().copied().collect();
        self.index.sort_descending(&mut keys);
        keys.into_iter()
            .filter_map(|key| self.index.by_key(key))
            .map(Region::name)
            .collect()
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    /// The last known pointer position, if the pointer is over the viewport.
    pub fn mouse_position(&self) -> Option<Point> {
        self.mouse
    }

    /// The in-progress IME composition, if any.
    pub fn candidate(&self) -> Option<&Candidate> {
        self.candidate.as_ref()
    }

    // =========================================================================
    // Samples
    // =========================================================================

    /// The pointer moved to `point`.
    ///
    /// Regions no longer hit receive exits, newly hit regions receive
    /// enters. Repeating a sample produces no events.
    pub fn feed_position(&mut self, point: Point) {
        self.mouse = Some(point);
        self.update_entered();
        self.apply_requests();
    }

    /// The pointer left the viewport.
    pub fn feed_pointer_lost(&mut self) {
        self.mouse = None;
        self.update_entered();
        self.apply_requests();
    }

    /// Re-evaluate the entered set at the last known position.
    ///
    /// Use after moving, resizing or re-sorting regions.
    pub fn refresh(&mut self) {
        self.update_entered();
        self.apply_requests();
    }

    /// A button went down.
    ///
    /// Pointer buttons go to every entered region, topmost first, and are
    /// dropped if none is entered. Keyboard keys go to the focus region,
    /// the global regions and the global listeners.
    pub fn feed_button_down(
        &mut self,
        button: impl Into<Button>,
        keycode: Option<u32>,
        is_keyrepeat: bool,
    ) {
        let button = button.into();
        if self.config.is_modifier(button) && !is_keyrepeat {
            self.modifiers.set(button, true);
        }

        let mut param = self.base_param();
        param.set_button(button);
        param.set_keyrepeat(is_keyrepeat);
        if let Some(keycode) = keycode {
            param.set_keycode(keycode);
        }

        match button {
            Button::Mouse(mouse) => {
                let pressed = self.entered_keys();
                if pressed.is_empty() {
                    tracing::debug!(target: targets::DISPATCH, %button, "press outside every region dropped");
                } else {
                    if !is_keyrepeat {
                        self.captures.insert(mouse, pressed.clone());
                    }
                    for key in pressed {
                        self.deliver(key, EventKind::Press, &param);
                    }
                }
            }
            Button::Key(_) => self.deliver_keyboard(EventKind::Press, &param),
        }
        self.apply_requests();
    }

    /// A button went up.
    ///
    /// A pointer release goes to the regions that received the matching
    /// press, each with [`is_outside`](EventParameter::is_outside) telling
    /// whether the pointer is still over that region.
    pub fn feed_button_up(&mut self, button: impl Into<Button>) {
        let button = button.into();
        if self.config.is_modifier(button) {
            self.modifiers.set(button, false);
        }

        let mut param = self.base_param();
        param.set_button(button);

        match button {
            Button::Mouse(mouse) => {
                let mut pressed = match self.captures.remove(&mouse) {
                    Some(keys) => keys,
                    None => self.entered.iter().copied().collect(),
                };
                self.index.sort_descending(&mut pressed);

                let hits = self
                    .mouse
                    .map(|point| self.index.hit_keys(point))
                    .unwrap_or_default();
                for key in pressed {
                    let mut release = param.clone();
                    release.set_outside(!hits.contains(&key));
                    self.deliver(key, EventKind::Release, &release);
                }

                // Regions held only by this button's capture may exit now.
                self.update_entered();
            }
            Button::Key(_) => self.deliver_keyboard(EventKind::Release, &param),
        }
        self.apply_requests();
    }

    /// A text-producing key was typed.
    pub fn feed_keystroke(&mut self, keycode: u32) {
        let mut param = self.base_param();
        param.set_keycode(keycode);
        self.deliver_keyboard(EventKind::Keystroke, &param);
        self.apply_requests();
    }

    /// The IME composition changed.
    ///
    /// Offsets are character indices into `text`. Empty text clears the
    /// composition. Malformed offsets are rejected with
    /// [`InputError::Validation`] and leave the composition unchanged.
    pub fn feed_candidate(
        &mut self,
        text: impl Into<String>,
        highlight_start: usize,
        highlight_end: usize,
        cursor: usize,
    ) -> Result<()> {
        let candidate = match Candidate::new(text, highlight_start, highlight_end, cursor) {
            Ok(candidate) => candidate,
            Err(err) => {
                tracing::warn!(target: targets::IME, %err, "rejected candidate update");
                return Err(err.into());
            }
        };

        let mut param = self.base_param();
        if candidate.is_empty() {
            tracing::trace!(target: targets::IME, "candidate cleared");
            self.candidate = None;
        } else {
            tracing::trace!(target: targets::IME, text = candidate.text(), "candidate updated");
            param.set_candidate(candidate.clone());
            self.candidate = Some(candidate);
        }

        self.deliver_keyboard(EventKind::Candidate, &param);
        self.apply_requests();
        Ok(())
    }

    /// Feed one boundary sample.
    pub fn feed_sample(&mut self, sample: InputSample) -> Result<()> {
        match sample {
            InputSample::Position(point) => self.feed_position(point),
            InputSample::PointerLost => self.feed_pointer_lost(),
            InputSample::Button {
                button,
                transition: ButtonTransition::Down,
                is_keyrepeat,
                keycode,
            } => self.feed_button_down(button, keycode, is_keyrepeat),
            InputSample::Button {
                button,
                transition: ButtonTransition::Up,
                ..
            } => self.feed_button_up(button),
            InputSample::Keystroke(keycode) => self.feed_keystroke(keycode),
            InputSample::Candidate {
                text,
                highlight_start,
                highlight_end,
                cursor,
            } => return self.feed_candidate(text, highlight_start, highlight_end, cursor),
        }
        Ok(())
    }

    /// Feed every queued sample, in order, returning how many were fed.
    ///
    /// Stops at the first rejected sample and returns its error; samples
    /// queued after it stay queued.
    pub fn drain(&mut self, receiver: &SampleReceiver) -> Result<usize> {
        let mut count = 0;
        while let Some(sample) = receiver.try_recv() {
            self.feed_sample(sample)?;
            count += 1;
        }
        if count > 0 {
            tracing::trace!(target: targets::QUEUE, count, "drained samples");
        }
        Ok(count)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn base_param(&self) -> EventParameter {
        let mut param = EventParameter::new();
        param.set_modifiers(self.modifiers.snapshot());
        if let Some(mouse) = self.mouse {
            param.set_mouse_position(mouse);
        }
        param
    }

    fn entered_keys(&self) -> Vec<RegionKey> {
        let mut keys: Vec<RegionKey> = self.entered.iter().copied().collect();
        self.index.sort_descending(&mut keys);
        keys
    }

    /// Bring `entered` in line with the pointer and the held captures.
    fn update_entered(&mut self) {
        let mut target: HashSet<RegionKey> = match self.mouse {
            Some(point) => self.index.hit_keys(point).into_iter().collect(),
            None => HashSet::new(),
        };
        if self.config.pointer_capture {
            for keys in self.captures.values() {
                target.extend(keys.iter().copied().filter(|key| {
                    self.index.by_key(*key).is_some_and(Region::is_active)
                }));
            }
        }

        let mut exits: Vec<RegionKey> = self.entered.difference(&target).copied().collect();
        let mut enters: Vec<RegionKey> = target.difference(&self.entered).copied().collect();
        if exits.is_empty() && enters.is_empty() {
            return;
        }
        self.index.sort_ascending(&mut exits);
        self.index.sort_descending(&mut enters);
        self.entered = target;

        let param = self.base_param();
        for key in exits {
            self.deliver(key, EventKind::Exit, &param);
        }
        for key in enters {
            self.deliver(key, EventKind::Enter, &param);
        }
    }

    fn keyboard_targets(&self) -> Vec<RegionKey> {
        let mut targets = Vec::new();
        if let Some(focus) = self.focus {
            if self.index.by_key(focus).is_some_and(Region::is_active) {
                targets.push(focus);
            }
        }
        for key in self.index.global_keys() {
            if !targets.contains(&key) {
                targets.push(key);
            }
        }
        targets
    }

    fn deliver_keyboard(&mut self, kind: EventKind, param: &EventParameter) {
        for key in self.keyboard_targets() {
            self.deliver(key, kind, param);
        }
        self.notify_listeners(kind, param);
    }

    fn deliver(&mut self, key: RegionKey, kind: EventKind, param: &EventParameter) {
        let Some(region) = self.index.by_key(key) else {
            return;
        };
        tracing::trace!(target: targets::DISPATCH, region = region.name(), event = %kind, %param, "delivering event");

        let Some(mut handler) = self.index.take_handler(key) else {
            return;
        };
        {
            let mut ctx = EventContext::new(&self.index, Some(key), self.focus, &mut self.requests);
            kind.invoke_region(&mut *handler, param, &mut ctx);
        }
        self.index.restore_handler(key, handler);
    }

    fn notify_listeners(&mut self, kind: EventKind, param: &EventParameter) {
        for id in &self.listener_order {
            let Some(listener) = self.listeners.get_mut(*id) else {
                continue;
            };
            tracing::trace!(target: targets::DISPATCH, listener = ?id, event = %kind, %param, "delivering event");
            let mut ctx = EventContext::new(&self.index, None, self.focus, &mut self.requests);
            kind.invoke_listener(&mut **listener, param, &mut ctx);
        }
    }

    fn apply_requests(&mut self) {
        while let Some(request) = self.requests.pop_front() {
            match request {
                Request::SetFocus(Some(key)) if self.index.by_key(key).is_none() => {
                    tracing::warn!(target: targets::REGION, "focus requested for a region removed before the request applied");
                }
                Request::SetFocus(key) => self.change_focus(key),
                Request::RemoveRegion(key) => {
                    if self.remove_key(key).is_none() {
                        tracing::warn!(target: targets::REGION, "removal requested for a region already removed");
                    }
                }
                Request::SetActive(key, active) => {
                    if !self.set_active_key(key, active) {
                        tracing::warn!(target: targets::REGION, active, "activation requested for a region already removed");
                    }
                }
            }
        }
    }

    fn change_focus(&mut self, key: Option<RegionKey>) {
        if self.focus == key {
            return;
        }
        let name = |key: Option<RegionKey>| {
            key.and_then(|key| self.index.by_key(key))
                .map(|region| region.name().to_owned())
        };
        tracing::debug!(target: targets::REGION, from = ?name(self.focus), to = ?name(key), "focus changed");
        self.focus = key;
    }

    /// Forget `key` as entered or captured, delivering an exit if it was
    /// entered.
    fn release_key(&mut self, key: RegionKey) {
        for keys in self.captures.values_mut() {
            keys.retain(|other| *other != key);
        }
        if self.entered.remove(&key) {
            let param = self.base_param();
            self.deliver(key, EventKind::Exit, &param);
        }
    }

    /// Returns `false` if the region no longer exists.
    fn set_active_key(&mut self, key: RegionKey, active: bool) -> bool {
        let Some(previous) = self.index.set_active_key(key, active) else {
            return false;
        };
        if previous && !active {
            self.release_key(key);
        }
        true
    }

    fn remove_key(&mut self, key: RegionKey) -> Option<Region> {
        self.index.by_key(key)?;
        self.release_key(key);
        if self.focus == Some(key) {
            self.change_focus(None);
        }
        self.index.remove_key(key)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("regions", &self.index)
            .field("entered", &self.entered())
            .field("focus", &self.focus())
            .field("candidate", &self.candidate)
            .field("modifiers", &self.modifiers)
            .field("mouse", &self.mouse)
            .field("listeners", &self.listener_order.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Dispatcher: Send);
