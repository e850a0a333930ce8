//! Hit-test regions and their event handlers.
//!
//! A [`Region`] is a named rectangle in normalized device coordinates that
//! can receive input. Regions are plain descriptors; the behavior attached
//! to a region lives in a [`RegionHandler`] registered alongside it.
//!
//! # Overlap
//!
//! When regions overlap, the one with the higher sort key is "on top".
//! Overlapping regions all receive pointer events independently unless one
//! of them sets [`suppress_below`](Region::with_suppress_below), which hides
//! every region behind it at the points it covers, like a modal dialog.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_input::{Rect, Region};
//!
//! let dialog = Region::new("dialog", Rect::new(-0.5, 0.5, -0.5, 0.5))
//!     .with_sort(10)
//!     .with_suppress_below(true);
//!
//! assert_eq!(dialog.name(), "dialog");
//! assert!(dialog.is_active());
//! ```

use crate::context::EventContext;
use crate::geometry::{Point, Rect};
use crate::parameter::EventParameter;

/// A named, sortable, axis-aligned hit-test area.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    bounds: Rect,
    sort: i32,
    active: bool,
    suppress_below: bool,
    global: bool,
}

impl Region {
    /// Create an active region with sort key 0 and no behavior flags.
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            name: name.into(),
            bounds,
            sort: 0,
            active: true,
            suppress_below: false,
            global: false,
        }
    }

    /// Set the sort key using builder pattern.
    pub fn with_sort(mut self, sort: i32) -> Self {
        self.sort = sort;
        self
    }

    /// Set whether the region starts active, using builder pattern.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the suppress-below flag using builder pattern.
    pub fn with_suppress_below(mut self, suppress_below: bool) -> Self {
        self.suppress_below = suppress_below;
        self
    }

    /// Set the global flag using builder pattern.
    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move or resize the region.
    ///
    /// Takes effect for enter/exit at the next pointer sample.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn sort(&self) -> i32 {
        self.sort
    }

    pub fn set_sort(&mut self, sort: i32) {
        self.sort = sort;
    }

    /// Inactive regions keep their registration but are never hit.
    pub fn is_active(&self) -> bool {
        self.active
    }

    // Activation goes through the dispatcher so exits can be synthesized.
    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn suppresses_below(&self) -> bool {
        self.suppress_below
    }

    pub fn set_suppress_below(&mut self, suppress_below: bool) {
        self.suppress_below = suppress_below;
    }

    /// Global regions receive every keyboard event regardless of pointer
    /// position.
    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn set_global(&mut self, global: bool) {
        self.global = global;
    }

    /// Check if this region is active and contains `point`.
    #[inline]
    pub fn hit(&self, point: Point) -> bool {
        self.active && self.bounds.contains(point)
    }
}

/// Event callbacks for a region.
///
/// Every method has a no-op default, so handlers implement only what they
/// need. Callbacks run synchronously inside the dispatcher's `feed_*` call.
/// The [`EventContext`] lets a handler inspect the router and request focus
/// or registration changes; those requests are applied once the current
/// batch of events has been delivered.
///
/// # Example
///
/// ```
/// use horizon_lattice_input::{EventContext, EventParameter, RegionHandler};
///
/// /// Takes keyboard focus when clicked.
/// struct ClickToFocus;
///
/// impl RegionHandler for ClickToFocus {
///     fn on_press(&mut self, _param: &EventParameter, ctx: &mut EventContext<'_>) {
///         if let Some(name) = ctx.target_name().map(str::to_owned) {
///             let _ = ctx.set_focus(&name);
///         }
///     }
/// }
/// ```
pub trait RegionHandler: Send {
    /// The pointer entered the region.
    fn on_enter(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {}

    /// The pointer left the region, or the region stopped being hit.
    fn on_exit(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {}

    /// A button was pressed while the region was entered or focused.
    fn on_press(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {}

    /// A button that was pressed on this region was released.
    fn on_release(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {}

    /// A text-producing key was typed.
    fn on_keystroke(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {}

    /// The IME composition changed.
    fn on_candidate(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_defaults() {
        let region = Region::new("button", Rect::FULL);
        assert_eq!(region.name(), "button");
        assert_eq!(region.sort(), 0);
        assert!(region.is_active());
        assert!(!region.suppresses_below());
        assert!(!region.is_global());
    }

    #[test]
    fn test_builder() {
        let region = Region::new("modal", Rect::FULL)
            .with_sort(5)
            .with_suppress_below(true)
            .with_global(true)
            .with_active(false);
        assert_eq!(region.sort(), 5);
        assert!(region.suppresses_below());
        assert!(region.is_global());
        assert!(!region.is_active());
    }

    #[test]
    fn test_hit_requires_active() {
        let mut region = Region::new("r", Rect::new(0.0, 1.0, 0.0, 1.0));
        assert!(region.hit(Point::new(0.5, 0.5)));
        assert!(!region.hit(Point::new(-0.5, 0.5)));

        region.set_active(false);
        assert!(!region.hit(Point::new(0.5, 0.5)));
    }
}
