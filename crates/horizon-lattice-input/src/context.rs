//! Context handed to event callbacks.
//!
//! Callbacks run while the dispatcher is in the middle of delivering a batch
//! of events, so they cannot change the router directly. Instead,
//! [`EventContext`] validates each request on the spot and queues it; the
//! dispatcher applies queued requests in order once the batch is complete.
//! The remaining deliveries of the batch therefore see the router exactly
//! as it was when the batch started.

use std::collections::VecDeque;

use crate::error::{InputError, Result};
use crate::index::{RegionIndex, RegionKey};
use crate::region::Region;

/// A change requested from inside a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Request {
    SetFocus(Option<RegionKey>),
    RemoveRegion(RegionKey),
    SetActive(RegionKey, bool),
}

/// Read access to the router and a queue for deferred changes.
pub struct EventContext<'a> {
    index: &'a RegionIndex,
    target: Option<RegionKey>,
    focus: Option<RegionKey>,
    requests: &'a mut VecDeque<Request>,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(
        index: &'a RegionIndex,
        target: Option<RegionKey>,
        focus: Option<RegionKey>,
        requests: &'a mut VecDeque<Request>,
    ) -> Self {
        Self {
            index,
            target,
            focus,
            requests,
        }
    }

    /// The region receiving the event, or `None` for global listeners.
    pub fn target(&self) -> Option<&Region> {
        self.target.and_then(|key| self.index.by_key(key))
    }

    pub fn target_name(&self) -> Option<&str> {
        self.target().map(Region::name)
    }

    /// The focus region as of the start of this batch.
    pub fn focus(&self) -> Option<&str> {
        self.focus
            .and_then(|key| self.index.by_key(key))
            .map(Region::name)
    }

    /// Look up any registered region.
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.index.get(name)
    }

    /// Request keyboard focus for `name`.
    pub fn set_focus(&mut self, name: &str) -> Result<()> {
        let key = self.resolve(name)?;
        self.requests.push_back(Request::SetFocus(Some(key)));
        Ok(())
    }

    /// Request that no region has keyboard focus.
    pub fn clear_focus(&mut self) {
        self.requests.push_back(Request::SetFocus(None));
    }

    /// Request removal of `name`, with an exit event if it is entered.
    pub fn remove_region(&mut self, name: &str) -> Result<()> {
        let key = self.resolve(name)?;
        self.requests.push_back(Request::RemoveRegion(key));
        Ok(())
    }

    /// Request activation or deactivation of `name`.
    pub fn set_active(&mut self, name: &str, active: bool) -> Result<()> {
        let key = self.resolve(name)?;
        self.requests.push_back(Request::SetActive(key, active));
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<RegionKey> {
        self.index
            .key(name)
            .ok_or_else(|| InputError::unknown_region(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn test_requests_are_queued_in_order() {
        let mut index = RegionIndex::new();
        let a = index.add(Region::new("a", Rect::FULL)).unwrap();
        let b = index.add(Region::new("b", Rect::FULL)).unwrap();
        let mut requests = VecDeque::new();

        let mut ctx = EventContext::new(&index, Some(a), None, &mut requests);
        assert_eq!(ctx.target_name(), Some("a"));
        assert_eq!(ctx.focus(), None);

        ctx.set_focus("b").unwrap();
        ctx.set_active("a", false).unwrap();
        ctx.remove_region("b").unwrap();
        ctx.clear_focus();

        assert_eq!(
            requests,
            VecDeque::from(vec![
                Request::SetFocus(Some(b)),
                Request::SetActive(a, false),
                Request::RemoveRegion(b),
                Request::SetFocus(None),
            ])
        );
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        let index = RegionIndex::new();
        let mut requests = VecDeque::new();
        let mut ctx = EventContext::new(&index, None, None, &mut requests);

        assert_eq!(ctx.set_focus("nope"), Err(InputError::unknown_region("nope")));
        assert!(ctx.remove_region("nope").is_err());
        assert!(ctx.target().is_none());
        assert!(requests.is_empty());
    }
}
