//! Registry of regions with point-containment queries.
//!
//! [`RegionIndex`] owns the registered regions and their handlers, keyed by
//! unique name. It holds no device state: which regions are entered or
//! focused is the dispatcher's business.
//!
//! # Ordering
//!
//! Queries return regions in descending sort key order, so the topmost
//! region comes first. Regions with equal sort keys are ordered by
//! registration, earliest first, which keeps every query deterministic.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::error::{InputError, Result};
use crate::geometry::Point;
use crate::logging::targets;
use crate::region::{Region, RegionHandler};

new_key_type! {
    /// A stable handle to a registered region.
    ///
    /// Keys are never reused: once a region is removed its key stays dead,
    /// even if a new region is registered under the same name.
    pub struct RegionKey;
}

struct RegionEntry {
    region: Region,
    /// Registration sequence number, the tie-breaker for equal sort keys.
    seq: u64,
    handler: Option<Box<dyn RegionHandler>>,
}

/// An ordered collection of regions supporting hit testing.
#[derive(Default)]
pub struct RegionIndex {
    entries: SlotMap<RegionKey, RegionEntry>,
    names: HashMap<String, RegionKey>,
    next_seq: u64,
}

impl RegionIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered regions, active or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a region without a handler.
    ///
    /// Fails with [`InputError::DuplicateName`] if the name is taken; the
    /// index is unchanged in that case.
    pub fn add(&mut self, region: Region) -> Result<RegionKey> {
        self.insert(region, None)
    }

    /// Register a region together with its handler.
    pub fn add_with_handler(
        &mut self,
        region: Region,
        handler: impl RegionHandler + 'static,
    ) -> Result<RegionKey> {
        self.insert(region, Some(Box::new(handler)))
    }

    fn insert(
        &mut self,
        region: Region,
        handler: Option<Box<dyn RegionHandler>>,
    ) -> Result<RegionKey> {
        if self.names.contains_key(region.name()) {
            return Err(InputError::duplicate_name(region.name()));
        }

        let name = region.name().to_owned();
        let seq = self.next_seq;
        self.next_seq += 1;

        tracing::debug!(
            target: targets::REGION,
            region = %name,
            sort = region.sort(),
            active = region.is_active(),
            "registered region"
        );

        let key = self.entries.insert(RegionEntry {
            region,
            seq,
            handler,
        });
        self.names.insert(name, key);
        Ok(key)
    }

    /// Remove a region's registration, returning whether it existed.
    ///
    /// This does not emit any event. Use
    /// [`Dispatcher::remove_region`](crate::Dispatcher::remove_region) for
    /// regions that may be entered.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.names.get(name) {
            Some(&key) => self.remove_key(key).is_some(),
            None => false,
        }
    }

    pub(crate) fn remove_key(&mut self, key: RegionKey) -> Option<Region> {
        let entry = self.entries.remove(key)?;
        self.names.remove(entry.region.name());
        tracing::debug!(target: targets::REGION, region = %entry.region.name(), "removed region");
        Some(entry.region)
    }

    /// Look up the key of a registered region.
    pub fn key(&self, name: &str) -> Option<RegionKey> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.key(name).and_then(|key| self.by_key(key))
    }

    /// Mutable access to a region's bounds, sort key and flags.
    ///
    /// The active flag cannot be changed here; see [`RegionIndex::set_active`].
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Region> {
        let key = self.key(name)?;
        self.entries.get_mut(key).map(|entry| &mut entry.region)
    }

    pub fn by_key(&self, key: RegionKey) -> Option<&Region> {
        self.entries.get(key).map(|entry| &entry.region)
    }

    /// Change a region's active flag, returning the previous value.
    pub fn set_active(&mut self, name: &str, active: bool) -> Result<bool> {
        let key = self.key(name).ok_or_else(|| InputError::unknown_region(name))?;
        self.set_active_key(key, active)
            .ok_or_else(|| InputError::unknown_region(name))
    }

    pub(crate) fn set_active_key(&mut self, key: RegionKey, active: bool) -> Option<bool> {
        let region = &mut self.entries.get_mut(key)?.region;
        let previous = region.is_active();
        region.set_active(active);
        if previous != active {
            tracing::debug!(target: targets::REGION, region = %region.name(), active, "region activation changed");
        }
        Some(previous)
    }

    /// Install a handler on a region, returning the one it replaces.
    pub fn set_handler(
        &mut self,
        name: &str,
        handler: impl RegionHandler + 'static,
    ) -> Result<Option<Box<dyn RegionHandler>>> {
        let key = self.key(name).ok_or_else(|| InputError::unknown_region(name))?;
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| InputError::unknown_region(name))?;
        Ok(entry.handler.replace(Box::new(handler)))
    }

    /// All registered regions in registration order.
    pub fn regions(&self) -> Vec<&Region> {
        let mut entries: Vec<&RegionEntry> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries.into_iter().map(|entry| &entry.region).collect()
    }

    /// All active regions containing `point`, topmost first.
    ///
    /// The walk stops after the first region that suppresses the regions
    /// below it, so nothing behind a modal region is returned.
    pub fn hit_test(&self, point: Point) -> Vec<&Region> {
        self.hit_keys(point)
            .into_iter()
            .filter_map(|key| self.by_key(key))
            .collect()
    }

    /// All active global regions, topmost first, regardless of position.
    pub fn global_regions(&self) -> Vec<&Region> {
        self.global_keys()
            .into_iter()
            .filter_map(|key| self.by_key(key))
            .collect()
    }

    pub(crate) fn hit_keys(&self, point: Point) -> Vec<RegionKey> {
        let mut hits: Vec<RegionKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.region.hit(point))
            .map(|(key, _)| key)
            .collect();
        self.sort_descending(&mut hits);

        let mut result = Vec::with_capacity(hits.len());
        for key in hits {
            result.push(key);
            if self.entries[key].region.suppresses_below() {
                break;
            }
        }
        result
    }

    pub(crate) fn global_keys(&self) -> Vec<RegionKey> {
        let mut keys: Vec<RegionKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.region.is_active() && entry.region.is_global())
            .map(|(key, _)| key)
            .collect();
        self.sort_descending(&mut keys);
        keys
    }

    /// Sort topmost first, dropping keys that are no longer registered.
    pub(crate) fn sort_descending(&self, keys: &mut Vec<RegionKey>) {
        keys.retain(|key| self.entries.contains_key(*key));
        keys.sort_by_key(|key| {
            let entry = &self.entries[*key];
            (Reverse(entry.region.sort()), entry.seq)
        });
    }

    /// Sort bottommost first, dropping keys that are no longer registered.
    pub(crate) fn sort_ascending(&self, keys: &mut Vec<RegionKey>) {
        keys.retain(|key| self.entries.contains_key(*key));
        keys.sort_by_key(|key| {
            let entry = &self.entries[*key];
            (entry.region.sort(), entry.seq)
        });
    }

    /// Take a region's handler out for the duration of one callback.
    pub(crate) fn take_handler(&mut self, key: RegionKey) -> Option<Box<dyn RegionHandler>> {
        self.entries.get_mut(key)?.handler.take()
    }

    /// Put a handler back after a callback, unless the region has since
    /// been given a new handler or removed.
    pub(crate) fn restore_handler(&mut self, key: RegionKey, handler: Box<dyn RegionHandler>) {
        if let Some(entry) = self.entries.get_mut(key) {
            if entry.handler.is_none() {
                entry.handler = Some(handler);
            }
        }
    }
}

impl fmt::Debug for RegionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.regions()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn square(name: &str, sort: i32) -> Region {
        Region::new(name, Rect::new(-0.5, 0.5, -0.5, 0.5)).with_sort(sort)
    }

    fn names(regions: Vec<&Region>) -> Vec<&str> {
        regions.into_iter().map(Region::name).collect()
    }

    #[test]
    fn test_add_rejects_duplicate_names() {
        let mut index = RegionIndex::new();
        index.add(square("a", 1)).unwrap();

        let err = index.add(square("a", 7)).unwrap_err();
        assert_eq!(err, InputError::duplicate_name("a"));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a").unwrap().sort(), 1);
    }

    #[test]
    fn test_remove_reports_existence() {
        let mut index = RegionIndex::new();
        let key = index.add(square("a", 0)).unwrap();

        assert!(index.remove("a"));
        assert!(!index.remove("a"));
        assert!(index.by_key(key).is_none());

        // The name is free again, and the old key stays dead.
        let new_key = index.add(square("a", 0)).unwrap();
        assert_ne!(key, new_key);
        assert!(index.by_key(key).is_none());
    }

    #[test]
    fn test_hit_test_orders_by_sort_then_registration() {
        let mut index = RegionIndex::new();
        index.add(square("low", 1)).unwrap();
        index.add(square("high", 5)).unwrap();
        index.add(square("tie_first", 3)).unwrap();
        index.add(square("tie_second", 3)).unwrap();
        index
            .add(Region::new("elsewhere", Rect::new(0.8, 1.0, 0.8, 1.0)).with_sort(9))
            .unwrap();

        assert_eq!(
            names(index.hit_test(Point::ZERO)),
            vec!["high", "tie_first", "tie_second", "low"]
        );
    }

    #[test]
    fn test_hit_test_stops_at_suppressor() {
        let mut index = RegionIndex::new();
        index.add(square("background", 0)).unwrap();
        index.add(square("modal", 2).with_suppress_below(true)).unwrap();
        index.add(square("tooltip", 3)).unwrap();
        index.add(square("same_level", 2)).unwrap();

        assert_eq!(names(index.hit_test(Point::ZERO)), vec!["tooltip", "modal"]);
    }

    #[test]
    fn test_suppression_is_local_to_its_bounds() {
        let mut index = RegionIndex::new();
        index.add(Region::new("background", Rect::FULL)).unwrap();
        index.add(square("modal", 2).with_suppress_below(true)).unwrap();

        assert_eq!(names(index.hit_test(Point::ZERO)), vec!["modal"]);
        assert_eq!(names(index.hit_test(Point::new(0.9, 0.9))), vec!["background"]);
    }

    #[test]
    fn test_inactive_regions_are_skipped() {
        let mut index = RegionIndex::new();
        index.add(square("a", 0)).unwrap();
        index.add(square("modal", 1).with_suppress_below(true)).unwrap();

        assert!(index.set_active("modal", false).unwrap());
        assert_eq!(names(index.hit_test(Point::ZERO)), vec!["a"]);
        assert!(index.contains("modal"));

        assert_eq!(
            index.set_active("missing", true),
            Err(InputError::unknown_region("missing"))
        );
    }

    #[test]
    fn test_global_regions() {
        let mut index = RegionIndex::new();
        index.add(square("plain", 9)).unwrap();
        index.add(square("ime", 1).with_global(true)).unwrap();
        index.add(square("log", 4).with_global(true)).unwrap();
        index
            .add(square("off", 8).with_global(true).with_active(false))
            .unwrap();

        assert_eq!(names(index.global_regions()), vec!["log", "ime"]);
    }

    #[test]
    fn test_regions_in_registration_order() {
        let mut index = RegionIndex::new();
        index.add(square("c", 0)).unwrap();
        index.add(square("a", 0)).unwrap();
        index.add(square("b", 0)).unwrap();
        index.remove("a");
        index.add(square("d", 0)).unwrap();

        assert_eq!(names(index.regions()), vec!["c", "b", "d"]);
    }

    #[test]
    fn test_sort_helpers() {
        let mut index = RegionIndex::new();
        let a = index.add(square("a", 2)).unwrap();
        let b = index.add(square("b", 1)).unwrap();
        let c = index.add(square("c", 3)).unwrap();
        index.remove("b");

        let mut keys = vec![a, b, c];
        index.sort_ascending(&mut keys);
        assert_eq!(keys, vec![a, c]);

        index.sort_descending(&mut keys);
        assert_eq!(keys, vec![c, a]);
    }
}
