//! Per-thread fold regions derived from scanner bounds.
//!
//! Regions are transient: they reference positions in the current view and
//! are rebuilt whenever the view regenerates. Nothing here survives a
//! lifecycle notification.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::scan::{self, ThreadBounds};
use crate::view::MessageListView;

/// Derived display state of a thread root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootStyle {
    /// All children visible.
    Unfolded,
    /// Read children hidden, unread children still visible.
    PartiallyUnfolded,
    /// Everything that could be hidden is hidden (no unread children).
    Folded,
}

/// Tagged ranges for one thread plus its fold flag.
///
/// `hidden` applies to `read_prefix` only; unread children are never
/// covered by it and therefore never hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub root: usize,
    pub children: Range<usize>,
    pub read_prefix: Range<usize>,
    pub hidden: bool,
}

impl Region {
    pub fn from_bounds(bounds: ThreadBounds) -> Self {
        Self {
            root: bounds.root,
            children: bounds.children,
            read_prefix: bounds.read_prefix,
            hidden: false,
        }
    }

    /// The fold flag is stored; the root style is always derived from it.
    pub fn root_style(&self) -> RootStyle {
        if !self.hidden {
            RootStyle::Unfolded
        } else if self.read_prefix == self.children {
            RootStyle::Folded
        } else {
            RootStyle::PartiallyUnfolded
        }
    }

    /// Whether `pos` is currently hidden by this region.
    pub fn hides(&self, pos: usize) -> bool {
        self.hidden && self.read_prefix.contains(&pos)
    }
}

/// Regions keyed by thread root position. BTreeMap iteration order gives
/// the top-to-bottom apply order for whole-view operations.
#[derive(Debug, Clone, Default)]
pub struct RegionMap {
    regions: BTreeMap<usize, Region>,
}

impl RegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every region. Called on every lifecycle notification so stale
    /// positions can never be applied to a regenerated view.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn get(&self, root: usize) -> Option<&Region> {
        self.regions.get(&root)
    }

    pub fn get_mut(&mut self, root: usize) -> Option<&mut Region> {
        self.regions.get_mut(&root)
    }

    pub fn insert(&mut self, region: Region) {
        self.regions.insert(region.root, region);
    }

    pub fn remove(&mut self, root: usize) -> Option<Region> {
        self.regions.remove(&root)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.regions.values_mut()
    }

    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.regions.keys().copied()
    }

    /// Fetch the region for `root`, rebuilding it from the view when absent
    /// or stale. A cached region is stale when the root row no longer scans
    /// to the same bounds (an un-notified external change); staleness is a
    /// cache miss, never an error. Returns `None` when the thread is not
    /// foldable.
    pub fn get_or_build(
        &mut self,
        view: &dyn MessageListView,
        root: usize,
    ) -> Option<&mut Region> {
        let fresh = scan::scan_thread_at(view, root);

        match fresh {
            Some(bounds) => {
                let stale = match self.regions.get(&root) {
                    Some(region) => {
                        region.children != bounds.children
                            || region.read_prefix != bounds.read_prefix
                    }
                    None => true,
                };
                if stale {
                    let hidden = self
                        .regions
                        .get(&root)
                        .map(|r| r.hidden)
                        .unwrap_or(false);
                    let mut region = Region::from_bounds(bounds);
                    region.hidden = hidden;
                    self.regions.insert(root, region);
                }
                self.regions.get_mut(&root)
            }
            None => {
                // Root vanished or lost its children: discard any leftover.
                self.regions.remove(&root);
                None
            }
        }
    }

    /// Rebuild the region for `root` from the view unconditionally,
    /// discarding the previous read/unread split. Used by unfold, where the
    /// split may have changed since the region was built.
    pub fn rebuild(&mut self, view: &dyn MessageListView, root: usize) -> Option<&mut Region> {
        self.regions.remove(&root);
        self.get_or_build(view, root)
    }

    /// Replace all regions with a fresh scan of the view. Fold flags are
    /// not carried over; callers apply the desired state afterwards.
    pub fn rebuild_all(&mut self, view: &dyn MessageListView) {
        self.regions.clear();
        for bounds in scan::scan(view) {
            self.insert(Region::from_bounds(bounds));
        }
    }

    /// Whether any region currently hides `pos`.
    pub fn hides(&self, pos: usize) -> bool {
        // Only the region whose child block contains pos can hide it; look
        // at the nearest root at or before pos.
        self.regions
            .range(..=pos)
            .next_back()
            .map(|(_, region)| region.hides(pos))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{TestView, child, root, unread_child};

    fn region(root: usize, children: Range<usize>, read_prefix: Range<usize>) -> Region {
        Region {
            root,
            children,
            read_prefix,
            hidden: false,
        }
    }

    #[test]
    fn root_style_derivation() {
        let mut r = region(0, 1..3, 1..3);
        assert_eq!(r.root_style(), RootStyle::Unfolded);
        r.hidden = true;
        assert_eq!(r.root_style(), RootStyle::Folded);

        let mut r = region(0, 1..4, 1..3);
        r.hidden = true;
        assert_eq!(r.root_style(), RootStyle::PartiallyUnfolded);
    }

    #[test]
    fn hides_only_within_read_prefix() {
        let mut r = region(0, 1..4, 1..3);
        r.hidden = true;
        assert!(!r.hides(0));
        assert!(r.hides(1));
        assert!(r.hides(2));
        assert!(!r.hides(3)); // unread child stays visible
        r.hidden = false;
        assert!(!r.hides(1));
    }

    #[test]
    fn map_hides_routes_to_owning_region() {
        let mut map = RegionMap::new();
        let mut a = region(0, 1..3, 1..3);
        a.hidden = true;
        map.insert(a);
        map.insert(region(3, 4..6, 4..6)); // not hidden

        assert!(!map.hides(0));
        assert!(map.hides(1));
        assert!(map.hides(2));
        assert!(!map.hides(3));
        assert!(!map.hides(4));
        assert!(!map.hides(9));
    }

    #[test]
    fn get_or_build_builds_lazily() {
        let view = TestView::new(vec![root(), child(), child()]);
        let mut map = RegionMap::new();
        assert!(map.is_empty());

        let r = map.get_or_build(&view, 0).unwrap();
        assert_eq!(r.children, 1..3);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_or_build_detects_stale_region() {
        let mut view = TestView::new(vec![root(), child(), unread_child()]);
        let mut map = RegionMap::new();
        {
            let r = map.get_or_build(&view, 0).unwrap();
            assert_eq!(r.read_prefix, 1..2);
            r.hidden = true;
        }

        // The unread child transitions to read without a notification; the
        // cached region no longer matches and must be rebuilt, keeping the
        // fold flag.
        view.set_unread(2, false);
        let r = map.get_or_build(&view, 0).unwrap();
        assert_eq!(r.read_prefix, 1..3);
        assert!(r.hidden);
    }

    #[test]
    fn get_or_build_discards_vanished_thread() {
        let view = TestView::new(vec![root(), child()]);
        let mut map = RegionMap::new();
        map.get_or_build(&view, 0).unwrap();

        // Regenerated view where position 0 is now childless.
        let view = TestView::new(vec![crate::fixture::bare_root()]);
        assert!(map.get_or_build(&view, 0).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn rebuild_discards_fold_flag_state_but_keeps_hidden_cleared() {
        let view = TestView::new(vec![root(), child(), child()]);
        let mut map = RegionMap::new();
        map.get_or_build(&view, 0).unwrap().hidden = true;

        let r = map.rebuild(&view, 0).unwrap();
        assert!(!r.hidden);
    }

    #[test]
    fn rebuild_all_replaces_everything() {
        let view = TestView::new(vec![root(), child(), root(), child(), child()]);
        let mut map = RegionMap::new();
        map.insert(region(7, 8..9, 8..9)); // stale leftover

        map.rebuild_all(&view);
        assert_eq!(map.len(), 2);
        assert_eq!(map.roots().collect::<Vec<_>>(), vec![0, 2]);
        assert!(map.iter().all(|r| !r.hidden));
    }
}
