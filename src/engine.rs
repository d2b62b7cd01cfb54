//! Folding engine: per-thread and whole-view fold operations.
//!
//! The engine owns the region map and the process-wide fold state. All
//! operations run synchronously to completion against the current view;
//! the host is single-threaded so no locking is needed.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::region::{RegionMap, RootStyle};
use crate::scan;
use crate::view::MessageListView;

/// Whole-view fold state. Set by the last whole-view operation and used to
/// reapply visibility after the view regenerates. Per-thread operations
/// never touch it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewFold {
    Folded,
    #[default]
    Unfolded,
}

/// Result of a per-thread fold operation. The first two are inert
/// successes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    /// The position does not resolve to any thread.
    NotAThread,
    /// The thread has no children; nothing to fold.
    NotFoldable,
    /// All children hidden (none were unread).
    Folded,
    /// Read children hidden; unread children remain visible.
    PartiallyUnfolded,
    /// All children visible.
    Unfolded,
}

/// One of the four named visual styles the host maps to its own styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualStyle {
    RootFolded,
    RootUnfolded,
    ChildFolded,
    ChildUnfolded,
}

/// Visibility directive for a contiguous row range, consumed by the host
/// renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub range: Range<usize>,
    pub hidden: bool,
    pub style: VisualStyle,
}

/// Owns fold regions and answers visibility queries for the renderer.
#[derive(Debug, Clone, Default)]
pub struct FoldEngine {
    regions: RegionMap,
    view_state: ViewFold,
}

impl FoldEngine {
    pub fn new(default_view: ViewFold) -> Self {
        Self {
            regions: RegionMap::new(),
            view_state: default_view,
        }
    }

    /// Current whole-view fold state.
    pub fn view_state(&self) -> ViewFold {
        self.view_state
    }

    /// Hide the read-children prefix of the thread at `pos` (any row of the
    /// thread). Lazily builds the region when absent. Inert success when
    /// the position resolves to no thread or the thread is not foldable.
    pub fn fold_thread(&mut self, view: &dyn MessageListView, pos: usize) -> FoldOutcome {
        let Some(root) = scan::resolve_root(view, pos) else {
            return FoldOutcome::NotAThread;
        };
        let Some(region) = self.regions.get_or_build(view, root) else {
            return FoldOutcome::NotFoldable;
        };

        region.hidden = true;
        let outcome = match region.root_style() {
            RootStyle::Folded => FoldOutcome::Folded,
            _ => FoldOutcome::PartiallyUnfolded,
        };
        debug!(root, ?outcome, "fold thread");
        outcome
    }

    /// Show all children of the thread at `pos`. Forces region recreation:
    /// the read/unread split may have changed since the region was built.
    pub fn unfold_thread(&mut self, view: &dyn MessageListView, pos: usize) -> FoldOutcome {
        let Some(root) = scan::resolve_root(view, pos) else {
            return FoldOutcome::NotAThread;
        };
        let Some(region) = self.regions.rebuild(view, root) else {
            return FoldOutcome::NotFoldable;
        };

        region.hidden = false;
        debug!(root, "unfold thread");
        FoldOutcome::Unfolded
    }

    /// Fold or unfold the thread at `pos` based on its current fold flag.
    pub fn toggle_thread(&mut self, view: &dyn MessageListView, pos: usize) -> FoldOutcome {
        if self.is_folded(view, pos) {
            self.unfold_thread(view, pos)
        } else {
            self.fold_thread(view, pos)
        }
    }

    /// Whether the thread at `pos` currently has its read prefix hidden.
    /// False when the thread has no region or is not foldable.
    pub fn is_folded(&self, view: &dyn MessageListView, pos: usize) -> bool {
        scan::resolve_root(view, pos)
            .and_then(|root| self.regions.get(root))
            .map(|region| region.hidden)
            .unwrap_or(false)
    }

    /// Re-scan the whole view and fold every thread top-to-bottom.
    pub fn fold_all(&mut self, view: &dyn MessageListView) {
        self.regions.rebuild_all(view);
        for region in self.regions.iter_mut() {
            region.hidden = true;
        }
        self.view_state = ViewFold::Folded;
        debug!(threads = self.regions.len(), "fold all");
    }

    /// Re-scan the whole view and unfold every thread. The rebuild discards
    /// regions based on stale read/unread computation, so children that
    /// transitioned from unread to read since the last build fold correctly
    /// afterwards.
    pub fn unfold_all(&mut self, view: &dyn MessageListView) {
        self.regions.rebuild_all(view);
        self.view_state = ViewFold::Unfolded;
        debug!(threads = self.regions.len(), "unfold all");
    }

    /// Unfold everything when the view state is folded, else fold
    /// everything.
    pub fn toggle_all(&mut self, view: &dyn MessageListView) {
        match self.view_state {
            ViewFold::Folded => self.unfold_all(view),
            ViewFold::Unfolded => self.fold_all(view),
        }
    }

    /// Reapply visibility for an explicitly supplied view state, without
    /// treating it as a new whole-view operation. Used by the lifecycle
    /// controller after the view regenerates.
    pub fn apply_view_state(&mut self, view: &dyn MessageListView, state: ViewFold) {
        match state {
            ViewFold::Folded => self.fold_all(view),
            ViewFold::Unfolded => self.unfold_all(view),
        }
    }

    /// Drop all regions, restoring unmodified visibility.
    pub fn discard_regions(&mut self) {
        self.regions.clear();
    }

    /// Whether the row at `pos` is currently hidden.
    pub fn is_row_hidden(&self, pos: usize) -> bool {
        self.regions.hides(pos)
    }

    /// All currently hidden row positions, in ascending order.
    pub fn hidden_rows(&self) -> Vec<usize> {
        self.regions
            .iter()
            .filter(|region| region.hidden)
            .flat_map(|region| region.read_prefix.clone())
            .collect()
    }

    /// Visibility directives for every tracked region, in view order.
    /// The host maps the four styles to its own styling.
    pub fn directives(&self) -> Vec<Directive> {
        let mut out = Vec::with_capacity(self.regions.len() * 3);
        for region in self.regions.iter() {
            let root_style = match region.root_style() {
                RootStyle::Folded => VisualStyle::RootFolded,
                // Partially unfolded roots show unfolded styling: visible
                // unread children remain below them.
                RootStyle::Unfolded | RootStyle::PartiallyUnfolded => VisualStyle::RootUnfolded,
            };
            out.push(Directive {
                range: region.root..region.root + 1,
                hidden: false,
                style: root_style,
            });

            if region.hidden && !region.read_prefix.is_empty() {
                out.push(Directive {
                    range: region.read_prefix.clone(),
                    hidden: true,
                    style: VisualStyle::ChildFolded,
                });
            }

            let visible_start = if region.hidden {
                region.read_prefix.end
            } else {
                region.children.start
            };
            if visible_start < region.children.end {
                out.push(Directive {
                    range: visible_start..region.children.end,
                    hidden: false,
                    style: VisualStyle::ChildUnfolded,
                });
            }
        }
        out
    }
}
