//! Thread-boundary detection over the message-list view.
//!
//! A thread is a maximal contiguous run of rows: one root (or orphan)
//! followed by zero or more child rows, terminated by the next root/orphan
//! or end of view. The scanner walks the view once and emits bounds only
//! for foldable threads (roots with at least one child).

use std::ops::Range;

use tracing::trace;

use crate::view::MessageListView;

/// Boundaries of a single foldable thread, in view positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadBounds {
    /// Position of the root row.
    pub root: usize,
    /// Full child block, first child to one past the last child.
    pub children: Range<usize>,
    /// Leading run of read children: first child up to (exclusive) the
    /// first unread child. Equals `children` when no child is unread;
    /// empty when the first child is unread.
    pub read_prefix: Range<usize>,
}

impl ThreadBounds {
    /// True when every child is read, i.e. folding hides the whole block.
    pub fn fully_foldable(&self) -> bool {
        self.read_prefix == self.children
    }
}

/// Walk the view once and produce ordered bounds for every foldable thread.
///
/// Roots without children are skipped: they have nothing to fold. Rows
/// with no thread metadata never extend a child block.
pub fn scan(view: &dyn MessageListView) -> Vec<ThreadBounds> {
    let count = view.row_count();
    let mut threads = Vec::new();
    let mut pos = 0;

    while pos < count {
        match scan_thread_at(view, pos) {
            Some(bounds) => {
                trace!(
                    root = bounds.root,
                    children = ?bounds.children,
                    read_prefix = ?bounds.read_prefix,
                    "thread bounds"
                );
                pos = bounds.children.end;
                threads.push(bounds);
            }
            None => pos += 1,
        }
    }

    threads
}

/// Scan the single thread rooted at `root`. Returns `None` when the row is
/// not a root/orphan or has no children in the view (not foldable). A root
/// whose `HAS_CHILDREN` flag is stale and is immediately followed by a
/// non-child row also yields `None`.
pub fn scan_thread_at(view: &dyn MessageListView, root: usize) -> Option<ThreadBounds> {
    let row = view.row(root)?;
    if !(row.role.is_root() && row.has_children()) {
        return None;
    }

    let child_start = root + 1;
    let mut child_end = child_start;
    let mut first_unread = None;
    while let Some(child) = view.row(child_end) {
        if !child.role.is_child() {
            break;
        }
        if child.is_unread() && first_unread.is_none() {
            first_unread = Some(child_end);
        }
        child_end += 1;
    }

    if child_end == child_start {
        return None;
    }

    Some(ThreadBounds {
        root,
        children: child_start..child_end,
        read_prefix: child_start..first_unread.unwrap_or(child_end),
    })
}

/// Resolve an arbitrary row to its thread root.
///
/// A root/orphan row resolves to itself; a child row walks backward to the
/// nearest preceding root/orphan. Returns `None` when the row carries no
/// thread metadata or the backward walk hits start-of-view without finding
/// a root (no resolvable thread).
pub fn resolve_root(view: &dyn MessageListView, pos: usize) -> Option<usize> {
    let row = view.row(pos)?;
    if row.role.is_root() {
        return Some(pos);
    }
    if !row.role.is_child() {
        return None;
    }

    let mut cur = pos;
    while cur > 0 {
        cur -= 1;
        let row = view.row(cur)?;
        if row.role.is_root() {
            return Some(cur);
        }
        if !row.role.is_child() {
            // A non-thread row between here and any root: the child block
            // is broken, so the row has no resolvable thread.
            return None;
        }
    }
    None
}
