//! Row model and the read-only view interface the host implements.
//!
//! The host message list owns the rows; this crate only reads them.
//! Positions are plain indices into the current view and are only valid
//! until the host regenerates the list.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Thread-membership role of a displayed row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadRole {
    /// First message of a thread.
    Root,
    /// Descendant message, displayed directly below its thread's root.
    Child,
    /// Message whose parent is not in the view; treated as a root for
    /// boundary purposes.
    Orphan,
    /// Row with no thread metadata (separators, section headers).
    #[default]
    None,
}

impl ThreadRole {
    /// Whether this role can start a thread (root or orphan).
    pub fn is_root(self) -> bool {
        matches!(self, Self::Root | Self::Orphan)
    }

    pub fn is_child(self) -> bool {
        matches!(self, Self::Child)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct RowFlags: u32 {
        /// The message has not been read.
        const UNREAD = 0b00000001;
        /// The row is a root with at least one child below it.
        /// Only meaningful on root/orphan rows.
        const HAS_CHILDREN = 0b00000010;
    }
}

/// A single displayed line of the message list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Row {
    pub role: ThreadRole,
    pub flags: RowFlags,
}

impl Row {
    pub fn new(role: ThreadRole, flags: RowFlags) -> Self {
        Self { role, flags }
    }

    pub fn is_unread(&self) -> bool {
        self.flags.contains(RowFlags::UNREAD)
    }

    pub fn has_children(&self) -> bool {
        self.flags.contains(RowFlags::HAS_CHILDREN)
    }
}

/// Read-only access to the current message-list view.
///
/// Implemented by the host list component. The fold engine never mutates
/// rows through this trait; it only derives fold regions from it.
pub trait MessageListView {
    /// Number of rows currently displayed.
    fn row_count(&self) -> usize;

    /// Row at `pos`, or `None` past the end of the view.
    fn row(&self, pos: usize) -> Option<Row>;

    /// Current cursor row, for operate-on-thread-at-point commands.
    /// `None` when the view has no selection.
    fn cursor(&self) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_classification() {
        assert!(ThreadRole::Root.is_root());
        assert!(ThreadRole::Orphan.is_root());
        assert!(!ThreadRole::Child.is_root());
        assert!(!ThreadRole::None.is_root());
        assert!(ThreadRole::Child.is_child());
        assert!(!ThreadRole::Root.is_child());
    }

    #[test]
    fn row_flag_accessors() {
        let row = Row::new(ThreadRole::Root, RowFlags::HAS_CHILDREN);
        assert!(row.has_children());
        assert!(!row.is_unread());

        let row = Row::new(ThreadRole::Child, RowFlags::UNREAD);
        assert!(row.is_unread());
        assert!(!row.has_children());
    }
}
