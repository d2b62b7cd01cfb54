//! Shared test fixtures: a Vec-backed view and terse row builders.

use crate::view::{MessageListView, Row, RowFlags, ThreadRole};

/// In-memory message-list view for tests.
#[derive(Debug, Clone, Default)]
pub struct TestView {
    pub rows: Vec<Row>,
    pub cursor: Option<usize>,
}

impl TestView {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows, cursor: None }
    }

    pub fn with_cursor(rows: Vec<Row>, cursor: usize) -> Self {
        Self {
            rows,
            cursor: Some(cursor),
        }
    }

    /// Flip a child row between read and unread in place.
    pub fn set_unread(&mut self, pos: usize, unread: bool) {
        let row = &mut self.rows[pos];
        row.flags.set(RowFlags::UNREAD, unread);
    }
}

impl MessageListView for TestView {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, pos: usize) -> Option<Row> {
        self.rows.get(pos).copied()
    }

    fn cursor(&self) -> Option<usize> {
        self.cursor
    }
}

/// Root row with children below it.
pub fn root() -> Row {
    Row::new(ThreadRole::Root, RowFlags::HAS_CHILDREN)
}

/// Root row with no children (degenerate single-message thread).
pub fn bare_root() -> Row {
    Row::new(ThreadRole::Root, RowFlags::empty())
}

/// Orphan row with children below it.
pub fn orphan() -> Row {
    Row::new(ThreadRole::Orphan, RowFlags::HAS_CHILDREN)
}

/// Read child row.
pub fn child() -> Row {
    Row::new(ThreadRole::Child, RowFlags::empty())
}

/// Unread child row.
pub fn unread_child() -> Row {
    Row::new(ThreadRole::Child, RowFlags::UNREAD)
}

/// Row with no thread metadata.
pub fn plain() -> Row {
    Row::new(ThreadRole::None, RowFlags::empty())
}
