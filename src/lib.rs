//! Collapsible thread folding for terminal email clients.
//!
//! Given a flat, ordered message-list view whose rows carry thread
//! metadata, this crate detects thread boundaries, maintains per-thread
//! foldable regions that hide read replies while always keeping unread
//! replies visible, and lets the host toggle fold state per thread or for
//! the whole view. Fold state survives list regeneration: the host
//! notifies the [`lifecycle::FoldController`] when its list changes and
//! the controller re-scans and reapplies visibility.
//!
//! The host side implements two small traits: [`view::MessageListView`]
//! (read-only row access plus the cursor) and
//! [`lifecycle::NotificationSource`] (subscribe/unsubscribe for list
//! change notifications). The renderer consumes visibility answers from
//! [`engine::FoldEngine`]: `is_row_hidden`, `hidden_rows`, or the full
//! [`engine::Directive`] list with the four named visual styles.

pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod logging;
pub mod region;
pub mod scan;
pub mod theme;
pub mod view;

#[cfg(test)]
pub(crate) mod fixture;

pub use command::{CommandResult, FoldCommand, available_commands, parse_command};
pub use config::FoldConfig;
pub use engine::{Directive, FoldEngine, FoldOutcome, ViewFold, VisualStyle};
pub use error::FoldError;
pub use lifecycle::{FoldController, ListEvent, NotificationSource};
pub use region::{Region, RootStyle};
pub use scan::{ThreadBounds, resolve_root, scan};
pub use view::{MessageListView, Row, RowFlags, ThreadRole};
