//! Error taxonomy.
//!
//! Almost everything that can go wrong during folding is absorbed as an
//! inert no-op (`FoldOutcome::NotAThread` / `NotFoldable`) or handled as a
//! cache miss (stale regions are rebuilt, never surfaced). The only true
//! error is dispatching a command in the wrong context.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FoldError {
    /// A fold command was dispatched while folding was not active in the
    /// current view mode. The operation is aborted and fold state is
    /// forcibly discarded; the message is suitable for the host status bar.
    #[error("thread folding is not active in this view")]
    WrongContext,
}
