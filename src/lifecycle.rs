//! Lifecycle controller: reacts to host list-change notifications.
//!
//! The host notifies the controller whenever the message list regenerates
//! (index updated, list refreshed, mode entered). Each notification
//! discards all regions, re-runs the scanner, and reapplies visibility for
//! the current whole-view fold state. Activation subscribes to the host's
//! notification source and performs the initial apply; deactivation
//! unsubscribes and restores unmodified visibility.

use tracing::{debug, warn};

use crate::engine::{FoldEngine, FoldOutcome, ViewFold};
use crate::error::FoldError;
use crate::view::MessageListView;

/// External notifications the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// The message index behind the view changed (flags, new mail).
    IndexUpdated,
    /// The displayed list was found or repopulated.
    ListRefreshed,
    /// The message-list view mode was entered.
    ModeEntered,
}

/// Notification interface exposed by the host list component. The
/// controller subscribes on activate and unsubscribes on deactivate; the
/// host then feeds events into [`FoldController::handle_event`].
pub trait NotificationSource {
    fn subscribe(&mut self);
    fn unsubscribe(&mut self);
}

/// Drives the fold engine from lifecycle notifications and host commands.
#[derive(Debug, Default)]
pub struct FoldController {
    engine: FoldEngine,
    active: bool,
    /// Guard against the fold -> notify -> fold feedback loop: events
    /// raised while an apply is in flight are dropped.
    applying: bool,
}

impl FoldController {
    pub fn new(default_view: ViewFold) -> Self {
        Self {
            engine: FoldEngine::new(default_view),
            active: false,
            applying: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The engine, for visibility queries from the renderer.
    pub fn engine(&self) -> &FoldEngine {
        &self.engine
    }

    /// Subscribe to the host's notifications and apply the configured
    /// initial fold state to the current view.
    pub fn activate(&mut self, source: &mut dyn NotificationSource, view: &dyn MessageListView) {
        if self.active {
            return;
        }
        source.subscribe();
        self.active = true;
        self.apply(view);
        debug!("fold controller activated");
    }

    /// Unsubscribe and discard all fold state, restoring the view to
    /// unmodified visibility.
    pub fn deactivate(&mut self, source: &mut dyn NotificationSource) {
        if !self.active {
            return;
        }
        source.unsubscribe();
        self.engine.discard_regions();
        self.active = false;
        debug!("fold controller deactivated");
    }

    /// Handle a list-change notification: discard stale regions, re-scan,
    /// reapply the current whole-view fold state.
    pub fn handle_event(&mut self, event: ListEvent, view: &dyn MessageListView) {
        if !self.active {
            return;
        }
        if self.applying {
            warn!(?event, "dropping re-entrant list event during apply");
            return;
        }
        debug!(?event, "list changed, rebuilding fold regions");
        self.apply(view);
    }

    fn apply(&mut self, view: &dyn MessageListView) {
        self.applying = true;
        self.engine.discard_regions();
        // Read once, passed explicitly to the apply step.
        let state = self.engine.view_state();
        self.engine.apply_view_state(view, state);
        self.applying = false;
    }

    /// Guard shared by all command entry points: commands outside the
    /// supported view mode abort and force-discard leftover state.
    fn check_context(&mut self) -> Result<(), FoldError> {
        if self.active {
            Ok(())
        } else {
            self.engine.discard_regions();
            Err(FoldError::WrongContext)
        }
    }

    /// Resolve the view cursor; a view without a selection is simply not
    /// on a thread.
    fn point(view: &dyn MessageListView) -> Option<usize> {
        view.cursor()
    }

    pub fn fold_at_point(&mut self, view: &dyn MessageListView) -> Result<FoldOutcome, FoldError> {
        self.check_context()?;
        match Self::point(view) {
            Some(pos) => Ok(self.engine.fold_thread(view, pos)),
            None => Ok(FoldOutcome::NotAThread),
        }
    }

    pub fn unfold_at_point(
        &mut self,
        view: &dyn MessageListView,
    ) -> Result<FoldOutcome, FoldError> {
        self.check_context()?;
        match Self::point(view) {
            Some(pos) => Ok(self.engine.unfold_thread(view, pos)),
            None => Ok(FoldOutcome::NotAThread),
        }
    }

    pub fn toggle_at_point(
        &mut self,
        view: &dyn MessageListView,
    ) -> Result<FoldOutcome, FoldError> {
        self.check_context()?;
        match Self::point(view) {
            Some(pos) => Ok(self.engine.toggle_thread(view, pos)),
            None => Ok(FoldOutcome::NotAThread),
        }
    }

    pub fn fold_all(&mut self, view: &dyn MessageListView) -> Result<(), FoldError> {
        self.check_context()?;
        self.engine.fold_all(view);
        Ok(())
    }

    pub fn unfold_all(&mut self, view: &dyn MessageListView) -> Result<(), FoldError> {
        self.check_context()?;
        self.engine.unfold_all(view);
        Ok(())
    }

    pub fn toggle_all(&mut self, view: &dyn MessageListView) -> Result<(), FoldError> {
        self.check_context()?;
        self.engine.toggle_all(view);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{TestView, child, root, unread_child};

    #[derive(Debug, Default)]
    struct MockSource {
        subscribed: bool,
        subscribe_calls: usize,
        unsubscribe_calls: usize,
    }

    impl NotificationSource for MockSource {
        fn subscribe(&mut self) {
            self.subscribed = true;
            self.subscribe_calls += 1;
        }

        fn unsubscribe(&mut self) {
            self.subscribed = false;
            self.unsubscribe_calls += 1;
        }
    }

    fn folded_controller() -> FoldController {
        FoldController::new(ViewFold::Folded)
    }

    #[test]
    fn activate_subscribes_and_applies_default_view() {
        let view = TestView::new(vec![root(), child(), child()]);
        let mut source = MockSource::default();
        let mut ctl = folded_controller();

        ctl.activate(&mut source, &view);
        assert!(source.subscribed);
        assert!(ctl.is_active());
        // default_view = folded: read children hidden right away
        assert!(ctl.engine().is_row_hidden(1));
        assert!(ctl.engine().is_row_hidden(2));
    }

    #[test]
    fn activate_twice_subscribes_once() {
        let view = TestView::new(vec![root(), child()]);
        let mut source = MockSource::default();
        let mut ctl = folded_controller();

        ctl.activate(&mut source, &view);
        ctl.activate(&mut source, &view);
        assert_eq!(source.subscribe_calls, 1);
    }

    #[test]
    fn deactivate_unsubscribes_and_restores_visibility() {
        let view = TestView::new(vec![root(), child()]);
        let mut source = MockSource::default();
        let mut ctl = folded_controller();

        ctl.activate(&mut source, &view);
        assert!(ctl.engine().is_row_hidden(1));

        ctl.deactivate(&mut source);
        assert!(!source.subscribed);
        assert!(!ctl.is_active());
        assert!(!ctl.engine().is_row_hidden(1));
    }

    #[test]
    fn list_event_rebuilds_and_reapplies() {
        let mut view = TestView::new(vec![root(), child(), unread_child()]);
        let mut source = MockSource::default();
        let mut ctl = folded_controller();

        ctl.activate(&mut source, &view);
        assert!(!ctl.engine().is_row_hidden(2));

        // The unread child is read now; the index-updated notification must
        // rebuild the region so the reapply hides it.
        view.set_unread(2, false);
        ctl.handle_event(ListEvent::IndexUpdated, &view);
        assert!(ctl.engine().is_row_hidden(2));
    }

    #[test]
    fn list_event_preserves_unfolded_view_state() {
        let view = TestView::new(vec![root(), child()]);
        let mut source = MockSource::default();
        let mut ctl = FoldController::new(ViewFold::Unfolded);

        ctl.activate(&mut source, &view);
        ctl.handle_event(ListEvent::ListRefreshed, &view);
        assert_eq!(ctl.engine().view_state(), ViewFold::Unfolded);
        assert!(!ctl.engine().is_row_hidden(1));
    }

    #[test]
    fn events_ignored_when_inactive() {
        let view = TestView::new(vec![root(), child()]);
        let mut ctl = folded_controller();

        ctl.handle_event(ListEvent::ModeEntered, &view);
        assert!(!ctl.engine().is_row_hidden(1));
    }

    #[test]
    fn commands_fail_with_wrong_context_when_inactive() {
        let view = TestView::with_cursor(vec![root(), child()], 0);
        let mut ctl = folded_controller();

        assert!(matches!(
            ctl.toggle_at_point(&view),
            Err(FoldError::WrongContext)
        ));
        assert!(matches!(ctl.fold_all(&view), Err(FoldError::WrongContext)));
    }

    #[test]
    fn point_commands_use_view_cursor() {
        let view = TestView::with_cursor(vec![root(), child(), child()], 2);
        let mut source = MockSource::default();
        let mut ctl = FoldController::new(ViewFold::Unfolded);

        ctl.activate(&mut source, &view);
        let outcome = ctl.fold_at_point(&view).unwrap();
        assert_eq!(outcome, FoldOutcome::Folded);
        assert!(ctl.engine().is_row_hidden(1));

        let outcome = ctl.unfold_at_point(&view).unwrap();
        assert_eq!(outcome, FoldOutcome::Unfolded);
        assert!(!ctl.engine().is_row_hidden(1));
    }

    #[test]
    fn point_command_without_cursor_is_inert() {
        let view = TestView::new(vec![root(), child()]);
        let mut source = MockSource::default();
        let mut ctl = FoldController::new(ViewFold::Unfolded);

        ctl.activate(&mut source, &view);
        assert_eq!(ctl.toggle_at_point(&view).unwrap(), FoldOutcome::NotAThread);
    }

    #[test]
    fn toggle_all_round_trips_through_controller() {
        let view = TestView::new(vec![root(), child(), root(), child()]);
        let mut source = MockSource::default();
        let mut ctl = FoldController::new(ViewFold::Unfolded);

        ctl.activate(&mut source, &view);
        ctl.toggle_all(&view).unwrap();
        assert_eq!(ctl.engine().view_state(), ViewFold::Folded);
        assert_eq!(ctl.engine().hidden_rows(), vec![1, 3]);

        ctl.toggle_all(&view).unwrap();
        assert_eq!(ctl.engine().view_state(), ViewFold::Unfolded);
        assert!(ctl.engine().hidden_rows().is_empty());
    }
}
