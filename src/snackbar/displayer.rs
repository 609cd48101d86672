//! Serialized display queue for snackbar messages.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::reactive::{Property, UiScheduler};
use crate::snackbar::entity::SnackbarEntity;

struct QueueState {
    queue: VecDeque<SnackbarEntity>,
    /// Identity of the entity currently on screen. The displayed entity
    /// stays at its queue position until dismissed.
    active: Option<Uuid>,
}

struct DisplayerShared {
    state: Mutex<QueueState>,
    current: Property<Option<SnackbarEntity>>,
}

/// FIFO queue of transient messages showing at most one at a time.
///
/// Every queue mutation passes through one mutex, so enqueue-and-advance is
/// a single atomic step: two messages can never display simultaneously and
/// a message can never be skipped. The entity on screen is published
/// through an observable the host view renders from.
#[derive(Clone)]
pub struct SnackbarDisplayer {
    shared: Arc<DisplayerShared>,
}

impl SnackbarDisplayer {
    pub fn new(scheduler: &UiScheduler) -> Self {
        Self {
            shared: Arc::new(DisplayerShared {
                state: Mutex::new(QueueState {
                    queue: VecDeque::new(),
                    active: None,
                }),
                current: Property::new(scheduler, None),
            }),
        }
    }

    /// The entity currently on screen, as an observable for the host view.
    pub fn current(&self) -> &Property<Option<SnackbarEntity>> {
        &self.shared.current
    }

    /// Enqueue a message and show it if nothing is on screen.
    ///
    /// A message equal to the queue tail is dropped, so hammering the same
    /// event does not stack identical snackbars.
    pub fn display(&self, entity: SnackbarEntity) {
        let mut state = self.shared.state.lock();
        if state.queue.back().is_some_and(|tail| *tail == entity) {
            tracing::debug!(text = entity.text(), "duplicate snackbar suppressed");
            return;
        }
        state.queue.push_back(entity);
        self.advance_locked(&mut state);
    }

    /// Remove `entity` from the queue, whether it is on screen or still
    /// pending, and advance to the next message.
    ///
    /// Lookup is by identity first; for an entity reconstructed rather than
    /// cloned, the oldest equal entry is removed instead.
    pub fn dismiss(&self, entity: &SnackbarEntity) {
        let removed = {
            let mut state = self.shared.state.lock();
            let position = state
                .queue
                .iter()
                .position(|queued| queued.id() == entity.id())
                .or_else(|| state.queue.iter().position(|queued| queued == entity));
            let Some(position) = position else {
                return;
            };
            let Some(removed) = state.queue.remove(position) else {
                return;
            };
            if state.active == Some(removed.id()) {
                state.active = None;
                self.shared.current.set(None);
                self.advance_locked(&mut state);
            }
            removed
        };
        // Outside the lock: the callback may display another snackbar.
        removed.run_on_dismiss();
    }

    /// Dismiss whatever is currently on screen.
    pub fn dismiss_current(&self) {
        let current = self.active_entity();
        if let Some(current) = current {
            self.dismiss(&current);
        }
    }

    /// Fire the on-screen entity's action callback, then dismiss it.
    pub fn activate_action(&self) {
        let current = self.active_entity();
        if let Some(current) = current {
            current.run_action();
            self.dismiss(&current);
        }
    }

    /// True while an entity is on screen.
    pub fn is_displaying(&self) -> bool {
        self.shared.state.lock().active.is_some()
    }

    /// Number of queued entities, including the one on screen.
    pub fn queued_len(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    fn active_entity(&self) -> Option<SnackbarEntity> {
        let state = self.shared.state.lock();
        let active = state.active?;
        state
            .queue
            .iter()
            .find(|queued| queued.id() == active)
            .cloned()
    }

    fn advance_locked(&self, state: &mut QueueState) {
        if state.active.is_some() {
            return;
        }
        if let Some(head) = state.queue.front() {
            state.active = Some(head.id());
            self.shared.current.set(Some(head.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn displayer() -> (UiScheduler, SnackbarDisplayer) {
        let scheduler = UiScheduler::new();
        let displayer = SnackbarDisplayer::new(&scheduler);
        (scheduler, displayer)
    }

    #[test]
    fn first_message_displays_immediately() {
        let (scheduler, displayer) = displayer();
        displayer.display(SnackbarEntity::new("Saved"));
        scheduler.flush();
        assert!(displayer.is_displaying());
        assert_eq!(
            displayer.current().get().map(|e| e.text().to_string()),
            Some("Saved".to_string())
        );
    }

    #[test]
    fn second_message_waits_behind_the_first() {
        let (scheduler, displayer) = displayer();
        displayer.display(SnackbarEntity::new("first"));
        displayer.display(SnackbarEntity::new("second"));
        scheduler.flush();
        assert_eq!(displayer.queued_len(), 2);
        assert_eq!(
            displayer.current().get().map(|e| e.text().to_string()),
            Some("first".to_string())
        );
    }

    #[test]
    fn duplicate_tail_is_dropped() {
        let (_scheduler, displayer) = displayer();
        displayer.display(SnackbarEntity::new("Saved"));
        displayer.display(SnackbarEntity::new("Saved"));
        assert_eq!(displayer.queued_len(), 1);
    }

    #[test]
    fn dismiss_advances_to_next() {
        let (scheduler, displayer) = displayer();
        displayer.display(SnackbarEntity::new("first"));
        displayer.display(SnackbarEntity::new("second"));
        scheduler.flush();
        displayer.dismiss_current();
        scheduler.flush();
        assert_eq!(
            displayer.current().get().map(|e| e.text().to_string()),
            Some("second".to_string())
        );
        assert_eq!(displayer.queued_len(), 1);
    }

    #[test]
    fn dismiss_fires_the_dismiss_callback() {
        let (scheduler, displayer) = displayer();
        let fired = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&fired);
        displayer.display(SnackbarEntity::new("bye").with_on_dismiss(move || {
            sink.fetch_add(1, Ordering::SeqCst);
        }));
        scheduler.flush();
        displayer.dismiss_current();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dismissing_a_pending_entity_keeps_the_current_one() {
        let (scheduler, displayer) = displayer();
        let first = SnackbarEntity::new("first");
        let second = SnackbarEntity::new("second");
        displayer.display(first);
        displayer.display(second.clone());
        scheduler.flush();

        displayer.dismiss(&second);
        scheduler.flush();
        assert_eq!(
            displayer.current().get().map(|e| e.text().to_string()),
            Some("first".to_string())
        );
        assert_eq!(displayer.queued_len(), 1);
    }

    #[test]
    fn identity_removal_picks_the_dismissed_instance() {
        // Two equal-but-distinct entities in the queue: dismissing the
        // later one must not touch the one on screen.
        let (scheduler, displayer) = displayer();
        let shown = SnackbarEntity::new("Saved");
        let tail = SnackbarEntity::new("Saved");
        displayer.display(shown.clone());
        displayer.display(SnackbarEntity::new("between"));
        displayer.display(tail.clone());
        scheduler.flush();
        assert_eq!(displayer.queued_len(), 3);

        displayer.dismiss(&tail);
        scheduler.flush();
        assert!(displayer.is_displaying());
        assert_eq!(displayer.current().get().unwrap().id(), shown.id());
        assert_eq!(displayer.queued_len(), 2);
    }

    #[test]
    fn activate_action_runs_callback_and_dismisses() {
        let (scheduler, displayer) = displayer();
        let fired = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&fired);
        displayer.display(SnackbarEntity::new("Removed").with_action("Undo", move || {
            sink.fetch_add(1, Ordering::SeqCst);
        }));
        scheduler.flush();
        displayer.activate_action();
        scheduler.flush();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!displayer.is_displaying());
        assert_eq!(displayer.queued_len(), 0);
    }
}
