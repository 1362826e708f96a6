//! Observable layer store.
//!
//! Wraps a [`HistoryStore`] with a subscriber bus. Every dispatch finishes
//! mutating state before any subscriber runs, and each dispatched action
//! produces exactly one notification (no-ops included unless disabled in
//! [`StoreOptions`]).
//!
//! Dispatching from inside a subscriber is allowed. The nested action is
//! queued and returns immediately; the outer dispatch applies it once the
//! current round of notifications has finished, then notifies again. The
//! same queue absorbs dispatches racing in from other threads.

use layerkit_core::{LayersSnapshot, SubscriberBus, SubscriptionId, DEFAULT_MAX_HISTORY};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::history::{ActionKind, HistoryAction, HistoryStore, Outcome};

/// Notification sent to subscribers after each dispatched action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEvent {
    /// Action that was applied
    pub action: ActionKind,
    /// What it did
    pub outcome: Outcome,
    /// Revision of the present snapshot afterwards
    pub revision: Option<u64>,
}

/// Behaviour knobs for `LayerStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Number of undo points kept
    pub max_history: usize,
    /// Notify subscribers for actions that changed nothing
    pub notify_on_noop: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            notify_on_noop: true,
        }
    }
}

/// Resets the dispatching flag when a drain ends.
///
/// If a subscriber panics, actions still waiting in the queue are dropped so
/// the next dispatch does not replay them.
struct DispatchGuard<'a> {
    dispatching: &'a AtomicBool,
    pending: &'a Mutex<VecDeque<HistoryAction>>,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let dropped = std::mem::take(&mut *self.pending.lock());
            if !dropped.is_empty() {
                tracing::warn!(
                    "Subscriber panicked, discarding {} queued actions",
                    dropped.len()
                );
            }
        }
        self.dispatching.store(false, Ordering::Release);
    }
}

/// History store plus subscribers
pub struct LayerStore {
    history: Mutex<HistoryStore>,
    bus: SubscriberBus<StoreEvent>,
    pending: Mutex<VecDeque<HistoryAction>>,
    dispatching: AtomicBool,
    notify_on_noop: bool,
}

impl LayerStore {
    /// Create a store with default options
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Create a store with custom options
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            history: Mutex::new(HistoryStore::with_max_history(options.max_history)),
            bus: SubscriberBus::new(),
            pending: Mutex::new(VecDeque::new()),
            dispatching: AtomicBool::new(false),
            notify_on_noop: options.notify_on_noop,
        }
    }

    /// Discard all history and start from `snapshot`
    pub fn init(&self, snapshot: LayersSnapshot) {
        self.dispatch(HistoryAction::Init(snapshot));
    }

    /// Record a new layer state
    pub fn apply(&self, snapshot: LayersSnapshot) {
        self.dispatch(HistoryAction::Apply(snapshot));
    }

    /// Step back one undo point
    pub fn undo(&self) {
        self.dispatch(HistoryAction::Undo);
    }

    /// Step forward one undo point
    pub fn redo(&self) {
        self.dispatch(HistoryAction::Redo);
    }

    /// Drop the undo and redo stacks, keeping the present snapshot
    pub fn clear_history(&self) {
        self.dispatch(HistoryAction::ClearHistory);
    }

    /// Queue `action` and drain the queue unless a drain is already running
    pub fn dispatch(&self, action: HistoryAction) {
        self.pending.lock().push_back(action);

        loop {
            if self.dispatching.swap(true, Ordering::AcqRel) {
                tracing::debug!("Dispatch already running, action queued");
                return;
            }

            {
                let _guard = DispatchGuard {
                    dispatching: &self.dispatching,
                    pending: &self.pending,
                };
                self.drain();
            }

            // Something may have been queued between the last pop and the
            // guard releasing the flag.
            if self.pending.lock().is_empty() {
                return;
            }
        }
    }

    fn drain(&self) {
        loop {
            let Some(action) = self.pending.lock().pop_front() else {
                return;
            };
            let kind = action.kind();

            let event = {
                let mut history = self.history.lock();
                let outcome = history.dispatch(action);
                StoreEvent {
                    action: kind,
                    outcome,
                    revision: history.present().map(|p| p.revision),
                }
            };

            tracing::debug!(
                "Dispatched {}: {} (revision {:?})",
                event.action,
                event.outcome,
                event.revision
            );

            if event.outcome.changed() || self.notify_on_noop {
                self.bus.publish(&event);
            }
        }
    }

    /// Copy of the present snapshot, if initialised
    pub fn get_snapshot(&self) -> Option<LayersSnapshot> {
        self.history.lock().present().cloned()
    }

    /// Register a listener for store events
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(listener)
    }

    /// Remove a listener; returns true if it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Get the number of active listeners
    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.lock().can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.lock().can_redo()
    }

    /// Number of undo points available
    pub fn undo_depth(&self) -> usize {
        self.history.lock().undo_depth()
    }

    /// Number of redo points available
    pub fn redo_depth(&self) -> usize {
        self.history.lock().redo_depth()
    }

    /// Configured undo depth
    pub fn max_history(&self) -> usize {
        self.history.lock().max_history()
    }
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LayerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerStore")
            .field("undo_depth", &self.undo_depth())
            .field("redo_depth", &self.redo_depth())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerkit_core::{LayerDescriptor, Vec2};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn snapshot_at(x: f64) -> LayersSnapshot {
        LayersSnapshot::new(vec![LayerDescriptor::new("a", Vec2::new(x, 0.0))])
    }

    #[test]
    fn test_every_dispatch_notifies_once() {
        let store = LayerStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_ref = calls.clone();
        store.subscribe(move |_| {
            calls_ref.fetch_add(1, Ordering::SeqCst);
        });

        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(1.0));
        store.undo();
        store.redo();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_noop_notifies_by_default() {
        let store = LayerStore::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_ref = events.clone();
        store.subscribe(move |e| events_ref.lock().push(*e));

        store.undo();
        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, ActionKind::Undo);
        assert_eq!(events[0].outcome, Outcome::NoOp);
        assert_eq!(events[0].revision, None);
    }

    #[test]
    fn test_noop_notification_can_be_disabled() {
        let store = LayerStore::with_options(StoreOptions {
            notify_on_noop: false,
            ..Default::default()
        });
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_ref = calls.clone();
        store.subscribe(move |_| {
            calls_ref.fetch_add(1, Ordering::SeqCst);
        });

        store.init(snapshot_at(0.0));
        store.undo();
        store.redo();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscriber_sees_finished_state() {
        let store = Arc::new(LayerStore::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let store_ref = Arc::clone(&store);
        let seen_ref = seen.clone();
        store.subscribe(move |_| {
            let revision = store_ref.get_snapshot().map(|s| s.revision);
            seen_ref.lock().push((revision, store_ref.undo_depth()));
        });

        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(3.0));
        assert_eq!(*seen.lock(), vec![(Some(0), 0), (Some(1), 1)]);
    }

    #[test]
    fn test_reentrant_dispatch_is_queued() {
        let store = Arc::new(LayerStore::new());
        let events = Arc::new(Mutex::new(Vec::new()));

        let store_ref = Arc::clone(&store);
        let events_ref = events.clone();
        store.subscribe(move |e: &StoreEvent| {
            events_ref.lock().push((e.action, e.revision));
            if e.action == ActionKind::Apply {
                // Nested dispatch must not observe a half-finished notify
                store_ref.undo();
                assert_eq!(store_ref.get_snapshot().map(|s| s.revision), Some(1));
            }
        });

        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(1.0));

        assert_eq!(
            *events.lock(),
            vec![
                (ActionKind::Init, Some(0)),
                (ActionKind::Apply, Some(1)),
                (ActionKind::Undo, Some(0)),
            ]
        );
        assert_eq!(store.redo_depth(), 1);
    }

    #[test]
    fn test_reentrant_apply_is_queued() {
        let store = Arc::new(LayerStore::new());
        let events = Arc::new(Mutex::new(Vec::new()));

        let store_ref = Arc::clone(&store);
        let events_ref = events.clone();
        store.subscribe(move |e: &StoreEvent| {
            events_ref.lock().push((e.action, e.outcome, e.revision));
            if e.action == ActionKind::Init {
                store_ref.apply(snapshot_at(5.0));
                // Still inside the init notification
                assert_eq!(store_ref.get_snapshot().map(|s| s.revision), Some(0));
                assert_eq!(store_ref.undo_depth(), 0);
            }
        });

        store.init(snapshot_at(0.0));

        assert_eq!(
            *events.lock(),
            vec![
                (ActionKind::Init, Outcome::Reset, Some(0)),
                (ActionKind::Apply, Outcome::Structural, Some(1)),
            ]
        );
        let present = store.get_snapshot().unwrap();
        assert_eq!(present.revision, 1);
        assert_eq!(present.layers[0].position.x, 5.0);
        assert_eq!(store.undo_depth(), 1);
    }

    #[test]
    fn test_panicking_subscriber_discards_queued_actions() {
        let store = Arc::new(LayerStore::new());
        store.init(snapshot_at(0.0));

        let store_ref = Arc::clone(&store);
        let armed = Arc::new(AtomicBool::new(true));
        let armed_ref = armed.clone();
        store.subscribe(move |e: &StoreEvent| {
            if e.action == ActionKind::Apply && armed_ref.swap(false, Ordering::SeqCst) {
                store_ref.undo();
                panic!("subscriber failure");
            }
        });

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.apply(snapshot_at(1.0));
        }));
        assert!(result.is_err());
        assert_eq!(store.undo_depth(), 1);

        // The undo queued before the panic must not run now
        store.redo();
        assert_eq!(store.undo_depth(), 1);
        assert_eq!(store.get_snapshot().unwrap().revision, 1);

        // The store keeps working
        store.undo();
        assert_eq!(store.get_snapshot().unwrap().revision, 0);
    }

    #[test]
    fn test_clear_history_notifies() {
        let store = LayerStore::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_ref = events.clone();
        store.subscribe(move |e| events_ref.lock().push(*e));

        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(1.0));
        store.apply(snapshot_at(2.0));
        store.undo();
        store.clear_history();

        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert_eq!(store.get_snapshot().unwrap().layers[0].position.x, 1.0);

        let last = *events.lock().last().unwrap();
        assert_eq!(last.action, ActionKind::ClearHistory);
        assert_eq!(last.outcome, Outcome::Cleared);
        assert_eq!(last.revision, Some(1));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = LayerStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_ref = calls.clone();
        let id = store.subscribe(move |_| {
            calls_ref.fetch_add(1, Ordering::SeqCst);
        });

        store.init(snapshot_at(0.0));
        assert!(store.unsubscribe(id));
        store.apply(snapshot_at(1.0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_get_snapshot_is_a_copy() {
        let store = LayerStore::new();
        store.init(snapshot_at(0.0));

        let mut copy = store.get_snapshot().unwrap();
        copy.layers[0].position.x = 99.0;

        assert_eq!(store.get_snapshot().unwrap().layers[0].position.x, 0.0);
    }
}
