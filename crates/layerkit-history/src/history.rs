//! Snapshot history state machine.
//!
//! `HistoryStore` keeps a present snapshot plus bounded past and future
//! stacks. Snapshots are moved between the stacks by value, so an entry is
//! never mutated once it has been pushed.

use layerkit_core::{LayersSnapshot, DEFAULT_MAX_HISTORY};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::equality::snapshots_equal;

/// A request to the history store
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    /// Discard all history and start from this snapshot
    Init(LayersSnapshot),
    /// Record a new layer state
    Apply(LayersSnapshot),
    /// Step back one undo point
    Undo,
    /// Step forward one undo point
    Redo,
    /// Drop both stacks, keeping the present
    ClearHistory,
}

impl HistoryAction {
    /// Get the kind of this action for logging and events
    pub fn kind(&self) -> ActionKind {
        match self {
            HistoryAction::Init(_) => ActionKind::Init,
            HistoryAction::Apply(_) => ActionKind::Apply,
            HistoryAction::Undo => ActionKind::Undo,
            HistoryAction::Redo => ActionKind::Redo,
            HistoryAction::ClearHistory => ActionKind::ClearHistory,
        }
    }
}

/// Payload-free discriminant of `HistoryAction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Init,
    Apply,
    Undo,
    Redo,
    #[serde(rename = "clear_history")]
    ClearHistory,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Init => write!(f, "init"),
            ActionKind::Apply => write!(f, "apply"),
            ActionKind::Undo => write!(f, "undo"),
            ActionKind::Redo => write!(f, "redo"),
            ActionKind::ClearHistory => write!(f, "clear-history"),
        }
    }
}

/// What a dispatched action did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// History was reset to a single present snapshot
    Reset,
    /// A structural edit pushed a new undo point
    Structural,
    /// Only the selection changed; present replaced in place
    SelectionOnly,
    /// Present moved back one entry
    Undone,
    /// Present moved forward one entry
    Redone,
    /// Undo and redo stacks were emptied
    Cleared,
    /// Nothing to do (empty undo/redo stack)
    NoOp,
}

impl Outcome {
    /// Whether the state was modified
    pub fn changed(&self) -> bool {
        !matches!(self, Outcome::NoOp)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Reset => write!(f, "reset"),
            Outcome::Structural => write!(f, "structural"),
            Outcome::SelectionOnly => write!(f, "selection-only"),
            Outcome::Undone => write!(f, "undone"),
            Outcome::Redone => write!(f, "redone"),
            Outcome::Cleared => write!(f, "cleared"),
            Outcome::NoOp => write!(f, "no-op"),
        }
    }
}

/// Present snapshot with its undo and redo stacks
///
/// `history` is ordered oldest first; `future` is ordered next-to-redo first.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryState {
    present: LayersSnapshot,
    history: VecDeque<LayersSnapshot>,
    future: VecDeque<LayersSnapshot>,
}

impl HistoryState {
    fn new(present: LayersSnapshot) -> Self {
        Self {
            present,
            history: VecDeque::new(),
            future: VecDeque::new(),
        }
    }

    /// Current snapshot
    pub fn present(&self) -> &LayersSnapshot {
        &self.present
    }

    /// Undo stack, oldest first
    pub fn history(&self) -> impl ExactSizeIterator<Item = &LayersSnapshot> {
        self.history.iter()
    }

    /// Redo stack, next redo first
    pub fn future(&self) -> impl ExactSizeIterator<Item = &LayersSnapshot> {
        self.future.iter()
    }

    fn apply(&mut self, mut incoming: LayersSnapshot, max_history: usize) -> Outcome {
        if snapshots_equal(&incoming, &self.present) {
            incoming.revision = self.present.revision;
            self.present = incoming;
            return Outcome::SelectionOnly;
        }

        // Pinned at u64::MAX rather than wrapping back to an older revision
        incoming.revision = self.present.revision.saturating_add(1);
        let previous = std::mem::replace(&mut self.present, incoming);
        self.history.push_back(previous);
        trim_oldest(&mut self.history, max_history);
        self.future.clear();
        Outcome::Structural
    }

    fn undo(&mut self) -> Outcome {
        let Some(previous) = self.history.pop_back() else {
            return Outcome::NoOp;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        Outcome::Undone
    }

    fn redo(&mut self, max_history: usize) -> Outcome {
        let Some(next) = self.future.pop_front() else {
            return Outcome::NoOp;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.history.push_back(current);
        trim_oldest(&mut self.history, max_history);
        Outcome::Redone
    }
}

/// Drop entries from the front until at most `max` remain
fn trim_oldest(stack: &mut VecDeque<LayersSnapshot>, max: usize) {
    while stack.len() > max {
        stack.pop_front();
    }
}

/// Bounded undo/redo history over layer snapshots
#[derive(Debug, Clone)]
pub struct HistoryStore {
    state: Option<HistoryState>,
    max_history: usize,
}

impl HistoryStore {
    /// Create an empty store keeping the default number of undo points (30)
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// Create an empty store with a custom undo depth (at least 1)
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            state: None,
            max_history: max_history.max(1),
        }
    }

    /// Run one action against the state
    pub fn dispatch(&mut self, action: HistoryAction) -> Outcome {
        match action {
            HistoryAction::Init(snapshot) => self.init(snapshot),
            HistoryAction::Apply(snapshot) => self.apply(snapshot),
            HistoryAction::Undo => self.undo(),
            HistoryAction::Redo => self.redo(),
            HistoryAction::ClearHistory => self.clear_history(),
        }
    }

    /// Discard all history and make `snapshot` the present
    pub fn init(&mut self, snapshot: LayersSnapshot) -> Outcome {
        self.state = Some(HistoryState::new(snapshot));
        Outcome::Reset
    }

    /// Record a new snapshot
    ///
    /// A snapshot whose layers differ from the present becomes a new undo
    /// point with `revision = present.revision + 1` and clears the redo
    /// stack. A snapshot with equal layers replaces the present, keeps its
    /// revision and leaves both stacks alone. With no state yet this behaves
    /// like [`init`](Self::init).
    pub fn apply(&mut self, snapshot: LayersSnapshot) -> Outcome {
        let max_history = self.max_history;
        if let Some(state) = self.state.as_mut() {
            return state.apply(snapshot, max_history);
        }
        self.init(snapshot)
    }

    /// Step back one undo point; no-op with an empty undo stack
    pub fn undo(&mut self) -> Outcome {
        match self.state.as_mut() {
            Some(state) => state.undo(),
            None => Outcome::NoOp,
        }
    }

    /// Step forward one undo point; no-op with an empty redo stack
    pub fn redo(&mut self) -> Outcome {
        let max_history = self.max_history;
        match self.state.as_mut() {
            Some(state) => state.redo(max_history),
            None => Outcome::NoOp,
        }
    }

    /// Drop both stacks but keep the present snapshot
    pub fn clear_history(&mut self) -> Outcome {
        match self.state.as_mut() {
            Some(state) if !state.history.is_empty() || !state.future.is_empty() => {
                state.history.clear();
                state.future.clear();
                Outcome::Cleared
            }
            _ => Outcome::NoOp,
        }
    }

    /// Full state, if initialised
    pub fn state(&self) -> Option<&HistoryState> {
        self.state.as_ref()
    }

    /// Current snapshot, if initialised
    pub fn present(&self) -> Option<&LayersSnapshot> {
        self.state.as_ref().map(HistoryState::present)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.undo_depth() > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.redo_depth() > 0
    }

    /// Number of undo points available
    pub fn undo_depth(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.history.len())
    }

    /// Number of redo points available
    pub fn redo_depth(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.future.len())
    }

    /// Configured undo depth
    pub fn max_history(&self) -> usize {
        self.max_history
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerkit_core::{LayerDescriptor, Vec2};

    fn snapshot_at(x: f64) -> LayersSnapshot {
        LayersSnapshot::new(vec![LayerDescriptor::new("a", Vec2::new(x, 0.0))])
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = HistoryStore::new();
        assert!(store.present().is_none());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert_eq!(store.max_history(), 30);
    }

    #[test]
    fn test_apply_without_state_initialises() {
        let mut store = HistoryStore::new();
        assert_eq!(store.apply(snapshot_at(0.0)), Outcome::Reset);
        assert_eq!(store.undo_depth(), 0);
        assert_eq!(store.present().map(|p| p.revision), Some(0));
    }

    #[test]
    fn test_init_then_structural_apply() {
        let mut store = HistoryStore::new();
        store.init(snapshot_at(0.0));

        let outcome = store.apply(snapshot_at(10.0));
        assert_eq!(outcome, Outcome::Structural);
        assert_eq!(store.undo_depth(), 1);
        assert_eq!(store.redo_depth(), 0);

        let present = store.present().unwrap();
        assert_eq!(present.revision, 1);
        assert_eq!(present.layers[0].position.x, 10.0);
    }

    #[test]
    fn test_structural_apply_at_max_revision() {
        let mut store = HistoryStore::new();
        store.init(snapshot_at(0.0).with_revision(u64::MAX));

        assert_eq!(store.apply(snapshot_at(10.0)), Outcome::Structural);
        assert_eq!(store.present().unwrap().revision, u64::MAX);
        assert_eq!(store.undo_depth(), 1);

        store.undo();
        assert_eq!(store.present().unwrap().layers[0].position.x, 0.0);
    }

    #[test]
    fn test_selection_only_apply_keeps_stacks() {
        let mut store = HistoryStore::new();
        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(5.0));
        store.undo();
        assert_eq!(store.redo_depth(), 1);

        let selected = snapshot_at(0.0).with_selection(["a"]).with_revision(42);
        assert_eq!(store.apply(selected), Outcome::SelectionOnly);

        assert_eq!(store.undo_depth(), 0);
        assert_eq!(store.redo_depth(), 1);
        let present = store.present().unwrap();
        assert_eq!(present.revision, 0);
        assert_eq!(present.selected_layer_ids, vec!["a".to_string()]);
    }

    #[test]
    fn test_structural_apply_clears_future() {
        let mut store = HistoryStore::new();
        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(1.0));
        store.apply(snapshot_at(2.0));
        store.undo();
        assert!(store.can_redo());

        store.apply(snapshot_at(3.0));
        assert!(!store.can_redo());
        assert_eq!(store.undo_depth(), 2);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut store = HistoryStore::new();
        store.init(snapshot_at(0.0));
        for i in 1..=45 {
            store.apply(snapshot_at(i as f64));
        }
        assert_eq!(store.undo_depth(), 30);

        // Oldest entries were dropped first
        let state = store.state().unwrap();
        let oldest = state.history().next().unwrap();
        assert_eq!(oldest.layers[0].position.x, 15.0);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut store = HistoryStore::new();
        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(7.0));
        let before = store.present().cloned().unwrap();

        assert_eq!(store.undo(), Outcome::Undone);
        assert_eq!(store.present().unwrap().revision, 0);
        assert_eq!(store.redo(), Outcome::Redone);

        assert_eq!(store.present(), Some(&before));
        assert_eq!(store.undo_depth(), 1);
        assert_eq!(store.redo_depth(), 0);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut store = HistoryStore::new();
        assert_eq!(store.undo(), Outcome::NoOp);
        assert_eq!(store.redo(), Outcome::NoOp);

        store.init(snapshot_at(0.0));
        let before = store.state().cloned();
        assert_eq!(store.undo(), Outcome::NoOp);
        assert_eq!(store.redo(), Outcome::NoOp);
        assert_eq!(store.state().cloned(), before);
    }

    #[test]
    fn test_undo_pushes_to_front_of_future() {
        let mut store = HistoryStore::new();
        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(1.0));
        store.apply(snapshot_at(2.0));

        store.undo();
        store.undo();

        let state = store.state().unwrap();
        let xs: Vec<f64> = state.future().map(|s| s.layers[0].position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
        assert_eq!(state.present().layers[0].position.x, 0.0);
    }

    #[test]
    fn test_init_discards_history() {
        let mut store = HistoryStore::new();
        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(1.0));
        store.apply(snapshot_at(2.0));
        store.undo();

        store.init(snapshot_at(9.0).with_revision(4));
        assert_eq!(store.undo_depth(), 0);
        assert_eq!(store.redo_depth(), 0);
        assert_eq!(store.present().unwrap().revision, 4);
    }

    #[test]
    fn test_clear_history_keeps_present() {
        let mut store = HistoryStore::new();
        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(1.0));
        assert_eq!(store.clear_history(), Outcome::Cleared);
        assert!(!store.can_undo());
        assert_eq!(store.present().unwrap().layers[0].position.x, 1.0);

        // Nothing left to clear
        assert_eq!(store.clear_history(), Outcome::NoOp);
        assert_eq!(HistoryStore::new().clear_history(), Outcome::NoOp);
    }

    #[test]
    fn test_custom_depth_has_floor_of_one() {
        let mut store = HistoryStore::with_max_history(0);
        assert_eq!(store.max_history(), 1);
        store.init(snapshot_at(0.0));
        store.apply(snapshot_at(1.0));
        store.apply(snapshot_at(2.0));
        assert_eq!(store.undo_depth(), 1);
    }

    #[test]
    fn test_action_kind() {
        assert_eq!(HistoryAction::Undo.kind(), ActionKind::Undo);
        assert_eq!(
            HistoryAction::Apply(LayersSnapshot::default()).kind(),
            ActionKind::Apply
        );
        assert_eq!(ActionKind::Redo.to_string(), "redo");
        assert_eq!(
            HistoryAction::ClearHistory.kind(),
            ActionKind::ClearHistory
        );
        assert_eq!(Outcome::SelectionOnly.to_string(), "selection-only");
        assert!(!Outcome::NoOp.changed());
        assert!(Outcome::SelectionOnly.changed());
    }
}
