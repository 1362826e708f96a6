//! # LayerKit History
//!
//! Undo/redo for layer edits, built on immutable snapshots.
//!
//! ## Core Components
//!
//! - **Equality**: structural comparison deciding whether an update is a real
//!   edit or a selection-only change
//! - **HistoryStore**: present/past/future stacks with a bounded undo depth
//! - **LayerStore**: the history store behind a subscriber bus, safe against
//!   re-entrant dispatch
//!
//! ## Architecture
//!
//! ```text
//! LayerStore (public API, notifications)
//!   ├── SubscriberBus<StoreEvent>
//!   └── HistoryStore
//!         └── snapshots_equal (structural vs selection-only)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use layerkit_core::{LayerDescriptor, LayersSnapshot, Vec2};
//! use layerkit_history::LayerStore;
//!
//! let store = LayerStore::new();
//! store.init(LayersSnapshot::new(vec![LayerDescriptor::new("a", Vec2::zero())]));
//! store.apply(LayersSnapshot::new(vec![LayerDescriptor::new("a", Vec2::new(10.0, 0.0))]));
//!
//! assert_eq!(store.undo_depth(), 1);
//! store.undo();
//! assert_eq!(store.get_snapshot().unwrap().revision, 0);
//! ```

pub mod equality;
pub mod history;
pub mod store;

pub use equality::{layer_equal, layers_equal, snapshots_equal};
pub use history::{ActionKind, HistoryAction, HistoryState, HistoryStore, Outcome};
pub use store::{LayerStore, StoreEvent, StoreOptions};
