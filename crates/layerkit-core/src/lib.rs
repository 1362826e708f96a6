//! # LayerKit Core
//!
//! Core types and utilities for LayerKit.
//! Provides the layer data model, snapshot validation, error types and the
//! subscriber bus shared by the history and designer crates.

pub mod constants;
pub mod data;
pub mod error;
pub mod event_bus;

pub use constants::{DEFAULT_MAX_HISTORY, MIN_SELECTION_EXTENT, PLACEHOLDER_EXTENT};

pub use data::{LayerBounds, LayerDescriptor, LayersSnapshot, Vec2};

pub use error::{Error, Result, SnapshotError};

pub use event_bus::{SubscriberBus, SubscriptionId};
