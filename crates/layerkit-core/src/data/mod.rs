//! Data models for layers and snapshots.
//!
//! Plain value types shared by the history store, the layer collection and
//! the selection tools. Everything here owns its data, so `Clone` is a deep
//! copy and two snapshots never alias each other's layers.

mod layer;
mod snapshot;

pub use layer::LayerDescriptor;
pub use snapshot::LayersSnapshot;

use serde::{Deserialize, Serialize};

/// 2D vector used for layer positions and scale factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Identity scale `(1, 1)`
    pub const fn one() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Cached layer rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayerBounds {
    /// Create new layer bounds
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
