use serde::{Deserialize, Serialize};

use super::{LayerBounds, Vec2};

/// One layer as seen by the history store.
///
/// `scale` and `bounds` are optional in the serialized form; an absent scale
/// means identity scale for every comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    pub id: String,
    pub position: Vec2,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<LayerBounds>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl LayerDescriptor {
    /// Create a visible, unrotated layer at `position`
    pub fn new(id: impl Into<String>, position: Vec2) -> Self {
        Self {
            id: id.into(),
            position,
            rotation: 0.0,
            scale: None,
            bounds: None,
            visible: true,
        }
    }

    /// Builder-style rotation (degrees)
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder-style scale
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Builder-style cached bounds
    pub fn with_bounds(mut self, bounds: LayerBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Builder-style visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Scale with the identity default applied
    pub fn effective_scale(&self) -> Vec2 {
        self.scale.unwrap_or_else(Vec2::one)
    }
}
