use layerkit_core::{LayerDescriptor, LayersSnapshot, Vec2};

use crate::error::{LayerError, LayerResult};

/// Live layer list plus selection, the producer side of the history store.
///
/// `LayerCollection` is responsible for:
/// - Keeping layers in draw order (index 0 is drawn first)
/// - Editing layer transforms and visibility
/// - Tracking the selection and the "primary" selected layer
/// - Producing [`LayersSnapshot`] values to feed the history store, and
///   restoring itself from one after undo/redo
///
/// # Selection Model
///
/// - **Primary Selection**: the most recently selected layer
/// - **Multi-select**: with `multi` set, selecting toggles a layer without
///   touching the rest of the selection
#[derive(Debug, Clone, Default)]
pub struct LayerCollection {
    layers: Vec<LayerDescriptor>,
    selected: Vec<String>,
    primary: Option<String>,
}

impl LayerCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a collection from a snapshot.
    pub fn from_snapshot(snapshot: &LayersSnapshot) -> Self {
        let mut collection = Self::new();
        collection.restore(snapshot);
        collection
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers in draw order
    pub fn iter(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.layers.iter()
    }

    /// Looks up a layer by id.
    pub fn layer(&self, id: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Draw-order index of a layer
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    fn layer_mut(&mut self, id: &str) -> LayerResult<&mut LayerDescriptor> {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| LayerError::NotFound { id: id.to_string() })
    }

    /// Adds a layer on top of the stack.
    ///
    /// # Errors
    ///
    /// [`LayerError::DuplicateId`] if the id is already taken.
    pub fn add_layer(&mut self, layer: LayerDescriptor) -> LayerResult<()> {
        if self.layer(&layer.id).is_some() {
            return Err(LayerError::DuplicateId { id: layer.id });
        }
        tracing::debug!("Adding layer {}", layer.id);
        self.layers.push(layer);
        Ok(())
    }

    /// Removes a layer and drops it from the selection.
    pub fn remove_layer(&mut self, id: &str) -> LayerResult<LayerDescriptor> {
        let index = self
            .index_of(id)
            .ok_or_else(|| LayerError::NotFound { id: id.to_string() })?;
        let removed = self.layers.remove(index);
        self.selected.retain(|s| s != id);
        if self.primary.as_deref() == Some(id) {
            self.primary = self.selected.last().cloned();
        }
        Ok(removed)
    }

    /// Moves a layer to an absolute position.
    pub fn move_layer_to(&mut self, id: &str, position: Vec2) -> LayerResult<()> {
        self.layer_mut(id)?.position = position;
        Ok(())
    }

    /// Moves a layer by `(dx, dy)`.
    pub fn translate(&mut self, id: &str, dx: f64, dy: f64) -> LayerResult<()> {
        let layer = self.layer_mut(id)?;
        layer.position.x += dx;
        layer.position.y += dy;
        Ok(())
    }

    /// Moves every selected layer by `(dx, dy)`.
    pub fn translate_selected(&mut self, dx: f64, dy: f64) {
        for layer in self.layers.iter_mut() {
            if self.selected.contains(&layer.id) {
                layer.position.x += dx;
                layer.position.y += dy;
            }
        }
    }

    /// Sets a layer's rotation in degrees.
    pub fn set_rotation(&mut self, id: &str, rotation: f64) -> LayerResult<()> {
        self.layer_mut(id)?.rotation = rotation;
        Ok(())
    }

    /// Sets a layer's scale.
    pub fn set_scale(&mut self, id: &str, scale: Vec2) -> LayerResult<()> {
        self.layer_mut(id)?.scale = Some(scale);
        Ok(())
    }

    /// Shows or hides a layer.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> LayerResult<()> {
        self.layer_mut(id)?.visible = visible;
        Ok(())
    }

    /// Moves a layer to `index` in draw order, clamped to the top.
    pub fn reorder(&mut self, id: &str, index: usize) -> LayerResult<()> {
        let from = self
            .index_of(id)
            .ok_or_else(|| LayerError::NotFound { id: id.to_string() })?;
        let layer = self.layers.remove(from);
        let to = index.min(self.layers.len());
        self.layers.insert(to, layer);
        Ok(())
    }

    /// Moves a layer to the top of the stack.
    pub fn bring_to_front(&mut self, id: &str) -> LayerResult<()> {
        self.reorder(id, usize::MAX)
    }

    /// Moves a layer to the bottom of the stack.
    pub fn send_to_back(&mut self, id: &str) -> LayerResult<()> {
        self.reorder(id, 0)
    }

    /// Selects a layer.
    ///
    /// Without `multi` the selection becomes exactly this layer. With
    /// `multi` the layer is toggled and the rest of the selection is kept.
    /// The primary layer is the last selected one afterwards.
    pub fn select(&mut self, id: &str, multi: bool) -> LayerResult<()> {
        if self.layer(id).is_none() {
            return Err(LayerError::NotFound { id: id.to_string() });
        }

        if !multi {
            self.selected.clear();
            self.selected.push(id.to_string());
        } else if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id.to_string());
        }

        self.primary = self.selected.last().cloned();
        Ok(())
    }

    /// Selects every layer; the topmost becomes primary.
    pub fn select_all(&mut self) {
        self.selected = self.layers.iter().map(|l| l.id.clone()).collect();
        self.primary = self.selected.last().cloned();
    }

    /// Clears the selection and the primary layer.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.primary = None;
    }

    /// Selected ids in selection order
    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    /// The primary selected layer, if any
    pub fn primary_id(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Captures the current state as a snapshot.
    ///
    /// The history store assigns the final revision; `revision` is what the
    /// caller last saw.
    pub fn snapshot(&self, revision: u64) -> LayersSnapshot {
        LayersSnapshot {
            layers: self.layers.clone(),
            selected_layer_ids: self.selected.clone(),
            primary_layer_id: self.primary.clone(),
            revision,
        }
    }

    /// Replaces layers and selection with the snapshot's.
    pub fn restore(&mut self, snapshot: &LayersSnapshot) {
        self.layers = snapshot.layers.clone();
        self.selected = snapshot.selected_layer_ids.clone();
        self.primary = snapshot.primary_layer_id.clone();
    }
}
