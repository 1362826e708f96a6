use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::LayerDescriptor;
use crate::error::SnapshotError;

/// Point-in-time record of every layer plus the selection.
///
/// A snapshot is treated as immutable once it has been handed to the history
/// store; each state transition produces a fresh value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayersSnapshot {
    pub layers: Vec<LayerDescriptor>,
    #[serde(default)]
    pub selected_layer_ids: Vec<String>,
    #[serde(default)]
    pub primary_layer_id: Option<String>,
    #[serde(default)]
    pub revision: u64,
}

impl LayersSnapshot {
    /// Create a snapshot with no selection at revision 0
    pub fn new(layers: Vec<LayerDescriptor>) -> Self {
        Self {
            layers,
            ..Default::default()
        }
    }

    /// Builder-style selection; the primary becomes the last selected id
    pub fn with_selection<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_layer_ids = ids.into_iter().map(Into::into).collect();
        self.primary_layer_id = self.selected_layer_ids.last().cloned();
        self
    }

    /// Builder-style revision
    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    /// Look up a layer by id
    pub fn layer(&self, id: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Check whether `id` is part of the selection
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_layer_ids.iter().any(|s| s == id)
    }

    /// Check internal consistency.
    ///
    /// Layer ids must be unique, every selected id must name a layer, and the
    /// primary layer (if any) must be selected.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut seen = HashSet::with_capacity(self.layers.len());
        for layer in &self.layers {
            if !seen.insert(layer.id.as_str()) {
                return Err(SnapshotError::DuplicateLayerId {
                    id: layer.id.clone(),
                });
            }
        }

        if let Some(id) = self
            .selected_layer_ids
            .iter()
            .find(|id| !seen.contains(id.as_str()))
        {
            return Err(SnapshotError::UnknownSelection { id: id.clone() });
        }

        if let Some(primary) = &self.primary_layer_id {
            if !self.is_selected(primary) {
                return Err(SnapshotError::PrimaryNotSelected {
                    id: primary.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Vec2;

    fn two_layers() -> Vec<LayerDescriptor> {
        vec![
            LayerDescriptor::new("a", Vec2::zero()),
            LayerDescriptor::new("b", Vec2::new(5.0, 5.0)),
        ]
    }

    #[test]
    fn test_with_selection_sets_primary() {
        let snap = LayersSnapshot::new(two_layers()).with_selection(["a", "b"]);
        assert_eq!(snap.primary_layer_id.as_deref(), Some("b"));
        assert!(snap.is_selected("a"));
        assert!(snap.validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let mut layers = two_layers();
        layers[1].id = "a".to_string();
        let err = LayersSnapshot::new(layers).validate().unwrap_err();
        assert_eq!(
            err,
            SnapshotError::DuplicateLayerId {
                id: "a".to_string()
            }
        );
    }

    #[test]
    fn test_validate_dangling_selection() {
        let snap = LayersSnapshot::new(two_layers()).with_selection(["zzz"]);
        assert!(matches!(
            snap.validate(),
            Err(SnapshotError::UnknownSelection { .. })
        ));
    }

    #[test]
    fn test_validate_primary_outside_selection() {
        let mut snap = LayersSnapshot::new(two_layers()).with_selection(["a"]);
        snap.primary_layer_id = Some("b".to_string());
        assert!(matches!(
            snap.validate(),
            Err(SnapshotError::PrimaryNotSelected { .. })
        ));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let snap = LayersSnapshot::new(two_layers())
            .with_selection(["a"])
            .with_revision(3);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["selectedLayerIds"][0], "a");
        assert_eq!(json["primaryLayerId"], "a");
        assert_eq!(json["revision"], 3);
    }
}
