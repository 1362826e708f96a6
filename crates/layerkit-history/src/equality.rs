//! Structural comparison of layer lists.
//!
//! Decides whether an incoming snapshot is a real edit (needs an undo point)
//! or only a selection change. Only the fields a user can edit through the
//! canvas take part: id, position, rotation, scale and visibility. Cached
//! bounds, selection and revision are ignored.

use layerkit_core::{LayerDescriptor, LayersSnapshot};

/// Compare two layers field by field
///
/// An absent scale compares equal to an explicit `(1, 1)`.
pub fn layer_equal(a: &LayerDescriptor, b: &LayerDescriptor) -> bool {
    let (sa, sb) = (a.effective_scale(), b.effective_scale());
    a.id == b.id
        && a.rotation == b.rotation
        && a.position.x == b.position.x
        && a.position.y == b.position.y
        && sa.x == sb.x
        && sa.y == sb.y
        && a.visible == b.visible
}

/// Compare two layer lists index by index
///
/// Lists of different length are never equal; empty lists always are.
pub fn layers_equal(a: &[LayerDescriptor], b: &[LayerDescriptor]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    match a.iter().zip(b).position(|(la, lb)| !layer_equal(la, lb)) {
        Some(index) => {
            tracing::trace!("Layer lists differ at index {}", index);
            false
        }
        None => true,
    }
}

/// Compare the layer lists of two snapshots
pub fn snapshots_equal(a: &LayersSnapshot, b: &LayersSnapshot) -> bool {
    layers_equal(&a.layers, &b.layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerkit_core::{LayerBounds, Vec2};

    fn layer(id: &str) -> LayerDescriptor {
        LayerDescriptor::new(id, Vec2::new(1.0, 2.0))
    }

    #[test]
    fn test_empty_lists_are_equal() {
        assert!(layers_equal(&[], &[]));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(!layers_equal(&[layer("a")], &[]));
        assert!(!layers_equal(&[layer("a")], &[layer("a"), layer("a")]));
    }

    #[test]
    fn test_each_compared_field() {
        let base = layer("a");

        let mut other = base.clone();
        other.id = "b".to_string();
        assert!(!layer_equal(&base, &other));

        let other = base.clone().with_rotation(15.0);
        assert!(!layer_equal(&base, &other));

        let mut other = base.clone();
        other.position.x += 0.5;
        assert!(!layer_equal(&base, &other));

        let mut other = base.clone();
        other.position.y -= 0.5;
        assert!(!layer_equal(&base, &other));

        let other = base.clone().with_scale(Vec2::new(1.0, 2.0));
        assert!(!layer_equal(&base, &other));

        let other = base.clone().with_visible(false);
        assert!(!layer_equal(&base, &other));
    }

    #[test]
    fn test_absent_scale_equals_identity() {
        let a = layer("a");
        let b = layer("a").with_scale(Vec2::one());
        assert!(layer_equal(&a, &b));
    }

    #[test]
    fn test_bounds_are_ignored() {
        let a = layer("a");
        let b = layer("a").with_bounds(LayerBounds::new(0.0, 0.0, 50.0, 50.0));
        assert!(layer_equal(&a, &b));
    }

    #[test]
    fn test_selection_is_ignored() {
        let a = LayersSnapshot::new(vec![layer("a")]);
        let b = a.clone().with_selection(["a"]).with_revision(9);
        assert!(snapshots_equal(&a, &b));
    }

    #[test]
    fn test_order_matters() {
        let a = [layer("a"), layer("b")];
        let b = [layer("b"), layer("a")];
        assert!(!layers_equal(&a, &b));
    }
}
