//! # LayerKit Designer
//!
//! Canvas-side helpers that sit around the history store.
//!
//! ## Core Components
//!
//! - **Elements**: rectangles, frames, triangles, images, circles, ellipses,
//!   text and point-based shapes (line, path, pencil), tagged by `type`
//! - **Bounds**: per-element bounds and the union box drawn around a selection
//! - **Layers**: the live layer list and selection that produce snapshots
//!
//! ## Usage
//!
//! ```rust
//! use layerkit_designer::{selection_bounds, BoundingBox, Element};
//!
//! let elements = vec![
//!     Element::rect("r1", 0.0, 0.0, 10.0, 20.0),
//!     Element::circle("c1", 100.0, 100.0, 5.0),
//! ];
//! let overlay = selection_bounds(&["r1", "c1"], &elements);
//! assert_eq!(overlay, Some(BoundingBox::new(0.0, 0.0, 105.0, 105.0)));
//! ```

pub mod bounds;
pub mod element;
pub mod error;
pub mod layers;

pub use bounds::{compute_bounds, element_bounds, selection_bounds, BoundingBox, ElementBounds};
pub use element::{
    BoxGeometry, CircleGeometry, Element, ElementKind, EllipseGeometry, PointsGeometry,
    TextGeometry,
};
pub use error::{LayerError, LayerResult};
pub use layers::LayerCollection;
