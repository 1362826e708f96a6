//! Selection bounding boxes.
//!
//! Per-element bounds come from a match over [`ElementKind`]; the selection
//! box is the union of every selected element that has bounds. All functions
//! here are pure.

use layerkit_core::{MIN_SELECTION_EXTENT, PLACEHOLDER_EXTENT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::element::{Element, ElementKind};

/// Edges and centre of one element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl ElementBounds {
    /// Build from edges; the centre is derived
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            center_x: (left + right) / 2.0,
            center_y: (top + bottom) / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Convert to an `x/y/width/height` box without any minimum size
    pub fn to_box(&self) -> BoundingBox {
        BoundingBox::new(self.left, self.top, self.width(), self.height())
    }
}

/// Axis-aligned box enclosing a selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point test
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Bounds of a single element, or `None` for unknown element types
pub fn element_bounds(element: &Element) -> Option<ElementBounds> {
    let bounds = match &element.kind {
        ElementKind::Rect(g)
        | ElementKind::Frame(g)
        | ElementKind::Triangle(g)
        | ElementKind::Image(g) => {
            ElementBounds::from_edges(g.x, g.y, g.x + g.width, g.y + g.height)
        }
        ElementKind::Circle(g) => ElementBounds::from_edges(
            g.x - g.radius,
            g.y - g.radius,
            g.x + g.radius,
            g.y + g.radius,
        ),
        ElementKind::Ellipse(g) => ElementBounds::from_edges(
            g.x - g.radius_x,
            g.y - g.radius_y,
            g.x + g.radius_x,
            g.y + g.radius_y,
        ),
        ElementKind::Text(g) => {
            ElementBounds::from_edges(g.x, g.y, g.x + g.width, g.y + g.font_size)
        }
        // Point lists are not measured; a fixed box anchored at the origin
        // stands in for the real extent.
        ElementKind::Line(g) | ElementKind::Path(g) | ElementKind::Pencil(g) => {
            ElementBounds::from_edges(g.x, g.y, g.x + PLACEHOLDER_EXTENT, g.y + PLACEHOLDER_EXTENT)
        }
        ElementKind::Unknown => {
            tracing::trace!("No bounds for element {} of unknown type", element.id);
            return None;
        }
    };
    Some(bounds)
}

/// Union box of `elements`
///
/// Elements without bounds are skipped. Returns `None` when nothing
/// contributes. Width and height are floored at 1 so a zero-size selection
/// still gets a visible overlay.
pub fn compute_bounds<'a, I>(elements: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a Element>,
{
    let (min_x, min_y, max_x, max_y) = elements
        .into_iter()
        .filter_map(element_bounds)
        .fold(None, |acc: Option<(f64, f64, f64, f64)>, b| {
            Some(match acc {
                None => (b.left, b.top, b.right, b.bottom),
                Some((min_x, min_y, max_x, max_y)) => (
                    min_x.min(b.left),
                    min_y.min(b.top),
                    max_x.max(b.right),
                    max_y.max(b.bottom),
                ),
            })
        })?;

    Some(BoundingBox::new(
        min_x,
        min_y,
        (max_x - min_x).max(MIN_SELECTION_EXTENT),
        (max_y - min_y).max(MIN_SELECTION_EXTENT),
    ))
}

/// Union box of the elements whose id is in `selected`
///
/// An empty selection yields `None`.
pub fn selection_bounds<S: AsRef<str>>(selected: &[S], elements: &[Element]) -> Option<BoundingBox> {
    if selected.is_empty() {
        return None;
    }
    let ids: HashSet<&str> = selected.iter().map(|s| s.as_ref()).collect();
    compute_bounds(elements.iter().filter(|e| ids.contains(e.id.as_str())))
}
