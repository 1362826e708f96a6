//! Canvas element model.
//!
//! Elements are tagged by `type` in their JSON form, matching what the editor
//! front end emits. A tag this crate does not know deserializes to
//! [`ElementKind::Unknown`] instead of failing, so a newer front end can send
//! element types an older core has never heard of.

use serde::{Deserialize, Serialize};

/// Top-left anchored box geometry (rect, frame, triangle, image)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Centre and radius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CircleGeometry {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Centre and per-axis radii
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EllipseGeometry {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "radiusX")]
    pub radius_x: f64,
    #[serde(rename = "radiusY")]
    pub radius_y: f64,
}

/// Text block; height is approximated by the font size
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextGeometry {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(rename = "fontSize")]
    pub font_size: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

/// Anchor plus a flat `[x0, y0, x1, y1, ...]` point list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointsGeometry {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub points: Vec<f64>,
}

/// Geometry of an element, discriminated by its `type` tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Rect(BoxGeometry),
    Frame(BoxGeometry),
    Triangle(BoxGeometry),
    Image(BoxGeometry),
    Circle(CircleGeometry),
    Ellipse(EllipseGeometry),
    Text(TextGeometry),
    Line(PointsGeometry),
    Path(PointsGeometry),
    Pencil(PointsGeometry),
    #[serde(other)]
    Unknown,
}

impl ElementKind {
    /// Type tag as used in the serialized form
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Rect(_) => "rect",
            ElementKind::Frame(_) => "frame",
            ElementKind::Triangle(_) => "triangle",
            ElementKind::Image(_) => "image",
            ElementKind::Circle(_) => "circle",
            ElementKind::Ellipse(_) => "ellipse",
            ElementKind::Text(_) => "text",
            ElementKind::Line(_) => "line",
            ElementKind::Path(_) => "path",
            ElementKind::Pencil(_) => "pencil",
            ElementKind::Unknown => "unknown",
        }
    }

    /// Whether computed bounds follow the real geometry.
    ///
    /// Text uses the font size as its height and point-based elements use a
    /// fixed placeholder box, so both are approximate.
    pub fn has_exact_bounds(&self) -> bool {
        match self {
            ElementKind::Rect(_)
            | ElementKind::Frame(_)
            | ElementKind::Triangle(_)
            | ElementKind::Image(_)
            | ElementKind::Circle(_)
            | ElementKind::Ellipse(_) => true,
            ElementKind::Text(_)
            | ElementKind::Line(_)
            | ElementKind::Path(_)
            | ElementKind::Pencil(_)
            | ElementKind::Unknown => false,
        }
    }
}

/// A canvas element with its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create an element from its parts
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn rect(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            id,
            ElementKind::Rect(BoxGeometry {
                x,
                y,
                width,
                height,
            }),
        )
    }

    pub fn image(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            id,
            ElementKind::Image(BoxGeometry {
                x,
                y,
                width,
                height,
            }),
        )
    }

    pub fn circle(id: impl Into<String>, x: f64, y: f64, radius: f64) -> Self {
        Self::new(id, ElementKind::Circle(CircleGeometry { x, y, radius }))
    }

    pub fn ellipse(id: impl Into<String>, x: f64, y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self::new(
            id,
            ElementKind::Ellipse(EllipseGeometry {
                x,
                y,
                radius_x,
                radius_y,
            }),
        )
    }

    pub fn text(id: impl Into<String>, x: f64, y: f64, width: f64, font_size: f64) -> Self {
        Self::new(
            id,
            ElementKind::Text(TextGeometry {
                x,
                y,
                width,
                font_size,
                text: String::new(),
            }),
        )
    }

    pub fn line(id: impl Into<String>, x: f64, y: f64, points: Vec<f64>) -> Self {
        Self::new(id, ElementKind::Line(PointsGeometry { x, y, points }))
    }
}
