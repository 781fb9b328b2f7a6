//! Shape definitions for the canvas.
//!
//! A [`Shape`] is the only persisted entity. Its JSON form is the flat
//! record used by document snapshots, so field names follow the wire
//! format (`type`, `strokeWidth`, ...) rather than Rust conventions.

mod factory;

pub use factory::{
    CursorIcon, DEFAULT_STROKE, PLACEHOLDER_TEXT, ShapeConfig, all_kinds, can_resize, config,
    create_shape, create_shape_with_id, cursor, drawing_kinds, geometric_kinds, has_text,
    is_drawing_tool,
};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Minimum width/height a box shape keeps after a handle resize.
pub const MIN_SHAPE_SIZE: f64 = 20.0;

/// Hit radius for path shapes that carry no stroke width.
pub const DEFAULT_PATH_HIT_THRESHOLD: f64 = 5.0;

/// Opaque, stable identifier of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Error returned when a string does not name a known shape kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown shape type: {0}")]
pub struct UnknownShapeKind(pub String);

/// The closed set of drawable shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Text,
    Pen,
    Brush,
}

impl ShapeKind {
    /// Every kind, in configuration-table order.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Text,
        ShapeKind::Pen,
        ShapeKind::Brush,
    ];

    /// Wire name used in snapshots and tool identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Text => "text",
            ShapeKind::Pen => "pen",
            ShapeKind::Brush => "brush",
        }
    }

    /// Path kinds keep their geometry in a point sequence.
    pub fn is_path(self) -> bool {
        matches!(self, ShapeKind::Pen | ShapeKind::Brush)
    }

    /// Box kinds keep their geometry in (x, y, w, h).
    pub fn is_box(self) -> bool {
        !self.is_path()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownShapeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            "triangle" => Ok(ShapeKind::Triangle),
            "text" => Ok(ShapeKind::Text),
            "pen" => Ok(ShapeKind::Pen),
            "brush" => Ok(ShapeKind::Brush),
            other => Err(UnknownShapeKind(other.to_string())),
        }
    }
}

/// The `type` tag of a stored shape.
///
/// Snapshots may carry tags this build does not know about. They are kept
/// verbatim so a round-trip does not lose them; such shapes never hit-test
/// and the renderer skips them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeType {
    Known(ShapeKind),
    Unknown(String),
}

impl From<String> for ShapeType {
    fn from(tag: String) -> Self {
        match tag.parse::<ShapeKind>() {
            Ok(kind) => ShapeType::Known(kind),
            Err(_) => ShapeType::Unknown(tag),
        }
    }
}

impl From<ShapeType> for String {
    fn from(ty: ShapeType) -> Self {
        match ty {
            ShapeType::Known(kind) => kind.as_str().to_string(),
            ShapeType::Unknown(tag) => tag,
        }
    }
}

impl From<ShapeKind> for ShapeType {
    fn from(kind: ShapeKind) -> Self {
        ShapeType::Known(kind)
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeType::Known(kind) => f.write_str(kind.as_str()),
            ShapeType::Unknown(tag) => f.write_str(tag),
        }
    }
}

/// One drawable document element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeType,
    /// Bounding-box origin and size in canvas pixels. Always zero-sized for
    /// path kinds.
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Fill color as a CSS color string. Path kinds stroke with it.
    pub fill: String,
    /// Outline color; `None` means no outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Content of text shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Recorded points of pen/brush shapes, append-only while drawing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
}

impl Shape {
    /// The known kind of this shape, if its tag is recognized.
    pub fn known_kind(&self) -> Option<ShapeKind> {
        match self.kind {
            ShapeType::Known(kind) => Some(kind),
            ShapeType::Unknown(_) => None,
        }
    }

    /// Whether this is a pen or brush shape.
    pub fn is_path(&self) -> bool {
        self.known_kind().is_some_and(ShapeKind::is_path)
    }

    /// Whether this shape can be resized through its handles.
    pub fn is_resizable(&self) -> bool {
        self.known_kind().is_some_and(ShapeKind::is_box)
    }

    /// Top-left corner of the bounding box.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The (x, y, w, h) box as a kurbo rect.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    /// Replace the bounding box.
    pub fn set_bounds(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.x = x;
        self.y = y;
        self.w = w;
        self.h = h;
    }

    /// Move the origin, keeping the size. Path points travel with it.
    pub fn move_to(&mut self, origin: Point) {
        let delta = origin - self.origin();
        self.x = origin.x;
        self.y = origin.y;
        if let Some(points) = &mut self.points {
            for point in points.iter_mut() {
                *point += delta;
            }
        }
    }

    /// Recorded path points (empty for box shapes).
    pub fn path_points(&self) -> &[Point] {
        self.points.as_deref().unwrap_or(&[])
    }

    /// Append a point to the path sequence.
    pub fn push_point(&mut self, point: Point) {
        self.points.get_or_insert_with(Vec::new).push(point);
    }

    /// Offset from this shape's origin to `point`.
    pub fn offset_of(&self, point: Point) -> Vec2 {
        point - self.origin()
    }
}
