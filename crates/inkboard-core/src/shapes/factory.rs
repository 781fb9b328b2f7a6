//! Per-kind defaults and shape construction.
//!
//! The configuration table is the single place to extend when a new shape
//! kind is added.

use super::{Shape, ShapeId, ShapeKind};
use crate::tools::Tool;
use kurbo::{Point, Size};

/// Placeholder content given to freshly created text shapes.
pub const PLACEHOLDER_TEXT: &str = "Double click to edit";

/// Outline color given to freshly created box shapes.
pub const DEFAULT_STROKE: &str = "#000";

/// Pointer cursor shown while a tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorIcon {
    Default,
    Crosshair,
    Text,
}

impl CursorIcon {
    /// CSS `cursor` value.
    pub fn as_css(self) -> &'static str {
        match self {
            CursorIcon::Default => "default",
            CursorIcon::Crosshair => "crosshair",
            CursorIcon::Text => "text",
        }
    }
}

/// Static defaults for one shape kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeConfig {
    pub default_size: Size,
    pub has_text: bool,
    /// Pen/brush style kinds whose geometry is a point sequence.
    pub is_path: bool,
    pub stroke_width: f64,
    pub cursor: CursorIcon,
}

const RECTANGLE: ShapeConfig = ShapeConfig {
    default_size: Size::new(120.0, 80.0),
    has_text: false,
    is_path: false,
    stroke_width: 1.0,
    cursor: CursorIcon::Crosshair,
};

const CIRCLE: ShapeConfig = ShapeConfig {
    default_size: Size::new(100.0, 100.0),
    has_text: false,
    is_path: false,
    stroke_width: 1.0,
    cursor: CursorIcon::Crosshair,
};

const TRIANGLE: ShapeConfig = ShapeConfig {
    default_size: Size::new(100.0, 100.0),
    has_text: false,
    is_path: false,
    stroke_width: 1.0,
    cursor: CursorIcon::Crosshair,
};

const TEXT: ShapeConfig = ShapeConfig {
    default_size: Size::new(120.0, 40.0),
    has_text: true,
    is_path: false,
    stroke_width: 0.0,
    cursor: CursorIcon::Text,
};

const PEN: ShapeConfig = ShapeConfig {
    default_size: Size::ZERO,
    has_text: false,
    is_path: true,
    stroke_width: 2.0,
    cursor: CursorIcon::Crosshair,
};

const BRUSH: ShapeConfig = ShapeConfig {
    default_size: Size::ZERO,
    has_text: false,
    is_path: true,
    stroke_width: 8.0,
    cursor: CursorIcon::Crosshair,
};

impl ShapeConfig {
    /// Look up the configuration of a kind.
    pub fn for_kind(kind: ShapeKind) -> &'static ShapeConfig {
        match kind {
            ShapeKind::Rectangle => &RECTANGLE,
            ShapeKind::Circle => &CIRCLE,
            ShapeKind::Triangle => &TRIANGLE,
            ShapeKind::Text => &TEXT,
            ShapeKind::Pen => &PEN,
            ShapeKind::Brush => &BRUSH,
        }
    }
}

/// Configuration of `kind`.
pub fn config(kind: ShapeKind) -> &'static ShapeConfig {
    ShapeConfig::for_kind(kind)
}

/// Build a new shape of `kind` anchored at `start`, filled with `color`.
pub fn create_shape(kind: ShapeKind, start: Point, color: &str) -> Shape {
    create_shape_with_id(kind, start, color, ShapeId::generate())
}

/// Same as [`create_shape`] with a caller-chosen id.
pub fn create_shape_with_id(kind: ShapeKind, start: Point, color: &str, id: ShapeId) -> Shape {
    let config = ShapeConfig::for_kind(kind);

    let mut shape = Shape {
        id,
        kind: kind.into(),
        x: start.x,
        y: start.y,
        w: config.default_size.width,
        h: config.default_size.height,
        fill: color.to_string(),
        stroke: Some(DEFAULT_STROKE.to_string()),
        stroke_width: Some(config.stroke_width),
        text: None,
        points: None,
    };

    if config.has_text {
        shape.text = Some(PLACEHOLDER_TEXT.to_string());
    }

    if config.is_path {
        // Path kinds stroke with their fill color.
        shape.points = Some(vec![start]);
        shape.stroke = None;
    }

    shape
}

/// Whether the tool draws freehand paths.
pub fn is_drawing_tool(tool: Tool) -> bool {
    match tool {
        Tool::Select => false,
        Tool::Draw(kind) => ShapeConfig::for_kind(kind).is_path,
    }
}

pub fn has_text(kind: ShapeKind) -> bool {
    ShapeConfig::for_kind(kind).has_text
}

/// Whether shapes of this kind get resize handles.
pub fn can_resize(kind: ShapeKind) -> bool {
    !ShapeConfig::for_kind(kind).is_path
}

/// Cursor to show while `tool` is active.
pub fn cursor(tool: Tool) -> CursorIcon {
    match tool {
        Tool::Select => CursorIcon::Default,
        Tool::Draw(kind) => ShapeConfig::for_kind(kind).cursor,
    }
}

pub fn all_kinds() -> Vec<ShapeKind> {
    ShapeKind::ALL.to_vec()
}

/// Kinds drawn as freehand paths.
pub fn drawing_kinds() -> Vec<ShapeKind> {
    ShapeKind::ALL
        .into_iter()
        .filter(|&kind| ShapeConfig::for_kind(kind).is_path)
        .collect()
}

/// Kinds drawn as boxes.
pub fn geometric_kinds() -> Vec<ShapeKind> {
    ShapeKind::ALL
        .into_iter()
        .filter(|&kind| !ShapeConfig::for_kind(kind).is_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rectangle_defaults() {
        let shape = create_shape(ShapeKind::Rectangle, Point::new(50.0, 50.0), "#FF0000");
        assert!((shape.x - 50.0).abs() < f64::EPSILON);
        assert!((shape.y - 50.0).abs() < f64::EPSILON);
        assert!((shape.w - 120.0).abs() < f64::EPSILON);
        assert!((shape.h - 80.0).abs() < f64::EPSILON);
        assert_eq!(shape.fill, "#FF0000");
        assert_eq!(shape.stroke.as_deref(), Some("#000"));
        assert_eq!(shape.stroke_width, Some(1.0));
        assert!(shape.text.is_none());
        assert!(shape.points.is_none());
    }

    #[test]
    fn test_create_text_has_placeholder() {
        let shape = create_shape(ShapeKind::Text, Point::new(0.0, 0.0), "#fff");
        assert_eq!(shape.text.as_deref(), Some(PLACEHOLDER_TEXT));
        assert!((shape.w - 120.0).abs() < f64::EPSILON);
        assert!((shape.h - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_create_path_shapes() {
        let start = Point::new(7.0, 9.0);
        let pen = create_shape(ShapeKind::Pen, start, "#123456");
        assert!(pen.w.abs() < f64::EPSILON && pen.h.abs() < f64::EPSILON);
        assert!(pen.stroke.is_none());
        assert_eq!(pen.stroke_width, Some(2.0));
        assert_eq!(pen.path_points(), &[start]);

        let brush = create_shape(ShapeKind::Brush, start, "#123456");
        assert_eq!(brush.stroke_width, Some(8.0));
    }

    #[test]
    fn test_cursor_table() {
        assert_eq!(cursor(Tool::Select), CursorIcon::Default);
        assert_eq!(cursor(Tool::Draw(ShapeKind::Text)), CursorIcon::Text);
        assert_eq!(cursor(Tool::Draw(ShapeKind::Brush)).as_css(), "crosshair");
    }

    #[test]
    fn test_kind_queries() {
        assert!(is_drawing_tool(Tool::Draw(ShapeKind::Pen)));
        assert!(!is_drawing_tool(Tool::Draw(ShapeKind::Circle)));
        assert!(!is_drawing_tool(Tool::Select));
        assert!(has_text(ShapeKind::Text));
        assert!(!can_resize(ShapeKind::Brush));
        assert!(can_resize(ShapeKind::Triangle));
        assert_eq!(drawing_kinds(), vec![ShapeKind::Pen, ShapeKind::Brush]);
        assert_eq!(geometric_kinds().len(), 4);
        assert_eq!(all_kinds().len(), 6);
        assert_eq!(config(ShapeKind::Text).cursor, CursorIcon::Text);
    }
}
