//! Hit testing, resize handles and resize math.
//!
//! Everything here is a pure function of its arguments.

use crate::shapes::{DEFAULT_PATH_HIT_THRESHOLD, MIN_SHAPE_SIZE, Shape, ShapeKind, ShapeType};
use kurbo::{Point, Rect};
use std::fmt;
use std::str::FromStr;

/// Half-width of the square hit area around a handle.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// Map a raw device position into canvas coordinates.
///
/// `surface_bounds` is the drawing surface's current on-screen rectangle.
/// Callers pass it fresh with every event; the surface may have moved.
pub fn map_event_to_canvas_point(client: Point, surface_bounds: Rect) -> Point {
    Point::new(client.x - surface_bounds.x0, client.y - surface_bounds.y0)
}

/// Find the topmost shape under `point`.
///
/// Shapes later in the slice paint on top and win.
pub fn hit_test_shape(point: Point, shapes: &[Shape]) -> Option<&Shape> {
    shapes.iter().rev().find(|shape| shape_contains(shape, point))
}

/// Whether `point` lies on `shape`.
pub fn shape_contains(shape: &Shape, point: Point) -> bool {
    let ShapeType::Known(kind) = &shape.kind else {
        return false;
    };

    match kind {
        ShapeKind::Rectangle | ShapeKind::Text | ShapeKind::Triangle => {
            point.x >= shape.x
                && point.x <= shape.x + shape.w
                && point.y >= shape.y
                && point.y <= shape.y + shape.h
        }
        ShapeKind::Circle => {
            let rx = shape.w / 2.0;
            let ry = shape.h / 2.0;
            let nx = (point.x - (shape.x + rx)) / rx;
            let ny = (point.y - (shape.y + ry)) / ry;
            nx * nx + ny * ny <= 1.0
        }
        ShapeKind::Pen | ShapeKind::Brush => {
            // Proximity to recorded samples only, not to the segments between them.
            let threshold = shape
                .stroke_width
                .filter(|w| *w != 0.0)
                .unwrap_or(DEFAULT_PATH_HIT_THRESHOLD);
            shape
                .path_points()
                .iter()
                .any(|p| p.distance(point) <= threshold)
        }
    }
}

/// Name of one of the eight resize grips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleName {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl HandleName {
    /// All handles, clockwise from the top-left corner.
    pub const ALL: [HandleName; 8] = [
        HandleName::NorthWest,
        HandleName::North,
        HandleName::NorthEast,
        HandleName::East,
        HandleName::SouthEast,
        HandleName::South,
        HandleName::SouthWest,
        HandleName::West,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HandleName::NorthWest => "nw",
            HandleName::North => "n",
            HandleName::NorthEast => "ne",
            HandleName::East => "e",
            HandleName::SouthEast => "se",
            HandleName::South => "s",
            HandleName::SouthWest => "sw",
            HandleName::West => "w",
        }
    }

    /// Position of this handle on `bounds`.
    fn anchor(self, bounds: Rect) -> Point {
        let cx = bounds.x0 + bounds.width() / 2.0;
        let cy = bounds.y0 + bounds.height() / 2.0;
        match self {
            HandleName::NorthWest => Point::new(bounds.x0, bounds.y0),
            HandleName::North => Point::new(cx, bounds.y0),
            HandleName::NorthEast => Point::new(bounds.x1, bounds.y0),
            HandleName::East => Point::new(bounds.x1, cy),
            HandleName::SouthEast => Point::new(bounds.x1, bounds.y1),
            HandleName::South => Point::new(cx, bounds.y1),
            HandleName::SouthWest => Point::new(bounds.x0, bounds.y1),
            HandleName::West => Point::new(bounds.x0, cy),
        }
    }

    /// The handle on the other side of the box.
    pub fn opposite(self) -> HandleName {
        match self {
            HandleName::NorthWest => HandleName::SouthEast,
            HandleName::North => HandleName::South,
            HandleName::NorthEast => HandleName::SouthWest,
            HandleName::East => HandleName::West,
            HandleName::SouthEast => HandleName::NorthWest,
            HandleName::South => HandleName::North,
            HandleName::SouthWest => HandleName::NorthEast,
            HandleName::West => HandleName::East,
        }
    }
}

impl fmt::Display for HandleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandleName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("Unknown handle: {}", s))
    }
}

/// A resize grip with its position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub name: HandleName,
    pub position: Point,
}

impl Handle {
    pub fn new(name: HandleName, position: Point) -> Self {
        Self { name, position }
    }

    /// Square hit test with the given half-width.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (self.position.x - point.x).abs() <= tolerance
            && (self.position.y - point.y).abs() <= tolerance
    }
}

/// The eight handles at the corners and edge midpoints of the shape's box.
///
/// Defined for every shape; path shapes get handles on their zero-sized box,
/// so interactive callers must check [`Shape::is_resizable`] first.
pub fn shape_handles(shape: &Shape) -> [Handle; 8] {
    let bounds = shape.bounds();
    HandleName::ALL.map(|name| Handle::new(name, name.anchor(bounds)))
}

/// First handle whose tolerance square contains `point`.
pub fn hit_test_handle(point: Point, handles: &[Handle]) -> Option<Handle> {
    handles
        .iter()
        .find(|handle| handle.hit_test(point, HANDLE_HIT_TOLERANCE))
        .copied()
}

/// Resize `shape` by dragging `handle` to `current`.
///
/// The new box is always derived from `initial`, the snapshot taken when the
/// drag began, so repeated moves never accumulate error. The edge or corner
/// opposite the handle stays fixed; moving edges stop [`MIN_SHAPE_SIZE`]
/// short of it.
pub fn resize_shape(shape: &Shape, handle: HandleName, current: Point, initial: &Shape) -> Shape {
    let right = initial.x + initial.w;
    let bottom = initial.y + initial.h;

    let (mut x, mut y, mut w, mut h) = (initial.x, initial.y, initial.w, initial.h);

    let drag_left = |x: &mut f64, w: &mut f64| {
        *x = (right - MIN_SHAPE_SIZE).min(current.x);
        *w = right - *x;
    };
    let drag_top = |y: &mut f64, h: &mut f64| {
        *y = (bottom - MIN_SHAPE_SIZE).min(current.y);
        *h = bottom - *y;
    };
    let drag_right = |w: &mut f64| *w = MIN_SHAPE_SIZE.max(current.x - initial.x);
    let drag_bottom = |h: &mut f64| *h = MIN_SHAPE_SIZE.max(current.y - initial.y);

    match handle {
        HandleName::NorthWest => {
            drag_left(&mut x, &mut w);
            drag_top(&mut y, &mut h);
        }
        HandleName::North => drag_top(&mut y, &mut h),
        HandleName::NorthEast => {
            drag_right(&mut w);
            drag_top(&mut y, &mut h);
        }
        HandleName::East => drag_right(&mut w),
        HandleName::SouthEast => {
            drag_right(&mut w);
            drag_bottom(&mut h);
        }
        HandleName::South => drag_bottom(&mut h),
        HandleName::SouthWest => {
            drag_left(&mut x, &mut w);
            drag_bottom(&mut h);
        }
        HandleName::West => drag_left(&mut x, &mut w),
    }

    let mut resized = shape.clone();
    resized.set_bounds(x, y, w, h);
    resized
}
