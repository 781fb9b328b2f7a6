//! Frame composition and per-shape draw routines.
//!
//! A frame is a pure projection of (shapes, selected id) onto a [`Surface`]:
//! clear, background, grid, shapes bottom to top, then the selection
//! decoration.

use crate::color::color_or;
use crate::renderer::{RenderContext, Surface};
use inkboard_core::geometry::shape_handles;
use inkboard_core::shapes::{Shape, ShapeKind, ShapeType};
use kurbo::{BezPath, Cap, Ellipse, Join, Point, Rect, Shape as _, Size, Stroke};
use log::warn;
use peniko::Color;

/// Outset of the dashed selection outline around the shape box.
pub const SELECTION_INSET: f64 = 3.0;
/// Dash and gap length of the selection outline.
pub const SELECTION_DASH: f64 = 6.0;
pub const SELECTION_STROKE_WIDTH: f64 = 2.0;
/// Side of the square resize handles.
pub const HANDLE_SIZE: f64 = 12.0;
/// Offset of the first text line from the shape origin.
pub const TEXT_PADDING: (f64, f64) = (6.0, 4.0);
pub const MIN_FONT_SIZE: f64 = 12.0;

const DEFAULT_OUTLINE_WIDTH: f64 = 2.0;
const DEFAULT_PEN_WIDTH: f64 = 2.0;
const DEFAULT_BRUSH_WIDTH: f64 = 8.0;
const PATH_TOLERANCE: f64 = 0.1;

/// Paint a full frame.
pub fn render_frame<S: Surface + ?Sized>(surface: &mut S, ctx: &RenderContext) {
    surface.clear(ctx.viewport_size);
    draw_background(surface, ctx);

    for shape in ctx.shapes {
        draw_shape(surface, shape);
    }

    if let Some(shape) = ctx.selected_shape() {
        draw_selection(surface, shape, ctx.selection_color);
    }
}

/// Fill the viewport and paint the grid over it.
pub fn draw_background<S: Surface + ?Sized>(surface: &mut S, ctx: &RenderContext) {
    let Size { width, height } = ctx.viewport_size;
    let bounds = Rect::new(0.0, 0.0, width, height);
    surface.fill_path(&bounds.to_path(PATH_TOLERANCE), ctx.background_color);

    if ctx.grid_size <= 0.0 {
        return;
    }

    // Lines sit on half pixels so 1px strokes stay crisp.
    let stroke = Stroke::new(1.0);
    let mut x = 0.0;
    while x < width {
        let mut path = BezPath::new();
        path.move_to((x + 0.5, 0.0));
        path.line_to((x + 0.5, height));
        surface.stroke_path(&path, &stroke, ctx.grid_color);
        x += ctx.grid_size;
    }

    let mut y = 0.0;
    while y < height {
        let mut path = BezPath::new();
        path.move_to((0.0, y + 0.5));
        path.line_to((width, y + 0.5));
        surface.stroke_path(&path, &stroke, ctx.grid_color);
        y += ctx.grid_size;
    }
}

/// Paint one shape. Returns false if the shape type is unknown and was
/// skipped.
pub fn draw_shape<S: Surface + ?Sized>(surface: &mut S, shape: &Shape) -> bool {
    let kind = match &shape.kind {
        ShapeType::Known(kind) => *kind,
        ShapeType::Unknown(tag) => {
            warn!("Unknown shape type: {} (shape {})", tag, shape.id);
            return false;
        }
    };

    let fill = color_or(&shape.fill, Color::BLACK);
    match kind {
        ShapeKind::Rectangle => {
            draw_box_path(surface, shape, &shape.bounds().to_path(PATH_TOLERANCE), fill)
        }
        ShapeKind::Circle => {
            let ellipse = Ellipse::from_rect(shape.bounds());
            draw_box_path(surface, shape, &ellipse.to_path(PATH_TOLERANCE), fill);
        }
        ShapeKind::Triangle => draw_box_path(surface, shape, &triangle_path(shape.bounds()), fill),
        ShapeKind::Text => draw_text(surface, shape, fill),
        ShapeKind::Pen => {
            if let Some(path) = polyline_path(shape.path_points()) {
                let width = shape.stroke_width.unwrap_or(DEFAULT_PEN_WIDTH);
                surface.stroke_path(&path, &round_stroke(width), fill);
            }
        }
        ShapeKind::Brush => {
            if let Some(path) = smoothed_path(shape.path_points()) {
                let width = shape.stroke_width.unwrap_or(DEFAULT_BRUSH_WIDTH);
                surface.stroke_path(&path, &round_stroke(width), fill);
            }
        }
    }
    true
}

fn draw_box_path<S: Surface + ?Sized>(surface: &mut S, shape: &Shape, path: &BezPath, fill: Color) {
    surface.fill_path(path, fill);
    if let Some(stroke_color) = &shape.stroke {
        let width = shape.stroke_width.unwrap_or(DEFAULT_OUTLINE_WIDTH);
        let color = color_or(stroke_color, Color::BLACK);
        surface.stroke_path(path, &Stroke::new(width), color);
    }
}

/// Apex at top-center, base along the bottom edge.
fn triangle_path(bounds: Rect) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((bounds.x0 + bounds.width() / 2.0, bounds.y0));
    path.line_to((bounds.x0, bounds.y1));
    path.line_to((bounds.x1, bounds.y1));
    path.close_path();
    path
}

/// Font size used for a text box of height `h`.
pub fn text_font_size(h: f64) -> f64 {
    MIN_FONT_SIZE.max((h / 2.0).floor())
}

fn draw_text<S: Surface + ?Sized>(surface: &mut S, shape: &Shape, color: Color) {
    let content = shape.text.as_deref().unwrap_or_default();
    let font_size = text_font_size(shape.h);
    let lines: Vec<&str> = content.split('\n').collect();
    let line_height = (shape.h / lines.len() as f64).floor();

    let x = shape.x + TEXT_PADDING.0;
    let mut y = shape.y + TEXT_PADDING.1;
    for line in lines {
        surface.fill_text(line, Point::new(x, y), font_size, color);
        y += line_height;
    }
}

fn round_stroke(width: f64) -> Stroke {
    Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
}

/// Straight segments through every point. `None` below two points.
fn polyline_path(points: &[Point]) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    Some(path)
}

/// Quadratic segments through the midpoints of consecutive samples, with the
/// samples as control points, finished by a line to the last sample.
fn smoothed_path(points: &[Point]) -> Option<BezPath> {
    if points.len() < 2 {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to(points[0]);
    for pair in points[1..].windows(2) {
        let (control, next) = (pair[0], pair[1]);
        path.quad_to(control, control.midpoint(next));
    }
    path.line_to(points[points.len() - 1]);
    Some(path)
}

/// Dashed outline plus, for box shapes, the eight resize handles.
pub fn draw_selection<S: Surface + ?Sized>(surface: &mut S, shape: &Shape, color: Color) {
    let outline = shape.bounds().inflate(SELECTION_INSET, SELECTION_INSET);
    let stroke =
        Stroke::new(SELECTION_STROKE_WIDTH).with_dashes(0.0, [SELECTION_DASH, SELECTION_DASH]);
    surface.stroke_path(&outline.to_path(PATH_TOLERANCE), &stroke, color);

    if !shape.is_resizable() {
        return;
    }

    let border = Stroke::new(1.0);
    let border_color = Color::from_rgb8(17, 24, 39);
    for handle in shape_handles(shape) {
        let square = Rect::from_center_size(handle.position, (HANDLE_SIZE, HANDLE_SIZE))
            .to_path(PATH_TOLERANCE);
        surface.fill_path(&square, Color::WHITE);
        surface.stroke_path(&square, &border, border_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use inkboard_core::shapes::{ShapeId, create_shape_with_id};
    use kurbo::PathEl;

    fn shape(kind: ShapeKind, id: &str, x: f64, y: f64) -> Shape {
        create_shape_with_id(kind, Point::new(x, y), "#FF0000", ShapeId::from(id))
    }

    fn render(shapes: &[Shape], selected: Option<&ShapeId>) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        let ctx = RenderContext::new(shapes, Size::new(48.0, 24.0)).with_selection(selected);
        render_frame(&mut surface, &ctx);
        surface
    }

    fn shape_commands(surface: &RecordingSurface) -> &[DrawCommand] {
        // clear + background + 2 vertical + 1 horizontal grid lines
        &surface.commands()[5..]
    }

    #[test]
    fn test_frame_order() {
        let surface = render(&[], None);
        let commands = surface.commands();
        assert_eq!(commands.len(), 5);
        assert!(matches!(
            commands[0],
            DrawCommand::Clear { size } if size == Size::new(48.0, 24.0)
        ));
        assert!(matches!(commands[1], DrawCommand::FillPath { .. }));
        assert!(commands[2..].iter().all(|c| matches!(c, DrawCommand::StrokePath { .. })));
    }

    #[test]
    fn test_grid_on_half_pixels() {
        let surface = render(&[], None);
        let DrawCommand::StrokePath { path, stroke, .. } = &surface.commands()[3] else {
            panic!("expected grid line");
        };
        assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(24.5, 0.0)));
        assert!((stroke.width - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_grid_size_skips_grid() {
        let mut surface = RecordingSurface::new();
        let ctx = RenderContext::new(&[], Size::new(100.0, 100.0)).with_grid_size(0.0);
        render_frame(&mut surface, &ctx);
        assert_eq!(surface.commands().len(), 2);
    }

    #[test]
    fn test_rectangle_fill_and_outline() {
        let shapes = [shape(ShapeKind::Rectangle, "r", 10.0, 10.0)];
        let surface = render(&shapes, None);
        let commands = shape_commands(&surface);
        assert_eq!(commands.len(), 2);
        match &commands[0] {
            DrawCommand::FillPath { path, color } => {
                assert_eq!(path.bounding_box(), Rect::new(10.0, 10.0, 130.0, 90.0));
                assert_eq!([color.r, color.g, color.b, color.a], [255, 0, 0, 255]);
            }
            other => panic!("unexpected {:?}", other),
        }
        match &commands[1] {
            DrawCommand::StrokePath { stroke, color, .. } => {
                assert!((stroke.width - 1.0).abs() < f64::EPSILON);
                assert_eq!([color.r, color.g, color.b], [0, 0, 0]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_stroke_width_defaults() {
        let mut circle = shape(ShapeKind::Circle, "c", 0.0, 0.0);
        circle.stroke_width = None;
        let surface = render(&[circle], None);
        let DrawCommand::StrokePath { stroke, .. } = &shape_commands(&surface)[1] else {
            panic!("expected outline");
        };
        assert!((stroke.width - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_outline_without_stroke() {
        let mut rect = shape(ShapeKind::Rectangle, "r", 0.0, 0.0);
        rect.stroke = None;
        let surface = render(&[rect], None);
        assert_eq!(shape_commands(&surface).len(), 1);
    }

    #[test]
    fn test_triangle_geometry() {
        let path = triangle_path(Rect::new(0.0, 0.0, 100.0, 50.0));
        let elements = path.elements();
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(50.0, 0.0)));
        assert_eq!(elements[1], PathEl::LineTo(Point::new(0.0, 50.0)));
        assert_eq!(elements[2], PathEl::LineTo(Point::new(100.0, 50.0)));
        assert_eq!(elements[3], PathEl::ClosePath);
    }

    #[test]
    fn test_text_lines() {
        let mut text = shape(ShapeKind::Text, "t", 10.0, 20.0);
        text.h = 60.0;
        text.text = Some("one\ntwo\nthree".to_string());
        let surface = render(&[text], None);

        let lines: Vec<_> = shape_commands(&surface)
            .iter()
            .map(|c| match c {
                DrawCommand::FillText {
                    text,
                    origin,
                    font_size,
                    ..
                } => (text.as_str(), *origin, *font_size),
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(
            lines,
            vec![
                ("one", Point::new(16.0, 24.0), 30.0),
                ("two", Point::new(16.0, 44.0), 30.0),
                ("three", Point::new(16.0, 64.0), 30.0),
            ]
        );
    }

    #[test]
    fn test_text_font_size_floor() {
        assert!((text_font_size(40.0) - 20.0).abs() < f64::EPSILON);
        assert!((text_font_size(15.0) - 12.0).abs() < f64::EPSILON);
        assert!((text_font_size(33.0) - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pen_needs_two_points() {
        let pen = shape(ShapeKind::Pen, "p", 0.0, 0.0);
        let surface = render(&[pen.clone()], None);
        assert!(shape_commands(&surface).is_empty());

        let mut pen = pen;
        pen.push_point(Point::new(5.0, 5.0));
        let surface = render(&[pen], None);
        let DrawCommand::StrokePath { stroke, color, .. } = &shape_commands(&surface)[0] else {
            panic!("expected stroke");
        };
        assert_eq!(stroke.start_cap, Cap::Round);
        assert_eq!(stroke.join, Join::Round);
        assert!((stroke.width - 2.0).abs() < f64::EPSILON);
        assert_eq!(color.r, 255);
    }

    #[test]
    fn test_brush_smoothing() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let path = smoothed_path(&points).unwrap();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::QuadTo(Point::new(10.0, 0.0), Point::new(10.0, 5.0)),
                PathEl::LineTo(Point::new(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let mut odd = shape(ShapeKind::Rectangle, "x", 0.0, 0.0);
        odd.kind = ShapeType::Unknown("hexagon".to_string());
        let mut surface = RecordingSurface::new();
        assert!(!draw_shape(&mut surface, &odd));
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_selection_with_handles() {
        let shapes = [shape(ShapeKind::Rectangle, "r", 10.0, 10.0)];
        let id = ShapeId::from("r");
        let surface = render(&shapes, Some(&id));
        let commands = &shape_commands(&surface)[2..];
        // outline + 8 × (fill + border)
        assert_eq!(commands.len(), 17);

        let DrawCommand::StrokePath { path, stroke, .. } = &commands[0] else {
            panic!("expected outline");
        };
        assert_eq!(path.bounding_box(), Rect::new(7.0, 7.0, 133.0, 93.0));
        assert_eq!(stroke.dash_pattern.as_slice(), &[6.0, 6.0]);

        let DrawCommand::FillPath { path, .. } = &commands[1] else {
            panic!("expected handle");
        };
        assert_eq!(path.bounding_box(), Rect::new(4.0, 4.0, 16.0, 16.0));
    }

    #[test]
    fn test_path_selection_has_no_handles() {
        let mut brush = shape(ShapeKind::Brush, "b", 0.0, 0.0);
        brush.push_point(Point::new(30.0, 30.0));
        let id = ShapeId::from("b");
        let surface = render(&[brush], Some(&id));
        // stroke + outline only
        assert_eq!(shape_commands(&surface).len(), 2);
    }

    #[test]
    fn test_dangling_selection_is_ignored() {
        let shapes = [shape(ShapeKind::Rectangle, "r", 0.0, 0.0)];
        let missing = ShapeId::from("gone");
        let surface = render(&shapes, Some(&missing));
        assert_eq!(shape_commands(&surface).len(), 2);
    }

    #[test]
    fn test_shapes_paint_in_list_order() {
        let shapes = [
            shape(ShapeKind::Rectangle, "a", 0.0, 0.0),
            shape(ShapeKind::Circle, "b", 50.0, 50.0),
        ];
        let surface = render(&shapes, None);
        let fills: Vec<Rect> = shape_commands(&surface)
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillPath { path, .. } => Some(path.bounding_box()),
                _ => None,
            })
            .collect();
        assert_eq!(fills[0], Rect::new(0.0, 0.0, 120.0, 80.0));
        assert!((fills[1].x0 - 50.0).abs() < 1e-6);
    }
}
