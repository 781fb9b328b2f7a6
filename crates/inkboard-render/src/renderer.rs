//! Renderer trait abstraction.

use crate::frame::render_frame;
use inkboard_core::canvas::Canvas;
use inkboard_core::shapes::{Shape, ShapeId};
use kurbo::{BezPath, Point, Size, Stroke};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Default pitch of the background grid.
pub const DEFAULT_GRID_SIZE: f64 = 24.0;

/// A 2D drawing target.
///
/// All coordinates are canvas pixels; there is no transform stack.
pub trait Surface {
    /// Reset the surface to a blank buffer of `size`.
    fn clear(&mut self, size: Size);

    fn fill_path(&mut self, path: &BezPath, color: Color);

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color);

    /// Draw one line of text with its top-left corner at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color);
}

/// Context for a single render frame.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Shapes in paint order.
    pub shapes: &'a [Shape],
    /// Shape to outline with the selection decoration.
    pub selected_id: Option<&'a ShapeId>,
    /// Viewport size in pixels.
    pub viewport_size: Size,
    pub background_color: Color,
    pub grid_color: Color,
    /// Grid pitch; zero or negative disables the grid.
    pub grid_size: f64,
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(shapes: &'a [Shape], viewport_size: Size) -> Self {
        Self {
            shapes,
            selected_id: None,
            viewport_size,
            background_color: Color::from_rgb8(15, 23, 42),
            grid_color: Color::new([1.0, 1.0, 1.0, 0.03]),
            grid_size: DEFAULT_GRID_SIZE,
            selection_color: Color::from_rgb8(96, 165, 250),
        }
    }

    /// Context for the canvas' current shapes and selection.
    pub fn from_canvas(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self::new(canvas.shapes(), viewport_size).with_selection(canvas.selected_id())
    }

    pub fn with_selection(mut self, selected_id: Option<&'a ShapeId>) -> Self {
        self.selected_id = selected_id;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_grid_color(mut self, color: Color) -> Self {
        self.grid_color = color;
        self
    }

    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the selection outline color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    pub fn with_viewport_size(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    /// The selected shape, if the selected id resolves.
    pub fn selected_shape(&self) -> Option<&'a Shape> {
        let id = self.selected_id?;
        self.shapes.iter().find(|shape| &shape.id == id)
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

impl<S: Surface> Renderer for S {
    fn build_scene(&mut self, ctx: &RenderContext) {
        render_frame(self, ctx);
    }
}
