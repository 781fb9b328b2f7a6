//! A surface that records draw calls instead of rasterizing them.

use crate::renderer::Surface;
use kurbo::{BezPath, Point, Size, Stroke};
use peniko::Color;
use peniko::color::Rgba8;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        size: Size,
    },
    FillPath {
        path: BezPath,
        color: Rgba8,
    },
    StrokePath {
        path: BezPath,
        stroke: Stroke,
        color: Rgba8,
    },
    FillText {
        text: String,
        origin: Point,
        font_size: f64,
        color: Rgba8,
    },
}

/// Display-list surface, useful for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size passed to the last clear.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Commands recorded since the last clear (including that clear).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: Size) {
        self.size = size;
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { size });
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color: color.to_rgba8(),
        });
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            color: color.to_rgba8(),
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            origin,
            font_size,
            color: color.to_rgba8(),
        });
    }
}
