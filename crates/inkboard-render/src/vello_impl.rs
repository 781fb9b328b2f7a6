//! Vello-backed surface.

use crate::renderer::Surface;
use kurbo::{Affine, BezPath, Point, Rect, Size, Stroke};
use log::warn;
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use vello::Scene;

/// Font stack used for text shapes.
const TEXT_FONT_STACK: &str = "Inter, ui-sans-serif, system-ui, sans-serif";

/// Surface that encodes draw calls into a [`vello::Scene`].
///
/// Text is laid out with Parley against the system font collection.
pub struct VelloSurface {
    scene: Scene,
    size: Size,
    font_cx: FontContext,
    layout_cx: LayoutContext<Brush>,
}

impl Default for VelloSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloSurface {
    /// Create a new Vello surface.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            size: Size::ZERO,
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Size of the current frame.
    pub fn size(&self) -> Size {
        self.size
    }
}

impl Surface for VelloSurface {
    fn clear(&mut self, size: Size) {
        self.scene.reset();
        self.size = size;
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, color, None, path);
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.scene.stroke(stroke, Affine::IDENTITY, color, None, path);
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color) {
        if text.is_empty() {
            return;
        }

        let brush = Brush::Solid(color);
        let mut builder = self
            .layout_cx
            .ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size as f32));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Source(
            TEXT_FONT_STACK.into(),
        )));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());

        // Parley puts y = 0 at the top of the first line, matching a top baseline.
        let transform = Affine::translate((origin.x, origin.y));
        let mut glyph_count = 0;

        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();
                glyph_count += glyphs.len();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(run.font())
                        .brush(&brush)
                        .hint(true)
                        .transform(transform)
                        .glyph_transform(glyph_xform)
                        .font_size(run.font_size())
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        // No usable system font: mark where the text would be.
        if glyph_count == 0 {
            warn!("No glyphs produced for text at {:?}", origin);
            let width = text.chars().count() as f64 * font_size * 0.6;
            let rect = Rect::new(
                origin.x,
                origin.y,
                origin.x + width,
                origin.y + font_size * 1.2,
            );
            self.scene.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                color.with_alpha(0.4),
                None,
                &rect,
            );
        }
    }
}
