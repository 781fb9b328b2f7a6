//! CSS color strings to peniko colors.

use crate::renderer::{RenderResult, RendererError};
use log::warn;
use peniko::Color;
use peniko::color::{Srgb, parse_color};

/// Parse a CSS color string (`#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`,
/// `rgba()`, named colors).
pub fn parse_css_color(value: &str) -> RenderResult<Color> {
    parse_color(value.trim())
        .map(|color| color.to_alpha_color::<Srgb>())
        .map_err(|e| RendererError::InvalidColor(format!("{}: {}", value, e)))
}

/// Parse `value`, falling back to `fallback` with a warning.
pub fn color_or(value: &str, fallback: Color) -> Color {
    parse_css_color(value).unwrap_or_else(|e| {
        warn!("{}", e);
        fallback
    })
}
