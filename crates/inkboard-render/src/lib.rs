//! Inkboard Render Library
//!
//! Frame rendering for the Inkboard canvas over an abstract [`Surface`].
//! The default backend encodes into a Vello scene; [`RecordingSurface`]
//! captures a display list instead.

mod color;
mod frame;
mod recording;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use color::{color_or, parse_css_color};
pub use frame::{
    HANDLE_SIZE, SELECTION_DASH, SELECTION_INSET, draw_background, draw_selection, draw_shape,
    render_frame, text_font_size,
};
pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{
    DEFAULT_GRID_SIZE, RenderContext, RenderResult, Renderer, RendererError, Surface,
};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloSurface;
