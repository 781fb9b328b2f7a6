//! Inkboard Core Library
//!
//! Platform-agnostic document model, geometry and interaction logic for the
//! Inkboard drawing canvas.

pub mod canvas;
pub mod geometry;
pub mod input;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use canvas::{COLOR_PRESETS, Canvas, CanvasDocument, CanvasError, CanvasResult, DEFAULT_COLOR};
pub use geometry::{
    Handle, HandleName, hit_test_handle, hit_test_shape, resize_shape, shape_handles,
};
pub use input::PointerEvent;
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeType, create_shape};
pub use storage::{Storage, StorageError, StorageResult};
pub use tools::{Gesture, InteractionController, InteractionState, TextPrompt, Tool};
