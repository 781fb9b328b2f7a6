//! Pointer-driven interaction state machine.
//!
//! The controller owns at most one [`Gesture`], created on pointer-down and
//! dropped on pointer-up. All document changes go through [`Canvas`], which
//! raises the redraw request.

use crate::canvas::Canvas;
use crate::geometry::{HandleName, hit_test_handle, hit_test_shape, resize_shape, shape_handles};
use crate::input::PointerEvent;
use crate::shapes::{Shape, ShapeId, ShapeKind, create_shape};
use crate::tools::Tool;
use kurbo::{Point, Rect, Vec2};
use log::{debug, trace, warn};

/// Smallest width a box shape has while it is being drawn.
pub const CREATION_MIN_WIDTH: f64 = 40.0;
/// Smallest height a box shape has while it is being drawn.
pub const CREATION_MIN_HEIGHT: f64 = 24.0;

/// Source of replacement text for text shapes.
///
/// Hosts typically show a modal dialog. `None` means the edit was cancelled.
pub trait TextPrompt {
    fn prompt_text(&mut self, current: &str) -> Option<String>;
}

impl<F> TextPrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn prompt_text(&mut self, current: &str) -> Option<String> {
        self(current)
    }
}

/// Coarse controller state, derived from the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    DraggingExisting,
    Resizing,
    DrawingNewBox,
    DrawingNewPath,
}

/// Bookkeeping for one pointer-down → pointer-up sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Moving a selected shape. `offset` is pointer minus shape origin at
    /// pointer-down.
    DraggingExisting {
        shape_id: ShapeId,
        offset: Vec2,
        snapshot: Shape,
    },
    /// Dragging a resize handle. `snapshot` is the shape as it was at
    /// pointer-down and is never updated during the drag.
    Resizing {
        shape_id: ShapeId,
        handle: HandleName,
        snapshot: Shape,
    },
    /// Sizing a freshly created box shape.
    DrawingNewBox { shape_id: ShapeId, start: Point },
    /// Recording points of a freshly created pen or brush shape.
    DrawingNewPath { shape_id: ShapeId },
}

impl Gesture {
    pub fn state(&self) -> InteractionState {
        match self {
            Gesture::DraggingExisting { .. } => InteractionState::DraggingExisting,
            Gesture::Resizing { .. } => InteractionState::Resizing,
            Gesture::DrawingNewBox { .. } => InteractionState::DrawingNewBox,
            Gesture::DrawingNewPath { .. } => InteractionState::DrawingNewPath,
        }
    }

    /// The shape this gesture acts on.
    pub fn shape_id(&self) -> &ShapeId {
        match self {
            Gesture::DraggingExisting { shape_id, .. }
            | Gesture::Resizing { shape_id, .. }
            | Gesture::DrawingNewBox { shape_id, .. }
            | Gesture::DrawingNewPath { shape_id } => shape_id,
        }
    }
}

/// Turns pointer events into document changes.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    gesture: Option<Gesture>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.gesture
            .as_ref()
            .map_or(InteractionState::Idle, Gesture::state)
    }

    /// The active gesture, if a pointer is down.
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Dispatch a raw host event.
    ///
    /// `surface_bounds` is the drawing surface's on-screen rectangle at the
    /// time of this event.
    pub fn handle_event(
        &mut self,
        canvas: &mut Canvas,
        event: PointerEvent,
        surface_bounds: Rect,
        prompt: &mut dyn TextPrompt,
    ) {
        let point = event.canvas_position(surface_bounds);
        match event {
            PointerEvent::Down { .. } => self.pointer_down(canvas, point),
            PointerEvent::Move { .. } => self.pointer_move(canvas, point),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::DoubleClick { .. } => {
                self.double_click(canvas, point, prompt);
            }
        }
    }

    /// Start a gesture at `point` (canvas coordinates).
    pub fn pointer_down(&mut self, canvas: &mut Canvas, point: Point) {
        self.gesture = match canvas.tool() {
            Tool::Select => Self::begin_select(canvas, point),
            Tool::Draw(kind) => Self::begin_draw(canvas, kind, point),
        };
        debug!("Pointer down at {:?}: {:?}", point, self.state());
    }

    fn begin_select(canvas: &mut Canvas, point: Point) -> Option<Gesture> {
        let Some(hit) = hit_test_shape(point, canvas.shapes()).cloned() else {
            canvas.clear_selection();
            return None;
        };

        canvas.select(&hit.id);
        canvas.set_color(hit.fill.clone());

        let handle = hit
            .is_resizable()
            .then(|| hit_test_handle(point, &shape_handles(&hit)))
            .flatten();

        Some(match handle {
            Some(handle) => Gesture::Resizing {
                shape_id: hit.id.clone(),
                handle: handle.name,
                snapshot: hit,
            },
            None => Gesture::DraggingExisting {
                shape_id: hit.id.clone(),
                offset: hit.offset_of(point),
                snapshot: hit,
            },
        })
    }

    fn begin_draw(canvas: &mut Canvas, kind: ShapeKind, point: Point) -> Option<Gesture> {
        let shape = create_shape(kind, point, canvas.color());
        let shape_id = match canvas.add_and_select(shape) {
            Ok(id) => id,
            Err(e) => {
                warn!("Failed to add new {} shape: {}", kind, e);
                return None;
            }
        };

        Some(if kind.is_path() {
            Gesture::DrawingNewPath { shape_id }
        } else {
            Gesture::DrawingNewBox {
                shape_id,
                start: point,
            }
        })
    }

    /// Advance the active gesture to `point`. No-op while idle.
    pub fn pointer_move(&mut self, canvas: &mut Canvas, point: Point) {
        let Some(gesture) = &self.gesture else {
            return;
        };
        trace!("Pointer move to {:?} ({:?})", point, gesture.state());

        match gesture {
            Gesture::DraggingExisting {
                shape_id, offset, ..
            } => {
                let origin = point - *offset;
                canvas.update_shape(shape_id, |shape| shape.move_to(origin));
            }
            Gesture::Resizing {
                shape_id,
                handle,
                snapshot,
            } => {
                let handle = *handle;
                canvas.update_shape(shape_id, |shape| {
                    *shape = resize_shape(shape, handle, point, snapshot);
                });
            }
            Gesture::DrawingNewBox { shape_id, start } => {
                let start = *start;
                canvas.update_shape(shape_id, |shape| {
                    shape.set_bounds(
                        start.x.min(point.x),
                        start.y.min(point.y),
                        (point.x - start.x).abs().max(CREATION_MIN_WIDTH),
                        (point.y - start.y).abs().max(CREATION_MIN_HEIGHT),
                    );
                });
            }
            Gesture::DrawingNewPath { shape_id } => {
                canvas.update_shape(shape_id, |shape| shape.push_point(point));
            }
        }
    }

    /// End the active gesture.
    pub fn pointer_up(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            debug!("Gesture ended: {:?} on {}", gesture.state(), gesture.shape_id());
        }
    }

    /// Edit the text of the text shape under `point`.
    ///
    /// Returns true if the text was replaced.
    pub fn double_click(
        &mut self,
        canvas: &mut Canvas,
        point: Point,
        prompt: &mut dyn TextPrompt,
    ) -> bool {
        let Some(hit) = hit_test_shape(point, canvas.shapes()) else {
            return false;
        };
        if hit.known_kind() != Some(ShapeKind::Text) {
            return false;
        }
        let id = hit.id.clone();
        let current = hit.text.clone().unwrap_or_default();

        match prompt.prompt_text(&current) {
            Some(text) => {
                debug!("Text of {} replaced", id);
                canvas.update_shape(&id, |shape| shape.text = Some(text))
            }
            None => false,
        }
    }
}
