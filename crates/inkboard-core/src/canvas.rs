//! Canvas document and state management.

use crate::shapes::{CursorIcon, Shape, ShapeId, cursor};
use crate::tools::Tool;
use log::{debug, info, warn};
use std::collections::HashMap;
use thiserror::Error;

/// Fill color the canvas starts with.
pub const DEFAULT_COLOR: &str = "#ff6b6b";

/// Palette offered next to the free color picker.
pub const COLOR_PRESETS: [&str; 12] = [
    "#FF6B6B", "#6C5CE7", "#00B894", "#FDCB6E", "#74B9FF", "#E17055", "#A29BFE", "#55EFC4",
    "#FAB1A0", "#81ECEC", "#FFEAA7", "#D63031",
];

/// Document errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[source] serde_json::Error),
    #[error("Duplicate shape id: {0}")]
    DuplicateId(ShapeId),
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type for document operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// The ordered shape list.
///
/// Index order is paint order: later shapes paint on top. An id → index map
/// is kept alongside and rebuilt whenever positions shift.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    shapes: Vec<Shape>,
    index: HashMap<ShapeId, usize>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from an ordered list, rejecting duplicate ids.
    pub fn from_shapes(shapes: Vec<Shape>) -> CanvasResult<Self> {
        let mut index = HashMap::with_capacity(shapes.len());
        for (i, shape) in shapes.iter().enumerate() {
            if index.insert(shape.id.clone(), i).is_some() {
                return Err(CanvasError::DuplicateId(shape.id.clone()));
            }
        }
        Ok(Self { shapes, index })
    }

    fn reindex(&mut self) {
        self.index = self
            .shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| (shape.id.clone(), i))
            .collect();
    }

    /// Append a shape on top of the stack.
    pub fn add_shape(&mut self, shape: Shape) -> CanvasResult<()> {
        if self.index.contains_key(&shape.id) {
            return Err(CanvasError::DuplicateId(shape.id));
        }
        self.index.insert(shape.id.clone(), self.shapes.len());
        self.shapes.push(shape);
        Ok(())
    }

    /// Remove a shape, keeping everyone else's relative order.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Option<Shape> {
        let pos = self.index.get(id).copied()?;
        let removed = self.shapes.remove(pos);
        self.reindex();
        Some(removed)
    }

    /// Replace the whole list. On a duplicate id the document is left as is.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) -> CanvasResult<()> {
        *self = Self::from_shapes(shapes)?;
        Ok(())
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.index.clear();
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.index.get(id).map(|&i| &self.shapes[i])
    }

    /// Position of a shape in paint order.
    pub fn position(&self, id: &ShapeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.index.contains_key(id)
    }

    /// Replace the shape carrying `shape.id` with `shape`.
    /// Returns false if no such shape exists.
    pub fn replace_shape(&mut self, shape: Shape) -> bool {
        match self.index.get(&shape.id) {
            Some(&i) => {
                self.shapes[i] = shape;
                true
            }
            None => false,
        }
    }

    /// Map-and-replace the shape with `id`.
    ///
    /// `f` works on a copy; the id is restored afterwards so it stays stable.
    pub fn update_shape(&mut self, id: &ShapeId, f: impl FnOnce(&mut Shape)) -> bool {
        let Some(current) = self.get_shape(id) else {
            return false;
        };
        let mut next = current.clone();
        f(&mut next);
        next.id = id.clone();
        self.replace_shape(next)
    }

    /// Shapes in paint order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Move a shape to the end of the list.
    pub fn bring_to_front(&mut self, id: &ShapeId) -> bool {
        let Some(shape) = self.remove_shape(id) else {
            return false;
        };
        self.index.insert(shape.id.clone(), self.shapes.len());
        self.shapes.push(shape);
        true
    }

    /// Move a shape to the start of the list.
    pub fn send_to_back(&mut self, id: &ShapeId) -> bool {
        let Some(shape) = self.remove_shape(id) else {
            return false;
        };
        self.shapes.insert(0, shape);
        self.reindex();
        true
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the shape list as a pretty-printed JSON array.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string_pretty(&self.shapes).map_err(CanvasError::Serialize)
    }

    /// Parse a JSON array of shapes.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let shapes: Vec<Shape> = serde_json::from_str(json).map_err(CanvasError::InvalidSnapshot)?;
        Self::from_shapes(shapes)
    }
}

/// The mutable document together with selection, tool and color.
///
/// Every mutation of the shape list or the selection raises a redraw request
/// that the host consumes with [`Canvas::take_redraw_request`].
#[derive(Debug, Clone)]
pub struct Canvas {
    document: CanvasDocument,
    selection: Option<ShapeId>,
    tool: Tool,
    color: String,
    redraw_requested: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_document(CanvasDocument::new())
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: CanvasDocument) -> Self {
        Self {
            document,
            selection: None,
            tool: Tool::Select,
            color: DEFAULT_COLOR.to_string(),
            redraw_requested: true,
        }
    }

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// Shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        self.document.shapes()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Set the current tool. The selection is left alone.
    pub fn set_tool(&mut self, tool: Tool) {
        debug!("Tool changed: {} -> {}", self.tool, tool);
        self.tool = tool;
    }

    /// Cursor for the active tool.
    pub fn cursor(&self) -> CursorIcon {
        cursor(self.tool)
    }

    /// The active fill color.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Set the active color, recoloring the selected shape if there is one.
    pub fn set_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        debug!("Color changed: {} -> {}", self.color, color);
        self.color = color;
        if let Some(id) = self.selection.clone() {
            let color = self.color.clone();
            if self.document.update_shape(&id, |shape| shape.fill = color) {
                self.request_redraw();
            }
        }
    }

    pub fn selected_id(&self) -> Option<&ShapeId> {
        self.selection.as_ref()
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection
            .as_ref()
            .and_then(|id| self.document.get_shape(id))
    }

    /// Whether front/back/delete actions have something to act on.
    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// Select a shape. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &ShapeId) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        if self.selection.as_ref() != Some(id) {
            self.selection = Some(id.clone());
            self.request_redraw();
        }
        true
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.request_redraw();
        }
    }

    /// Raise the selected shape to the top of the stack.
    pub fn bring_to_front(&mut self) -> bool {
        let Some(id) = self.selection.clone() else {
            return false;
        };
        let moved = self.document.bring_to_front(&id);
        if moved {
            self.request_redraw();
        }
        moved
    }

    /// Lower the selected shape to the bottom of the stack.
    pub fn send_to_back(&mut self) -> bool {
        let Some(id) = self.selection.clone() else {
            return false;
        };
        let moved = self.document.send_to_back(&id);
        if moved {
            self.request_redraw();
        }
        moved
    }

    /// Delete the selected shape and clear the selection.
    pub fn delete_selected(&mut self) -> Option<Shape> {
        let id = self.selection.take()?;
        let removed = self.document.remove_shape(&id);
        self.request_redraw();
        removed
    }

    /// Snapshot the whole shape list as JSON.
    pub fn export_json(&self) -> CanvasResult<String> {
        let json = self.document.to_json()?;
        info!("Exported {} shapes", self.document.len());
        Ok(json)
    }

    /// Replace the whole shape list from a JSON snapshot.
    ///
    /// On error the current document is left untouched.
    pub fn import_json(&mut self, json: &str) -> CanvasResult<usize> {
        let document = CanvasDocument::from_json(json).inspect_err(|e| {
            warn!("Rejected snapshot import: {}", e);
        })?;
        let count = document.len();
        self.replace_document(document);
        info!("Imported {} shapes", count);
        Ok(count)
    }

    /// Swap in a new document. A selection that no longer resolves is dropped.
    pub fn replace_document(&mut self, document: CanvasDocument) {
        self.document = document;
        if self
            .selection
            .as_ref()
            .is_some_and(|id| !self.document.contains(id))
        {
            self.selection = None;
        }
        self.request_redraw();
    }

    /// Append a shape and select it.
    pub(crate) fn add_and_select(&mut self, shape: Shape) -> CanvasResult<ShapeId> {
        let id = shape.id.clone();
        self.document.add_shape(shape)?;
        self.selection = Some(id.clone());
        self.request_redraw();
        Ok(id)
    }

    /// Map-and-replace a shape by id.
    pub(crate) fn update_shape(&mut self, id: &ShapeId, f: impl FnOnce(&mut Shape)) -> bool {
        let updated = self.document.update_shape(id, f);
        if updated {
            self.request_redraw();
        }
        updated
    }

    /// Ask the host to redraw, e.g. after the surface was resized.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Consume the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}
