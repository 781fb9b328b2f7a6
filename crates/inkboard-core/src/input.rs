//! Pointer events delivered by the host surface.

use crate::geometry::map_event_to_canvas_point;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Pointer event in client coordinates, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    DoubleClick { position: Point },
}

impl PointerEvent {
    /// Client-space position of the event.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position }
            | PointerEvent::DoubleClick { position } => position,
        }
    }

    /// Position relative to the drawing surface's top-left corner.
    pub fn canvas_position(&self, surface_bounds: Rect) -> Point {
        map_event_to_canvas_point(self.position(), surface_bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_position() {
        let event = PointerEvent::Down {
            position: Point::new(110.0, 70.0),
        };
        let bounds = Rect::new(10.0, 20.0, 810.0, 620.0);
        assert_eq!(event.canvas_position(bounds), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_position_of_every_variant() {
        let p = Point::new(3.0, 4.0);
        for event in [
            PointerEvent::Down { position: p },
            PointerEvent::Move { position: p },
            PointerEvent::Up { position: p },
            PointerEvent::DoubleClick { position: p },
        ] {
            assert_eq!(event.position(), p);
        }
    }
}
