//! Tool system for the canvas.

mod controller;

pub use controller::{
    CREATION_MIN_HEIGHT, CREATION_MIN_WIDTH, Gesture, InteractionController, InteractionState,
    TextPrompt,
};

use crate::shapes::{CursorIcon, ShapeKind, UnknownShapeKind, cursor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tool {
    #[default]
    Select,
    /// Create shapes of the given kind.
    Draw(ShapeKind),
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Draw(kind) => kind.as_str(),
        }
    }

    /// Kind of shape this tool creates.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Select => None,
            Tool::Draw(kind) => Some(kind),
        }
    }

    pub fn cursor(self) -> CursorIcon {
        cursor(self)
    }
}

impl From<ShapeKind> for Tool {
    fn from(kind: ShapeKind) -> Self {
        Tool::Draw(kind)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = UnknownShapeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Tool::Select),
            other => other.parse().map(Tool::Draw),
        }
    }
}

impl TryFrom<String> for Tool {
    type Error = UnknownShapeKind;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Tool> for String {
    fn from(tool: Tool) -> Self {
        tool.as_str().to_string()
    }
}
