//! Tool state machines.
//!
//! One module per tool. Exactly one tool is active at a time; the editor
//! routes pointer events to it, but every tool guards on its own phase so
//! an out-of-turn event is a no-op rather than a panic.

mod move_tool;
mod pan;
mod rectangle;
mod select;

pub use move_tool::{MovePhase, MoveTool};
pub use pan::{PanPhase, PanTool};
pub use rectangle::RectangleTool;
pub use select::{SelectTool, SelectionMethod};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, ElementRegistry, SelectionSet};
use crate::view::EditorView;

/// Names the four tools. Single source of truth for which state machine
/// receives events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolName {
    Select,
    Rectangle,
    Move,
    Pan,
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Select => "select",
            Self::Rectangle => "rectangle",
            Self::Move => "move",
            Self::Pan => "pan",
        };
        f.write_str(name)
    }
}

/// Cursor feedback the hosting surface should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorStyle {
    Default,
    Crosshair,
    Grab,
    Grabbing,
    Move,
    Select,
    SelectAdd,
    SelectRemove,
}

/// Shared mutable state a tool operates on for one event.
///
/// Tools borrow their collaborators through this context instead of owning
/// them, so the editor remains the single owner of registry and selection.
pub struct ToolContext<'a> {
    pub view: &'a mut EditorView,
    pub registry: &'a mut ElementRegistry,
    pub selection: &'a mut SelectionSet,
    pub hover_target: Option<ElementId>,
    pub shift_down: bool,
    pub active_tool: ToolName,
}
