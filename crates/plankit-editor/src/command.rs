//! Commands issued by shortcut bindings and toolbar buttons.
//!
//! The shortcut dispatcher is generic over the command type it yields;
//! keeping handlers as data instead of closures lets the editor borrow
//! itself mutably while interpreting a match.

use serde::{Deserialize, Serialize};

use crate::tools::ToolName;

/// An editor-level action a shortcut or toolbar button can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorCommand {
    /// Make the named tool the active tool.
    ActivateTool(ToolName),
    /// Space pressed: pan overrides the active tool until released.
    ForcePanStart,
    /// Space released: restore the tool that was active before the override.
    ForcePanEnd,
    /// Universal cancel; discards any in-flight gesture.
    Escape,
    ZoomIn,
    ZoomOut,
}
