//! Toolbar button descriptors and their shortcut extraction.
//!
//! Buttons are plain data: the hosting surface renders them, and their
//! `kbds` entries are flattened into the shortcut binding table so every
//! button shortcut goes through the same dispatcher.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::command::EditorCommand;
use crate::shortcuts::ShortcutBinding;
use crate::tools::ToolName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolbarButtonId(Uuid);

impl ToolbarButtonId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ToolbarButtonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToolbarButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single toolbar button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarButton {
    pub id: ToolbarButtonId,
    pub tool: Option<ToolName>,
    pub label: String,
    pub icon: String,
    /// Shortcut key tokens; joined with `_` when registered.
    pub kbds: Vec<String>,
    pub command: EditorCommand,
    pub hidden: bool,
}

impl ToolbarButton {
    pub fn new(label: impl Into<String>, icon: impl Into<String>, command: EditorCommand) -> Self {
        Self {
            id: ToolbarButtonId::new(),
            tool: None,
            label: label.into(),
            icon: icon.into(),
            kbds: Vec::new(),
            command,
            hidden: false,
        }
    }

    /// A button that activates a tool.
    pub fn for_tool(
        tool: ToolName,
        label: impl Into<String>,
        icon: impl Into<String>,
        kbd: impl Into<String>,
    ) -> Self {
        Self {
            id: ToolbarButtonId::new(),
            tool: Some(tool),
            label: label.into(),
            icon: icon.into(),
            kbds: vec![kbd.into()],
            command: EditorCommand::ActivateTool(tool),
            hidden: false,
        }
    }

    pub fn with_kbds<S: Into<String>>(mut self, kbds: impl IntoIterator<Item = S>) -> Self {
        self.kbds = kbds.into_iter().map(Into::into).collect();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// A named group of toolbar buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarButtonGroup {
    pub id: ToolbarButtonId,
    pub name: String,
    pub buttons: Vec<ToolbarButton>,
    pub hidden: bool,
}

impl ToolbarButtonGroup {
    pub fn new(name: impl Into<String>, buttons: Vec<ToolbarButton>) -> Self {
        Self {
            id: ToolbarButtonId::new(),
            name: name.into(),
            buttons,
            hidden: false,
        }
    }
}

/// Drops hidden groups and hidden buttons, then empty groups, producing
/// what the hosting surface should actually render.
pub fn visible_groups(groups: &[ToolbarButtonGroup]) -> Vec<ToolbarButtonGroup> {
    groups
        .iter()
        .filter(|group| !group.hidden)
        .map(|group| ToolbarButtonGroup {
            buttons: group.buttons.iter().filter(|b| !b.hidden).cloned().collect(),
            ..group.clone()
        })
        .filter(|group| !group.buttons.is_empty())
        .collect()
}

/// Flattens every button's `kbds` into shortcut bindings for its command.
pub fn extract_shortcuts(
    groups: &[ToolbarButtonGroup],
) -> Vec<(String, ShortcutBinding<EditorCommand>)> {
    let mut bindings = Vec::new();
    for group in groups {
        for button in &group.buttons {
            if button.kbds.is_empty() {
                continue;
            }
            let key = button.kbds.join("_");
            bindings.push((key, ShortcutBinding::keydown(button.command)));
        }
    }
    bindings
}

/// The built-in tool group every editor carries.
pub fn default_tool_group() -> ToolbarButtonGroup {
    use crate::tools::{MoveTool, PanTool, RectangleTool, SelectTool};
    ToolbarButtonGroup::new(
        "General",
        vec![
            PanTool::toolbar_button(),
            MoveTool::toolbar_button(),
            SelectTool::toolbar_button(),
            RectangleTool::toolbar_button(),
        ],
    )
}
