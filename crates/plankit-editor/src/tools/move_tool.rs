//! Move tool: drags the selected elements with a live preview offset,
//! folding the delta into their points on release.

use std::rc::Rc;

use plankit_core::{Action, EditorError, Feature, Result};

use crate::diag::DiagnosticsSink;
use crate::element::MoveDelta;
use crate::input::PointerEvent;
use crate::toolbar::ToolbarButton;
use crate::tools::{CursorStyle, ToolContext, ToolName};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MovePhase {
    #[default]
    Idle,
    Active,
    /// Reserved for a hold-to-move override; nothing binds it yet.
    Forced,
}

pub struct MoveTool {
    phase: MovePhase,
    anchor: Option<(f64, f64)>,
    diff: Option<(f64, f64)>,
    /// The tool selected the hover target itself on pointer-down, so it
    /// deselects it again once the gesture finishes.
    auto_selected: bool,
    diag: Rc<dyn DiagnosticsSink>,
}

impl MoveTool {
    pub fn new(diag: Rc<dyn DiagnosticsSink>) -> Self {
        Self {
            phase: MovePhase::Idle,
            anchor: None,
            diff: None,
            auto_selected: false,
            diag,
        }
    }

    pub fn phase(&self) -> MovePhase {
        self.phase
    }

    /// The current drag delta, for hosts that display it.
    pub fn delta(&self) -> Option<(f64, f64)> {
        self.diff
    }

    pub fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) {
        if self.phase != MovePhase::Idle {
            return;
        }

        self.auto_selected = false;
        if ctx.selection.is_empty() {
            if let Some(target) = ctx.hover_target {
                ctx.selection.add(target);
                self.auto_selected = true;
            }
        }

        let anchor = ctx.view.to_world(event);
        self.anchor = Some((anchor.x, anchor.y));
        self.phase = MovePhase::Active;
    }

    /// Updates every selected element's live move offset to the rounded
    /// world-space delta from the anchor.
    pub fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> Result<()> {
        if self.phase == MovePhase::Idle {
            return Ok(());
        }
        let (anchor_x, anchor_y) = self.anchor.ok_or_else(|| {
            EditorError::not_found(Feature::Tool, Action::Move, "no anchor point for move tool")
        })?;

        let pointer = ctx.view.to_world(event);
        let dx = (pointer.x - anchor_x).round();
        let dy = (pointer.y - anchor_y).round();
        self.update_move(ctx, Some((dx, dy)))
    }

    /// Commits: folds each selected element's delta into its points,
    /// atomically per element. Returns whether a commit happened; the
    /// editor schedules [`reset`](Self::reset) for after its observers
    /// have seen the committed points.
    pub fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>) -> Result<bool> {
        if self.phase == MovePhase::Idle {
            return Ok(false);
        }

        let selected: Vec<_> = ctx.selection.selected().to_vec();
        for id in selected {
            ctx.registry.commit_move(id)?;
        }
        self.diag.note("move", "committed");
        Ok(true)
    }

    /// Back to idle: clears the anchor and every selected element's move
    /// offset, and drops an auto-selection made on pointer-down.
    pub fn reset(&mut self, ctx: &mut ToolContext<'_>) -> Result<()> {
        self.phase = MovePhase::Idle;
        self.anchor = None;
        self.update_move(ctx, None)?;

        if self.auto_selected {
            ctx.selection.clear();
        }
        self.auto_selected = false;
        Ok(())
    }

    pub fn on_escape(&mut self, ctx: &mut ToolContext<'_>) -> Result<()> {
        if self.phase == MovePhase::Idle {
            return Ok(());
        }
        self.reset(ctx)
    }

    pub fn cursor(&self, is_active: bool) -> CursorStyle {
        if is_active {
            CursorStyle::Move
        } else {
            CursorStyle::Default
        }
    }

    pub fn toolbar_button() -> ToolbarButton {
        ToolbarButton::for_tool(ToolName::Move, "Move", "move", "m")
    }

    fn update_move(&mut self, ctx: &mut ToolContext<'_>, delta: Option<(f64, f64)>) -> Result<()> {
        let applied = match delta {
            Some((dx, dy)) if dx != 0.0 || dy != 0.0 => Some(MoveDelta { x: dx, y: dy }),
            _ => None,
        };
        for id in ctx.selection.selected().to_vec() {
            ctx.registry.set_move(id, applied)?;
        }
        self.diff = delta;
        Ok(())
    }
}
