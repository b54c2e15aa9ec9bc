//! Select tool: click-to-select and marquee-to-select, disambiguated by
//! how far the pointer travelled between down and up.

use std::rc::Rc;

use plankit_core::{Action, EditorError, Feature, Point, Result};

use crate::diag::DiagnosticsSink;
use crate::element::ElementId;
use crate::input::PointerEvent;
use crate::preview::{PreviewEngine, PreviewPhase};
use crate::toolbar::ToolbarButton;
use crate::tools::{CursorStyle, ToolContext, ToolName};

/// How the current gesture would change the selection. Drives cursor
/// styling and marquee merge behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMethod {
    /// Replace the selection.
    Default,
    /// Shift held over an unselected target, or mid-drag: add.
    Add,
    /// Shift held over an already-selected target: remove.
    Remove,
}

pub struct SelectTool {
    banding: PreviewEngine,
    diag: Rc<dyn DiagnosticsSink>,
}

impl SelectTool {
    pub fn new(diag: Rc<dyn DiagnosticsSink>) -> Self {
        Self {
            banding: PreviewEngine::new(),
            diag,
        }
    }

    pub fn phase(&self) -> PreviewPhase {
        self.banding.phase()
    }

    pub fn banding(&self) -> &PreviewEngine {
        &self.banding
    }

    pub fn selection_method(&self, ctx: &ToolContext<'_>) -> SelectionMethod {
        if ctx.active_tool != ToolName::Select || !ctx.shift_down {
            return SelectionMethod::Default;
        }
        let target_selected = ctx
            .hover_target
            .map(|id| ctx.selection.is_selected(id) && !ctx.selection.candidates().contains(&id))
            .unwrap_or(false);
        if !target_selected || self.banding.phase() == PreviewPhase::Dragging {
            SelectionMethod::Add
        } else {
            SelectionMethod::Remove
        }
    }

    pub fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) {
        if self.banding.phase() != PreviewPhase::Idle {
            return;
        }
        self.banding.arm(ctx.view.to_world(event));
    }

    pub fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> Result<()> {
        if self.banding.phase() == PreviewPhase::Idle {
            return Ok(());
        }

        let entering_drag = self.banding.phase() == PreviewPhase::Armed;
        if entering_drag && self.selection_method(ctx) == SelectionMethod::Default {
            // Marquee replaces unless Shift-augmented.
            ctx.selection.clear();
        }

        self.banding.redraw(ctx.view.to_world(event))?;
        self.refresh_candidates(ctx);
        Ok(())
    }

    pub fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> Result<()> {
        if self.banding.phase() == PreviewPhase::Idle {
            return Ok(());
        }

        let pointer = ctx.view.to_world(event);
        let anchor = self.banding.anchor().ok_or_else(|| {
            EditorError::not_found(Feature::Tool, Action::Select, "no start point for select tool")
        })?;

        if self.inside_click_threshold(ctx, pointer, anchor) {
            let target = ctx.hover_target;
            self.on_select(ctx, event.shift, target);
            return Ok(());
        }

        self.refresh_candidates(ctx);
        ctx.selection.accept_candidates();
        self.banding.reset();
        self.diag.note("select", "marquee accepted");
        Ok(())
    }

    /// Click-select: plain click replaces (or clears on empty space);
    /// shift-click toggles membership.
    pub fn on_select(
        &mut self,
        ctx: &mut ToolContext<'_>,
        shift: bool,
        target: Option<ElementId>,
    ) {
        self.banding.reset();
        ctx.selection.clear_candidates();

        let Some(id) = target else {
            ctx.selection.clear();
            return;
        };

        if !shift {
            ctx.selection.select_only(id);
            return;
        }

        ctx.selection.toggle(id);
    }

    pub fn on_escape(&mut self, ctx: &mut ToolContext<'_>) {
        self.banding.reset();
        ctx.selection.clear();
    }

    pub fn reset(&mut self) {
        self.banding.reset();
    }

    pub fn cursor(&self, ctx: &ToolContext<'_>) -> CursorStyle {
        match self.selection_method(ctx) {
            SelectionMethod::Default => CursorStyle::Select,
            SelectionMethod::Add => CursorStyle::SelectAdd,
            SelectionMethod::Remove => CursorStyle::SelectRemove,
        }
    }

    pub fn toolbar_button() -> ToolbarButton {
        ToolbarButton::for_tool(ToolName::Select, "Select", "cursor", "s")
    }

    /// Per-axis comparison against the scale-adjusted click threshold, so
    /// the tolerance is a constant number of screen pixels.
    fn inside_click_threshold(&self, ctx: &ToolContext<'_>, pointer: Point, anchor: Point) -> bool {
        let threshold = ctx.view.click_threshold();
        (pointer.x - anchor.x).abs() < threshold && (pointer.y - anchor.y).abs() < threshold
    }

    /// Recomputes which elements the marquee would select: any element
    /// with at least one point inside the banding rectangle (inclusive).
    fn refresh_candidates(&self, ctx: &mut ToolContext<'_>) {
        if self.banding.phase() == PreviewPhase::Idle {
            return;
        }
        if self.banding.rect().is_none() {
            ctx.selection.clear_candidates();
            return;
        }
        let candidates: Vec<ElementId> = ctx
            .registry
            .iter()
            .filter(|element| element.points.iter().any(|p| self.banding.contains_point(*p)))
            .map(|element| element.id)
            .collect();
        ctx.selection.set_candidates(candidates);
    }
}
