//! Rectangle draw tool: anchor on pointer-down, band on pointer-move,
//! commit four corner points on pointer-up.

use std::rc::Rc;

use plankit_core::{Point, Result};

use crate::diag::DiagnosticsSink;
use crate::input::PointerEvent;
use crate::preview::{PreviewEngine, PreviewPhase};
use crate::toolbar::ToolbarButton;
use crate::tools::{CursorStyle, ToolContext, ToolName};

pub struct RectangleTool {
    preview: PreviewEngine,
    diag: Rc<dyn DiagnosticsSink>,
}

impl RectangleTool {
    pub fn new(diag: Rc<dyn DiagnosticsSink>) -> Self {
        Self {
            preview: PreviewEngine::new(),
            diag,
        }
    }

    pub fn phase(&self) -> PreviewPhase {
        self.preview.phase()
    }

    pub fn preview(&self) -> &PreviewEngine {
        &self.preview
    }

    pub fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) {
        if self.preview.phase() != PreviewPhase::Idle {
            return;
        }
        self.preview.arm(ctx.view.to_world(event));
        self.diag.note("rectangle", "armed");
    }

    pub fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> Result<()> {
        if ctx.active_tool != ToolName::Rectangle || self.preview.phase() == PreviewPhase::Idle {
            return Ok(());
        }
        self.preview.redraw(ctx.view.to_world(event))
    }

    /// Ends the gesture. Returns the four corner points to commit, or
    /// `None` if no gesture was in flight. A gesture that never produced
    /// geometry (pointer-up without any move) fails with
    /// `preview:create:bad-parameters`; the caller resets the preview and
    /// registers nothing.
    pub fn on_pointer_up(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        _event: &PointerEvent,
    ) -> Result<Option<[Point; 4]>> {
        if self.preview.phase() == PreviewPhase::Idle {
            return Ok(None);
        }
        let points = self.preview.to_rectangle_points()?;
        self.preview.reset();
        self.diag.note("rectangle", "committed");
        Ok(Some(points))
    }

    /// Discards the gesture without committing.
    pub fn on_escape(&mut self) {
        self.preview.reset();
    }

    pub fn reset(&mut self) {
        self.preview.reset();
    }

    pub fn cursor(&self, is_active: bool) -> CursorStyle {
        if is_active {
            CursorStyle::Crosshair
        } else {
            CursorStyle::Default
        }
    }

    pub fn toolbar_button() -> ToolbarButton {
        ToolbarButton::for_tool(ToolName::Rectangle, "Rectangle", "square", "r")
    }
}
