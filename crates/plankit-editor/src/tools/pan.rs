//! Pan tool: drags the viewport. Also drives the space-bar forced-pan
//! override the editor applies on top of whatever tool is active.

use crate::input::PointerEvent;
use crate::toolbar::ToolbarButton;
use crate::tools::{CursorStyle, ToolContext, ToolName};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanPhase {
    #[default]
    Idle,
    Active,
    /// Space bar held; pans regardless of the nominally active tool.
    Forced,
}

#[derive(Debug, Default)]
pub struct PanTool {
    phase: PanPhase,
}

impl PanTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PanPhase {
        self.phase
    }

    pub fn on_pointer_down(&mut self, _ctx: &mut ToolContext<'_>, _event: &PointerEvent) {
        if self.phase == PanPhase::Forced {
            return;
        }
        self.phase = PanPhase::Active;
    }

    /// Pans opposite the pointer movement; applied immediately, never
    /// previewed.
    pub fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) {
        if matches!(self.phase, PanPhase::Active | PanPhase::Forced) {
            ctx.view.pan_from_movement(event);
        }
    }

    pub fn on_pointer_up(&mut self, _ctx: &mut ToolContext<'_>, _event: &PointerEvent) {
        if self.phase == PanPhase::Forced {
            return;
        }
        self.phase = PanPhase::Idle;
    }

    /// Space pressed: pointer-move pans until [`force_end`](Self::force_end).
    pub fn force_start(&mut self) {
        self.phase = PanPhase::Forced;
    }

    /// Space released.
    pub fn force_end(&mut self) {
        self.phase = PanPhase::Idle;
    }

    pub fn on_escape(&mut self) {
        if self.phase == PanPhase::Active {
            self.phase = PanPhase::Idle;
        }
    }

    pub fn cursor(&self, is_active: bool) -> CursorStyle {
        if !is_active {
            return CursorStyle::Default;
        }
        if self.phase == PanPhase::Idle {
            CursorStyle::Grab
        } else {
            CursorStyle::Grabbing
        }
    }

    pub fn toolbar_button() -> ToolbarButton {
        ToolbarButton::for_tool(ToolName::Pan, "Pan", "hand", "p")
    }
}
