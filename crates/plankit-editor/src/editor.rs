//! The editor: owns the view, registry, selection, tools, dispatcher and
//! observers, and routes host events to the right state machine.
//!
//! All mutation happens synchronously inside the event methods on one
//! thread. The move tool's post-commit reset is the one deferred step: it
//! is queued and drained after observers have been notified, so dependents
//! see the committed points before state returns to idle.

use std::rc::Rc;

use plankit_core::{Action, EditorError, Feature, Point, Result};
use plankit_floorplan::{EntityId, FloorPlan, ParentStub};
use tracing::{debug, warn};

use crate::command::EditorCommand;
use crate::diag::{DiagnosticsSink, TracingSink};
use crate::element::{ElementId, ElementRegistry, SelectionSet};
use crate::events::{EditorEvent, EventFilter, Observers, SubscriptionId};
use crate::input::{InputFocus, KeyEvent, PointerEvent, WheelEvent};
use crate::preview::PreviewEngine;
use crate::shortcuts::{ShortcutBinding, ShortcutDispatcher, ShortcutOptions};
use crate::toolbar::{self, ToolbarButtonGroup};
use crate::tools::{
    CursorStyle, MoveTool, PanPhase, PanTool, RectangleTool, SelectTool, ToolContext, ToolName,
};
use crate::view::EditorView;

/// Collaborator that turns committed rectangle corners into a floor-plan
/// entity. The editor checks and propagates its result; a factory failure
/// means nothing is registered.
pub trait SectionFactory {
    fn create_section(&mut self, points: [Point; 4], parent: ParentStub) -> Result<EntityId>;
}

impl SectionFactory for FloorPlan {
    fn create_section(&mut self, points: [Point; 4], parent: ParentStub) -> Result<EntityId> {
        self.create_rectangular_section(points.to_vec(), parent)
    }
}

/// Factory for hosts that draw free-standing elements with no floor plan
/// attached. Only reachable when a section parent has been configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSectionFactory;

impl SectionFactory for NoSectionFactory {
    fn create_section(&mut self, _points: [Point; 4], _parent: ParentStub) -> Result<EntityId> {
        Err(EditorError::bad_parameters(
            Feature::Section,
            Action::Create,
            "no section factory configured",
        ))
    }
}

enum DeferredTask {
    ResetMoveTool,
}

pub struct Editor {
    view: EditorView,
    registry: ElementRegistry,
    selection: SelectionSet,

    select_tool: SelectTool,
    rectangle_tool: RectangleTool,
    move_tool: MoveTool,
    pan_tool: PanTool,

    dispatcher: ShortcutDispatcher<EditorCommand>,
    toolbar_groups: Vec<ToolbarButtonGroup>,
    observers: Observers,
    deferred: Vec<DeferredTask>,

    active_tool: ToolName,
    previous_tool: Option<ToolName>,
    hover_target: Option<ElementId>,
    shift_down: bool,
    focus: InputFocus,
    section_parent: Option<ParentStub>,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_options(ShortcutOptions::default())
    }

    pub fn with_options(options: ShortcutOptions) -> Self {
        Self::with_toolbar_groups(vec![toolbar::default_tool_group()], options)
    }

    /// Builds an editor with a custom toolbar. Button shortcuts are merged
    /// with the built-in space-to-pan and escape bindings.
    pub fn with_toolbar_groups(groups: Vec<ToolbarButtonGroup>, options: ShortcutOptions) -> Self {
        let diag: Rc<dyn DiagnosticsSink> = Rc::new(TracingSink);

        let mut bindings = toolbar::extract_shortcuts(&groups);
        bindings.push((
            " ".to_string(),
            ShortcutBinding::hold(EditorCommand::ForcePanStart, EditorCommand::ForcePanEnd),
        ));
        bindings.push(("esc".to_string(), ShortcutBinding::keydown(EditorCommand::Escape)));

        Self {
            view: EditorView::new(),
            registry: ElementRegistry::new(),
            selection: SelectionSet::new(),
            select_tool: SelectTool::new(Rc::clone(&diag)),
            rectangle_tool: RectangleTool::new(Rc::clone(&diag)),
            move_tool: MoveTool::new(Rc::clone(&diag)),
            pan_tool: PanTool::new(),
            dispatcher: ShortcutDispatcher::new(bindings, options),
            toolbar_groups: groups,
            observers: Observers::new(),
            deferred: Vec::new(),
            active_tool: ToolName::Select,
            previous_tool: None,
            hover_target: None,
            shift_down: false,
            focus: InputFocus::None,
            section_parent: None,
        }
    }

    pub fn view(&self) -> &EditorView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut EditorView {
        &mut self.view
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn active_tool(&self) -> ToolName {
        self.active_tool
    }

    pub fn toolbar_groups(&self) -> Vec<ToolbarButtonGroup> {
        toolbar::visible_groups(&self.toolbar_groups)
    }

    /// The banding/preview engine of whichever tool is showing one.
    pub fn preview(&self) -> &PreviewEngine {
        match self.active_tool {
            ToolName::Select => self.select_tool.banding(),
            _ => self.rectangle_tool.preview(),
        }
    }

    pub fn preview_visible(&self) -> bool {
        match self.active_tool {
            ToolName::Select => self.select_tool.banding().visible(true),
            ToolName::Rectangle => self.rectangle_tool.preview().visible(true),
            _ => false,
        }
    }

    /// Updates the element the pointer currently overlays; maintained by
    /// the hosting surface's hit testing.
    pub fn set_hover_target(&mut self, target: Option<ElementId>) {
        self.hover_target = target;
    }

    pub fn set_focus(&mut self, focus: InputFocus) {
        self.focus = focus;
    }

    /// Where committed rectangles are registered in the floor plan.
    pub fn set_section_parent(&mut self, parent: Option<ParentStub>) {
        self.section_parent = parent;
    }

    pub fn set_active_tool(&mut self, tool: ToolName) {
        if self.active_tool == tool {
            return;
        }
        debug!(%tool, "tool activated");
        self.active_tool = tool;
        self.observers.notify(&EditorEvent::ToolChanged { tool });
    }

    pub fn subscribe<F>(&mut self, filter: EventFilter, callback: F) -> SubscriptionId
    where
        F: Fn(&EditorEvent) + 'static,
    {
        self.observers.subscribe(filter, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Cursor feedback for the effective tool.
    pub fn cursor(&mut self) -> CursorStyle {
        match self.effective_tool() {
            ToolName::Pan => self.pan_tool.cursor(true),
            ToolName::Rectangle => self.rectangle_tool.cursor(true),
            ToolName::Move => self.move_tool.cursor(true),
            ToolName::Select => {
                let ctx = ToolContext {
                    view: &mut self.view,
                    registry: &mut self.registry,
                    selection: &mut self.selection,
                    hover_target: self.hover_target,
                    shift_down: self.shift_down,
                    active_tool: self.active_tool,
                };
                self.select_tool.cursor(&ctx)
            }
        }
    }

    /// The tool that actually receives pointer events: forced pan
    /// supersedes whatever is nominally active.
    fn effective_tool(&self) -> ToolName {
        if self.pan_tool.phase() == PanPhase::Forced {
            ToolName::Pan
        } else {
            self.active_tool
        }
    }

    pub fn on_pointer_down(&mut self, event: &PointerEvent) {
        self.shift_down = event.shift;
        let tool = self.effective_tool();
        let mut ctx = ToolContext {
            view: &mut self.view,
            registry: &mut self.registry,
            selection: &mut self.selection,
            hover_target: self.hover_target,
            shift_down: self.shift_down,
            active_tool: tool,
        };
        match tool {
            ToolName::Select => {
                self.select_tool.on_pointer_down(&mut ctx, event);
                self.observers.notify(&EditorEvent::PreviewChanged);
            }
            ToolName::Rectangle => {
                self.rectangle_tool.on_pointer_down(&mut ctx, event);
                self.observers.notify(&EditorEvent::PreviewChanged);
            }
            ToolName::Move => self.move_tool.on_pointer_down(&mut ctx, event),
            ToolName::Pan => self.pan_tool.on_pointer_down(&mut ctx, event),
        }
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> Result<()> {
        self.shift_down = event.shift;
        let tool = self.effective_tool();
        let mut ctx = ToolContext {
            view: &mut self.view,
            registry: &mut self.registry,
            selection: &mut self.selection,
            hover_target: self.hover_target,
            shift_down: self.shift_down,
            active_tool: tool,
        };
        match tool {
            ToolName::Select => {
                self.select_tool.on_pointer_move(&mut ctx, event)?;
                self.observers.notify(&EditorEvent::PreviewChanged);
                self.observers.notify(&EditorEvent::SelectionChanged);
            }
            ToolName::Rectangle => {
                self.rectangle_tool.on_pointer_move(&mut ctx, event)?;
                self.observers.notify(&EditorEvent::PreviewChanged);
            }
            ToolName::Move => {
                self.move_tool.on_pointer_move(&mut ctx, event)?;
                self.observers.notify(&EditorEvent::ElementsChanged);
            }
            ToolName::Pan => {
                self.pan_tool.on_pointer_move(&mut ctx, event);
                self.observers.notify(&EditorEvent::ViewChanged);
            }
        }
        Ok(())
    }

    /// Ends the current gesture. A rectangle commit calls the section
    /// factory first, then registers the element; the created entity id is
    /// returned. A factory or geometry failure registers nothing.
    pub fn on_pointer_up(
        &mut self,
        event: &PointerEvent,
        factory: &mut dyn SectionFactory,
    ) -> Result<Option<EntityId>> {
        self.shift_down = event.shift;
        let tool = self.effective_tool();
        let mut ctx = ToolContext {
            view: &mut self.view,
            registry: &mut self.registry,
            selection: &mut self.selection,
            hover_target: self.hover_target,
            shift_down: self.shift_down,
            active_tool: tool,
        };
        let mut created = None;
        match tool {
            ToolName::Select => {
                self.select_tool.on_pointer_up(&mut ctx, event)?;
                self.observers.notify(&EditorEvent::SelectionChanged);
                self.observers.notify(&EditorEvent::PreviewChanged);
            }
            ToolName::Rectangle => {
                let corners = match self.rectangle_tool.on_pointer_up(&mut ctx, event) {
                    Ok(corners) => corners,
                    Err(err) => {
                        warn!(%err, "rectangle gesture discarded");
                        self.rectangle_tool.reset();
                        return Err(err);
                    }
                };
                if let Some(corners) = corners {
                    if let Some(parent) = self.section_parent {
                        created = Some(factory.create_section(corners, parent)?);
                    }
                    let id = self.registry.insert_polygon(corners.to_vec());
                    self.observers.notify(&EditorEvent::ElementsChanged);
                    self.observers.notify(&EditorEvent::ElementCommitted { id });
                }
            }
            ToolName::Move => {
                if self.move_tool.on_pointer_up(&mut ctx)? {
                    let committed: Vec<ElementId> = ctx.selection.selected().to_vec();
                    self.observers.notify(&EditorEvent::ElementsChanged);
                    for id in committed {
                        self.observers.notify(&EditorEvent::ElementCommitted { id });
                    }
                    self.deferred.push(DeferredTask::ResetMoveTool);
                }
            }
            ToolName::Pan => self.pan_tool.on_pointer_up(&mut ctx, event),
        }
        self.drain_deferred()?;
        Ok(created)
    }

    pub fn on_wheel(&mut self, event: &WheelEvent) {
        self.view.handle_wheel(event);
        self.observers.notify(&EditorEvent::ViewChanged);
    }

    pub fn on_key_down(&mut self, event: &KeyEvent) -> Result<()> {
        self.shift_down = event.shift || event.key == "Shift";
        if let Some(command) = self.dispatcher.on_key_down(event, &self.focus) {
            self.apply(command)?;
        }
        Ok(())
    }

    pub fn on_key_up(&mut self, event: &KeyEvent) -> Result<()> {
        if event.key == "Shift" {
            self.shift_down = false;
        } else {
            self.shift_down = event.shift;
        }
        if let Some(command) = self.dispatcher.on_key_up(event, &self.focus) {
            self.apply(command)?;
        }
        Ok(())
    }

    /// Runs a command, whether it came from a shortcut or a toolbar click.
    pub fn apply(&mut self, command: EditorCommand) -> Result<()> {
        match command {
            EditorCommand::ActivateTool(tool) => self.set_active_tool(tool),
            EditorCommand::ForcePanStart => {
                if self.active_tool != ToolName::Pan {
                    self.previous_tool = Some(self.active_tool);
                }
                self.pan_tool.force_start();
                self.set_active_tool(ToolName::Pan);
            }
            EditorCommand::ForcePanEnd => {
                self.pan_tool.force_end();
                if self.active_tool == ToolName::Pan {
                    if let Some(previous) = self.previous_tool.take() {
                        self.set_active_tool(previous);
                    }
                }
            }
            EditorCommand::Escape => self.escape()?,
            EditorCommand::ZoomIn => {
                self.view.zoom(-10.0);
                self.observers.notify(&EditorEvent::ViewChanged);
            }
            EditorCommand::ZoomOut => {
                self.view.zoom(10.0);
                self.observers.notify(&EditorEvent::ViewChanged);
            }
        }
        Ok(())
    }

    /// Universal cancel: discards every in-flight gesture, clears the
    /// selection and restores the select tool. Idempotent from any phase.
    pub fn escape(&mut self) -> Result<()> {
        let mut ctx = ToolContext {
            view: &mut self.view,
            registry: &mut self.registry,
            selection: &mut self.selection,
            hover_target: self.hover_target,
            shift_down: self.shift_down,
            active_tool: self.active_tool,
        };
        self.rectangle_tool.on_escape();
        self.move_tool.on_escape(&mut ctx)?;
        self.select_tool.on_escape(&mut ctx);
        self.pan_tool.on_escape();

        self.set_active_tool(ToolName::Select);
        self.observers.notify(&EditorEvent::SelectionChanged);
        self.observers.notify(&EditorEvent::PreviewChanged);
        Ok(())
    }

    /// Runs tasks queued during the last event, after observers have been
    /// notified.
    fn drain_deferred(&mut self) -> Result<()> {
        while let Some(task) = self.deferred.pop() {
            match task {
                DeferredTask::ResetMoveTool => {
                    let mut ctx = ToolContext {
                        view: &mut self.view,
                        registry: &mut self.registry,
                        selection: &mut self.selection,
                        hover_target: self.hover_target,
                        shift_down: self.shift_down,
                        active_tool: self.active_tool,
                    };
                    self.move_tool.reset(&mut ctx)?;
                    self.observers.notify(&EditorEvent::SelectionChanged);
                }
            }
        }
        Ok(())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
