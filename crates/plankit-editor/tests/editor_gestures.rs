//! End-to-end gesture tests driving the editor through pointer events.

use plankit_core::Point;
use plankit_editor::{
    Editor, EditorCommand, NoSectionFactory, PointerEvent, ToolName,
};
use plankit_floorplan::{EntityKind, FloorPlan, ParentStub, SectionShape};

fn plan_with_room() -> (FloorPlan, ParentStub) {
    let mut plan = FloorPlan::new("test");
    let building = plan.create_building(Vec::new());
    let floor = plan
        .create_floor(Vec::new(), ParentStub::new(building, EntityKind::Building))
        .unwrap();
    let room = plan
        .create_room(
            vec![plankit_floorplan::EntityId::new()],
            ParentStub::new(floor, EntityKind::Floor),
        )
        .unwrap();
    (plan, ParentStub::new(room, EntityKind::Room))
}

#[test]
fn rectangle_gesture_creates_element_and_section() {
    let (mut plan, room) = plan_with_room();
    let mut editor = Editor::new();
    editor.apply(EditorCommand::ActivateTool(ToolName::Rectangle)).unwrap();
    editor.set_section_parent(Some(room));

    editor.on_pointer_down(&PointerEvent::at(10.0, 10.0));
    editor.on_pointer_move(&PointerEvent::at(40.0, 30.0)).unwrap();
    let created = editor
        .on_pointer_up(&PointerEvent::at(40.0, 30.0), &mut plan)
        .unwrap()
        .unwrap();

    let section = plan.section(created).unwrap();
    assert_eq!(section.shape, SectionShape::Rectangle);
    assert_eq!(
        section.points,
        vec![
            Point::new(10.0, 10.0),
            Point::new(40.0, 10.0),
            Point::new(40.0, 30.0),
            Point::new(10.0, 30.0),
        ]
    );

    assert_eq!(editor.registry().len(), 1);
    let element = editor.registry().iter().next().unwrap();
    assert_eq!(element.points.len(), 4);
    assert!(element.move_delta.is_none());
}

#[test]
fn zero_size_rectangle_gesture_fails_and_registers_nothing() {
    let (mut plan, room) = plan_with_room();
    let mut editor = Editor::new();
    editor.apply(EditorCommand::ActivateTool(ToolName::Rectangle)).unwrap();
    editor.set_section_parent(Some(room));

    editor.on_pointer_down(&PointerEvent::at(10.0, 10.0));
    let err = editor
        .on_pointer_up(&PointerEvent::at(10.0, 10.0), &mut plan)
        .unwrap_err();

    assert_eq!(err.code(), "preview:create:bad-parameters");
    assert!(editor.registry().is_empty());
    assert_eq!(plan.section_count(), 0);
    // The failed gesture must not wedge the tool.
    editor.on_pointer_down(&PointerEvent::at(0.0, 0.0));
    editor.on_pointer_move(&PointerEvent::at(5.0, 5.0)).unwrap();
    assert!(editor
        .on_pointer_up(&PointerEvent::at(5.0, 5.0), &mut plan)
        .unwrap()
        .is_some());
}

#[test]
fn factory_failure_aborts_the_commit() {
    let mut plan = FloorPlan::new("empty");
    // Parent stub points at a room that does not exist.
    let bogus = ParentStub::new(plankit_floorplan::EntityId::new(), EntityKind::Room);
    let mut editor = Editor::new();
    editor.apply(EditorCommand::ActivateTool(ToolName::Rectangle)).unwrap();
    editor.set_section_parent(Some(bogus));

    editor.on_pointer_down(&PointerEvent::at(0.0, 0.0));
    editor.on_pointer_move(&PointerEvent::at(20.0, 20.0)).unwrap();
    let err = editor
        .on_pointer_up(&PointerEvent::at(20.0, 20.0), &mut plan)
        .unwrap_err();

    assert!(err.is_bad_parameters());
    assert!(editor.registry().is_empty());
}

#[test]
fn escape_discards_rectangle_in_progress() {
    let mut editor = Editor::new();
    editor.apply(EditorCommand::ActivateTool(ToolName::Rectangle)).unwrap();

    editor.on_pointer_down(&PointerEvent::at(10.0, 10.0));
    editor.on_pointer_move(&PointerEvent::at(40.0, 40.0)).unwrap();
    assert!(editor.preview_visible());

    editor.escape().unwrap();
    assert!(!editor.preview_visible());
    assert_eq!(editor.active_tool(), ToolName::Select);

    // Pointer-up after escape commits nothing.
    let created = editor
        .on_pointer_up(&PointerEvent::at(40.0, 40.0), &mut NoSectionFactory)
        .unwrap();
    assert!(created.is_none());
    assert!(editor.registry().is_empty());
}

#[test]
fn click_select_and_shift_toggle() {
    let mut editor = Editor::new();
    let a = editor_insert(&mut editor, Point::new(0.0, 0.0));
    let b = editor_insert(&mut editor, Point::new(100.0, 100.0));

    // Plain click on A selects only A.
    editor.set_hover_target(Some(a));
    editor.on_pointer_down(&PointerEvent::at(0.0, 0.0));
    editor
        .on_pointer_up(&PointerEvent::at(1.0, 1.0), &mut NoSectionFactory)
        .unwrap();
    assert_eq!(editor.selection().selected(), &[a]);

    // Shift-click A toggles it off.
    editor.on_pointer_down(&PointerEvent::at(0.0, 0.0).with_shift(true));
    editor
        .on_pointer_up(&PointerEvent::at(0.0, 0.0).with_shift(true), &mut NoSectionFactory)
        .unwrap();
    assert!(editor.selection().is_empty());

    // Select A again, then shift-click B adds it.
    editor.on_pointer_down(&PointerEvent::at(0.0, 0.0));
    editor
        .on_pointer_up(&PointerEvent::at(0.0, 0.0), &mut NoSectionFactory)
        .unwrap();
    editor.set_hover_target(Some(b));
    editor.on_pointer_down(&PointerEvent::at(100.0, 100.0).with_shift(true));
    editor
        .on_pointer_up(&PointerEvent::at(100.0, 100.0).with_shift(true), &mut NoSectionFactory)
        .unwrap();
    assert_eq!(editor.selection().selected(), &[a, b]);
}

#[test]
fn marquee_replaces_selection_by_default() {
    let mut editor = Editor::new();
    let old = editor_insert(&mut editor, Point::new(500.0, 500.0));
    let inside = editor_insert(&mut editor, Point::new(20.0, 20.0));

    editor.set_hover_target(Some(old));
    editor.on_pointer_down(&PointerEvent::at(500.0, 500.0));
    editor
        .on_pointer_up(&PointerEvent::at(500.0, 500.0), &mut NoSectionFactory)
        .unwrap();
    assert!(editor.selection().is_selected(old));

    editor.set_hover_target(None);
    editor.on_pointer_down(&PointerEvent::at(0.0, 0.0));
    editor.on_pointer_move(&PointerEvent::at(40.0, 40.0)).unwrap();
    editor
        .on_pointer_up(&PointerEvent::at(40.0, 40.0), &mut NoSectionFactory)
        .unwrap();

    assert!(editor.selection().is_selected(inside));
    assert!(!editor.selection().is_selected(old));
    assert!(editor.selection().candidates().is_empty());
}

#[test]
fn move_gesture_commits_and_resets() {
    let mut editor = Editor::new();
    let id = editor_insert(&mut editor, Point::new(0.0, 0.0));

    // Select it, then switch to the move tool.
    editor.set_hover_target(Some(id));
    editor.on_pointer_down(&PointerEvent::at(0.0, 0.0));
    editor
        .on_pointer_up(&PointerEvent::at(0.0, 0.0), &mut NoSectionFactory)
        .unwrap();
    editor.apply(EditorCommand::ActivateTool(ToolName::Move)).unwrap();

    editor.on_pointer_down(&PointerEvent::at(0.0, 0.0));
    editor.on_pointer_move(&PointerEvent::at(10.0, 5.0)).unwrap();
    assert!(editor.registry().get(id).unwrap().move_delta.is_some());

    editor
        .on_pointer_up(&PointerEvent::at(10.0, 5.0), &mut NoSectionFactory)
        .unwrap();

    let element = editor.registry().get(id).unwrap();
    assert_eq!(element.points[0], Point::new(10.0, 5.0));
    assert_eq!(element.points[2], Point::new(20.0, 15.0));
    assert!(element.move_delta.is_none());
    // Explicit selection survives the gesture.
    assert!(editor.selection().is_selected(id));
}

#[test]
fn move_auto_selects_hover_target_and_deselects_after() {
    let mut editor = Editor::new();
    let id = editor_insert(&mut editor, Point::new(0.0, 0.0));
    editor.apply(EditorCommand::ActivateTool(ToolName::Move)).unwrap();
    editor.set_hover_target(Some(id));

    editor.on_pointer_down(&PointerEvent::at(0.0, 0.0));
    editor.on_pointer_move(&PointerEvent::at(7.0, 3.0)).unwrap();
    editor
        .on_pointer_up(&PointerEvent::at(7.0, 3.0), &mut NoSectionFactory)
        .unwrap();

    assert_eq!(
        editor.registry().get(id).unwrap().points[0],
        Point::new(7.0, 3.0)
    );
    assert!(editor.selection().is_empty());
}

#[test]
fn pan_tool_drags_the_view() {
    let mut editor = Editor::new();
    editor.apply(EditorCommand::ActivateTool(ToolName::Pan)).unwrap();

    editor.on_pointer_down(&PointerEvent::at(0.0, 0.0));
    editor
        .on_pointer_move(&PointerEvent::at(10.0, 10.0).with_movement(10.0, 10.0))
        .unwrap();
    editor
        .on_pointer_up(&PointerEvent::at(10.0, 10.0), &mut NoSectionFactory)
        .unwrap();

    assert_eq!(editor.view().pan, Point::new(-10.0, -10.0));
}

#[test]
fn escape_is_idempotent_from_idle() {
    let mut editor = Editor::new();
    editor.escape().unwrap();
    editor.escape().unwrap();
    assert_eq!(editor.active_tool(), ToolName::Select);
}

fn editor_insert(editor: &mut Editor, at: Point) -> plankit_editor::ElementId {
    // Draw a small rectangle with the rectangle tool, then restore select.
    let before = editor.active_tool();
    editor.apply(EditorCommand::ActivateTool(ToolName::Rectangle)).unwrap();
    editor.on_pointer_down(&PointerEvent::at(at.x, at.y));
    editor
        .on_pointer_move(&PointerEvent::at(at.x + 10.0, at.y + 10.0))
        .unwrap();
    editor
        .on_pointer_up(&PointerEvent::at(at.x + 10.0, at.y + 10.0), &mut NoSectionFactory)
        .unwrap();
    editor.apply(EditorCommand::ActivateTool(before)).unwrap();
    let id = editor
        .registry()
        .iter()
        .find(|e| e.points[0] == at)
        .map(|e| e.id)
        .unwrap();
    id
}
