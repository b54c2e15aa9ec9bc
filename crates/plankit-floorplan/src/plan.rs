//! The owning registry for floor-plan entities, plus the factory functions
//! the editor core calls out to.
//!
//! Factories validate their inputs and return `Result`; a failed construction
//! registers nothing (no partially-created entity is ever left behind).

use std::collections::HashMap;

use plankit_core::{Action, EditorError, Feature, Point, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    Building, Entity, EntityId, EntityKind, Fixture, Floor, Label, ParentStub, Room, Section,
    SectionShape,
};

/// A complete floor plan: one typed map per entity kind, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloorPlan {
    pub id: EntityId,
    pub name: String,
    buildings: HashMap<EntityId, Building>,
    floors: HashMap<EntityId, Floor>,
    rooms: HashMap<EntityId, Room>,
    sections: HashMap<EntityId, Section>,
    fixtures: HashMap<EntityId, Fixture>,
    labels: HashMap<EntityId, Label>,
}

impl FloorPlan {
    /// Creates an empty plan.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether the entity a stub points at exists in this plan.
    pub fn contains(&self, stub: ParentStub) -> bool {
        match stub.kind {
            EntityKind::Building => self.buildings.contains_key(&stub.id),
            EntityKind::Floor => self.floors.contains_key(&stub.id),
            EntityKind::Room => self.rooms.contains_key(&stub.id),
            EntityKind::Section => self.sections.contains_key(&stub.id),
            EntityKind::Fixture => self.fixtures.contains_key(&stub.id),
            EntityKind::Label => self.labels.contains_key(&stub.id),
        }
    }

    /// Resolves a stub to a cloned entity, if present.
    pub fn resolve(&self, stub: ParentStub) -> Option<Entity> {
        match stub.kind {
            EntityKind::Building => self.buildings.get(&stub.id).cloned().map(Entity::Building),
            EntityKind::Floor => self.floors.get(&stub.id).cloned().map(Entity::Floor),
            EntityKind::Room => self.rooms.get(&stub.id).cloned().map(Entity::Room),
            EntityKind::Section => self.sections.get(&stub.id).cloned().map(Entity::Section),
            EntityKind::Fixture => self.fixtures.get(&stub.id).cloned().map(Entity::Fixture),
            EntityKind::Label => self.labels.get(&stub.id).cloned().map(Entity::Label),
        }
    }

    pub fn building(&self, id: EntityId) -> Option<&Building> {
        self.buildings.get(&id)
    }

    pub fn floor(&self, id: EntityId) -> Option<&Floor> {
        self.floors.get(&id)
    }

    pub fn room(&self, id: EntityId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn section(&self, id: EntityId) -> Option<&Section> {
        self.sections.get(&id)
    }

    pub fn fixture(&self, id: EntityId) -> Option<&Fixture> {
        self.fixtures.get(&id)
    }

    pub fn label(&self, id: EntityId) -> Option<&Label> {
        self.labels.get(&id)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn require_parent(
        &self,
        parent: ParentStub,
        expected: EntityKind,
        feature: Feature,
    ) -> Result<()> {
        if parent.kind != expected {
            return Err(EditorError::bad_parameters(
                feature,
                Action::Create,
                format!("parent must be a {expected}, got {}", parent.kind),
            ));
        }
        if !self.contains(parent) {
            return Err(EditorError::bad_parameters(
                feature,
                Action::Create,
                format!("parent {} {} is not in this plan", parent.kind, parent.id),
            ));
        }
        Ok(())
    }

    /// Creates a building from its footprint points.
    pub fn create_building(&mut self, points: Vec<Point>) -> EntityId {
        let building = Building::new(points);
        let id = building.id;
        self.buildings.insert(id, building);
        debug!(%id, "created building");
        id
    }

    /// Creates a floor under a building.
    pub fn create_floor(&mut self, points: Vec<Point>, parent: ParentStub) -> Result<EntityId> {
        self.require_parent(parent, EntityKind::Building, Feature::Floor)?;

        let floor = Floor::new(points, parent);
        let id = floor.id;
        self.floors.insert(id, floor);
        if let Some(building) = self.buildings.get_mut(&parent.id) {
            building.floor_ids.push(id);
        }
        debug!(%id, "created floor");
        Ok(id)
    }

    /// Creates a room under a floor. A room must have at least one section.
    pub fn create_room(
        &mut self,
        section_ids: Vec<EntityId>,
        parent: ParentStub,
    ) -> Result<EntityId> {
        if section_ids.is_empty() {
            return Err(EditorError::bad_parameters(
                Feature::Room,
                Action::Create,
                "room must have at least one section",
            ));
        }
        self.require_parent(parent, EntityKind::Floor, Feature::Room)?;

        let room = Room::new(section_ids, parent);
        let id = room.id;
        self.rooms.insert(id, room);
        if let Some(floor) = self.floors.get_mut(&parent.id) {
            floor.room_ids.push(id);
        }
        debug!(%id, "created room");
        Ok(id)
    }

    /// Creates a rectangular section under a room. The points must be the
    /// four rectangle corners.
    pub fn create_rectangular_section(
        &mut self,
        points: Vec<Point>,
        parent: ParentStub,
    ) -> Result<EntityId> {
        if points.len() != 4 {
            return Err(EditorError::bad_parameters(
                Feature::Section,
                Action::Create,
                format!("rectangular section must contain 4 points, got {}", points.len()),
            ));
        }
        self.insert_section(SectionShape::Rectangle, points, parent)
    }

    /// Creates a polygonal section under a room.
    pub fn create_polygonal_section(
        &mut self,
        points: Vec<Point>,
        parent: ParentStub,
    ) -> Result<EntityId> {
        if points.len() < 3 {
            return Err(EditorError::bad_parameters(
                Feature::Section,
                Action::Create,
                format!("polygonal section must contain at least 3 points, got {}", points.len()),
            ));
        }
        self.insert_section(SectionShape::Polygon, points, parent)
    }

    fn insert_section(
        &mut self,
        shape: SectionShape,
        points: Vec<Point>,
        parent: ParentStub,
    ) -> Result<EntityId> {
        self.require_parent(parent, EntityKind::Room, Feature::Section)?;

        let section = Section::new(shape, points, parent);
        let id = section.id;
        self.sections.insert(id, section);
        if let Some(room) = self.rooms.get_mut(&parent.id) {
            room.section_ids.push(id);
        }
        debug!(%id, ?shape, "created section");
        Ok(id)
    }

    /// Creates a fixture inside a room.
    pub fn create_fixture(&mut self, points: Vec<Point>, parent: ParentStub) -> Result<EntityId> {
        self.require_parent(parent, EntityKind::Room, Feature::Fixture)?;

        let fixture = Fixture::new(points, parent);
        let id = fixture.id;
        self.fixtures.insert(id, fixture);
        if let Some(room) = self.rooms.get_mut(&parent.id) {
            room.fixture_ids.push(id);
        }
        debug!(%id, "created fixture");
        Ok(id)
    }

    /// Creates a label attached to any existing entity.
    pub fn create_label(
        &mut self,
        text: impl Into<String>,
        position: Point,
        parent: ParentStub,
    ) -> Result<EntityId> {
        if !self.contains(parent) {
            return Err(EditorError::bad_parameters(
                Feature::Label,
                Action::Create,
                format!("parent {} {} is not in this plan", parent.kind, parent.id),
            ));
        }

        let label = Label::new(text, position, parent);
        let id = label.id;
        self.labels.insert(id, label);
        debug!(%id, "created label");
        Ok(id)
    }
}
