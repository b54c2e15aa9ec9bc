//! Entity types for the floor-plan hierarchy.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod building;
mod fixture;
mod floor;
mod label;
mod room;
mod section;

pub use building::Building;
pub use fixture::Fixture;
pub use floor::Floor;
pub use label::Label;
pub use room::Room;
pub use section::{Section, SectionShape};

/// Identifier for a floor-plan entity. A dedicated newtype so entity ids can
/// never be confused with ids from other domains (elements, toolbar buttons).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminant for the entity kinds in a floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Building,
    Floor,
    Room,
    Section,
    Fixture,
    Label,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Building => "building",
            EntityKind::Floor => "floor",
            EntityKind::Room => "room",
            EntityKind::Section => "section",
            EntityKind::Fixture => "fixture",
            EntityKind::Label => "label",
        };
        f.write_str(s)
    }
}

/// A serializable reference to a parent entity. Parent linkage is stored as
/// `(id, kind)` and resolved against the owning [`crate::FloorPlan`], never
/// as an embedded object reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentStub {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl ParentStub {
    /// Creates a stub pointing at `id` of the given kind.
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self { id, kind }
    }
}

/// A floor-plan entity of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Entity {
    Building(Building),
    Floor(Floor),
    Room(Room),
    Section(Section),
    Fixture(Fixture),
    Label(Label),
}

impl Entity {
    /// The entity's id.
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Building(e) => e.id,
            Entity::Floor(e) => e.id,
            Entity::Room(e) => e.id,
            Entity::Section(e) => e.id,
            Entity::Fixture(e) => e.id,
            Entity::Label(e) => e.id,
        }
    }

    /// The entity's kind discriminant.
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Building(_) => EntityKind::Building,
            Entity::Floor(_) => EntityKind::Floor,
            Entity::Room(_) => EntityKind::Room,
            Entity::Section(_) => EntityKind::Section,
            Entity::Fixture(_) => EntityKind::Fixture,
            Entity::Label(_) => EntityKind::Label,
        }
    }

    /// The entity's parent stub, if it has one.
    pub fn parent(&self) -> Option<ParentStub> {
        match self {
            Entity::Building(e) => e.parent,
            Entity::Floor(e) => e.parent,
            Entity::Room(e) => e.parent,
            Entity::Section(e) => e.parent,
            Entity::Fixture(e) => e.parent,
            Entity::Label(e) => e.parent,
        }
    }
}
