use plankit_core::Point;
use serde::{Deserialize, Serialize};

use super::{EntityId, ParentStub};

/// A room on a floor. A room's geometry comes from its sections; `outline`
/// caches the merged boundary for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: EntityId,
    pub height_m: Option<f64>,
    pub parent: Option<ParentStub>,
    pub points: Vec<Point>,
    pub section_ids: Vec<EntityId>,
    pub fixture_ids: Vec<EntityId>,
    pub outline: Vec<Point>,
    pub label_ids: Vec<EntityId>,
}

impl Room {
    pub fn new(section_ids: Vec<EntityId>, parent: ParentStub) -> Self {
        Self {
            id: EntityId::new(),
            height_m: None,
            parent: Some(parent),
            points: Vec::new(),
            section_ids,
            fixture_ids: Vec::new(),
            outline: Vec::new(),
            label_ids: Vec::new(),
        }
    }
}
