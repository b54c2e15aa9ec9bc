use plankit_core::Point;
use serde::{Deserialize, Serialize};

use super::{EntityId, ParentStub};

/// A floor (storey) of a building. Must always have a building parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: EntityId,
    pub points: Vec<Point>,
    pub roof_type: Option<String>,
    pub parent: Option<ParentStub>,
    pub room_ids: Vec<EntityId>,
    pub label_ids: Vec<EntityId>,
}

impl Floor {
    pub fn new(points: Vec<Point>, parent: ParentStub) -> Self {
        Self {
            id: EntityId::new(),
            points,
            roof_type: None,
            parent: Some(parent),
            room_ids: Vec::new(),
            label_ids: Vec::new(),
        }
    }
}
