use plankit_core::Point;
use serde::{Deserialize, Serialize};

use super::{EntityId, ParentStub};

/// A building footprint. The outermost entity of a plan; its parent is the
/// plan itself and therefore optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: EntityId,
    pub points: Vec<Point>,
    pub wall_type: Option<String>,
    pub parent: Option<ParentStub>,
    pub floor_ids: Vec<EntityId>,
    pub label_ids: Vec<EntityId>,
}

impl Building {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: EntityId::new(),
            points,
            wall_type: None,
            parent: None,
            floor_ids: Vec::new(),
            label_ids: Vec::new(),
        }
    }
}
