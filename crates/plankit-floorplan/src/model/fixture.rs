use plankit_core::Point;
use serde::{Deserialize, Serialize};

use super::{EntityId, ParentStub};

/// A fixture or appliance placed in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: EntityId,
    pub name: Option<String>,
    pub points: Vec<Point>,
    pub parent: Option<ParentStub>,
    pub label_ids: Vec<EntityId>,
}

impl Fixture {
    pub fn new(points: Vec<Point>, parent: ParentStub) -> Self {
        Self {
            id: EntityId::new(),
            name: None,
            points,
            parent: Some(parent),
            label_ids: Vec::new(),
        }
    }
}
