use plankit_core::Point;
use serde::{Deserialize, Serialize};

use super::{EntityId, ParentStub};

/// A text label attached to any other entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: EntityId,
    pub text: String,
    pub position: Point,
    pub parent: Option<ParentStub>,
}

impl Label {
    pub fn new(text: impl Into<String>, position: Point, parent: ParentStub) -> Self {
        Self {
            id: EntityId::new(),
            text: text.into(),
            position,
            parent: Some(parent),
        }
    }
}
