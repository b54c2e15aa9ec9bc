use plankit_core::Point;
use serde::{Deserialize, Serialize};

use super::{EntityId, ParentStub};

/// The geometric flavour of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionShape {
    /// Exactly four corner points in TL, TR, BR, BL winding order.
    Rectangle,
    /// Three or more points forming a simple polygon.
    Polygon,
}

/// A section of a room: the unit of geometry the rectangle tool commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: EntityId,
    pub shape: SectionShape,
    pub points: Vec<Point>,
    pub parent: Option<ParentStub>,
    pub label_ids: Vec<EntityId>,
}

impl Section {
    pub fn new(shape: SectionShape, points: Vec<Point>, parent: ParentStub) -> Self {
        Self {
            id: EntityId::new(),
            shape,
            points,
            parent: Some(parent),
            label_ids: Vec::new(),
        }
    }
}
