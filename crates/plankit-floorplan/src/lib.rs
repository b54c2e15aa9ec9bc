//! # Plankit Floor Plan
//!
//! The floor-plan entity hierarchy: buildings contain floors, floors contain
//! rooms, rooms are made of sections and hold fixtures; labels can attach to
//! any of them. Entities reference their parent through a serializable
//! `(id, kind)` stub rather than an embedded object, so the hierarchy has no
//! reference cycles and round-trips cleanly through serde.
//!
//! The editor core treats this crate as an external collaborator: on a
//! rectangle-tool commit it calls a section factory with the four committed
//! corner points and a parent stub, and propagates any construction failure.

pub mod model;
pub mod plan;

pub use model::{
    Building, Entity, EntityId, EntityKind, Fixture, Floor, Label, ParentStub, Room, Section,
    SectionShape,
};
pub use plan::FloorPlan;
