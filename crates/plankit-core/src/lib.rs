//! # Plankit Core
//!
//! Shared primitives for the Plankit floor-plan editor: the structured error
//! taxonomy used across all crates and the world-space geometry helpers the
//! editor tools are built on.
//!
//! Coordinates live in two spaces:
//! - **Screen space**: raw pixel offsets as delivered by the hosting surface.
//! - **World space**: the logical drawing coordinate system, reached by
//!   applying the pan/scale transform. World points are integer-rounded at
//!   transform time so equality comparisons are stable.
//!
//! The crates above this one are:
//! - `plankit-floorplan`: the entity hierarchy (buildings, floors, rooms,
//!   sections, fixtures, labels) and its factories.
//! - `plankit-editor`: the interaction core (tools, shortcuts, preview).

pub mod error;
pub mod geometry;

pub use error::{Action, EditorError, Feature, Result};
pub use geometry::Point;
