//! Error handling for Plankit.
//!
//! Every failure carries a structured code of the form
//! `feature:action:kind`, e.g. `tool:select:not-found` or
//! `preview:create:bad-parameters`. The code identifies which part of the
//! system raised the error, which operation was in flight, and the nature of
//! the failure. All error types use `thiserror`.
//!
//! There are deliberately only two kinds:
//! - [`EditorError::NotFound`] — an operation required prior state that is
//!   absent (an anchor point, a registered element). Always a sequencing bug
//!   in the caller, never a recoverable user situation.
//! - [`EditorError::BadParameters`] — malformed geometry or input, such as
//!   committing a rectangle with incomplete banding data.

use std::fmt;

use thiserror::Error;

/// The subsystem or entity domain an error originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// The preview/banding engine.
    Preview,
    /// A tool state machine (select, move, pan, rectangle).
    Tool,
    /// Rectangle geometry handling.
    Rectangle,
    /// Generic shape construction.
    Shape,
    /// An entity of unspecified kind.
    Entity,
    /// The floor plan container.
    FloorPlan,
    /// A building entity.
    Building,
    /// A floor entity.
    Floor,
    /// A room entity.
    Room,
    /// A section entity.
    Section,
    /// A fixture entity.
    Fixture,
    /// A label entity.
    Label,
}

impl Feature {
    fn as_str(&self) -> &'static str {
        match self {
            Feature::Preview => "preview",
            Feature::Tool => "tool",
            Feature::Rectangle => "rectangle",
            Feature::Shape => "shape",
            Feature::Entity => "entity",
            Feature::FloorPlan => "floor-plan",
            Feature::Building => "building",
            Feature::Floor => "floor",
            Feature::Room => "room",
            Feature::Section => "section",
            Feature::Fixture => "fixture",
            Feature::Label => "label",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation that was being performed when the error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Creating something new.
    Create,
    /// Reading existing state.
    Read,
    /// Updating existing state.
    Update,
    /// Deleting state.
    Delete,
    /// Listing a collection.
    List,
    /// A selection operation.
    Select,
    /// A move/translate operation.
    Move,
}

impl Action {
    fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::List => "list",
            Action::Select => "select",
            Action::Move => "move",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified error type for the editor core and its collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Required prior state was absent; the caller drove an operation out of
    /// sequence (e.g. `redraw` before `arm`).
    #[error("{feature}:{action}:not-found: {message}")]
    NotFound {
        /// The subsystem raising the error.
        feature: Feature,
        /// The operation in flight.
        action: Action,
        /// Human-readable detail.
        message: String,
    },

    /// Malformed geometry or input.
    #[error("{feature}:{action}:bad-parameters: {message}")]
    BadParameters {
        /// The subsystem raising the error.
        feature: Feature,
        /// The operation in flight.
        action: Action,
        /// Human-readable detail.
        message: String,
    },
}

impl EditorError {
    /// Builds a `not-found` error.
    pub fn not_found(feature: Feature, action: Action, message: impl Into<String>) -> Self {
        EditorError::NotFound {
            feature,
            action,
            message: message.into(),
        }
    }

    /// Builds a `bad-parameters` error.
    pub fn bad_parameters(feature: Feature, action: Action, message: impl Into<String>) -> Self {
        EditorError::BadParameters {
            feature,
            action,
            message: message.into(),
        }
    }

    /// The structured `feature:action:kind` code, without the message.
    pub fn code(&self) -> String {
        match self {
            EditorError::NotFound {
                feature, action, ..
            } => format!("{feature}:{action}:not-found"),
            EditorError::BadParameters {
                feature, action, ..
            } => format!("{feature}:{action}:bad-parameters"),
        }
    }

    /// Whether this is a `not-found` sequencing error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EditorError::NotFound { .. })
    }

    /// Whether this is a `bad-parameters` error.
    pub fn is_bad_parameters(&self) -> bool {
        matches!(self, EditorError::BadParameters { .. })
    }
}

/// Result type using [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;
