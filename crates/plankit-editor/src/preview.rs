//! The preview/banding engine.
//!
//! Tracks an anchor point and a live second point and normalizes them into
//! an axis-aligned rectangle. Serves double duty as the rectangle tool's
//! shape-under-construction and the select tool's marquee.

use plankit_core::geometry::rectangle_corners;
use plankit_core::{Action, EditorError, Feature, Point, Result};
use serde::{Deserialize, Serialize};

/// Gesture phase of the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewPhase {
    #[default]
    Idle,
    Armed,
    Dragging,
}

/// Normalized banding rectangle: top-left corner plus non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandingRect {
    pub tl_x: f64,
    pub tl_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Anchor + live point → normalized rectangle, through idle/armed/dragging.
///
/// Geometry fields are set iff a redraw has happened since arming; they are
/// always non-negative (min/abs of anchor and current pointer).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewEngine {
    phase: PreviewPhase,
    anchor: Option<Point>,
    rect: Option<BandingRect>,
}

impl PreviewEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PreviewPhase {
        self.phase
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    pub fn rect(&self) -> Option<BandingRect> {
        self.rect
    }

    /// Sets the anchor and enters the armed phase.
    pub fn arm(&mut self, anchor: Point) {
        self.anchor = Some(anchor);
        self.phase = PreviewPhase::Armed;
    }

    /// Recomputes the banding rectangle from the anchor and the current
    /// pointer position. Fails if called before [`arm`](Self::arm).
    /// Transitions armed → dragging defensively.
    pub fn redraw(&mut self, current: Point) -> Result<()> {
        let anchor = self.anchor.ok_or_else(|| {
            EditorError::not_found(Feature::Preview, Action::Create, "anchor point is not set")
        })?;

        self.rect = Some(BandingRect {
            tl_x: current.x.min(anchor.x),
            tl_y: current.y.min(anchor.y),
            width: (current.x - anchor.x).abs(),
            height: (current.y - anchor.y).abs(),
        });
        if self.phase == PreviewPhase::Armed {
            self.phase = PreviewPhase::Dragging;
        }
        Ok(())
    }

    /// Inclusive bounds test against the banding rectangle. A point exactly
    /// on an edge counts as inside. False while no rectangle exists.
    pub fn contains_point(&self, point: Point) -> bool {
        match self.rect {
            Some(rect) => {
                point.x >= rect.tl_x
                    && point.x <= rect.tl_x + rect.width
                    && point.y >= rect.tl_y
                    && point.y <= rect.tl_y + rect.height
            }
            None => false,
        }
    }

    /// Converts the banding rectangle into its four corner points in
    /// TL, TR, BR, BL winding order. Fails while geometry is incomplete.
    pub fn to_rectangle_points(&self) -> Result<[Point; 4]> {
        let rect = self.rect.ok_or_else(|| {
            EditorError::bad_parameters(
                Feature::Preview,
                Action::Create,
                "banding geometry is incomplete",
            )
        })?;
        Ok(rectangle_corners(rect.tl_x, rect.tl_y, rect.width, rect.height))
    }

    /// Back to idle; clears the anchor and all derived geometry.
    pub fn reset(&mut self) {
        self.phase = PreviewPhase::Idle;
        self.anchor = None;
        self.rect = None;
    }

    /// Whether a renderer should draw the preview: the owning tool must be
    /// active, a gesture must be in flight, and the geometry complete.
    pub fn visible(&self, owner_is_active: bool) -> bool {
        owner_is_active
            && self.rect.is_some()
            && matches!(self.phase, PreviewPhase::Armed | PreviewPhase::Dragging)
    }
}
