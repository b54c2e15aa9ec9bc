//! View state and coordinate transformation.
//!
//! Handles conversion from screen-space pointer coordinates to world
//! coordinates under the current pan and scale, plus zoom/pan mutation.
//! Every tool goes through [`EditorView::to_world`] so previews and
//! committed geometry agree pixel-for-pixel.

use std::fmt;

use plankit_core::geometry::round_to;
use plankit_core::Point;
use serde::{Deserialize, Serialize};

use crate::input::{PointerEvent, WheelEvent};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 3.0;

/// The pan/scale state of the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorView {
    pub pan: Point,
    scale: f64,
}

impl Default for EditorView {
    fn default() -> Self {
        Self {
            pan: Point::default(),
            scale: 1.0,
        }
    }
}

impl EditorView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current scale factor. Always within `[0.1, 3.0]`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Converts a pointer event to a world-space point:
    /// `round((offset + pan) / scale)` per axis.
    pub fn to_world(&self, event: &PointerEvent) -> Point {
        Point::new(
            ((event.offset_x + self.pan.x) / self.scale).round(),
            ((event.offset_y + self.pan.y) / self.scale).round(),
        )
    }

    /// Applies a wheel zoom step: `scale - delta_y * 0.01`, clamped to
    /// exactly `0.1`/`3.0` at the ends and rounded to 2 places otherwise.
    pub fn zoom(&mut self, delta_y: f64) {
        let result = self.scale - delta_y * 0.01;
        if result < MIN_SCALE {
            self.scale = MIN_SCALE;
            return;
        }
        if result > MAX_SCALE {
            self.scale = MAX_SCALE;
            return;
        }
        self.scale = round_to(result, 2);
    }

    /// Shifts the pan offset by a delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    /// Pans opposite the pointer movement, so dragging the canvas right
    /// moves the view content right.
    pub fn pan_from_movement(&mut self, event: &PointerEvent) {
        self.pan_by(-event.movement_x, -event.movement_y);
    }

    /// Routes a wheel event: with a modifier held the wheel zooms,
    /// otherwise it pans by the negated scroll deltas.
    pub fn handle_wheel(&mut self, event: &WheelEvent) {
        if event.modifier {
            self.zoom(event.delta_y);
        } else {
            self.pan_by(-event.delta_x, -event.delta_y);
        }
    }

    /// World-unit distance under which a gesture counts as a click rather
    /// than a drag. Constant in screen pixels regardless of zoom.
    pub fn click_threshold(&self) -> f64 {
        5.0 / self.scale
    }

    /// The SVG transform string renderers apply to the content group.
    pub fn view_transform(&self) -> String {
        format!("translate({},{}) scale({})", -self.pan.x, -self.pan.y, self.scale)
    }

    /// Grid density and snap size appropriate for the current scale.
    pub fn grid_settings(&self, snap: bool) -> GridSettings {
        GridSettings::for_scale(self.scale, snap)
    }
}

impl fmt::Display for EditorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scale: {:.2}x | pan: ({:.1}, {:.1})",
            self.scale, self.pan.x, self.pan.y
        )
    }
}

/// Grid density tier, derived from scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridTier {
    Sm,
    Md,
    Lg,
}

/// Grid rendering and snapping parameters for a given scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    pub tier: GridTier,
    /// Snap increment in world units; `0` when snapping is off.
    pub snap_size: f64,
    /// Major grid line spacing in world units.
    pub grid_size: f64,
    /// Half-width of the rendered grid area in world units.
    pub grid_extent: f64,
}

impl GridSettings {
    pub fn for_scale(scale: f64, snap: bool) -> Self {
        let (tier, size) = if scale >= 1.5 {
            (GridTier::Sm, 10.0)
        } else if scale >= 1.0 {
            (GridTier::Md, 25.0)
        } else {
            (GridTier::Lg, 100.0)
        };
        Self {
            tier,
            snap_size: if snap { size } else { 0.0 },
            grid_size: 100.0,
            grid_extent: 10_000.0,
        }
    }
}
