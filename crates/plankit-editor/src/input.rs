//! Framework-agnostic input event types.
//!
//! The hosting surface translates its native pointer/keyboard/wheel events
//! into these structs; the core never touches a windowing toolkit directly.

/// A pointer event in screen space.
///
/// `offset_x`/`offset_y` are pixels from the canvas origin; `movement_x`/
/// `movement_y` are the per-event deltas the host reports.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerEvent {
    pub offset_x: f64,
    pub offset_y: f64,
    pub movement_x: f64,
    pub movement_y: f64,
    pub shift: bool,
}

impl PointerEvent {
    pub fn at(offset_x: f64, offset_y: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            ..Default::default()
        }
    }

    pub fn with_movement(mut self, movement_x: f64, movement_y: f64) -> Self {
        self.movement_x = movement_x;
        self.movement_y = movement_y;
        self
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }
}

/// A keyboard event. `key` is the produced character or named key
/// ("g", "Escape", "ArrowLeft"); `code` is the physical key position
/// ("KeyG", "Space"), used in layout-independent shortcut mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub code: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// A scroll-wheel event. A held `modifier` (ctrl or meta) turns the wheel
/// into zoom; otherwise it pans.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    pub modifier: bool,
}

/// Where keyboard focus currently sits, for shortcut suppression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputFocus {
    /// No editable control has focus; shortcuts dispatch normally.
    #[default]
    None,
    /// An editable input/textarea has focus. Shortcuts are suppressed
    /// unless their binding opts in.
    Editable { name: String },
}

impl InputFocus {
    pub fn editable(name: impl Into<String>) -> Self {
        Self::Editable { name: name.into() }
    }
}
