//! Interaction core for the floor-plan editor.
//!
//! Interprets raw pointer and keyboard events into geometric operations:
//! marquee selection, rectangle creation, drag-move with commit semantics
//! and pan/zoom, on top of a screen-to-world transform pipeline and a
//! keyboard shortcut dispatcher with chorded and chained bindings.
//!
//! The crate produces geometric data and state, not pixels; a hosting
//! surface feeds it events and subscribes to [`events::Observers`] to know
//! when to redraw.

pub mod command;
pub mod diag;
pub mod editor;
pub mod element;
pub mod events;
pub mod input;
pub mod preview;
pub mod shortcuts;
pub mod toolbar;
pub mod tools;
pub mod view;

pub use command::EditorCommand;
pub use editor::{Editor, NoSectionFactory, SectionFactory};
pub use element::{Element, ElementId, ElementRegistry, MoveDelta, SelectionSet};
pub use events::{EditorEvent, EventFilter, SubscriptionId};
pub use input::{InputFocus, KeyEvent, PointerEvent, WheelEvent};
pub use preview::{BandingRect, PreviewEngine, PreviewPhase};
pub use shortcuts::{ShortcutBinding, ShortcutDispatcher, ShortcutOptions, UsingInput};
pub use toolbar::{ToolbarButton, ToolbarButtonGroup, ToolbarButtonId};
pub use tools::{CursorStyle, SelectionMethod, ToolName};
pub use view::{EditorView, GridSettings, GridTier};
