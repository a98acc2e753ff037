//! Input handling: event types, the virtual scroll surface, and the
//! tracker that turns raw host events into cursor, scroll and section
//! state.

/// Platform-agnostic input events.
pub mod event;
/// Virtual page scroll for native hosts.
pub mod scroll;
/// Cursor normalization, section detection and key bindings.
pub mod tracker;

pub use event::{InputEvent, ScrollDelta};
pub use tracker::{InputState, InputTracker, KeyBindings};
