//! Turns raw input events into scroll-scene state.
//!
//! The [`InputTracker`] owns the normalized cursor, the scroll offset and
//! the current section index. It is the only thing between host events and
//! the section animator: a scroll that lands on a new in-range section is
//! reported exactly once.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::InputEvent;
use super::scroll::ScrollSurface;
use crate::panel::PanelAction;

/// Maps physical key strings to panel actions.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format (`"KeyH"`).
/// The web host maps `KeyboardEvent.code`, which uses the same names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    bindings: HashMap<String, KeyCommand>,
}

/// Key-bindable commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    /// Show or hide the debug panel.
    TogglePanel,
}

impl KeyCommand {
    fn to_action(self) -> PanelAction {
        match self {
            Self::TogglePanel => PanelAction::TogglePanel,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([("KeyH".into(), KeyCommand::TogglePanel)]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the panel action for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<PanelAction> {
        self.bindings.get(key).map(|cmd| cmd.to_action())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputState
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of the pointer and scroll state read by the frame step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    /// Cursor relative to the viewport center, each axis in [-0.5, 0.5].
    pub cursor: Vec2,
    /// Vertical page scroll in logical pixels.
    pub scroll_y: f32,
    /// Last section index reached. May lie outside the mesh range when the
    /// page scrolls past the last section.
    pub current_section: i64,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            cursor: Vec2::ZERO,
            scroll_y: 0.0,
            current_section: 0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputTracker
// ─────────────────────────────────────────────────────────────────────────────

/// Tracks the cursor and scroll over a viewport of known size.
#[derive(Debug, Clone)]
pub struct InputTracker {
    state: InputState,
    viewport: Vec2,
    section_count: usize,
    scroll_surface: ScrollSurface,
    // Set once wheel events drive the virtual page; host scroll events
    // clear it.
    wheel_driven: bool,
    key_bindings: KeyBindings,
}

impl InputTracker {
    /// A tracker for a `width` x `height` viewport over `section_count`
    /// sections.
    #[must_use]
    pub fn new(width: f32, height: f32, section_count: usize) -> Self {
        Self {
            state: InputState::default(),
            viewport: Vec2::new(width, height),
            section_count,
            scroll_surface: ScrollSurface::new(height, section_count),
            wheel_driven: false,
            key_bindings: KeyBindings::default(),
        }
    }

    /// Current input state.
    #[must_use]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Process one event. Returns the index of a newly reached section
    /// whose trigger should fire.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<usize> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor(x, y);
                None
            }
            InputEvent::Scrolled { scroll_y } => {
                self.wheel_driven = false;
                self.handle_scroll(scroll_y)
            }
            InputEvent::Wheel { delta } => {
                self.wheel_driven = true;
                let offset = self.scroll_surface.scroll_by(delta.pixels());
                self.handle_scroll(offset)
            }
            InputEvent::Resized { width, height, .. } => {
                self.resize(width, height);
                None
            }
        }
    }

    /// Normalize a cursor position against the viewport.
    pub fn handle_cursor(&mut self, x: f32, y: f32) {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return;
        }
        let cursor = Vec2::new(x, y) / self.viewport - Vec2::splat(0.5);
        self.state.cursor = cursor.clamp(Vec2::splat(-0.5), Vec2::splat(0.5));
    }

    /// Record a scroll offset and report a newly reached section.
    ///
    /// The section index is `round(scroll_y / height)`. A change is
    /// stored even when the index has no mesh, but only in-range indices
    /// are returned.
    pub fn handle_scroll(&mut self, scroll_y: f32) -> Option<usize> {
        self.state.scroll_y = scroll_y;
        let height = self.viewport.y;
        if height <= 0.0 {
            return None;
        }
        let section = section_index(scroll_y, height);
        if section == self.state.current_section {
            return None;
        }
        self.state.current_section = section;
        usize::try_from(section)
            .ok()
            .filter(|&i| i < self.section_count)
    }

    /// Update the viewport size. Zero sizes are ignored.
    ///
    /// When the wheel drives the virtual page, the rescaled page offset
    /// becomes the scroll offset and the section index follows it without
    /// firing a trigger. A host with a real document reports its own
    /// scroll after the reflow.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.scroll_surface.resize(height);
        if self.wheel_driven {
            self.state.scroll_y = self.scroll_surface.offset();
            self.state.current_section =
                section_index(self.state.scroll_y, height);
        }
    }

    /// Look up the action bound to a physical key.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<PanelAction> {
        self.key_bindings.lookup(key)
    }

    /// Scroll offset of the native virtual page.
    #[must_use]
    pub fn virtual_scroll(&self) -> f32 {
        self.scroll_surface.offset()
    }
}

/// Half-up rounding, so -0.5 maps to 0 rather than -1.
fn section_index(scroll_y: f32, height: f32) -> i64 {
    (scroll_y / height + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::ScrollDelta;

    fn tracker() -> InputTracker {
        InputTracker::new(1000.0, 800.0, 3)
    }

    #[test]
    fn center_of_viewport_is_zero() {
        let mut t = tracker();
        t.handle_cursor(500.0, 400.0);
        assert_eq!(t.state().cursor, Vec2::ZERO);
        t.handle_cursor(0.0, 800.0);
        assert_eq!(t.state().cursor, Vec2::new(-0.5, 0.5));
    }

    #[test]
    fn cursor_outside_viewport_is_clamped() {
        let mut t = tracker();
        t.handle_cursor(-300.0, 5000.0);
        assert_eq!(t.state().cursor, Vec2::new(-0.5, 0.5));
        t.handle_cursor(1e6, -1e6);
        assert_eq!(t.state().cursor, Vec2::new(0.5, -0.5));
    }

    #[test]
    fn scroll_of_one_viewport_reaches_section_one() {
        let mut t = tracker();
        assert_eq!(t.handle_scroll(800.0), Some(1));
        assert_eq!(t.state().current_section, 1);
        assert_eq!(t.state().scroll_y, 800.0);
    }

    #[test]
    fn trigger_fires_once_per_distinct_section() {
        let mut t = tracker();
        let fired: Vec<usize> = [100.0, 350.0, 450.0, 500.0, 790.0, 1300.0, 1600.0, 200.0]
            .into_iter()
            .filter_map(|s| t.handle_scroll(s))
            .collect();
        // 450 rounds to 1 (0.5625); 1300 to 2; 200 back to 0.
        assert_eq!(fired, vec![1, 2, 0]);
    }

    #[test]
    fn out_of_range_sections_are_stored_but_silent() {
        let mut t = tracker();
        assert_eq!(t.handle_scroll(2400.0), None);
        assert_eq!(t.state().current_section, 3);
        assert_eq!(t.handle_scroll(1600.0), Some(2));
        assert_eq!(t.handle_scroll(-800.0), None);
        assert_eq!(t.state().current_section, -1);
    }

    #[test]
    fn wheel_drives_virtual_scroll() {
        let mut t = tracker();
        let wheel = |lines| InputEvent::Wheel {
            delta: ScrollDelta::Lines(lines),
        };
        assert_eq!(t.handle_event(wheel(3.0)), None);
        assert_eq!(t.virtual_scroll(), 300.0);
        assert_eq!(t.handle_event(wheel(2.0)), Some(1));
        assert_eq!(t.handle_event(wheel(50.0)), Some(2));
        assert_eq!(t.virtual_scroll(), 1600.0);
    }

    #[test]
    fn resize_rescales_wheel_scroll_without_firing() {
        let mut t = tracker();
        let _ = t.handle_event(InputEvent::Wheel {
            delta: ScrollDelta::Pixels(800.0),
        });
        assert_eq!(t.handle_event(InputEvent::Resized {
            width: 1000.0,
            height: 400.0,
            scale_factor: 1.0,
        }), None);
        assert_eq!(t.virtual_scroll(), 400.0);
        assert_eq!(t.state().scroll_y, 400.0);
        assert_eq!(t.state().current_section, 1);
        // Scrolling within section 1 stays quiet after the resize.
        assert_eq!(
            t.handle_event(InputEvent::Wheel {
                delta: ScrollDelta::Pixels(10.0),
            }),
            None
        );
    }

    #[test]
    fn resize_keeps_document_scroll() {
        let mut t = tracker();
        assert_eq!(t.handle_event(InputEvent::Scrolled { scroll_y: 800.0 }), Some(1));
        t.resize(1000.0, 400.0);
        assert_eq!(t.state().scroll_y, 800.0);
        assert_eq!(t.virtual_scroll(), 0.0);
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut t = tracker();
        let _ = t.handle_event(InputEvent::Resized {
            width: 0.0,
            height: 0.0,
            scale_factor: 1.0,
        });
        t.handle_cursor(500.0, 400.0);
        assert_eq!(t.state().cursor, Vec2::ZERO);
    }

    #[test]
    fn h_toggles_the_panel() {
        let t = tracker();
        assert_eq!(t.handle_key_press("KeyH"), Some(PanelAction::TogglePanel));
        assert_eq!(t.handle_key_press("KeyQ"), None);
    }
}
