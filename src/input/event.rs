/// Platform-agnostic input events.
///
/// Hosts translate their native events into these and feed them to
/// [`SceneEngine::handle_input`](crate::SceneEngine::handle_input).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to an absolute position in logical pixels.
    CursorMoved {
        /// Horizontal position from the left edge.
        x: f32,
        /// Vertical position from the top edge.
        y: f32,
    },
    /// The page scroll offset changed (web host).
    Scrolled {
        /// Vertical scroll offset in logical pixels.
        scroll_y: f32,
    },
    /// A wheel or touchpad scrolled the virtual page (native host).
    Wheel {
        /// Scroll amount; positive scrolls down the page.
        delta: ScrollDelta,
    },
    /// The viewport changed size.
    Resized {
        /// Width in logical pixels.
        width: f32,
        /// Height in logical pixels.
        height: f32,
        /// Device pixel ratio reported by the host.
        scale_factor: f32,
    },
}

/// Wheel delta units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollDelta {
    /// Discrete wheel notches.
    Lines(f32),
    /// Precise touchpad pixels.
    Pixels(f32),
}

/// Pixels scrolled per wheel line.
pub const PIXELS_PER_LINE: f32 = 100.0;

impl ScrollDelta {
    /// Scroll distance in logical pixels, positive downward.
    #[must_use]
    pub fn pixels(self) -> f32 {
        match self {
            Self::Lines(lines) => lines * PIXELS_PER_LINE,
            Self::Pixels(px) => px,
        }
    }
}

#[cfg(feature = "viewer")]
impl ScrollDelta {
    /// Convert a winit wheel delta. winit reports positive values for
    /// scrolling up, so the sign is flipped; pixel deltas are converted to
    /// logical pixels with `scale_factor`.
    #[must_use]
    pub fn from_winit(
        delta: winit::event::MouseScrollDelta,
        scale_factor: f64,
    ) -> Self {
        match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => Self::Lines(-y),
            winit::event::MouseScrollDelta::PixelDelta(pos) => {
                Self::Pixels((-pos.y / scale_factor) as f32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_scroll_a_hundred_pixels() {
        assert_eq!(ScrollDelta::Lines(2.0).pixels(), 200.0);
        assert_eq!(ScrollDelta::Pixels(-35.0).pixels(), -35.0);
    }
}
