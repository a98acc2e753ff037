//! Shared utilities: colors, easing curves, and frame clocks.

pub mod clock;
pub mod color;
pub mod easing;
