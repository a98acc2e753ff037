//! Virtual page scroll for hosts without a document.
//!
//! The page is `section_count` viewports tall, so the offset runs from 0
//! to `(section_count - 1) * viewport_height`.

/// Scroll offset over a virtual page of stacked viewport-high sections.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSurface {
    offset: f32,
    viewport_height: f32,
    section_count: usize,
}

impl ScrollSurface {
    /// A surface scrolled to the top.
    #[must_use]
    pub fn new(viewport_height: f32, section_count: usize) -> Self {
        Self {
            offset: 0.0,
            viewport_height,
            section_count,
        }
    }

    /// Current offset in logical pixels.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Largest reachable offset.
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        self.section_count.saturating_sub(1) as f32 * self.viewport_height
    }

    /// Scroll by `pixels` (positive = down) and return the new offset.
    pub fn scroll_by(&mut self, pixels: f32) -> f32 {
        self.offset = (self.offset + pixels).clamp(0.0, self.max_offset());
        self.offset
    }

    /// Rescale the offset so the same fraction of the page stays in view.
    pub fn resize(&mut self, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        if self.viewport_height > 0.0 {
            self.offset *= viewport_height / self.viewport_height;
        }
        self.viewport_height = viewport_height;
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}
