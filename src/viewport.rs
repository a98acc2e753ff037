//! Viewport size and pixel-ratio bookkeeping.

use crate::options::ViewportOptions;

/// Logical viewport dimensions plus the device pixel ratio.
///
/// The surface is sized in physical pixels with the pixel ratio capped at
/// `max_pixel_ratio` to bound fill-rate cost on dense displays.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    device_pixel_ratio: f32,
    max_pixel_ratio: f32,
}

impl Viewport {
    /// A viewport of `width` x `height` logical pixels.
    #[must_use]
    pub fn new(
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
        options: &ViewportOptions,
    ) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            device_pixel_ratio: device_pixel_ratio.max(f32::EPSILON),
            max_pixel_ratio: options.max_pixel_ratio,
        }
    }

    /// Record a resize. Returns `false` (and changes nothing) when either
    /// dimension is zero, as when a window is minimized.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
    ) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.width = width;
        self.height = height;
        if device_pixel_ratio > 0.0 {
            self.device_pixel_ratio = device_pixel_ratio;
        }
        true
    }

    /// Logical width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Logical height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Camera aspect ratio, `width / height`.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Device pixel ratio capped at the configured maximum.
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio.min(self.max_pixel_ratio)
    }

    /// Surface size in physical pixels, never zero.
    #[must_use]
    pub fn physical_size(&self) -> (u32, u32) {
        let pr = self.pixel_ratio();
        (
            ((self.width * pr).round() as u32).max(1),
            ((self.height * pr).round() as u32).max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(dpr: f32) -> Viewport {
        Viewport::new(1000.0, 800.0, dpr, &ViewportOptions::default())
    }

    #[test]
    fn aspect_is_width_over_height() {
        let mut vp = viewport(1.0);
        assert_eq!(vp.aspect(), 1000.0 / 800.0);
        assert!(vp.resize(1337.0, 411.0, 1.0));
        assert_eq!(vp.aspect(), 1337.0 / 411.0);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(viewport(1.0).pixel_ratio(), 1.0);
        assert_eq!(viewport(1.5).pixel_ratio(), 1.5);
        assert_eq!(viewport(3.0).pixel_ratio(), 2.0);
        assert_eq!(viewport(3.0).physical_size(), (2000, 1600));
    }

    #[test]
    fn physical_size_rounds() {
        let vp = Viewport::new(333.0, 201.0, 1.5, &ViewportOptions::default());
        assert_eq!(vp.physical_size(), (500, 302));
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut vp = viewport(2.0);
        assert!(!vp.resize(0.0, 600.0, 2.0));
        assert!(!vp.resize(600.0, 0.0, 2.0));
        assert_eq!((vp.width(), vp.height()), (1000.0, 800.0));
    }
}
