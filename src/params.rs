//! The panel-editable parameter record.
//!
//! A [`ParameterStore`] owns the live material color. Changes go through
//! [`ParameterStore::set_material_color`], which notifies every observer
//! handed to it, so the section material and the particle material always
//! agree with the store.

use crate::util::color::Color;

/// Receives parameter changes.
pub trait ParameterObserver {
    /// The material color changed to `color`.
    fn material_color_changed(&mut self, color: Color);
}

/// Live, mutable scene parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    material_color: Color,
}

impl ParameterStore {
    /// A store seeded with the initial material color.
    #[must_use]
    pub fn new(material_color: Color) -> Self {
        Self { material_color }
    }

    /// The current material color.
    #[must_use]
    pub fn material_color(&self) -> Color {
        self.material_color
    }

    /// Set the material color and notify `observers` in order.
    ///
    /// Observers are notified even when the color is unchanged, mirroring
    /// a color picker that re-emits its current value. Returns whether the
    /// stored value differs from before.
    pub fn set_material_color(
        &mut self,
        color: Color,
        observers: &mut [&mut dyn ParameterObserver],
    ) -> bool {
        let changed = self.material_color != color;
        self.material_color = color;
        for observer in observers.iter_mut() {
            observer.material_color_changed(color);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<Color>);

    impl ParameterObserver for Recorder {
        fn material_color_changed(&mut self, color: Color) {
            self.0.push(color);
        }
    }

    #[test]
    fn notifies_every_observer() {
        let red = Color::from_rgb8(255, 0, 0);
        let blue = Color::from_rgb8(0, 0, 255);
        let mut store = ParameterStore::new(red);
        let mut a = Recorder::default();
        let mut b = Recorder::default();

        assert!(store.set_material_color(blue, &mut [&mut a, &mut b]));
        assert_eq!(store.material_color(), blue);
        assert_eq!(a.0, vec![blue]);
        assert_eq!(b.0, vec![blue]);
    }

    #[test]
    fn same_color_still_notifies_but_reports_unchanged() {
        let red = Color::from_rgb8(255, 0, 0);
        let mut store = ParameterStore::new(red);
        let mut a = Recorder::default();
        assert!(!store.set_material_color(red, &mut [&mut a]));
        assert_eq!(a.0.len(), 1);
    }
}
