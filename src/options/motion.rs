use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// Idle spin and section-trigger rotation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionOptions {
    /// Continuous spin of every section mesh around X and Y, rad/s.
    pub idle_spin: [f32; 2],
    /// Length of the rotation played when a section becomes active, seconds.
    pub trigger_duration: f32,
    /// Rotation added by one trigger around X, Y, Z, radians.
    pub trigger_rotation: [f32; 3],
    /// Easing of the trigger rotation.
    pub trigger_easing: EasingFunction,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            idle_spin: [0.1, 0.2],
            trigger_duration: 1.5,
            trigger_rotation: [6.0, 6.0, 1.5],
            trigger_easing: EasingFunction::QuadraticInOut,
        }
    }
}
