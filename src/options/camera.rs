use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and parallax parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Distance from the rig origin to the camera along +Z.
    pub distance: f32,
    /// World units of rig offset per unit of normalized cursor offset.
    pub parallax_amplitude: f32,
    /// Exponential easing rate of the rig toward its parallax target, per
    /// second.
    pub parallax_damping: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 100.0,
            distance: 3.0,
            parallax_amplitude: 0.5,
            parallax_damping: 3.0,
        }
    }
}
