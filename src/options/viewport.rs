use serde::{Deserialize, Serialize};

/// Rendering surface limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportOptions {
    /// Upper bound on the device pixel ratio used for the surface.
    pub max_pixel_ratio: f32,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
        }
    }
}
