use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::Color;

/// Material parameters shared by the section meshes and the particles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Material", inline)]
#[serde(default)]
pub struct MaterialOptions {
    /// Initial color of both materials, as `#rrggbb`.
    #[schemars(title = "Material Color", with = "String", extend("format" = "color"))]
    pub color: Color,
    /// World-space particle size before perspective attenuation.
    #[schemars(skip)]
    pub particle_size: f32,
    /// PNG whose first row is the toon gradient lookup. When unset a
    /// stepped ramp with `gradient_steps` tones is generated.
    #[schemars(skip)]
    pub gradient_map: Option<PathBuf>,
    /// Number of tones in the generated gradient.
    #[schemars(skip)]
    pub gradient_steps: u32,
}

impl Default for MaterialOptions {
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(0xfc, 0x6d, 0x6d),
            particle_size: 0.03,
            gradient_map: None,
            gradient_steps: 3,
        }
    }
}
