use serde::{Deserialize, Serialize};

/// Section layout and particle cloud parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Vertical distance between consecutive section meshes.
    pub section_spacing: f32,
    /// Horizontal offset of the meshes; the sign alternates per section.
    pub section_offset_x: f32,
    /// Number of ambient particles.
    pub particle_count: usize,
    /// Width and depth of the particle box.
    pub particle_spread: f32,
    /// Fixed RNG seed for the particle layout (random when unset).
    pub seed: Option<u64>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            section_spacing: 4.0,
            section_offset_x: 2.0,
            particle_count: 200,
            particle_spread: 10.0,
            seed: None,
        }
    }
}
