//! Rendering subsystems for the scroll scene.
//!
//! Contains the toon mesh renderer, the particle renderer and the gradient
//! ramp they share the surface with.

/// Toon gradient ramp loading and generation.
pub mod gradient;
/// Instanced billboard particles.
pub mod particles;
pub(crate) mod pipeline_util;
/// Toon-shaded section meshes.
pub mod toon;

pub use gradient::GradientMap;
pub use particles::ParticleRenderer;
pub use toon::ToonRenderer;
