//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, the light uniform, depth
//! and lookup textures, and shader composition.

/// Directional light uniform and bind group.
pub mod lighting;
/// Shared wgpu boilerplate for bind group layouts.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth target and lookup textures.
pub mod texture;
