//! Scene graph: the section meshes, their shared materials, the particle
//! cloud, the light and the camera rig.
//!
//! The scene is pure CPU state. Renderers read it each frame; the frame
//! step and the section animator write the mesh rotations and the rig.

/// Parametric solids for the section meshes.
pub mod geometry;
/// Ambient particle cloud.
pub mod particles;

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use geometry::{MeshData, MeshVertex, SectionShape};
pub use particles::ParticleCloud;

use crate::camera::rig::CameraRig;
use crate::options::Options;
use crate::params::ParameterObserver;
use crate::util::color::Color;

// ---------------------------------------------------------------------------
// Section meshes
// ---------------------------------------------------------------------------

/// One mesh per scroll section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionMesh {
    /// Solid drawn for this section.
    pub shape: SectionShape,
    /// World position (fixed after construction).
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
}

impl SectionMesh {
    /// Object-to-world transform.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

// ---------------------------------------------------------------------------
// Materials and light
// ---------------------------------------------------------------------------

/// Toon material shared by every section mesh.
///
/// The gradient lookup lives on the GPU (see
/// [`crate::renderer::gradient::GradientMap`]); only the color is scene
/// state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToonMaterial {
    /// Base color (sRGB).
    pub color: Color,
}

impl ParameterObserver for ToonMaterial {
    fn material_color_changed(&mut self, color: Color) {
        self.color = color;
    }
}

/// Material of the particle cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsMaterial {
    /// Particle color (sRGB).
    pub color: Color,
    /// World-space point size.
    pub size: f32,
    /// Shrink points with distance from the camera.
    pub size_attenuation: bool,
}

impl ParameterObserver for PointsMaterial {
    fn material_color_changed(&mut self, color: Color) {
        self.color = color;
    }
}

/// Directional light aimed at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Light color (sRGB).
    pub color: Color,
    /// Scalar intensity.
    pub intensity: f32,
    /// Light position; the light shines from here toward the origin.
    pub position: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::new(1.0, 1.0, 0.0),
        }
    }
}

impl DirectionalLight {
    /// Unit vector from a lit surface toward the light.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or(Vec3::Y)
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The whole landing scene.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Section meshes, index = scroll section.
    pub sections: Vec<SectionMesh>,
    /// Material shared by all section meshes.
    pub section_material: ToonMaterial,
    /// Ambient particles.
    pub particles: ParticleCloud,
    /// Material of the particles.
    pub particle_material: PointsMaterial,
    /// The single light.
    pub light: DirectionalLight,
    /// Camera group and camera.
    pub rig: CameraRig,
    section_spacing: f32,
}

impl Scene {
    /// Build the scene from options, seeding the particle RNG from
    /// `scene.seed` or from the OS when unset.
    #[must_use]
    pub fn build(options: &Options, color: Color) -> Self {
        let mut rng = match options.scene.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::build_with_rng(options, color, &mut rng)
    }

    /// Build the scene with an explicit RNG for the particle layout.
    pub fn build_with_rng<R: Rng + ?Sized>(
        options: &Options,
        color: Color,
        rng: &mut R,
    ) -> Self {
        let layout = &options.scene;
        let spacing = layout.section_spacing;

        let sections: Vec<SectionMesh> = SectionShape::LANDING
            .iter()
            .enumerate()
            .map(|(i, &shape)| {
                let side = if i % 2 == 0 { 1.0 } else { -1.0 };
                SectionMesh {
                    shape,
                    position: Vec3::new(
                        side * layout.section_offset_x,
                        -spacing * i as f32,
                        0.0,
                    ),
                    rotation: Vec3::ZERO,
                }
            })
            .collect();

        let particles = ParticleCloud::scatter(
            layout.particle_count,
            layout.particle_spread,
            spacing,
            sections.len(),
            rng,
        );

        log::debug!(
            "scene built: {} sections, {} particles",
            sections.len(),
            particles.len()
        );

        Self {
            sections,
            section_material: ToonMaterial { color },
            particles,
            particle_material: PointsMaterial {
                color,
                size: options.material.particle_size,
                size_attenuation: true,
            },
            light: DirectionalLight::default(),
            rig: CameraRig::new(&options.camera),
            section_spacing: spacing,
        }
    }

    /// Number of scroll sections.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Vertical distance between consecutive sections.
    #[must_use]
    pub fn section_spacing(&self) -> f32 {
        self.section_spacing
    }

    /// Both materials as parameter observers, sections first.
    pub fn material_observers(&mut self) -> [&mut dyn ParameterObserver; 2] {
        [&mut self.section_material, &mut self.particle_material]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterStore;

    fn scene() -> Scene {
        let options = Options::default();
        let mut rng = StdRng::seed_from_u64(3);
        Scene::build_with_rng(&options, options.material.color, &mut rng)
    }

    #[test]
    fn sections_alternate_sides_down_the_column() {
        let scene = scene();
        let positions: Vec<Vec3> =
            scene.sections.iter().map(|s| s.position).collect();
        assert_eq!(
            positions,
            vec![
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(-2.0, -4.0, 0.0),
                Vec3::new(2.0, -8.0, 0.0),
            ]
        );
        assert_eq!(scene.section_count(), 3);
        assert!(scene.sections.iter().all(|s| s.rotation == Vec3::ZERO));
    }

    #[test]
    fn default_light_and_particles() {
        let scene = scene();
        assert_eq!(scene.light.color, Color::WHITE);
        assert_eq!(scene.light.intensity, 1.0);
        assert_eq!(scene.light.position, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(scene.particles.len(), 200);
        assert_eq!(scene.particle_material.size, 0.03);
        assert!(scene.particle_material.size_attenuation);
    }

    #[test]
    fn color_change_reaches_both_materials() {
        let mut scene = scene();
        let mut store = ParameterStore::new(scene.section_material.color);
        let teal = Color::from_rgb8(0, 128, 128);
        let _ = store.set_material_color(teal, &mut scene.material_observers());
        assert_eq!(scene.section_material.color, teal);
        assert_eq!(scene.particle_material.color, teal);
    }

    #[test]
    fn model_matrix_uses_xyz_euler_order() {
        use std::f32::consts::FRAC_PI_2;
        let mesh = SectionMesh {
            shape: SectionShape::LANDING[0],
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0),
        };
        let m = mesh.model_matrix();
        assert!(m.w_axis.truncate().abs_diff_eq(mesh.position, 1e-6));
        // Rx * Ry: Y stays under Ry, then X turns it into Z.
        assert!(m.transform_vector3(Vec3::Y).abs_diff_eq(Vec3::Z, 1e-5));
        // X goes to -Z under Ry, then to +Y under Rx.
        assert!(m.transform_vector3(Vec3::X).abs_diff_eq(Vec3::Y, 1e-5));
    }
}
