use glam::{Mat4, Vec3};

/// Perspective camera looking down its local -Z axis.
///
/// The camera never rotates; its eye position comes from the
/// [`CameraRig`](super::rig::CameraRig) that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and the billboard
/// basis.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera right vector, used to expand particle quads.
    pub right: [f32; 3],
    /// `tan(fovy / 2)`, scales particle quads to match point sprites.
    pub tan_half_fovy: f32,
    /// Camera up vector, used to expand particle quads.
    pub up: [f32; 3],
    pub(crate) _pad1: f32,
}

impl Camera {
    /// World-to-view matrix for a camera at `eye`.
    #[must_use]
    pub fn build_view(&self, eye: Vec3) -> Mat4 {
        Mat4::look_to_rh(eye, Vec3::NEG_Z, Vec3::Y)
    }

    /// Projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self, eye: Vec3) -> Mat4 {
        self.build_projection() * self.build_view(eye)
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            right: Vec3::X.to_array(),
            tan_half_fovy: 1.0,
            up: Vec3::Y.to_array(),
            _pad1: 0.0,
        }
    }

    /// Update uniform fields from the camera and its eye position.
    pub fn update_view_proj(&mut self, camera: &Camera, eye: Vec3) {
        self.view_proj = camera.build_matrix(eye).to_cols_array_2d();
        self.position = eye.to_array();
        self.aspect = camera.aspect;
        self.tan_half_fovy = (camera.fovy.to_radians() * 0.5).tan();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4Swizzles;

    use super::*;

    fn camera() -> Camera {
        Camera {
            aspect: 1000.0 / 800.0,
            fovy: 75.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn point_ahead_projects_to_center() {
        let eye = Vec3::new(0.5, -4.0, 3.0);
        let clip = camera().build_matrix(eye) * (eye + Vec3::NEG_Z * 3.0).extend(1.0);
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn point_behind_is_clipped() {
        let eye = Vec3::new(0.0, 0.0, 3.0);
        let clip = camera().build_matrix(eye) * Vec3::new(0.0, 0.0, 5.0).extend(1.0);
        assert!(clip.w < 0.0);
    }

    #[test]
    fn uniform_tracks_eye_and_aspect() {
        let mut uniform = CameraUniform::new();
        let eye = Vec3::new(1.0, 2.0, 3.0);
        uniform.update_view_proj(&camera(), eye);
        assert_eq!(uniform.position, [1.0, 2.0, 3.0]);
        assert_eq!(uniform.aspect, 1.25);
        assert!((uniform.tan_half_fovy - 0.767_327).abs() < 1e-5);
        assert_eq!(size_of::<CameraUniform>(), 112);
    }

    #[test]
    fn scaled_quad_matches_point_sprite_size() {
        // A particle of size 0.03 three units ahead covers
        // size * (height / 2) / depth = 4 px, so its half width is 2 px.
        let (width, height, size, depth) = (1000.0, 800.0, 0.03, 3.0);
        let cam = camera();
        let mut uniform = CameraUniform::new();
        let eye = Vec3::new(0.0, 0.0, 3.0);
        uniform.update_view_proj(&cam, eye);

        let center = eye + Vec3::NEG_Z * depth;
        let edge = center + Vec3::X * (size * 0.5 * uniform.tan_half_fovy);
        let m = cam.build_matrix(eye);
        let ndc = |p: Vec3| {
            let clip = m * p.extend(1.0);
            clip.x / clip.w
        };
        let half_px = (ndc(edge) - ndc(center)) * width * 0.5;
        let expected = size * (height * 0.5) / depth * 0.5;
        assert!((half_px - expected).abs() < 1e-4, "{half_px} vs {expected}");
    }
}
