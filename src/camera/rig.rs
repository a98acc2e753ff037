//! Camera group with eased parallax and scroll placement.

use glam::{Mat4, Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// A camera parented to a movable group.
///
/// The group position carries the eased parallax offset. The camera's
/// local offset carries the scroll placement on Y and the fixed viewing
/// distance on Z. The eye is their sum; neither node rotates.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    /// Projection parameters.
    pub camera: Camera,
    group: Vec3,
    local: Vec3,
    parallax_amplitude: f32,
    parallax_damping: f32,
}

impl CameraRig {
    /// A rig at rest: group at the origin, camera `distance` units back.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            camera: Camera {
                aspect: 1.0,
                fovy: options.fovy,
                znear: options.znear,
                zfar: options.zfar,
            },
            group: Vec3::ZERO,
            local: Vec3::new(0.0, 0.0, options.distance),
            parallax_amplitude: options.parallax_amplitude,
            parallax_damping: options.parallax_damping,
        }
    }

    /// Set the projection aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Place the camera for a page scroll of `scroll_y` pixels: one viewport
    /// height of scroll moves down one section.
    pub fn place_for_scroll(
        &mut self,
        scroll_y: f32,
        viewport_height: f32,
        section_spacing: f32,
    ) {
        if viewport_height > 0.0 {
            self.local.y = -scroll_y / viewport_height * section_spacing;
        }
    }

    /// Parallax target for a normalized cursor. Screen Y grows downward, so
    /// it is flipped.
    #[must_use]
    pub fn parallax_target(&self, cursor: Vec2) -> Vec2 {
        Vec2::new(cursor.x, -cursor.y) * self.parallax_amplitude
    }

    /// Move the group a `damping * delta` fraction of the way toward
    /// `target` (frame-rate independent exponential smoothing).
    pub fn ease_toward(&mut self, target: Vec2, delta: f32) {
        let step = self.parallax_damping * delta;
        self.group.x += (target.x - self.group.x) * step;
        self.group.y += (target.y - self.group.y) * step;
    }

    /// Group position (the parallax offset).
    #[must_use]
    pub fn group(&self) -> Vec3 {
        self.group
    }

    /// Camera position relative to the group.
    #[must_use]
    pub fn local(&self) -> Vec3 {
        self.local
    }

    /// Camera world position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.group + self.local
    }

    /// Combined view-projection matrix for the current eye.
    #[must_use]
    pub fn view_proj(&self) -> Mat4 {
        self.camera.build_matrix(self.eye())
    }
}
