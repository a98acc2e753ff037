//! Directional light uniform and bind group.

use wgpu::util::DeviceExt;

use super::pipeline_helpers;
use super::render_context::RenderContext;
use crate::scene::DirectionalLight;

/// Light configuration as seen by the shaders.
/// NOTE: Must match the WGSL `LightUniform` layout exactly (32 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// Unit vector from the surface toward the light.
    pub direction: [f32; 3],
    /// Scalar intensity (already folded into `color`).
    pub intensity: f32,
    /// Linear light color times intensity.
    pub color: [f32; 3],
    pub(crate) _pad: f32,
}

impl LightUniform {
    /// Uniform for a scene light drawn to an sRGB (`srgb_target`) or
    /// unorm surface.
    #[must_use]
    pub fn from_light(light: &DirectionalLight, srgb_target: bool) -> Self {
        let color = light.color.for_target(srgb_target).map(|c| c * light.intensity);
        Self {
            direction: light.direction().to_array(),
            intensity: light.intensity,
            color,
            _pad: 0.0,
        }
    }
}

/// GPU resources for the scene light (bind group 1 of the mesh pipeline).
pub struct Lighting {
    /// CPU copy of the uniform.
    pub uniform: LightUniform,
    /// Uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Layout of the light bind group.
    pub layout: wgpu::BindGroupLayout,
    /// Light bind group.
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Create the light buffer and bind group.
    #[must_use]
    pub fn new(context: &RenderContext, light: &DirectionalLight) -> Self {
        let uniform = LightUniform::from_light(light, context.srgb_target());
        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Light Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );
        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Light Bind Group Layout"),
                entries: &[pipeline_helpers::uniform_buffer(
                    0,
                    wgpu::ShaderStages::FRAGMENT,
                )],
            },
        );
        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Light Bind Group"),
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Re-upload if the light changed.
    pub fn update_gpu(&mut self, context: &RenderContext, light: &DirectionalLight) {
        let uniform = LightUniform::from_light(light, context.srgb_target());
        if uniform != self.uniform {
            self.uniform = uniform;
            context.queue.write_buffer(
                &self.buffer,
                0,
                bytemuck::cast_slice(&[self.uniform]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light_points_up_and_right() {
        let uniform = LightUniform::from_light(&DirectionalLight::default(), true);
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert!((uniform.direction[0] - h).abs() < 1e-6);
        assert!((uniform.direction[1] - h).abs() < 1e-6);
        assert_eq!(uniform.direction[2], 0.0);
        assert_eq!(uniform.color, [1.0, 1.0, 1.0]);
        assert_eq!(size_of::<LightUniform>(), 32);
    }
}
