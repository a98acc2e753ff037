use wgpu::util::DeviceExt;

use super::core::CameraUniform;
use super::rig::CameraRig;
use crate::gpu::render_context::RenderContext;

/// Owns the camera uniform buffer and its bind group.
pub struct CameraController {
    /// CPU copy of the last uploaded uniform.
    pub uniform: CameraUniform,
    /// Uniform buffer bound at group 0.
    pub buffer: wgpu::Buffer,
    /// Layout of the camera bind group.
    pub layout: wgpu::BindGroupLayout,
    /// Camera bind group.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create the GPU resources, initialized from `rig`.
    #[must_use]
    pub fn new(context: &RenderContext, rig: &CameraRig) -> Self {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&rig.camera, rig.eye());

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload the rig's current view to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue, rig: &CameraRig) {
        self.uniform.update_view_proj(&rig.camera, rig.eye());
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}
