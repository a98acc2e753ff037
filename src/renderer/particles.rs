//! Instanced billboard particles.

use wgpu::util::DeviceExt;

use super::pipeline_util;
use crate::error::SceneError;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::scene::{PointsMaterial, Scene};

/// Point material as seen by the particle shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct PointsUniform {
    color: [f32; 4],
    /// x: world size, y: size attenuation flag.
    params: [f32; 4],
}

impl PointsUniform {
    fn new(material: &PointsMaterial, srgb_target: bool) -> Self {
        let [r, g, b] = material.color.for_target(srgb_target);
        Self {
            color: [r, g, b, 1.0],
            params: [
                material.size,
                if material.size_attenuation { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}

/// Draws the particle cloud as one instanced draw of camera-facing quads.
pub struct ParticleRenderer {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uniform: PointsUniform,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ParticleRenderer {
    /// Upload the particle positions and build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Shader`] if the particle shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        scene: &Scene,
    ) -> Result<Self, SceneError> {
        let device = &context.device;
        let centers: Vec<[f32; 3]> = scene
            .particles
            .positions()
            .iter()
            .map(|p| p.to_array())
            .collect();
        // wgpu rejects zero-sized buffers; keep one dummy instance slot.
        let contents: &[[f32; 3]] = if centers.is_empty() {
            &[[0.0; 3]]
        } else {
            &centers
        };
        let instance_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Particle Instances"),
                contents: bytemuck::cast_slice(contents),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let uniform =
            PointsUniform::new(&scene.particle_material, context.srgb_target());
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Particle Material Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let (layout, bind_group) = pipeline_helpers::uniform_bind_group(
            device,
            "Particle Material Bind Group",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            &uniform_buffer,
        );

        let shader = composer.compose(
            device,
            "Particle Shader",
            include_str!("../../assets/shaders/raster/particles.wgsl"),
            "particles.wgsl",
        )?;
        let pipeline = pipeline_util::create_scene_pipeline(
            context,
            "Particle Pipeline",
            &shader,
            None,
            &[camera_layout, &layout],
            &[wgpu::VertexBufferLayout {
                array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
            }],
        );

        Ok(Self {
            pipeline,
            instance_buffer,
            instance_count: centers.len() as u32,
            uniform,
            uniform_buffer,
            bind_group,
        })
    }

    /// Upload the material if its color changed.
    pub fn prepare(&mut self, context: &RenderContext, scene: &Scene) {
        let uniform =
            PointsUniform::new(&scene.particle_material, context.srgb_target());
        if uniform != self.uniform {
            self.uniform = uniform;
            context.queue.write_buffer(
                &self.uniform_buffer,
                0,
                bytemuck::cast_slice(&[uniform]),
            );
        }
    }

    /// Record the instanced draw.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        render_pass.draw(0..6, 0..self.instance_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::color::Color;

    #[test]
    fn uniform_packs_size_and_attenuation() {
        let material = PointsMaterial {
            color: Color::rgb(1.0, 0.0, 0.5),
            size: 0.03,
            size_attenuation: true,
        };
        let uniform = PointsUniform::new(&material, false);
        assert_eq!(uniform.color, [1.0, 0.0, 0.5, 1.0]);
        assert_eq!(uniform.params[..2], [0.03, 1.0]);
        assert_eq!(size_of::<PointsUniform>(), 32);
    }
}
