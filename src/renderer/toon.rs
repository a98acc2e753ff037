//! Toon-shaded section meshes.

use glam::{Mat3, Mat4};
use wgpu::util::DeviceExt;

use super::gradient::GradientMap;
use super::pipeline_util;
use crate::error::SceneError;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::scene::{MeshVertex, Scene, SectionMesh};

/// Material color as seen by the mesh shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniform {
    color: [f32; 4],
}

/// Per-mesh transforms.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
}

impl ModelUniform {
    fn from_mesh(mesh: &SectionMesh) -> Self {
        let model = mesh.model_matrix();
        let normal = Mat3::from_mat4(model).inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal: Mat4::from_mat3(normal).to_cols_array_2d(),
        }
    }
}

/// GPU buffers of one section mesh.
struct SectionBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
}

/// Draws every section mesh with the shared toon material.
///
/// Bind groups: 0 camera, 1 light, 2 material (color + gradient map),
/// 3 per-mesh transforms.
pub struct ToonRenderer {
    pipeline: wgpu::RenderPipeline,
    sections: Vec<SectionBuffers>,
    material: MaterialUniform,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
    _gradient_texture: wgpu::Texture,
}

const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> =
    wgpu::VertexBufferLayout {
        array_stride: size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };

impl ToonRenderer {
    /// Tessellate the scene's section shapes and build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Shader`] if the mesh shader fails to compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        light_layout: &wgpu::BindGroupLayout,
        scene: &Scene,
        gradient: &GradientMap,
    ) -> Result<Self, SceneError> {
        let device = &context.device;

        // Material: color + gradient ramp.
        let material = material_uniform(context, scene);
        let material_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Toon Material Buffer"),
                contents: bytemuck::cast_slice(&[material]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let (gradient_texture, gradient_view, gradient_sampler) =
            gradient.upload(device, &context.queue);
        let material_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Toon Material Layout"),
                entries: &[
                    pipeline_helpers::uniform_buffer(
                        0,
                        wgpu::ShaderStages::FRAGMENT,
                    ),
                    pipeline_helpers::texture_2d_unfilterable(1),
                    pipeline_helpers::non_filtering_sampler(2),
                ],
            });
        let material_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Toon Material Bind Group"),
                layout: &material_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: material_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &gradient_view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(
                            &gradient_sampler,
                        ),
                    },
                ],
            });

        // Per-mesh geometry and transforms.
        let model_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Toon Model Layout"),
                entries: &[pipeline_helpers::uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX,
                )],
            });
        let sections = scene
            .sections
            .iter()
            .map(|mesh| {
                let data = mesh.shape.build();
                let name = mesh.shape.name();
                let vertex_buffer = device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("{name} Vertices")),
                        contents: bytemuck::cast_slice(&data.vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    },
                );
                let index_buffer = device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("{name} Indices")),
                        contents: bytemuck::cast_slice(&data.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    },
                );
                let model_buffer = device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("{name} Model")),
                        contents: bytemuck::cast_slice(&[
                            ModelUniform::from_mesh(mesh),
                        ]),
                        usage: wgpu::BufferUsages::UNIFORM
                            | wgpu::BufferUsages::COPY_DST,
                    },
                );
                let model_bind_group =
                    device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some(&format!("{name} Model Bind Group")),
                        layout: &model_layout,
                        entries: &[wgpu::BindGroupEntry {
                            binding: 0,
                            resource: model_buffer.as_entire_binding(),
                        }],
                    });
                log::debug!(
                    "{name}: {} vertices, {} indices",
                    data.vertices.len(),
                    data.indices.len()
                );
                SectionBuffers {
                    vertex_buffer,
                    index_buffer,
                    index_count: data.indices.len() as u32,
                    model_buffer,
                    model_bind_group,
                }
            })
            .collect();

        let shader = composer.compose(
            device,
            "Toon Mesh Shader",
            include_str!("../../assets/shaders/raster/toon_mesh.wgsl"),
            "toon_mesh.wgsl",
        )?;
        let pipeline = pipeline_util::create_scene_pipeline(
            context,
            "Toon Mesh Pipeline",
            &shader,
            Some(wgpu::Face::Back),
            &[camera_layout, light_layout, &material_layout, &model_layout],
            &[VERTEX_LAYOUT],
        );

        Ok(Self {
            pipeline,
            sections,
            material,
            material_buffer,
            material_bind_group,
            _gradient_texture: gradient_texture,
        })
    }

    /// Upload this frame's mesh transforms and the material color.
    pub fn prepare(&mut self, context: &RenderContext, scene: &Scene) {
        for (buffers, mesh) in self.sections.iter().zip(&scene.sections) {
            context.queue.write_buffer(
                &buffers.model_buffer,
                0,
                bytemuck::cast_slice(&[ModelUniform::from_mesh(mesh)]),
            );
        }
        let material = material_uniform(context, scene);
        if material != self.material {
            self.material = material;
            context.queue.write_buffer(
                &self.material_buffer,
                0,
                bytemuck::cast_slice(&[material]),
            );
        }
    }

    /// Record draws for every section mesh.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        light_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, light_bind_group, &[]);
        render_pass.set_bind_group(2, &self.material_bind_group, &[]);
        for section in &self.sections {
            if section.index_count == 0 {
                continue;
            }
            render_pass.set_bind_group(3, &section.model_bind_group, &[]);
            render_pass.set_vertex_buffer(0, section.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                section.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            render_pass.draw_indexed(0..section.index_count, 0, 0..1);
        }
    }
}

fn material_uniform(context: &RenderContext, scene: &Scene) -> MaterialUniform {
    let [r, g, b] = scene
        .section_material
        .color
        .for_target(context.srgb_target());
    MaterialUniform {
        color: [r, g, b, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;
    use crate::scene::SectionShape;

    #[test]
    fn normal_matrix_is_rotation_for_rigid_meshes() {
        let mesh = SectionMesh {
            shape: SectionShape::LANDING[1],
            position: Vec3::new(-2.0, -4.0, 0.0),
            rotation: Vec3::new(0.3, 1.1, -0.4),
        };
        let uniform = ModelUniform::from_mesh(&mesh);
        let model = Mat4::from_cols_array_2d(&uniform.model);
        let normal = Mat4::from_cols_array_2d(&uniform.normal);
        let n = Vec3::new(0.0, 1.0, 0.0);
        let a = model.transform_vector3(n);
        let b = normal.transform_vector3(n);
        assert!(a.abs_diff_eq(b, 1e-5));
        assert_eq!(normal.w_axis, Vec4::W);
    }

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(size_of::<MaterialUniform>(), 16);
        assert_eq!(size_of::<ModelUniform>(), 128);
        assert_eq!(size_of::<MeshVertex>(), 24);
    }
}
