use wgpu::util::DeviceExt;

use phongcube_mesh::{Mesh, Vertex};

use crate::render::scene::SceneUniforms;
use crate::render::{RenderCtx, RenderTarget};

/// Where lighting is evaluated.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ShadingModel {
    /// Per fragment: ambient + diffuse + specular.
    #[default]
    Phong,
    /// Per vertex: ambient + diffuse, interpolated.
    Gouraud,
}

impl ShadingModel {
    fn entry_points(self) -> (&'static str, &'static str) {
        match self {
            ShadingModel::Phong => ("vs_phong", "fs_phong"),
            ShadingModel::Gouraud => ("vs_gouraud", "fs_gouraud"),
        }
    }
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x3, // normal
    2 => Float32x3  // color
];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

/// Draws one indexed mesh with a single light.
///
/// The mesh is uploaded on the first frame and never rewritten; only the
/// uniform block changes per frame. GPU objects are created lazily because
/// the device only exists once the window is up.
pub struct MeshRenderer {
    mesh: Mesh,
    shading: ShadingModel,

    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_buffer: Option<wgpu::Buffer>,
    cached_uniforms: Option<SceneUniforms>,

    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
}

impl MeshRenderer {
    pub fn new(mesh: Mesh, shading: ShadingModel) -> Self {
        Self {
            mesh,
            shading,
            pipeline_formats: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            uniform_buffer: None,
            cached_uniforms: None,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn shading(&self) -> ShadingModel {
        self.shading
    }

    /// Draws the mesh into `target` with depth testing.
    ///
    /// The target is expected to be cleared already; this pass loads both
    /// attachments.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, uniforms: &SceneUniforms) {
        if self.mesh.index_count() == 0 {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_mesh_buffers(ctx);
        self.write_uniforms(ctx, uniforms);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vbo) = self.vertex_buffer.as_ref() else { return };
        let Some(ibo) = self.index_buffer.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("phongcube mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.mesh.index_count() as u32, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("phongcube mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("phongcube scene bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<SceneUniforms>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("phongcube mesh pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let (vs_entry, fs_entry) = self.shading.entry_points();

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("phongcube mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(vs_entry),
                compilation_options: Default::default(),
                buffers: &[vertex_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(fs_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Face winding is not consistent across the cube; draw both sides.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::debug!("mesh pipeline built ({:?}, {formats:?})", self.shading);

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.uniform_buffer = None;
        self.cached_uniforms = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_buffer.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("phongcube scene ubo"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("phongcube scene bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        self.uniform_buffer = Some(uniform_buffer);
        self.bind_group = Some(bind_group);
    }

    fn ensure_mesh_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.vertex_buffer.is_some() && self.index_buffer.is_some() {
            return;
        }

        self.vertex_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("phongcube mesh vbo"),
            contents: bytemuck::cast_slice(self.mesh.as_floats()),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.index_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("phongcube mesh ibo"),
            contents: bytemuck::cast_slice(self.mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        }));

        log::info!(
            "uploaded mesh: {} vertices, {} indices",
            self.mesh.vertex_count(),
            self.mesh.index_count()
        );
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>, uniforms: &SceneUniforms) {
        if self.cached_uniforms.as_ref() == Some(uniforms) {
            return;
        }
        let Some(ubo) = self.uniform_buffer.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(uniforms));
        self.cached_uniforms = Some(*uniforms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_record() {
        let layout = vertex_layout();
        assert_eq!(layout.array_stride, 36);
        let offsets: Vec<_> = layout.attributes.iter().map(|a| (a.shader_location, a.offset)).collect();
        assert_eq!(offsets, vec![(0, 0), (1, 12), (2, 24)]);
    }

    #[test]
    fn shading_selects_entry_points() {
        assert_eq!(ShadingModel::Phong.entry_points(), ("vs_phong", "fs_phong"));
        assert_eq!(ShadingModel::Gouraud.entry_points(), ("vs_gouraud", "fs_gouraud"));
    }

    #[test]
    fn shader_declares_entry_points() {
        let src = include_str!("shaders/mesh.wgsl");
        for entry in ["vs_phong", "fs_phong", "vs_gouraud", "fs_gouraud"] {
            assert!(src.contains(&format!("fn {entry}(")), "{entry}");
        }
    }

    #[test]
    fn renderer_keeps_mesh_until_first_frame() {
        let r = MeshRenderer::new(phongcube_mesh::unit_cube(), ShadingModel::Gouraud);
        assert_eq!(r.mesh().index_count(), 36);
        assert_eq!(r.shading(), ShadingModel::Gouraud);
        assert!(r.vertex_buffer.is_none());
    }
}
