use super::helpers::{self, mesh_vertex_layout, WireMesh};
use folio_core::scene::BackgroundSurface;
use folio_core::SurfaceUniforms;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BackgroundUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) surface: SurfaceUniforms,
}

pub(crate) struct BackgroundPass {
    pipeline: wgpu::RenderPipeline,
    mesh: WireMesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl BackgroundPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        frame_bgl: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
        surface: &BackgroundSurface,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/background.wgsl").into()),
        });
        let bgl = helpers::uniform_layout(
            device,
            "background_bgl",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("background_pl"),
            bind_group_layouts: &[frame_bgl, &bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("background_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_background"),
                buffers: &[mesh_vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(helpers::depth_state(true)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_background"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let uniform_buffer = helpers::uniform_buffer::<BackgroundUniforms>(device, "background_u");
        let bind_group = helpers::uniform_bind_group(device, "background_bg", &bgl, &uniform_buffer);
        Self {
            pipeline,
            mesh: WireMesh::upload(device, "background_mesh", &surface.mesh),
            uniform_buffer,
            bind_group,
        }
    }

    pub(crate) fn write(
        &self,
        queue: &wgpu::Queue,
        surface: &BackgroundSurface,
        uniforms: SurfaceUniforms,
    ) {
        let u = BackgroundUniforms {
            model: surface.transform.matrix().to_cols_array_2d(),
            surface: uniforms,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>, frame_bg: &wgpu::BindGroup) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, frame_bg, &[]);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.mesh.index_count, 0, 0..1);
    }
}
