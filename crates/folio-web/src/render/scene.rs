//! Lit wireframe meshes and the particle field, sharing one frame uniform
//! block with the background.

use super::helpers::{self, mesh_vertex_layout, WireMesh};
use folio_core::constants::TARGET_HALF_EXTENT;
use folio_core::game::GameTarget;
use folio_core::mesh;
use folio_core::scene::{Light, SceneGraph};
use glam::Mat4;
use wgpu::util::DeviceExt;

pub(crate) const FOG_COLOR: [f32; 3] = [0.0015, 0.0015, 0.0015]; // #050505
const FOG_NEAR: f32 = 10.0;
const FOG_FAR: f32 = 60.0;
const HERO_BASE_COLOR: [f32; 3] = [0.02, 0.02, 0.02];
const TARGET_COLOR: [f32; 3] = [0.0, 1.0, 0.053]; // #00ff41

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    eye: [f32; 4],
    fog_color: [f32; 4],
    fog_range: [f32; 4],
    ambient: [f32; 4],
    dir_pos: [f32; 4],
    dir_color: [f32; 4],
    point_pos: [[f32; 4]; 2],
    point_color: [[f32; 4]; 2],
}

impl FrameUniforms {
    pub(crate) fn from_scene(scene: &SceneGraph) -> Self {
        let cam = &scene.camera;
        let mut u = FrameUniforms {
            view_proj: cam.view_proj().to_cols_array_2d(),
            view: cam.view_matrix().to_cols_array_2d(),
            proj: cam.projection_matrix().to_cols_array_2d(),
            eye: cam.eye.extend(1.0).to_array(),
            fog_color: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], 1.0],
            fog_range: [FOG_NEAR, FOG_FAR, 0.0, 0.0],
            ..Default::default()
        };
        let mut points = 0;
        for light in &scene.lights {
            match *light {
                Light::Ambient { color, intensity } => {
                    u.ambient = [color[0], color[1], color[2], intensity];
                }
                Light::Directional {
                    position,
                    color,
                    intensity,
                } => {
                    u.dir_pos = position.extend(0.0).to_array();
                    u.dir_color = [color[0], color[1], color[2], intensity];
                }
                Light::Point {
                    position,
                    color,
                    intensity,
                    range,
                } if points < 2 => {
                    u.point_pos[points] = position.extend(range).to_array();
                    u.point_color[points] = [color[0], color[1], color[2], intensity];
                    points += 1;
                }
                Light::Point { .. } => {}
            }
        }
        u
    }
}

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    /// x = point size, y = 1 for lit materials
    params: [f32; 4],
}

struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ObjectSlot {
    fn new(device: &wgpu::Device, label: &str, layout: &wgpu::BindGroupLayout) -> Self {
        let buffer = helpers::uniform_buffer::<ObjectUniforms>(device, label);
        let bind_group = helpers::uniform_bind_group(device, label, layout, &buffer);
        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, u: &ObjectUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(u));
    }
}

/// Per-instance `vec4`: xyz offset, w uniform scale.
const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![3 => Float32x4];
const PARTICLE_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x4];

fn instance_layout(attributes: &'static [wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 4]>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes,
    }
}

pub(crate) struct ScenePass {
    pub(crate) frame_bgl: wgpu::BindGroupLayout,
    frame_buffer: wgpu::Buffer,
    pub(crate) frame_bg: wgpu::BindGroup,
    mesh_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,

    hero_mesh: WireMesh,
    hero: ObjectSlot,
    unit_instance: wgpu::Buffer,

    cube_mesh: WireMesh,
    targets: ObjectSlot,
    target_instances: wgpu::Buffer,
    target_capacity: usize,
    target_count: u32,

    particles: ObjectSlot,
    particle_instances: wgpu::Buffer,
    particle_count: u32,
}

impl ScenePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        scene: &SceneGraph,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/scene.wgsl").into()),
        });
        let visibility = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let frame_bgl = helpers::uniform_layout(device, "frame_bgl", visibility);
        let object_bgl = helpers::uniform_layout(device, "object_bgl", visibility);
        let frame_buffer = helpers::uniform_buffer::<FrameUniforms>(device, "frame_u");
        let frame_bg = helpers::uniform_bind_group(device, "frame_bg", &frame_bgl, &frame_buffer);
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&frame_bgl, &object_bgl],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_mesh"),
                buffers: &[mesh_vertex_layout(), instance_layout(&INSTANCE_ATTRIBUTES)],
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
                entry_point: Some("fs_mesh"),
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
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &[instance_layout(&PARTICLE_ATTRIBUTES)],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(helpers::depth_state(false)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let unit_instance = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("unit_instance"),
            contents: bytemuck::cast_slice(&[[0.0f32, 0.0, 0.0, 1.0]]),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let particle_data: Vec<[f32; 4]> = scene
            .particles
            .positions
            .iter()
            .map(|p| p.extend(1.0).to_array())
            .collect();
        let particle_instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle_instances"),
            contents: bytemuck::cast_slice(&particle_data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let target_capacity = 16;

        Self {
            hero_mesh: WireMesh::upload(device, "hero_mesh", &scene.hero.mesh),
            hero: ObjectSlot::new(device, "hero_u", &object_bgl),
            unit_instance,
            cube_mesh: WireMesh::upload(device, "cube_mesh", &mesh::cube(TARGET_HALF_EXTENT * 2.0)),
            targets: ObjectSlot::new(device, "targets_u", &object_bgl),
            target_instances: Self::target_buffer(device, target_capacity),
            target_capacity,
            target_count: 0,
            particles: ObjectSlot::new(device, "particles_u", &object_bgl),
            particle_instances,
            particle_count: particle_data.len() as u32,
            frame_bgl,
            frame_buffer,
            frame_bg,
            mesh_pipeline,
            particle_pipeline,
        }
    }

    fn target_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("target_instances"),
            size: (capacity * std::mem::size_of::<[f32; 4]>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload this frame's uniforms and target instances.
    pub(crate) fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &SceneGraph,
        targets: &[GameTarget],
    ) {
        queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::from_scene(scene)),
        );

        let hero = &scene.hero;
        let e = hero.emissive;
        self.hero.write(
            queue,
            &ObjectUniforms {
                model: hero.transform.matrix().to_cols_array_2d(),
                color: [HERO_BASE_COLOR[0], HERO_BASE_COLOR[1], HERO_BASE_COLOR[2], 1.0],
                emissive: [e[0], e[1], e[2], hero.emissive_intensity],
                params: [0.0, 1.0, 0.0, 0.0],
            },
        );

        let p = &scene.particles;
        self.particles.write(
            queue,
            &ObjectUniforms {
                model: p.transform.matrix().to_cols_array_2d(),
                color: [p.color[0], p.color[1], p.color[2], p.opacity],
                emissive: [0.0; 4],
                params: [p.size, 0.0, 0.0, 0.0],
            },
        );

        self.targets.write(
            queue,
            &ObjectUniforms {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                color: [TARGET_COLOR[0], TARGET_COLOR[1], TARGET_COLOR[2], 1.0],
                emissive: [0.0; 4],
                params: [0.0; 4],
            },
        );
        if targets.len() > self.target_capacity {
            self.target_capacity = targets.len().next_power_of_two();
            self.target_instances = Self::target_buffer(device, self.target_capacity);
            log::debug!("[render] target buffer grown to {}", self.target_capacity);
        }
        let instances: Vec<[f32; 4]> = targets
            .iter()
            .map(|t| t.position.extend(1.0).to_array())
            .collect();
        if !instances.is_empty() {
            queue.write_buffer(&self.target_instances, 0, bytemuck::cast_slice(&instances));
        }
        self.target_count = instances.len() as u32;
    }

    pub(crate) fn draw_hero(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.mesh_pipeline);
        pass.set_bind_group(0, &self.frame_bg, &[]);
        pass.set_bind_group(1, &self.hero.bind_group, &[]);
        pass.set_vertex_buffer(0, self.hero_mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.unit_instance.slice(..));
        pass.set_index_buffer(self.hero_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.hero_mesh.index_count, 0, 0..1);
    }

    pub(crate) fn draw_particles(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.particle_count == 0 {
            return;
        }
        pass.set_pipeline(&self.particle_pipeline);
        pass.set_bind_group(0, &self.frame_bg, &[]);
        pass.set_bind_group(1, &self.particles.bind_group, &[]);
        pass.set_vertex_buffer(0, self.particle_instances.slice(..));
        pass.draw(0..6, 0..self.particle_count);
    }

    pub(crate) fn draw_targets(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.target_count == 0 {
            return;
        }
        pass.set_pipeline(&self.mesh_pipeline);
        pass.set_bind_group(0, &self.frame_bg, &[]);
        pass.set_bind_group(1, &self.targets.bind_group, &[]);
        pass.set_vertex_buffer(0, self.cube_mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.target_instances.slice(..));
        pass.set_index_buffer(self.cube_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.cube_mesh.index_count, 0, 0..self.target_count);
    }
}
