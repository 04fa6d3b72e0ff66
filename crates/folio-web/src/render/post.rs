//! Bloom and liquid-distortion post chain.
//!
//! scene -> hdr; bright(hdr) -> bloom_a; blur_h(bloom_a) -> bloom_b;
//! blur_v(bloom_b) -> bloom_a; composite(hdr, bloom_a) -> swapchain.

use super::helpers;
use super::targets::{RenderTargets, HDR_FORMAT};
use folio_core::constants::{BLOOM_STRENGTH, BLOOM_THRESHOLD, LIQUID_STRENGTH};
use folio_core::FrameState;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) glitch: f32,
    pub(crate) pointer: [f32; 2],
    pub(crate) blur_dir: [f32; 2],
    pub(crate) bloom_strength: f32,
    pub(crate) threshold: f32,
    pub(crate) liquid_strength: f32,
    pub(crate) _pad: f32,
}

impl PostUniforms {
    fn for_frame(state: &FrameState, resolution: [f32; 2], blur_dir: [f32; 2]) -> Self {
        Self {
            resolution,
            time: state.elapsed,
            glitch: state.glitch,
            pointer: state.pointer.to_array(),
            blur_dir,
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            liquid_strength: LIQUID_STRENGTH,
            _pad: 0.0,
        }
    }
}

/// One buffer per pass: queue writes are not ordered with the passes of a
/// single submission.
struct PassBuffers {
    bright: wgpu::Buffer,
    blur_h: wgpu::Buffer,
    blur_v: wgpu::Buffer,
    composite: wgpu::Buffer,
}

struct PostBindGroups {
    bright: wgpu::BindGroup,
    blur_h: wgpu::BindGroup,
    blur_v: wgpu::BindGroup,
    composite: wgpu::BindGroup,
    composite_bloom: wgpu::BindGroup,
}

pub(crate) struct PostChain {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    sampler: wgpu::Sampler,
    buffers: PassBuffers,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    pub(crate) targets: RenderTargets,
    groups: PostBindGroups,
    size: (u32, u32),
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

impl PostChain {
    pub(crate) fn new(
        device: &wgpu::Device,
        swap_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/post.wgsl").into()),
        });
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                texture_entry(0),
                sampler_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("post_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let buffers = PassBuffers {
            bright: helpers::uniform_buffer::<PostUniforms>(device, "post_bright_u"),
            blur_h: helpers::uniform_buffer::<PostUniforms>(device, "post_blur_h_u"),
            blur_v: helpers::uniform_buffer::<PostUniforms>(device, "post_blur_v_u"),
            composite: helpers::uniform_buffer::<PostUniforms>(device, "post_composite_u"),
        };
        let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_0"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_comp"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let bright_pipeline = helpers::make_post_pipeline(
            device,
            "post_bright",
            &pl_bright_blur,
            &shader,
            "fs_bright",
            HDR_FORMAT,
            None,
        );
        let blur_pipeline = helpers::make_post_pipeline(
            device,
            "post_blur",
            &pl_bright_blur,
            &shader,
            "fs_blur",
            HDR_FORMAT,
            None,
        );
        let composite_pipeline = helpers::make_post_pipeline(
            device,
            "post_composite",
            &pl_composite,
            &shader,
            "fs_composite",
            swap_format,
            Some(wgpu::BlendState::REPLACE),
        );
        let targets = RenderTargets::new(device, width, height);
        let groups = Self::bind_groups(device, &bgl0, &bgl1, &sampler, &buffers, &targets);
        Self {
            bgl0,
            bgl1,
            sampler,
            buffers,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            targets,
            groups,
            size: (width, height),
        }
    }

    fn bind_groups(
        device: &wgpu::Device,
        bgl0: &wgpu::BindGroupLayout,
        bgl1: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        buffers: &PassBuffers,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        let with_uniform = |label: &str, view: &wgpu::TextureView, buffer: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: bgl0,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: buffer.as_entire_binding(),
                    },
                ],
            })
        };
        PostBindGroups {
            bright: with_uniform("bg_bright", &targets.hdr_view, &buffers.bright),
            blur_h: with_uniform("bg_blur_h", &targets.bloom_a_view, &buffers.blur_h),
            blur_v: with_uniform("bg_blur_v", &targets.bloom_b_view, &buffers.blur_v),
            composite: with_uniform("bg_composite", &targets.hdr_view, &buffers.composite),
            composite_bloom: device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("bg_bloom_a_only"),
                layout: bgl1,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            }),
        }
    }

    /// Recreate targets and the bind groups that reference them.
    pub(crate) fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.size == (width, height) {
            return;
        }
        self.targets = RenderTargets::new(device, width, height);
        self.groups = Self::bind_groups(
            device,
            &self.bgl0,
            &self.bgl1,
            &self.sampler,
            &self.buffers,
            &self.targets,
        );
        self.size = (width, height);
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, state: &FrameState) {
        let (w, h) = self.size;
        let full = [w as f32, h as f32];
        let (bw, bh) = RenderTargets::bloom_size(w, h);
        let half = [bw as f32, bh as f32];
        let write = |buffer: &wgpu::Buffer, u: PostUniforms| {
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(&u));
        };
        write(&self.buffers.bright, PostUniforms::for_frame(state, half, [0.0, 0.0]));
        write(&self.buffers.blur_h, PostUniforms::for_frame(state, half, [1.0, 0.0]));
        write(&self.buffers.blur_v, PostUniforms::for_frame(state, half, [0.0, 1.0]));
        write(&self.buffers.composite, PostUniforms::for_frame(state, full, [0.0, 0.0]));
    }

    /// Run bright, blur and composite; the scene must already be in `hdr`.
    pub(crate) fn encode(&self, encoder: &mut wgpu::CommandEncoder, swap_view: &wgpu::TextureView) {
        let t = &self.targets;
        blit(
            encoder,
            "bright",
            &t.bloom_a_view,
            wgpu::Color::BLACK,
            &self.bright_pipeline,
            &self.groups.bright,
            None,
        );
        blit(
            encoder,
            "blur_h",
            &t.bloom_b_view,
            wgpu::Color::BLACK,
            &self.blur_pipeline,
            &self.groups.blur_h,
            None,
        );
        blit(
            encoder,
            "blur_v",
            &t.bloom_a_view,
            wgpu::Color::BLACK,
            &self.blur_pipeline,
            &self.groups.blur_v,
            None,
        );
        blit(
            encoder,
            "composite",
            swap_view,
            wgpu::Color::BLACK,
            &self.composite_pipeline,
            &self.groups.composite,
            Some(&self.groups.composite_bloom),
        );
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
    drop(r);
}
