mod background;
mod helpers;
mod post;
mod scene;
mod targets;

use background::BackgroundPass;
use folio_core::scene::{Layer, LAYER_ORDER};
use folio_core::{FrameState, RenderLoop};
use post::PostChain;
use scene::{ScenePass, FOG_COLOR};
use targets::HDR_FORMAT;
use web_sys as web;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    _depth_tex: wgpu::Texture,
    background: BackgroundPass,
    scene: ScenePass,
    /// `None` draws the scene straight to the swapchain.
    post: Option<PostChain>,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        render_loop: &RenderLoop,
        post_processing: bool,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let post = post_processing.then(|| PostChain::new(&device, format, width, height));
        let scene_format = if post.is_some() { HDR_FORMAT } else { format };
        let graph = &render_loop.scene;
        let scene = ScenePass::new(&device, scene_format, graph);
        let background =
            BackgroundPass::new(&device, &scene.frame_bgl, scene_format, &graph.background);
        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);
        log::info!(
            "[gpu] surface {}x{} format={:?} post={}",
            width,
            height,
            format,
            post.is_some()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            _depth_tex: depth_tex,
            background,
            scene,
            post,
            clear_color: wgpu::Color {
                r: FOG_COLOR[0] as f64,
                g: FOG_COLOR[1] as f64,
                b: FOG_COLOR[2] as f64,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        let (depth_tex, depth_view) = helpers::create_depth_texture(&self.device, width, height);
        self._depth_tex = depth_tex;
        self.depth_view = depth_view;
        if let Some(post) = self.post.as_mut() {
            post.resize(&self.device, width, height);
        }
        log::debug!("[gpu] resized to {}x{}", width, height);
    }

    /// Draw one frame: background, hero, particles and targets, then the
    /// optional post chain.
    pub fn render(
        &mut self,
        render_loop: &RenderLoop,
        state: &FrameState,
    ) -> Result<(), wgpu::SurfaceError> {
        let graph = &render_loop.scene;
        self.scene.prepare(
            &self.device,
            &self.queue,
            graph,
            render_loop.game.targets(),
        );
        self.background
            .write(&self.queue, &graph.background, render_loop.bridge.uniforms());
        if let Some(post) = &self.post {
            post.write_uniforms(&self.queue, state);
        }

        let frame = self.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let scene_target = match &self.post {
                Some(post) => &post.targets.hdr_view,
                None => &swap_view,
            };
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: scene_target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            for layer in LAYER_ORDER {
                match layer {
                    Layer::Background => self.background.draw(&mut pass, &self.scene.frame_bg),
                    Layer::Hero => self.scene.draw_hero(&mut pass),
                    Layer::Particles => self.scene.draw_particles(&mut pass),
                    Layer::Targets => self.scene.draw_targets(&mut pass),
                    // DOM overlay
                    Layer::Ui => {}
                }
            }
        }

        if let Some(post) = &self.post {
            post.encode(&mut encoder, &swap_view);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Reconfigure after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}
