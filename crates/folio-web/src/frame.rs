use crate::audio::Music;
use crate::events::{Pending, UiAction};
use crate::render::GpuState;
use crate::{dom, overlay};
use folio_core::constants::{REVEAL_TEXT_FADE_MS, TIMELINE_NODE_FADE_MS};
use folio_core::palette::Command;
use folio_core::pointer::TrailParticle;
use folio_core::scroll::{ScrollTimeline, TimelineEntry, TimelineOutput};
use folio_core::{FrameInputs, GameEvent, RenderLoop, ScrollSample};
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Page elements the frame writes to every tick.
pub struct PageElements {
    pub progress_bar: Option<web::HtmlElement>,
    pub scene_label: Option<web::HtmlElement>,
    pub reveal_blocks: Vec<web::HtmlElement>,
    /// `.content-section` paired with its `.section-title`.
    pub section_titles: Vec<(web::HtmlElement, web::HtmlElement)>,
    /// `.timeline-container` and its `.timeline-line`.
    pub timeline_line: Option<(web::HtmlElement, web::HtmlElement)>,
    pub timeline_nodes: Vec<web::HtmlElement>,
    pub reveal_texts: Vec<web::HtmlElement>,
    /// Custom cursor dot and ring; `None` when the cursor is disabled.
    pub cursor: Option<(web::HtmlElement, web::HtmlElement)>,
}

impl PageElements {
    pub fn collect(document: &web::Document, custom_cursor: bool) -> Self {
        let cursor = if custom_cursor {
            dom::query(document, ".cursor").zip(dom::query(document, ".cursor-follower"))
        } else {
            None
        };
        let section_titles = dom::query_all(document, ".content-section")
            .into_iter()
            .filter_map(|section| {
                let title = section
                    .query_selector(".section-title")
                    .ok()
                    .flatten()
                    .and_then(|t| t.dyn_into::<web::HtmlElement>().ok())?;
                Some((section, title))
            })
            .collect();
        let timeline_nodes = dom::query_all(document, ".timeline-node");
        for node in &timeline_nodes {
            dom::set_style(node, "transition", &fade_transition(TIMELINE_NODE_FADE_MS, &["opacity", "transform"]));
        }
        let reveal_texts = dom::query_all(document, ".reveal-text");
        for text in &reveal_texts {
            dom::set_style(text, "transition", &fade_transition(REVEAL_TEXT_FADE_MS, &["opacity", "transform", "filter"]));
        }
        Self {
            progress_bar: dom::by_id(document, "progressBar"),
            scene_label: dom::by_id(document, "sceneLabel"),
            reveal_blocks: dom::query_all(document, ".reveal-item"),
            section_titles,
            timeline_line: dom::query(document, ".timeline-container")
                .zip(dom::query(document, ".timeline-line")),
            timeline_nodes,
            reveal_texts,
            cursor,
        }
    }
}

/// Toggled reveals ease between their two poses over `ms`.
fn fade_transition(ms: u32, props: &[&str]) -> String {
    props
        .iter()
        .map(|prop| format!("{prop} {ms}ms ease-out"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Offset of `el` from the top of the document, ignoring transforms.
fn document_top(el: &web::HtmlElement) -> f64 {
    let mut top = el.offset_top() as f64;
    let mut parent = el.offset_parent();
    while let Some(p) = parent.and_then(|p| p.dyn_into::<web::HtmlElement>().ok()) {
        top += p.offset_top() as f64;
        parent = p.offset_parent();
    }
    top
}

/// DOM-side timeline: progress bar, section label, the experience timeline
/// and every reveal. The camera and hero entries are applied by the render
/// loop itself.
pub fn build_timeline(page: &PageElements) -> ScrollTimeline {
    let mut timeline = ScrollTimeline::new();
    timeline.register(TimelineEntry::ProgressBar);
    timeline.register(TimelineEntry::SectionLabel);
    for (index, el) in page.reveal_blocks.iter().enumerate() {
        timeline.register(TimelineEntry::RevealBlock {
            index,
            top_px: document_top(el),
        });
    }
    for (index, (section, _)) in page.section_titles.iter().enumerate() {
        timeline.register(TimelineEntry::SectionTitle {
            index,
            section_top_px: document_top(section),
        });
    }
    if let Some((container, _)) = &page.timeline_line {
        timeline.register(TimelineEntry::TimelineLine {
            top_px: document_top(container),
            height_px: container.offset_height() as f64,
        });
    }
    for (index, el) in page.timeline_nodes.iter().enumerate() {
        timeline.register(TimelineEntry::TimelineNode {
            index,
            top_px: document_top(el),
        });
    }
    for (index, el) in page.reveal_texts.iter().enumerate() {
        timeline.register(TimelineEntry::RevealText {
            index,
            top_px: document_top(el),
        });
    }
    timeline
}

pub struct FrameContext<'a> {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub render_loop: Rc<RefCell<RenderLoop>>,
    pub pending: Rc<RefCell<Pending>>,
    pub music: Rc<RefCell<Music>>,
    pub page: PageElements,
    pub timeline: ScrollTimeline,
    pub trail_nodes: Vec<(u32, web::HtmlElement)>,
    pub gpu: Option<GpuState<'a>>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self, now_ms: f64) {
        let render_loop = self.render_loop.clone();
        let mut rl = render_loop.borrow_mut();

        // drain input queued since the last frame
        let pending = self.pending.borrow_mut().take();
        if pending.layout_dirty {
            let (w, h) = dom::viewport_size();
            rl.resize(w as f32, h as f32);
            self.timeline = build_timeline(&self.page);
        }
        for p in &pending.moves {
            if let Some(particle) = rl.pointer.on_pointer_move(p.x, p.y) {
                self.spawn_trail_node(particle);
            }
        }
        for (px, timestamp) in pending.clicks {
            let ndc = rl.pointer.to_ndc(px);
            if let Some(event) = rl.click(ndc, timestamp) {
                self.show_game_event(event);
            }
        }
        for action in pending.actions {
            let event = match action {
                UiAction::Run(Command::ScrollTo(section)) => {
                    dom::scroll_to_element(&self.document, section.element_id());
                    None
                }
                UiAction::Run(Command::SetTheme(theme)) => {
                    rl.set_theme(theme);
                    overlay::apply_theme(&self.document, theme);
                    None
                }
                UiAction::Run(Command::StartGame) => rl.start_game(),
                UiAction::ExitGame => rl.exit_game(),
            };
            if let Some(event) = event {
                self.show_game_event(event);
            }
        }

        let bands = self.music.borrow_mut().bands();
        let (scroll_y, doc_height) = dom::scroll_metrics();
        let (_, viewport_height) = dom::viewport_size();
        let scroll = ScrollSample {
            scroll_y,
            doc_height,
            viewport_height,
        };
        let report = rl.step(&FrameInputs {
            now_ms,
            scroll,
            bands,
        });

        self.sync_cursor(&rl, &report.culled_trail);
        self.apply_timeline(&scroll);

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            match gpu.render(&rl, &report.state) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
            }
        }
    }

    fn show_game_event(&self, event: GameEvent) {
        match event {
            GameEvent::Started { .. } => {
                overlay::set_score(&self.document, 0);
                overlay::set_game_active(&self.document, true);
            }
            GameEvent::Hit { score } => overlay::set_score(&self.document, score),
            GameEvent::Exited => overlay::set_game_active(&self.document, false),
            GameEvent::HeroPulse => {}
        }
    }

    fn spawn_trail_node(&mut self, particle: &TrailParticle) {
        if self.page.cursor.is_none() {
            return;
        }
        let Ok(el) = self.document.create_element("div") else {
            return;
        };
        el.set_class_name("cursor-trail");
        let Ok(el) = el.dyn_into::<web::HtmlElement>() else {
            return;
        };
        if let Some(body) = self.document.body() {
            _ = body.append_child(&el);
        }
        style_trail_node(&el, particle);
        self.trail_nodes.push((particle.id, el));
    }

    fn sync_cursor(&mut self, rl: &RenderLoop, culled: &[u32]) {
        let Some((dot, ring)) = &self.page.cursor else {
            return;
        };
        let d = rl.pointer.dot.pos;
        let dot_transform = format!(
            "{} scale(var(--cursor-scale, 1))",
            translate(d - Vec2::splat(4.0))
        );
        dom::set_style(dot, "transform", &dot_transform);
        let r = rl.pointer.ring.pos;
        let half = Vec2::new(ring.offset_width() as f32, ring.offset_height() as f32) * 0.5;
        dom::set_style(ring, "transform", &translate(r - half));

        self.trail_nodes.retain(|(id, el)| {
            let keep = !culled.contains(id);
            if !keep {
                el.remove();
            }
            keep
        });
        for particle in rl.pointer.trail() {
            if let Some((_, el)) = self.trail_nodes.iter().find(|(id, _)| *id == particle.id) {
                style_trail_node(el, particle);
            }
        }
    }

    fn apply_timeline(&self, scroll: &ScrollSample) {
        for output in self.timeline.evaluate(scroll) {
            match output {
                TimelineOutput::ProgressBar(percent) => {
                    if let Some(bar) = &self.page.progress_bar {
                        dom::set_style(bar, "width", &format!("{percent}%"));
                    }
                }
                TimelineOutput::SectionLabel(label) => {
                    if let Some(el) = &self.page.scene_label {
                        if el.text_content().as_deref() != Some(label) {
                            el.set_text_content(Some(label));
                        }
                    }
                }
                TimelineOutput::RevealBlock { index, reveal } => {
                    if let Some(el) = self.page.reveal_blocks.get(index) {
                        dom::set_style(el, "opacity", &reveal.opacity.to_string());
                        dom::set_style(
                            el,
                            "transform",
                            &format!("translateY({}px)", reveal.translate_y),
                        );
                    }
                }
                TimelineOutput::SectionTitle { index, reveal } => {
                    if let Some((_, title)) = self.page.section_titles.get(index) {
                        dom::set_style(title, "opacity", &reveal.opacity.to_string());
                        dom::set_style(
                            title,
                            "transform",
                            &format!("translateY({}px)", reveal.translate_y),
                        );
                    }
                }
                TimelineOutput::TimelineLine(percent) => {
                    if let Some((_, line)) = &self.page.timeline_line {
                        dom::set_style(line, "height", &format!("{percent}%"));
                    }
                }
                TimelineOutput::TimelineNode { index, reveal } => {
                    if let Some(el) = self.page.timeline_nodes.get(index) {
                        dom::set_style(el, "opacity", &reveal.opacity.to_string());
                        dom::set_style(
                            el,
                            "transform",
                            &format!(
                                "translateX({}px) rotateY({}deg)",
                                reveal.translate_x, reveal.rotate_y_deg
                            ),
                        );
                    }
                }
                TimelineOutput::RevealText { index, reveal } => {
                    if let Some(el) = self.page.reveal_texts.get(index) {
                        dom::set_style(el, "opacity", &reveal.opacity.to_string());
                        dom::set_style(el, "filter", &format!("blur({}px)", reveal.blur_px));
                        dom::set_style(
                            el,
                            "transform",
                            &format!(
                                "translateY({}px) rotateX({}deg)",
                                reveal.translate_y, reveal.rotate_x_deg
                            ),
                        );
                    }
                }
                TimelineOutput::CameraZ(_)
                | TimelineOutput::HeroRotation(_)
                | TimelineOutput::HeroOffset(_) => {}
            }
        }
    }
}

#[inline]
fn translate(p: Vec2) -> String {
    format!("translate({}px, {}px)", p.x, p.y)
}

fn style_trail_node(el: &web::HtmlElement, p: &TrailParticle) {
    let size = p.size.max(0.0);
    dom::set_style(el, "transform", &translate(p.pos - Vec2::splat(size * 0.5)));
    dom::set_style(el, "opacity", &p.opacity.to_string());
    dom::set_style(el, "width", &format!("{size}px"));
    dom::set_style(el, "height", &format!("{size}px"));
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    render_loop: &RenderLoop,
    post_processing: bool,
) -> Option<GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match GpuState::new(leaked_canvas, render_loop, post_processing).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Keeps the animation-frame chain alive until [`LoopHandle::stop`].
pub struct LoopHandle {
    tick: Tick,
    alive: Rc<Cell<bool>>,
    raf_id: Rc<Cell<i32>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        if !self.alive.replace(false) {
            return;
        }
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(self.raf_id.get());
        }
        // breaks the closure's self-reference
        self.tick.borrow_mut().take();
        log::info!("[loop] stopped");
    }
}

fn request_frame(tick: &Tick, raf_id: &Cell<i32>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            raf_id.set(id);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let tick: Tick = Rc::new(RefCell::new(None));
    let alive = Rc::new(Cell::new(true));
    let raf_id = Rc::new(Cell::new(0));

    let tick_clone = tick.clone();
    let alive_tick = alive.clone();
    let raf_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        if !alive_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame(now_ms);
        request_frame(&tick_clone, &raf_tick);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&tick, &raf_id);

    LoopHandle {
        tick,
        alive,
        raf_id,
    }
}
