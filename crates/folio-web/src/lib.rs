#![cfg(target_arch = "wasm32")]

mod assets;
mod audio;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

use events::{Pending, PointerWiring, UiWiring};
use folio_core::constants::CURSOR_MIN_VIEWPORT_PX;
use folio_core::{CommandPalette, HeroModel, PageExit, RenderLoop, Tuning};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Keep the canvas backing store at CSS size * devicePixelRatio and flag the
/// layout for the next frame.
fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, pending: Rc<RefCell<Pending>>) {
    dom::sync_canvas_backing_size(canvas);
    let Some(window) = web::window() else {
        return;
    };
    let canvas = canvas.clone();
    dom::listen(&window, "resize", move |_ev: web::Event| {
        dom::sync_canvas_backing_size(&canvas);
        pending.borrow_mut().layout_dirty = true;
    });
}

fn hide_custom_cursor(document: &web::Document) {
    for el in dom::query_all(document, ".cursor, .cursor-follower") {
        dom::set_style(&el, "display", "none");
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("bg-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #bg-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let pending = Rc::new(RefCell::new(Pending::default()));
    wire_canvas_resize(&canvas, pending.clone());
    overlay::run_loading_screen(&document);

    let (vw, vh) = dom::viewport_size();
    let tuning = Tuning::for_viewport(vw);
    let post_processing = tuning.post_processing;
    let hero = if tuning.load_hero_model {
        assets::load_hero(assets::HERO_MODEL_URL).await
    } else {
        HeroModel::Unavailable
    };
    let render_loop = RenderLoop::new(tuning, hero, vw as f32, vh as f32);
    let music = Rc::new(RefCell::new(audio::Music::new(audio::MUSIC_URL)?));
    let palette = Rc::new(RefCell::new(CommandPalette::new()));

    let custom_cursor = vw >= CURSOR_MIN_VIEWPORT_PX;
    if !custom_cursor {
        hide_custom_cursor(&document);
    }
    events::wire_pointer(PointerWiring {
        document: document.clone(),
        pending: pending.clone(),
        cursor: custom_cursor
            .then(|| {
                dom::query(&document, ".cursor").zip(dom::query(&document, ".cursor-follower"))
            })
            .flatten(),
    });
    events::wire_keyboard(&document, palette.clone(), pending.clone());
    events::wire_ui(UiWiring {
        document: document.clone(),
        palette,
        pending: pending.clone(),
        music: music.clone(),
    });

    let page = frame::PageElements::collect(&document, custom_cursor);
    let timeline = frame::build_timeline(&page);
    let gpu = frame::init_gpu(&canvas, &render_loop, post_processing).await;
    if gpu.is_none() {
        log::warn!("[gpu] running without a background scene");
    }

    let ctx = Rc::new(RefCell::new(frame::FrameContext {
        document: document.clone(),
        canvas,
        render_loop: Rc::new(RefCell::new(render_loop)),
        pending,
        music: music.clone(),
        page,
        timeline,
        trail_nodes: Vec::new(),
        gpu,
    }));
    let handle = Rc::new(RefCell::new(frame::start_loop(ctx.clone())));
    wire_page_lifecycle(&window, &document, ctx, handle, music);
    log::info!("[init] ready");
    Ok(())
}

/// Stop on `pagehide`. A page kept in the back/forward cache only pauses and
/// its loop restarts on `pageshow`; an unloading page also releases audio.
fn wire_page_lifecycle(
    window: &web::Window,
    document: &web::Document,
    ctx: Rc<RefCell<frame::FrameContext<'static>>>,
    handle: Rc<RefCell<frame::LoopHandle>>,
    music: Rc<RefCell<audio::Music>>,
) {
    let doc = document.clone();
    let hide_handle = handle.clone();
    dom::listen(window, "pagehide", move |ev: web::PageTransitionEvent| {
        hide_handle.borrow().stop();
        match PageExit::from_persisted(ev.persisted()) {
            PageExit::Cached => {
                music.borrow_mut().set_enabled(false);
                overlay::set_sound_active(&doc, false);
                log::info!("[loop] paused for back/forward cache");
            }
            PageExit::Unload => music.borrow_mut().close(),
        }
    });
    dom::listen(window, "pageshow", move |ev: web::PageTransitionEvent| {
        if PageExit::from_persisted(ev.persisted()).resumes() {
            *handle.borrow_mut() = frame::start_loop(ctx.clone());
            log::info!("[loop] resumed");
        }
    });
}
