//! DOM overlays layered above the canvas: command palette, notice, game HUD,
//! project modal, menu and the loading screen.

use crate::dom;
use folio_core::loading::LoadingCounter;
use folio_core::projects::{self, Project};
use folio_core::{NoticeTimer, Theme};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const NOTICE_MS: i32 = 2000;

thread_local! {
    static NOTICE_TIMER: RefCell<NoticeTimer> = RefCell::new(NoticeTimer::default());
}

#[inline]
fn set_active(document: &web::Document, id: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        dom::set_class(&el, "active", on);
    }
}

#[inline]
fn is_active(document: &web::Document, id: &str) -> bool {
    document
        .get_element_by_id(id)
        .map(|el| el.class_list().contains("active"))
        .unwrap_or(false)
}

fn palette_input(document: &web::Document) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id("cc-input")
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

pub fn show_palette(document: &web::Document) {
    set_active(document, "command-center", true);
    if let Some(input) = palette_input(document) {
        input.set_value("");
        _ = input.focus();
    }
    sync_suggestions(document, "");
}

pub fn hide_palette(document: &web::Document) {
    set_active(document, "command-center", false);
    if let Some(input) = palette_input(document) {
        input.set_value("");
        _ = input.blur();
    }
}

/// Suggestion chips are only shown while the input is empty.
pub fn sync_suggestions(document: &web::Document, input: &str) {
    if let Some(el) = dom::query(document, ".cc-suggestions") {
        dom::set_style(&el, "display", if input.is_empty() { "" } else { "none" });
    }
}

pub fn show_notice(document: &web::Document, message: &str) {
    let Some(el) = document.get_element_by_id("cc-notice") else {
        log::warn!("[overlay] {}", message);
        return;
    };
    el.set_text_content(Some(message));
    dom::set_class(&el, "active", true);

    let (generation, stale) = NOTICE_TIMER.with(|t| t.borrow_mut().show());
    if let Some(handle) = stale {
        dom::clear_timeout(handle);
    }
    let hide = dom::set_timeout(NOTICE_MS, move || {
        if NOTICE_TIMER.with(|t| t.borrow_mut().expire(generation)) {
            dom::set_class(&el, "active", false);
        }
    });
    if let Some(handle) = hide {
        NOTICE_TIMER.with(|t| t.borrow_mut().scheduled(handle));
    }
}

pub fn set_game_active(document: &web::Document, on: bool) {
    set_active(document, "game-ui", on);
    if !on {
        set_score(document, 0);
    }
}

pub fn set_score(document: &web::Document, score: u32) {
    if let Some(el) = dom::query(document, "#game-ui .game-score") {
        el.set_text_content(Some(&format!("SCORE: {}", score)));
    }
}

pub fn apply_theme(document: &web::Document, theme: Theme) {
    if let Some(body) = document.body() {
        body.set_class_name(&theme.body_class());
    }
}

pub fn set_sound_active(document: &web::Document, on: bool) {
    if let Some(el) = document.get_element_by_id("soundBtn") {
        dom::set_class(&el, "active", on);
    }
}

pub fn set_menu(document: &web::Document, on: bool) {
    set_active(document, "menuOverlay", on);
}

pub fn open_project(document: &web::Document, project: &Project) {
    let Some(modal) = document.get_element_by_id("projectModal") else {
        log::warn!("[overlay] #projectModal missing");
        return;
    };
    let fill = |selector: &str, text: Option<&str>, html: Option<&str>| {
        if let Some(el) = dom::query(document, &format!("#projectModal {}", selector)) {
            if let Some(t) = text {
                el.set_text_content(Some(t));
            }
            if let Some(h) = html {
                el.set_inner_html(h);
            }
        }
    };
    fill(".modal-title", Some(project.title), None);
    fill(".modal-desc", Some(project.desc), None);
    fill(".modal-tags", None, Some(&projects::tags_html(project)));
    fill(".modal-details", None, Some(project.details_html));
    dom::set_class(&modal, "active", true);
    if let Some(body) = document.body() {
        dom::set_style(&body, "overflow", "hidden");
    }
}

pub fn close_project(document: &web::Document) {
    set_active(document, "projectModal", false);
    if let Some(body) = document.body() {
        dom::set_style(&body, "overflow", "");
    }
}

pub fn is_project_open(document: &web::Document) -> bool {
    is_active(document, "projectModal")
}

/// Count the loading screen up to 100%, then reveal the start button.
pub fn run_loading_screen(document: &web::Document) {
    let (Some(window), Some(counter_el)) = (web::window(), document.get_element_by_id("counter"))
    else {
        log::debug!("[overlay] no loading screen");
        return;
    };
    let start_btn = dom::by_id(document, "startBtn");
    let counter = Rc::new(RefCell::new(LoadingCounter::default()));
    let handle: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));

    let handle_tick = handle.clone();
    let tick = Closure::wrap(Box::new(move || {
        let done = counter.borrow_mut().tick();
        counter_el.set_text_content(Some(&counter.borrow().label()));
        if done {
            if let (Some(w), Some(id)) = (web::window(), handle_tick.borrow_mut().take()) {
                w.clear_interval_with_handle(id);
            }
            if let Some(btn) = &start_btn {
                dom::set_style(btn, "opacity", "1");
                dom::set_style(btn, "pointer-events", "all");
            }
        }
    }) as Box<dyn FnMut()>);
    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        folio_core::constants::LOADING_TICK_MS,
    ) {
        Ok(id) => *handle.borrow_mut() = Some(id),
        Err(e) => log::warn!("[overlay] loading timer: {:?}", e),
    }
    tick.forget();
}

pub fn hide_loading_screen(document: &web::Document) {
    if let Some(el) = dom::by_id(document, "loadingScreen") {
        dom::set_style(&el, "display", "none");
    }
}
