use super::keyboard::handle_outcome;
use super::{Pending, UiAction};
use crate::audio::Music;
use crate::{dom, overlay};
use folio_core::projects;
use folio_core::shutter::{ShutterStep, SHUTTER_PARKED_PERCENT, SHUTTER_SEQUENCE};
use folio_core::CommandPalette;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct UiWiring {
    pub document: web::Document,
    pub palette: Rc<RefCell<CommandPalette>>,
    pub pending: Rc<RefCell<Pending>>,
    pub music: Rc<RefCell<Music>>,
}

pub fn wire_ui(w: UiWiring) {
    wire_sound(&w);
    wire_menu(&w.document);
    wire_projects(&w.document);
    wire_suggestions(&w);
    wire_game_exit(&w);

    let doc = w.document.clone();
    dom::add_click_listener(&w.document, "startBtn", move || {
        overlay::hide_loading_screen(&doc);
    });
    for logo in dom::query_all(&w.document, ".site-logo") {
        dom::listen(&logo, "click", |_ev: web::MouseEvent| dom::scroll_to_top());
    }
}

fn wire_sound(w: &UiWiring) {
    let doc = w.document.clone();
    let music = w.music.clone();
    dom::add_click_listener(&w.document, "soundBtn", move || {
        let on = music.borrow_mut().toggle();
        log::info!("[audio] sound {}", if on { "on" } else { "off" });
        overlay::set_sound_active(&doc, on);
    });
}

fn wire_menu(document: &web::Document) {
    let doc = document.clone();
    dom::add_click_listener(document, "menuBtn", move || overlay::set_menu(&doc, true));
    let doc = document.clone();
    dom::add_click_listener(document, "menuClose", move || overlay::set_menu(&doc, false));

    for link in dom::query_all(document, ".menu-link") {
        let doc = document.clone();
        let anchor = link.clone();
        dom::listen(&link, "click", move |ev: web::MouseEvent| {
            ev.prevent_default();
            overlay::set_menu(&doc, false);
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            let target = doc.clone();
            play_shutter(&doc, move || {
                dom::scroll_to_element(&target, href.trim_start_matches('#'));
            });
        });
    }
}

/// Run `navigate` behind the `#page-transition` shutter, or straight away
/// when the page has none.
fn play_shutter(document: &web::Document, navigate: impl FnOnce() + 'static) {
    let Some(shutter) = dom::by_id(document, "page-transition") else {
        navigate();
        return;
    };
    dom::set_style(&shutter, "transition", "none");
    dom::set_style(&shutter, "transform", &shutter_transform(SHUTTER_PARKED_PERCENT));
    // flush the parked position so the cover animates from below
    _ = shutter.offset_height();

    let mut navigate = Some(navigate);
    for (delay_ms, step) in SHUTTER_SEQUENCE {
        let el = shutter.clone();
        let jump = if step == ShutterStep::Navigate {
            navigate.take()
        } else {
            None
        };
        dom::set_timeout(delay_ms, move || match step.motion() {
            Some((to, ms)) => {
                dom::set_style(
                    &el,
                    "transition",
                    &format!("transform {ms}ms cubic-bezier(0.77, 0, 0.175, 1)"),
                );
                dom::set_style(&el, "transform", &shutter_transform(to));
            }
            None => {
                if let Some(jump) = jump {
                    jump();
                }
            }
        });
    }
}

#[inline]
fn shutter_transform(percent: f32) -> String {
    format!("translateY({percent}%)")
}

fn wire_projects(document: &web::Document) {
    for card in dom::query_all(document, ".project-card") {
        let doc = document.clone();
        let id = card.dataset().get("project");
        dom::listen(&card, "click", move |_ev: web::MouseEvent| {
            match id.as_deref().and_then(projects::find) {
                Some(p) => overlay::open_project(&doc, p),
                None => log::warn!("[projects] no project for card {:?}", id),
            }
        });
    }

    let Some(modal) = document.get_element_by_id("projectModal") else {
        return;
    };
    let doc = document.clone();
    let backdrop = modal.clone();
    dom::listen(&modal, "click", move |ev: web::MouseEvent| {
        // only the backdrop itself, not clicks bubbling from the content
        let on_backdrop = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .map(|t| t == backdrop)
            .unwrap_or(false);
        if on_backdrop {
            overlay::close_project(&doc);
        }
    });
    if let Some(close) = dom::query(document, "#projectModal .modal-close") {
        let doc = document.clone();
        dom::listen(&close, "click", move |_ev: web::MouseEvent| {
            overlay::close_project(&doc)
        });
    }
}

fn wire_suggestions(w: &UiWiring) {
    for chip in dom::query_all(&w.document, ".cc-chip") {
        let doc = w.document.clone();
        let palette = w.palette.clone();
        let pending = w.pending.clone();
        let token = chip.text_content().unwrap_or_default();
        dom::listen(&chip, "click", move |_ev: web::MouseEvent| {
            let outcome = palette.borrow_mut().choose(token.trim());
            handle_outcome(&doc, &pending, outcome);
        });
    }
}

fn wire_game_exit(w: &UiWiring) {
    let Some(btn) = dom::query(&w.document, "#game-ui .game-exit") else {
        return;
    };
    let pending = w.pending.clone();
    dom::listen(&btn, "click", move |_ev: web::MouseEvent| {
        pending.borrow_mut().actions.push(UiAction::ExitGame);
    });
}
