use super::{Pending, UiAction};
use crate::{dom, overlay};
use folio_core::palette::Outcome;
use folio_core::CommandPalette;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Route a palette result: dispatch queues the command, unknown commands only
/// raise a notice.
pub(super) fn handle_outcome(
    document: &web::Document,
    pending: &Rc<RefCell<Pending>>,
    outcome: Outcome,
) {
    match outcome {
        Outcome::Dispatch(cmd) => {
            overlay::hide_palette(document);
            log::info!("[palette] {:?}", cmd);
            pending.borrow_mut().actions.push(UiAction::Run(cmd));
        }
        Outcome::Unknown(msg) => overlay::show_notice(document, &msg),
        Outcome::Ignored => {}
    }
}

pub fn wire_keyboard(
    document: &web::Document,
    palette: Rc<RefCell<CommandPalette>>,
    pending: Rc<RefCell<Pending>>,
) {
    wire_global_keydown(document, palette.clone(), pending.clone());
    wire_palette_input(document, palette, pending);
}

fn wire_global_keydown(
    document: &web::Document,
    palette: Rc<RefCell<CommandPalette>>,
    pending: Rc<RefCell<Pending>>,
) {
    let Some(window) = web::window() else {
        return;
    };
    let doc = document.clone();
    dom::listen(&window, "keydown", move |ev: web::KeyboardEvent| {
        let key = ev.key();
        if (ev.ctrl_key() || ev.meta_key()) && key.eq_ignore_ascii_case("k") {
            ev.prevent_default();
            palette.borrow_mut().open();
            overlay::show_palette(&doc);
            return;
        }
        if key == "Escape" {
            let mut p = palette.borrow_mut();
            if p.is_open() {
                p.close();
                overlay::hide_palette(&doc);
            }
            if overlay::is_project_open(&doc) {
                overlay::close_project(&doc);
            }
            overlay::set_menu(&doc, false);
            pending.borrow_mut().actions.push(UiAction::ExitGame);
        }
    });
}

fn wire_palette_input(
    document: &web::Document,
    palette: Rc<RefCell<CommandPalette>>,
    pending: Rc<RefCell<Pending>>,
) {
    let Some(input) = document
        .get_element_by_id("cc-input")
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    else {
        log::debug!("[palette] #cc-input missing, palette disabled");
        return;
    };

    let doc = document.clone();
    let palette_input = palette.clone();
    let field = input.clone();
    dom::listen(&input, "input", move |_ev: web::Event| {
        let text = field.value();
        palette_input.borrow_mut().set_input(&text);
        overlay::sync_suggestions(&doc, &text);
    });

    let doc = document.clone();
    dom::listen(&input, "keydown", move |ev: web::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        // submit() clears the input on dispatch; release the borrow first
        let outcome = palette.borrow_mut().submit();
        handle_outcome(&doc, &pending, outcome);
    });
}
