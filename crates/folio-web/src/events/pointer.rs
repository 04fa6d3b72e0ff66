use super::Pending;
use crate::dom;
use folio_core::constants::MAGNETIC_PULL;
use folio_core::cursor::{self, Hover};
use folio_core::pointer::magnetic_offset;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub document: web::Document,
    pub pending: Rc<RefCell<Pending>>,
    /// Custom cursor dot and ring; `None` on small viewports where the custom
    /// cursor is disabled.
    pub cursor: Option<(web::HtmlElement, web::HtmlElement)>,
}

pub fn wire_pointer(w: PointerWiring) {
    wire_pointermove(&w);
    wire_click(&w);
    if w.cursor.is_some() {
        wire_hover(&w);
    }
    wire_magnetic(&w.document);
}

fn wire_pointermove(w: &PointerWiring) {
    let pending = w.pending.clone();
    if let Some(window) = web::window() {
        dom::listen(&window, "pointermove", move |ev: web::PointerEvent| {
            let p = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let mut q = pending.borrow_mut();
            // a burst between frames only needs its most recent positions
            if q.moves.len() == q.moves.inline_size() {
                q.moves.remove(0);
            }
            q.moves.push(p);
        });
    }
}

fn wire_click(w: &PointerWiring) {
    let pending = w.pending.clone();
    if let Some(window) = web::window() {
        dom::listen(&window, "click", move |ev: web::MouseEvent| {
            // clicks on page UI are not aimed at the scene
            if let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) {
                if el.closest("button, a, input, .modal-overlay, #command-center").ok().flatten().is_some() {
                    return;
                }
            }
            let p = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            pending.borrow_mut().clicks.push((p, ev.time_stamp()));
        });
    }
}

/// The label goes on the ring; the scale goes on the dot, whose per-frame
/// transform reads `--cursor-scale`.
fn apply_hover(dot: &web::HtmlElement, follower: &web::HtmlElement, hover: Option<Hover>) {
    let label = hover.map(|h| h.label).unwrap_or("");
    let scale = hover.map(|h| h.scale).unwrap_or(1.0);
    if let Ok(Some(el)) = follower.query_selector(".cursor-label") {
        el.set_text_content(Some(label));
    }
    dom::set_class(follower, "active", hover.is_some());
    dom::set_class(follower, "has-label", !label.is_empty());
    dom::set_style(dot, "--cursor-scale", &format!("{}", scale));
}

fn wire_hover(w: &PointerWiring) {
    let Some((dot, follower)) = w.cursor.clone() else {
        return;
    };
    let (dot_out, follower_out) = (dot.clone(), follower.clone());
    dom::listen(&w.document, "mouseover", move |ev: web::MouseEvent| {
        let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        // an explicit data-cursor label wins over the table
        if let Ok(Some(tagged)) = el.closest("[data-cursor]") {
            let label = tagged.get_attribute("data-cursor").unwrap_or_default();
            if let Ok(Some(l)) = follower.query_selector(".cursor-label") {
                l.set_text_content(Some(&label));
            }
            dom::set_class(&follower, "active", true);
            dom::set_class(&follower, "has-label", !label.is_empty());
            return;
        }
        let category = cursor::classify(|selector| el.closest(selector).ok().flatten().is_some());
        apply_hover(&dot, &follower, category.map(cursor::hover_for));
    });
    dom::listen(&w.document, "mouseout", move |_ev: web::MouseEvent| {
        apply_hover(&dot_out, &follower_out, None);
    });
}

fn wire_magnetic(document: &web::Document) {
    for el in dom::query_all(document, ".magnetic") {
        let target = el.clone();
        dom::listen(&el, "mousemove", move |ev: web::MouseEvent| {
            let rect = target.get_bounding_client_rect();
            let center = Vec2::new(
                (rect.left() + rect.width() / 2.0) as f32,
                (rect.top() + rect.height() / 2.0) as f32,
            );
            let pointer = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let off = magnetic_offset(pointer, center, MAGNETIC_PULL);
            dom::set_style(&target, "transform", &format!("translate({}px, {}px)", off.x, off.y));
        });
        let target = el.clone();
        dom::listen(&el, "mouseleave", move |_ev: web::MouseEvent| {
            dom::set_style(&target, "transform", "translate(0px, 0px)");
        });
    }
}
