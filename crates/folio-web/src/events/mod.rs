//! DOM event wiring. Handlers never touch the scene; they queue input in
//! [`Pending`] and the next frame drains it.

mod keyboard;
mod pointer;
mod ui;

pub use keyboard::wire_keyboard;
pub use pointer::{wire_pointer, PointerWiring};
pub use ui::{wire_ui, UiWiring};

use folio_core::palette::Command;
use glam::Vec2;
use smallvec::SmallVec;

/// Requests raised by DOM handlers and applied inside the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiAction {
    Run(Command),
    ExitGame,
}

#[derive(Debug, Default)]
pub struct Pending {
    /// Raw pointer positions in CSS pixels, oldest first.
    pub moves: SmallVec<[Vec2; 8]>,
    /// Clicks in CSS pixels with their event timestamps (ms).
    pub clicks: SmallVec<[(Vec2, f64); 4]>,
    pub actions: SmallVec<[UiAction; 4]>,
    /// Viewport changed; reveal offsets and aspect must be recomputed.
    pub layout_dirty: bool,
}

impl Pending {
    pub fn take(&mut self) -> Pending {
        std::mem::take(self)
    }
}
