//! The per-frame coordinator.
//!
//! [`RenderLoop`] owns every piece of mutable visual state. Event handlers
//! queue their input; the frame callback drains the queue into
//! [`RenderLoop::click`] and friends, then calls [`RenderLoop::step`] and
//! submits the resulting state to the GPU.

use crate::audio::BandIntensities;
use crate::config::Tuning;
use crate::game::{GameEvent, MiniGame};
use crate::pointer::{Culled, PointerTracker};
use crate::scene::{HeroModel, SceneGraph};
use crate::scroll::{scene_scroll, ScrollSample};
use crate::theme::Theme;
use crate::uniforms::UniformBridge;
use glam::Vec2;
use rand::prelude::*;

/// Inputs sampled by the host for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInputs {
    pub now_ms: f64,
    pub scroll: ScrollSample,
    /// `None` when there is no running analyser.
    pub bands: Option<BandIntensities>,
}

/// Values recomputed every frame; nothing here outlives the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameState {
    pub elapsed: f32,
    pub pointer: Vec2,
    pub glitch: f32,
    pub bands: Option<BandIntensities>,
}

#[derive(Debug, Default)]
pub struct FrameReport {
    pub state: FrameState,
    /// Trail particles that expired this frame.
    pub culled_trail: Culled,
}

/// What a `pagehide` means for the running page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageExit {
    /// Kept in the back/forward cache: pause, and resume on `pageshow`.
    Cached,
    /// Unloading for good: release audio as well.
    Unload,
}

impl PageExit {
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            PageExit::Cached
        } else {
            PageExit::Unload
        }
    }

    /// A cached page comes back with `pageshow`, so its loop must restart.
    pub fn resumes(self) -> bool {
        self == PageExit::Cached
    }
}

pub struct RenderLoop {
    pub tuning: Tuning,
    pub pointer: PointerTracker,
    pub bridge: UniformBridge,
    pub scene: SceneGraph,
    pub game: MiniGame,
}

impl RenderLoop {
    pub fn new(tuning: Tuning, hero: HeroModel, viewport_w: f32, viewport_h: f32) -> Self {
        let mut rng = StdRng::seed_from_u64(tuning.seed);
        let aspect = viewport_w / viewport_h.max(1.0);
        Self {
            pointer: PointerTracker::new(&tuning, viewport_w, viewport_h),
            bridge: UniformBridge::new(&tuning),
            scene: SceneGraph::new(hero, &tuning, aspect, &mut rng),
            game: MiniGame::new(&tuning),
            tuning,
        }
    }

    pub fn resize(&mut self, viewport_w: f32, viewport_h: f32) {
        self.pointer.set_viewport(viewport_w, viewport_h);
        self.scene.set_aspect(viewport_w / viewport_h.max(1.0));
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.scene.set_theme(theme);
    }

    /// Pointer click at `ndc`. Ray-tests the game targets or the hero and
    /// applies the visual side effects of the result.
    pub fn click(&mut self, ndc: Vec2, now_ms: f64) -> Option<GameEvent> {
        let (ro, rd) = self.scene.camera.ray_from_ndc(ndc);
        let hero = &self.scene.hero;
        let event = self.game.handle_click(
            ro,
            rd,
            hero.transform.position,
            hero.pick_radius(),
            now_ms,
        )?;
        self.apply_game_event(event, now_ms);
        Some(event)
    }

    pub fn start_game(&mut self) -> Option<GameEvent> {
        self.game.start()
    }

    pub fn exit_game(&mut self) -> Option<GameEvent> {
        self.game.exit()
    }

    fn apply_game_event(&mut self, event: GameEvent, now_ms: f64) {
        match event {
            GameEvent::Hit { .. } => self.bridge.pulse_hit(now_ms),
            GameEvent::HeroPulse => self.scene.start_hero_pulse(now_ms),
            GameEvent::Started { .. } | GameEvent::Exited => {}
        }
    }

    /// Advance one frame. Order matters: later steps read earlier outputs.
    pub fn step(&mut self, inputs: &FrameInputs) -> FrameReport {
        // 1. cursor followers and trail
        let culled_trail = self.pointer.tick();

        // 2. audio bands (absent -> neutral defaults in step 4)
        let bands = inputs.bands;

        // 3. uniforms, glitch decay and scroll-bound scene values
        self.bridge
            .advance(self.pointer.ndc(), inputs.scroll.scroll_y, inputs.now_ms);
        self.scene
            .apply_scroll(&scene_scroll(inputs.scroll.progress()));

        // 4. audio-reactive scale and size
        self.scene.apply_audio(bands, inputs.now_ms);

        // 5. idle rotation
        self.scene.apply_ambient_motion();

        FrameReport {
            state: FrameState {
                elapsed: self.bridge.time(),
                pointer: self.bridge.pointer(),
                glitch: self.bridge.glitch(),
                bands,
            },
            culled_trail,
        }
    }
}
