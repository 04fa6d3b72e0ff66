// One full frame through the coordinator.

use folio_core::constants::{CAMERA_Z_END, HERO_SPIN_Y, PARTICLE_BASE_SIZE};
use folio_core::{
    BandIntensities, FrameInputs, GameEvent, HeroModel, PageExit, RenderLoop, ScrollSample, Theme,
    Tuning,
};
use glam::{Vec2, Vec3};

fn render_loop() -> RenderLoop {
    let tuning = Tuning {
        particle_count: 64,
        ..Tuning::default()
    };
    RenderLoop::new(tuning, HeroModel::Unavailable, 1280.0, 720.0)
}

fn inputs(now_ms: f64, scroll_y: f64) -> FrameInputs {
    FrameInputs {
        now_ms,
        scroll: ScrollSample {
            scroll_y,
            doc_height: 4000.0,
            viewport_height: 720.0,
        },
        bands: None,
    }
}

fn project(rl: &RenderLoop, p: Vec3) -> Vec2 {
    let clip = rl.scene.camera.view_proj() * p.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

#[test]
fn step_without_audio_uses_neutral_values() {
    let mut rl = render_loop();
    let report = rl.step(&inputs(0.0, 0.0));
    assert_eq!(report.state.bands, None);
    assert_eq!(report.state.glitch, 0.0);
    assert_eq!(rl.scene.particles.size, PARTICLE_BASE_SIZE);
    assert_eq!(rl.scene.hero.transform.scale, Vec3::ONE);
}

#[test]
fn step_applies_audio_scroll_and_spin() {
    let mut rl = render_loop();
    let mut i = inputs(0.0, 3280.0);
    i.bands = Some(BandIntensities {
        low: 0.5,
        mid: 0.5,
        high: 0.5,
    });
    let report = rl.step(&i);
    assert_eq!(report.state.bands, i.bands);
    assert!(rl.scene.particles.size > PARTICLE_BASE_SIZE);
    assert!(rl.scene.hero.transform.scale.x > 1.0);
    assert_eq!(rl.scene.camera.eye.z, CAMERA_Z_END);
    let yaw = 4.0 * std::f32::consts::PI + HERO_SPIN_Y;
    assert!((rl.scene.hero.transform.rotation.y - yaw).abs() < 1e-4);
}

#[test]
fn pointer_flows_into_uniforms() {
    let mut rl = render_loop();
    rl.pointer.on_pointer_move(1280.0, 0.0);
    let report = rl.step(&inputs(0.0, 0.0));
    assert_eq!(report.state.pointer, Vec2::new(1.0, 1.0));
}

#[test]
fn elapsed_grows_every_frame() {
    let mut rl = render_loop();
    let a = rl.step(&inputs(0.0, 0.0)).state.elapsed;
    let b = rl.step(&inputs(16.0, 0.0)).state.elapsed;
    assert!(b > a);
}

#[test]
fn triple_click_on_hero_starts_game_and_hit_glitches() {
    let mut rl = render_loop();
    rl.step(&inputs(0.0, 0.0));
    let hero = project(&rl, rl.scene.hero.transform.position);

    assert_eq!(rl.click(hero, 0.0), Some(GameEvent::HeroPulse));
    assert!(rl.scene.hero.is_pulsing());
    assert_eq!(rl.click(hero, 100.0), Some(GameEvent::HeroPulse));
    assert_eq!(rl.click(hero, 200.0), Some(GameEvent::Started { targets: 5 }));
    assert!(rl.game.is_active());

    let target = project(&rl, rl.game.targets()[0].position);
    assert_eq!(rl.click(target, 300.0), Some(GameEvent::Hit { score: 1 }));
    assert_eq!(rl.bridge.glitch(), rl.tuning.glitch_hit_peak);

    let report = rl.step(&inputs(300.0 + rl.tuning.glitch_window_ms, 0.0));
    assert_eq!(report.state.glitch, 0.0);

    assert_eq!(rl.exit_game(), Some(GameEvent::Exited));
    assert_eq!(rl.game.score(), 0);
    assert!(rl.game.targets().is_empty());
}

#[test]
fn game_command_while_active_is_noop() {
    let mut rl = render_loop();
    assert!(rl.start_game().is_some());
    assert!(rl.start_game().is_none());
    assert_eq!(rl.game.targets().len(), 5);
}

#[test]
fn theme_switch_recolours_scene() {
    let mut rl = render_loop();
    rl.set_theme(Theme::Minimalist);
    assert_eq!(rl.scene.theme, Theme::Minimalist);
    assert_eq!(rl.scene.particles.color, Theme::Minimalist.particle_color());
}

#[test]
fn back_forward_cache_pauses_instead_of_tearing_down() {
    let cached = PageExit::from_persisted(true);
    assert_eq!(cached, PageExit::Cached);
    assert!(cached.resumes());

    let unload = PageExit::from_persisted(false);
    assert_eq!(unload, PageExit::Unload);
    assert!(!unload.resumes());
}
