use crate::constants::*;
use glam::Vec3;

/// Runtime tuning for every subsystem.
///
/// Defaults come from `constants.rs`. The web front-end builds one instance at
/// start-up and hands copies to the pieces that need them.
#[derive(Clone, Debug)]
pub struct Tuning {
    pub dot_smoothing: f32,
    pub ring_smoothing: f32,
    pub trail_cap: usize,
    pub trail_opacity_step: f32,
    pub trail_size_step: f32,

    pub time_step: f32,

    pub glitch_scroll_threshold_px: f64,
    pub glitch_scroll_gain: f32,
    pub glitch_hit_peak: f32,
    pub glitch_max: f32,
    pub glitch_window_ms: f64,

    pub click_window_ms: f64,
    pub clicks_to_start: u32,
    pub start_targets: usize,
    pub targets_per_hit: usize,
    pub spawn_half_size: Vec3,

    pub particle_count: usize,

    /// Try `assets/hero.glb` before falling back to the procedural knot.
    pub load_hero_model: bool,
    /// Bloom + liquid distortion; when off the scene renders straight to the surface.
    pub post_processing: bool,
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dot_smoothing: DOT_SMOOTHING,
            ring_smoothing: RING_SMOOTHING,
            trail_cap: TRAIL_CAP,
            trail_opacity_step: TRAIL_OPACITY_STEP,
            trail_size_step: TRAIL_SIZE_STEP,
            time_step: TIME_STEP,
            glitch_scroll_threshold_px: GLITCH_SCROLL_THRESHOLD_PX,
            glitch_scroll_gain: GLITCH_SCROLL_GAIN,
            glitch_hit_peak: GLITCH_HIT_PEAK,
            glitch_max: GLITCH_MAX,
            glitch_window_ms: GLITCH_WINDOW_MS,
            click_window_ms: CLICK_WINDOW_MS,
            clicks_to_start: CLICKS_TO_START,
            start_targets: START_TARGETS,
            targets_per_hit: TARGETS_PER_HIT,
            spawn_half_size: Vec3::from_array(SPAWN_HALF_SIZE),
            particle_count: PARTICLE_COUNT_DESKTOP,
            load_hero_model: false,
            post_processing: true,
            seed: 42,
        }
    }
}

impl Tuning {
    /// Defaults adjusted for the viewport the page was opened in.
    pub fn for_viewport(width_px: f64) -> Self {
        let mut t = Self::default();
        if width_px < MOBILE_MAX_VIEWPORT_PX {
            t.particle_count = PARTICLE_COUNT_MOBILE;
        }
        t
    }
}
