// Shared visual and interaction tuning constants.
//
// Anything a designer may want to retune lives in `Tuning`; these are the
// defaults it is built from plus fixed layout values.

// Cursor smoothing factors (fraction of remaining distance covered per tick)
pub const DOT_SMOOTHING: f32 = 0.4;
pub const RING_SMOOTHING: f32 = 0.12;

// Cursor trail
pub const TRAIL_CAP: usize = 20;
pub const TRAIL_OPACITY_STEP: f32 = 0.03;
pub const TRAIL_SIZE_STEP: f32 = 0.2;
pub const TRAIL_SIZE_MIN: f32 = 5.0;
pub const TRAIL_SIZE_SPAN: f32 = 10.0;

// Custom cursor is only shown on desktop-sized viewports
pub const CURSOR_MIN_VIEWPORT_PX: f64 = 769.0;

// Shader clock
pub const TIME_STEP: f32 = 0.01; // added to uTime every frame

// Glitch pulse
pub const GLITCH_SCROLL_THRESHOLD_PX: f64 = 80.0; // scroll delta per frame that triggers a pulse
pub const GLITCH_SCROLL_GAIN: f32 = 0.02; // pulse height per pixel of scroll delta
pub const GLITCH_HIT_PEAK: f32 = 5.0;
pub const GLITCH_MAX: f32 = 5.0;
pub const GLITCH_WINDOW_MS: f64 = 200.0;

// Mini-game
pub const CLICK_WINDOW_MS: f64 = 500.0;
pub const CLICKS_TO_START: u32 = 3;
pub const START_TARGETS: usize = 5;
pub const TARGETS_PER_HIT: usize = 2;
pub const TARGET_HALF_EXTENT: f32 = 0.5; // unit cube
pub const SPAWN_HALF_SIZE: [f32; 3] = [10.0, 7.5, 5.0];

// Hero feedback pulse (scale 1 -> PEAK -> 1)
pub const HERO_PULSE_PEAK: f32 = 1.5;
pub const HERO_PULSE_HALF_MS: f64 = 200.0;

// Audio reactivity
pub const FFT_SIZE: u32 = 256;
pub const HERO_BASS_GAIN: f32 = 0.3;
pub const PARTICLE_BASE_SIZE: f32 = 0.05;
pub const PARTICLE_TREBLE_GAIN: f32 = 0.1;

// Ambient rotation per frame (radians)
pub const HERO_SPIN_Y: f32 = 0.005;
pub const HERO_SPIN_Z: f32 = 0.002;
pub const PARTICLE_SPIN_Y: f32 = 0.001;
pub const PARTICLE_SPIN_X: f32 = 0.0005;

// Particle field
pub const PARTICLE_COUNT_DESKTOP: usize = 3000;
pub const PARTICLE_COUNT_MOBILE: usize = 800;
pub const PARTICLE_SPREAD: f32 = 60.0;
pub const MOBILE_MAX_VIEWPORT_PX: f64 = 768.0;

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z_START: f32 = 15.0;
pub const CAMERA_Z_END: f32 = 5.0;

// Scroll-bound hero motion
pub const HERO_SCROLL_TURNS: f32 = 2.0; // full turns about Y over the page
pub const HERO_ORBIT_X: f32 = 2.0;
pub const HERO_ORBIT_Y: f32 = 1.0;

// Reveal blocks start at 80% of the viewport and finish at 40%
pub const REVEAL_START_FRAC: f64 = 0.8;
pub const REVEAL_SPAN_FRAC: f64 = 0.4;
pub const REVEAL_OFFSET_PX: f32 = 100.0;

// Experience timeline: the line grows while the container passes this mark
pub const TIMELINE_LINE_ANCHOR_FRAC: f64 = 0.8;
// Timeline nodes slide in from the right once their top crosses 85%
pub const TIMELINE_NODE_TRIGGER_FRAC: f64 = 0.85;
pub const TIMELINE_NODE_OFFSET_PX: f32 = 100.0;
pub const TIMELINE_NODE_TILT_DEG: f32 = -20.0;
pub const TIMELINE_NODE_FADE_MS: u32 = 1000;
// Reveal text unblurs and tilts upright once its top crosses 90%
pub const REVEAL_TEXT_TRIGGER_FRAC: f64 = 0.9;
pub const REVEAL_TEXT_OFFSET_PX: f32 = 30.0;
pub const REVEAL_TEXT_BLUR_PX: f32 = 10.0;
pub const REVEAL_TEXT_TILT_DEG: f32 = 15.0;
pub const REVEAL_TEXT_FADE_MS: u32 = 1200;

// Page-transition shutter (ms)
pub const SHUTTER_COVER_MS: i32 = 500;
pub const SHUTTER_HOLD_MS: i32 = 200;
pub const SHUTTER_UNCOVER_MS: i32 = 500;

// Background surface
pub const PLANE_SIZE: f32 = 80.0;
pub const PLANE_SEGMENTS: u32 = 64;
pub const PLANE_TILT_X: f32 = -std::f32::consts::PI * 0.1;

// Procedural hero (torus knot)
pub const KNOT_RADIUS: f32 = 1.5;
pub const KNOT_TUBE: f32 = 0.4;
pub const KNOT_TUBULAR_SEGMENTS: u32 = 100;
pub const KNOT_RADIAL_SEGMENTS: u32 = 16;
pub const KNOT_P: u32 = 2;
pub const KNOT_Q: u32 = 3;
pub const LOADED_HERO_SCALE: f32 = 2.0;

// Loading screen counter
pub const LOADING_STEP: f32 = 1.5;
pub const LOADING_TICK_MS: i32 = 16;

// Magnetic buttons follow the pointer by this fraction of the offset
pub const MAGNETIC_PULL: f32 = 0.4;

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.6;
pub const BLOOM_THRESHOLD: f32 = 0.3;
pub const LIQUID_STRENGTH: f32 = 0.05;
