// Sanity checks on tuning constants.

use folio_core::constants::*;
use folio_core::Tuning;

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_factors_are_fractions() {
    assert!(DOT_SMOOTHING > 0.0 && DOT_SMOOTHING <= 1.0);
    assert!(RING_SMOOTHING > 0.0 && RING_SMOOTHING <= 1.0);
    // the ring lags the dot
    assert!(RING_SMOOTHING < DOT_SMOOTHING);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn glitch_settings_are_consistent() {
    assert!(GLITCH_HIT_PEAK <= GLITCH_MAX);
    assert!(GLITCH_WINDOW_MS > 0.0);
    assert!(GLITCH_SCROLL_THRESHOLD_PX > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_moves_toward_scene() {
    assert!(CAMERA_Z_END < CAMERA_Z_START);
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_Z_END);
}

#[test]
fn mobile_viewport_uses_fewer_particles() {
    assert_eq!(Tuning::for_viewport(375.0).particle_count, PARTICLE_COUNT_MOBILE);
    assert_eq!(Tuning::for_viewport(1440.0).particle_count, PARTICLE_COUNT_DESKTOP);
}
