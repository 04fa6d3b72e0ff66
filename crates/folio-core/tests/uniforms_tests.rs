// Glitch pulse trigger and decay.

use folio_core::uniforms::UniformBridge;
use folio_core::Tuning;
use glam::Vec2;

fn bridge() -> (UniformBridge, Tuning) {
    let t = Tuning::default();
    (UniformBridge::new(&t), t)
}

#[test]
fn fast_scroll_triggers_pulse_that_decays_to_zero() {
    let (mut b, t) = bridge();
    b.advance(Vec2::ZERO, 0.0, 0.0);
    b.advance(Vec2::ZERO, 200.0, 16.0);
    let peak = b.glitch();
    assert!((peak - 200.0 * t.glitch_scroll_gain).abs() < 1e-5);

    let mut last = peak;
    let mut now = 16.0;
    while now < 16.0 + t.glitch_window_ms {
        now += 16.0;
        b.advance(Vec2::ZERO, 200.0, now);
        assert!(b.glitch() >= 0.0);
        assert!(b.glitch() <= last);
        last = b.glitch();
    }
    assert_eq!(b.glitch(), 0.0);
}

#[test]
fn slow_scroll_does_not_glitch() {
    let (mut b, t) = bridge();
    let mut y = 0.0;
    for i in 0..20 {
        y += t.glitch_scroll_threshold_px;
        b.advance(Vec2::ZERO, y, i as f64 * 16.0);
        assert_eq!(b.glitch(), 0.0);
    }
}

#[test]
fn pulse_strength_is_capped() {
    let (mut b, t) = bridge();
    b.advance(Vec2::ZERO, 0.0, 0.0);
    b.advance(Vec2::ZERO, 100_000.0, 16.0);
    assert_eq!(b.glitch(), t.glitch_max);
}

#[test]
fn hit_pulse_is_exactly_zero_after_window() {
    let (mut b, t) = bridge();
    b.advance(Vec2::ZERO, 0.0, 0.0);
    b.pulse_hit(10.0);
    assert_eq!(b.glitch(), t.glitch_hit_peak);
    b.advance(Vec2::ZERO, 0.0, 10.0 + t.glitch_window_ms);
    assert_eq!(b.glitch(), 0.0);
}

#[test]
fn weaker_trigger_does_not_cut_a_pulse_short() {
    let (mut b, t) = bridge();
    b.advance(Vec2::ZERO, 0.0, 0.0);
    b.pulse_hit(0.0);
    // 100px scroll is a weak pulse compared to the hit
    b.advance(Vec2::ZERO, 100.0, 20.0);
    let expected = t.glitch_hit_peak * (1.0 - (20.0 / t.glitch_window_ms) as f32);
    assert!((b.glitch() - expected).abs() < 1e-4);
}

#[test]
fn uniforms_mirror_pointer() {
    let (mut b, _) = bridge();
    b.advance(Vec2::new(0.25, -0.5), 0.0, 0.0);
    let u = b.uniforms();
    assert_eq!(u.pointer, [0.25, -0.5]);
    assert_eq!(u.glitch, 0.0);
}
