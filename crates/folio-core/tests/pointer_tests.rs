// Cursor followers and the trail particle pool.

use folio_core::constants::TRAIL_CAP;
use folio_core::pointer::{Follower, PointerTracker};
use folio_core::Tuning;
use glam::Vec2;

#[test]
fn followers_converge_at_their_own_rate() {
    let mut t = PointerTracker::new(&Tuning::default(), 800.0, 600.0);
    t.on_pointer_move(100.0, 0.0);
    t.tick();
    assert!((t.dot.pos.x - 40.0).abs() < 1e-4);
    assert!((t.ring.pos.x - 12.0).abs() < 1e-4);
    for _ in 0..200 {
        t.tick();
    }
    assert!((t.dot.pos - Vec2::new(100.0, 0.0)).length() < 1e-3);
    assert!((t.ring.pos - Vec2::new(100.0, 0.0)).length() < 1e-3);
}

#[test]
fn follower_never_overshoots() {
    let mut f = Follower::new(0.4);
    let target = Vec2::new(10.0, 10.0);
    for _ in 0..50 {
        f.step(target);
        assert!(f.pos.x <= target.x && f.pos.y <= target.y);
    }
}

#[test]
fn trail_is_capped() {
    let mut t = PointerTracker::new(&Tuning::default(), 800.0, 600.0);
    for i in 0..(TRAIL_CAP + 10) {
        t.on_pointer_move(i as f32, i as f32);
    }
    assert_eq!(t.trail().len(), TRAIL_CAP);
    assert!(t.on_pointer_move(0.0, 0.0).is_none());
}

#[test]
fn trail_particles_fade_and_are_culled() {
    let mut t = PointerTracker::new(&Tuning::default(), 800.0, 600.0);
    let id = t.on_pointer_move(5.0, 5.0).map(|p| p.id).unwrap();
    let mut culled = Vec::new();
    for _ in 0..40 {
        culled.extend(t.tick());
    }
    assert!(t.trail().is_empty());
    assert_eq!(culled, vec![id]);
}

#[test]
fn trail_opacity_stays_positive_while_alive() {
    let mut t = PointerTracker::new(&Tuning::default(), 800.0, 600.0);
    t.on_pointer_move(1.0, 1.0);
    for _ in 0..20 {
        t.tick();
        for p in t.trail() {
            assert!(p.opacity > 0.0 && p.size >= 0.0);
        }
    }
}
