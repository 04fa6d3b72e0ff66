// Mini-game entry sequence, scoring and exit.

use folio_core::game::{ClickSequence, GameEvent, GameState, MiniGame};
use folio_core::Tuning;
use glam::Vec3;

fn game() -> MiniGame {
    MiniGame::new(&Tuning::default())
}

#[test]
fn three_quick_hero_clicks_start_the_game() {
    let mut g = game();
    assert_eq!(g.click_hero(0.0), Some(GameEvent::HeroPulse));
    assert_eq!(g.click_hero(100.0), Some(GameEvent::HeroPulse));
    assert_eq!(g.click_hero(200.0), Some(GameEvent::Started { targets: 5 }));
    assert_eq!(g.state(), GameState::Active);
    assert_eq!(g.targets().len(), 5);
}

#[test]
fn slow_clicks_do_not_start_the_game() {
    let mut g = game();
    g.click_hero(0.0);
    g.click_hero(600.0);
    assert_eq!(g.click_hero(700.0), Some(GameEvent::HeroPulse));
    assert_eq!(g.state(), GameState::Idle);
    assert!(g.targets().is_empty());
}

#[test]
fn click_exactly_at_deadline_restarts_count() {
    let mut seq = ClickSequence::new(3, 500.0);
    assert!(!seq.register(0.0));
    assert!(!seq.register(500.0));
    assert_eq!(seq.count(), 1);
}

#[test]
fn hit_scores_and_replaces_target() {
    let mut g = game();
    g.start();
    let target = g.targets()[0].position;
    let eye = Vec3::new(0.0, 0.0, 15.0);
    let ev = g.shoot(eye, (target - eye).normalize());
    assert_eq!(ev, Some(GameEvent::Hit { score: 1 }));
    assert_eq!(g.score(), 1);
    // one removed, two spawned
    assert_eq!(g.targets().len(), 6);
}

#[test]
fn miss_changes_nothing() {
    let mut g = game();
    g.start();
    // pointing away from every target
    let ev = g.shoot(Vec3::new(0.0, 0.0, 15.0), Vec3::Z);
    assert_eq!(ev, None);
    assert_eq!(g.score(), 0);
    assert_eq!(g.targets().len(), 5);
}

#[test]
fn exit_clears_targets_and_score() {
    let mut g = game();
    g.start();
    let target = g.targets()[0].position;
    let eye = Vec3::new(0.0, 0.0, 15.0);
    g.shoot(eye, (target - eye).normalize());
    assert_eq!(g.exit(), Some(GameEvent::Exited));
    assert_eq!(g.state(), GameState::Idle);
    assert_eq!(g.score(), 0);
    assert!(g.targets().is_empty());
    assert_eq!(g.exit(), None);
}

#[test]
fn idle_click_must_hit_the_hero() {
    let mut g = game();
    let eye = Vec3::new(0.0, 0.0, 15.0);
    let miss = g.handle_click(eye, Vec3::X, Vec3::ZERO, 2.0, 0.0);
    assert_eq!(miss, None);
    let hit = g.handle_click(eye, -Vec3::Z, Vec3::ZERO, 2.0, 0.0);
    assert_eq!(hit, Some(GameEvent::HeroPulse));
}

#[test]
fn spawn_counts_follow_tuning() {
    let t = Tuning {
        start_targets: 2,
        targets_per_hit: 0,
        ..Tuning::default()
    };
    let mut g = MiniGame::new(&t);
    assert_eq!(g.start(), Some(GameEvent::Started { targets: 2 }));
    let target = g.targets()[0].position;
    let eye = Vec3::new(0.0, 0.0, 15.0);
    g.shoot(eye, (target - eye).normalize());
    assert_eq!(g.targets().len(), 1);
}
