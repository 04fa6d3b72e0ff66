//! Hidden target-shooting mini-game.
//!
//! Idle until the hero is clicked three times in quick succession (or `/game`
//! is typed), then every click is ray-tested against the live targets.

use crate::config::Tuning;
use crate::constants::TARGET_HALF_EXTENT;
use crate::pick::{nearest_hit, ray_aabb, ray_sphere};
use glam::Vec3;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameTarget {
    pub id: u32,
    pub position: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Started { targets: usize },
    Hit { score: u32 },
    /// Hero was clicked but the entry sequence is not complete yet.
    HeroPulse,
    Exited,
}

/// Counts clicks that each land before the previous click's deadline.
#[derive(Clone, Debug)]
pub struct ClickSequence {
    count: u32,
    deadline_ms: Option<f64>,
    window_ms: f64,
    needed: u32,
}

impl ClickSequence {
    pub fn new(needed: u32, window_ms: f64) -> Self {
        Self {
            count: 0,
            deadline_ms: None,
            window_ms,
            needed: needed.max(1),
        }
    }

    /// Register a click; `true` when it completes the sequence.
    pub fn register(&mut self, now_ms: f64) -> bool {
        if let Some(deadline) = self.deadline_ms {
            if now_ms >= deadline {
                self.count = 0;
            }
        }
        self.count += 1;
        if self.count >= self.needed {
            self.reset();
            true
        } else {
            self.deadline_ms = Some(now_ms + self.window_ms);
            false
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.deadline_ms = None;
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

pub struct MiniGame {
    state: GameState,
    score: u32,
    targets: Vec<GameTarget>,
    clicks: ClickSequence,
    next_id: u32,
    start_targets: usize,
    targets_per_hit: usize,
    spawn_half: Vec3,
    rng: StdRng,
}

impl MiniGame {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            state: GameState::Idle,
            score: 0,
            targets: Vec::new(),
            clicks: ClickSequence::new(tuning.clicks_to_start, tuning.click_window_ms),
            next_id: 0,
            start_targets: tuning.start_targets,
            targets_per_hit: tuning.targets_per_hit,
            spawn_half: tuning.spawn_half_size,
            rng: StdRng::seed_from_u64(tuning.seed ^ 0x6A4E),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == GameState::Active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn targets(&self) -> &[GameTarget] {
        &self.targets
    }

    fn spawn(&mut self, n: usize) {
        for _ in 0..n {
            let h = self.spawn_half;
            let position = Vec3::new(
                self.rng.gen_range(-h.x..=h.x),
                self.rng.gen_range(-h.y..=h.y),
                self.rng.gen_range(-h.z..=h.z),
            );
            self.targets.push(GameTarget {
                id: self.next_id,
                position,
            });
            self.next_id = self.next_id.wrapping_add(1);
        }
    }

    /// Enter the game. No effect while already active.
    pub fn start(&mut self) -> Option<GameEvent> {
        if self.is_active() {
            return None;
        }
        self.state = GameState::Active;
        self.clicks.reset();
        self.spawn(self.start_targets);
        log::info!("[game] started targets={}", self.targets.len());
        Some(GameEvent::Started {
            targets: self.targets.len(),
        })
    }

    /// Leave the game, dropping every target and the score.
    pub fn exit(&mut self) -> Option<GameEvent> {
        if !self.is_active() {
            return None;
        }
        log::info!("[game] exit score={}", self.score);
        self.state = GameState::Idle;
        self.score = 0;
        self.targets.clear();
        Some(GameEvent::Exited)
    }

    /// A click that landed on the hero while idle.
    pub fn click_hero(&mut self, now_ms: f64) -> Option<GameEvent> {
        if self.is_active() {
            return None;
        }
        if self.clicks.register(now_ms) {
            self.start()
        } else {
            Some(GameEvent::HeroPulse)
        }
    }

    /// Ray-test the live targets; the nearest hit is removed and replaced.
    pub fn shoot(&mut self, ray_origin: Vec3, ray_dir: Vec3) -> Option<GameEvent> {
        if !self.is_active() {
            return None;
        }
        let half = Vec3::splat(TARGET_HALF_EXTENT);
        let (index, _) = nearest_hit(&self.targets, |t| {
            ray_aabb(ray_origin, ray_dir, t.position, half)
        })?;
        self.targets.swap_remove(index);
        self.score += 1;
        self.spawn(self.targets_per_hit);
        log::debug!("[game] hit score={} targets={}", self.score, self.targets.len());
        Some(GameEvent::Hit { score: self.score })
    }

    /// Route a pointer click: targets while active, the hero sphere while idle.
    pub fn handle_click(
        &mut self,
        ray_origin: Vec3,
        ray_dir: Vec3,
        hero_center: Vec3,
        hero_radius: f32,
        now_ms: f64,
    ) -> Option<GameEvent> {
        match self.state {
            GameState::Active => self.shoot(ray_origin, ray_dir),
            GameState::Idle => {
                ray_sphere(ray_origin, ray_dir, hero_center, hero_radius)?;
                self.click_hero(now_ms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_spawn_inside_box() {
        let t = Tuning::default();
        let mut g = MiniGame::new(&t);
        g.start();
        for target in g.targets() {
            let p = target.position.abs();
            assert!(p.x <= t.spawn_half_size.x && p.y <= t.spawn_half_size.y && p.z <= t.spawn_half_size.z);
        }
    }

    #[test]
    fn start_twice_does_not_respawn() {
        let mut g = MiniGame::new(&Tuning::default());
        assert!(g.start().is_some());
        assert!(g.start().is_none());
        assert_eq!(g.targets().len(), 5);
    }

    #[test]
    fn hero_clicks_ignored_while_active() {
        let mut g = MiniGame::new(&Tuning::default());
        g.start();
        assert_eq!(g.click_hero(0.0), None);
    }

    #[test]
    fn target_ids_are_unique() {
        let mut g = MiniGame::new(&Tuning::default());
        g.start();
        let mut ids: Vec<u32> = g.targets().iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}
