//! Pointer tracking for the custom cursor.
//!
//! Raw pointer events only overwrite the target position; all motion happens
//! in [`PointerTracker::tick`], once per frame.

use crate::config::Tuning;
use crate::constants::{TRAIL_SIZE_MIN, TRAIL_SIZE_SPAN};
use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;

/// Exponentially smoothed position chasing a target.
#[derive(Clone, Copy, Debug)]
pub struct Follower {
    pub pos: Vec2,
    k: f32,
}

impl Follower {
    /// `k` is clamped to (0, 1] so the follower can never overshoot.
    pub fn new(k: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            k: k.clamp(f32::EPSILON, 1.0),
        }
    }

    #[inline]
    pub fn step(&mut self, target: Vec2) {
        self.pos += (target - self.pos) * self.k;
    }
}

#[derive(Clone, Debug)]
pub struct TrailParticle {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub opacity: f32,
}

impl TrailParticle {
    fn age(&mut self, opacity_step: f32, size_step: f32) {
        self.opacity -= opacity_step;
        self.size = (self.size - size_step).max(0.0);
    }
}

/// Particles that died during a tick; the web layer drops their DOM nodes.
pub type Culled = SmallVec<[u32; 4]>;

pub struct PointerTracker {
    target: Vec2,
    viewport: Vec2,
    pub dot: Follower,
    pub ring: Follower,
    trail: Vec<TrailParticle>,
    trail_cap: usize,
    opacity_step: f32,
    size_step: f32,
    next_id: u32,
    rng: StdRng,
}

impl PointerTracker {
    pub fn new(tuning: &Tuning, viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            target: Vec2::ZERO,
            viewport: Vec2::new(viewport_w.max(1.0), viewport_h.max(1.0)),
            dot: Follower::new(tuning.dot_smoothing),
            ring: Follower::new(tuning.ring_smoothing),
            trail: Vec::with_capacity(tuning.trail_cap),
            trail_cap: tuning.trail_cap,
            opacity_step: tuning.trail_opacity_step,
            size_step: tuning.trail_size_step,
            next_id: 0,
            rng: StdRng::seed_from_u64(tuning.seed ^ 0x5EED_C0DE),
        }
    }

    pub fn set_viewport(&mut self, w: f32, h: f32) {
        self.viewport = Vec2::new(w.max(1.0), h.max(1.0));
    }

    /// Record a raw pointer position in CSS pixels, spawning a trail
    /// particle when below the cap. Returns the new particle, if any.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> Option<&TrailParticle> {
        self.target = Vec2::new(x, y);
        if self.trail.len() >= self.trail_cap {
            return None;
        }
        let size = TRAIL_SIZE_MIN + self.rng.gen::<f32>() * TRAIL_SIZE_SPAN;
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.trail.push(TrailParticle {
            id,
            pos: self.target,
            size,
            opacity: 1.0,
        });
        self.trail.last()
    }

    /// Advance both followers and age the trail. Particles at or below zero
    /// opacity are removed and their ids returned.
    pub fn tick(&mut self) -> Culled {
        self.dot.step(self.target);
        self.ring.step(self.target);

        let (opacity_step, size_step) = (self.opacity_step, self.size_step);
        let mut culled = Culled::new();
        self.trail.retain_mut(|p| {
            p.age(opacity_step, size_step);
            if p.opacity <= 0.0 {
                culled.push(p.id);
                false
            } else {
                true
            }
        });
        culled
    }

    /// Latest raw pointer in normalized device coordinates, y up.
    pub fn ndc(&self) -> Vec2 {
        self.to_ndc(self.target)
    }

    /// CSS pixels to normalized device coordinates for the current viewport.
    pub fn to_ndc(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            (px.x / self.viewport.x) * 2.0 - 1.0,
            -((px.y / self.viewport.y) * 2.0 - 1.0),
        )
    }

    pub fn trail(&self) -> &[TrailParticle] {
        &self.trail
    }
}

/// Offset applied to a magnetic element while the pointer hovers it.
#[inline]
pub fn magnetic_offset(pointer: Vec2, element_center: Vec2, pull: f32) -> Vec2 {
    (pointer - element_center) * pull
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_smoothing_snaps_to_target() {
        let mut f = Follower::new(1.0);
        f.step(Vec2::new(3.0, -2.0));
        assert_eq!(f.pos, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn ndc_maps_viewport_corners() {
        let mut t = PointerTracker::new(&Tuning::default(), 200.0, 100.0);
        t.on_pointer_move(0.0, 0.0);
        assert_eq!(t.ndc(), Vec2::new(-1.0, 1.0));
        t.on_pointer_move(200.0, 100.0);
        assert_eq!(t.ndc(), Vec2::new(1.0, -1.0));
        t.on_pointer_move(100.0, 50.0);
        assert_eq!(t.ndc(), Vec2::ZERO);
    }

    #[test]
    fn trail_sizes_stay_in_range() {
        let mut t = PointerTracker::new(&Tuning::default(), 800.0, 600.0);
        for i in 0..10 {
            t.on_pointer_move(i as f32, 0.0);
        }
        for p in t.trail() {
            assert!(p.size >= TRAIL_SIZE_MIN && p.size <= TRAIL_SIZE_MIN + TRAIL_SIZE_SPAN);
        }
    }

    #[test]
    fn magnetic_offset_is_scaled_delta() {
        let off = magnetic_offset(Vec2::new(110.0, 90.0), Vec2::new(100.0, 100.0), 0.4);
        assert!((off - Vec2::new(4.0, -4.0)).length() < 1e-5);
    }
}
