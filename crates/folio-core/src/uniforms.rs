//! Per-frame scalars shared by the background surface and the post chain.

use crate::config::Tuning;
use glam::Vec2;

/// Uniform block consumed by `background.wgsl` and the liquid pass.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceUniforms {
    pub pointer: [f32; 2],
    pub time: f32,
    pub glitch: f32,
}

/// Linear decay from `peak` to zero over `window_ms`.
#[derive(Clone, Copy, Debug)]
struct GlitchPulse {
    peak: f32,
    started_ms: f64,
}

impl GlitchPulse {
    fn value(&self, now_ms: f64, window_ms: f64) -> f32 {
        let age = now_ms - self.started_ms;
        if age >= window_ms || window_ms <= 0.0 {
            return 0.0;
        }
        let remaining = (1.0 - (age.max(0.0) / window_ms)) as f32;
        (self.peak * remaining).max(0.0)
    }
}

pub struct UniformBridge {
    time: f32,
    pointer: Vec2,
    glitch: f32,
    pulse: Option<GlitchPulse>,
    prev_scroll_y: Option<f64>,

    time_step: f32,
    scroll_threshold_px: f64,
    scroll_gain: f32,
    hit_peak: f32,
    max: f32,
    window_ms: f64,
}

impl UniformBridge {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            time: 0.0,
            pointer: Vec2::ZERO,
            glitch: 0.0,
            pulse: None,
            prev_scroll_y: None,
            time_step: tuning.time_step,
            scroll_threshold_px: tuning.glitch_scroll_threshold_px,
            scroll_gain: tuning.glitch_scroll_gain,
            hit_peak: tuning.glitch_hit_peak,
            max: tuning.glitch_max,
            window_ms: tuning.glitch_window_ms,
        }
    }

    /// One frame: tick the clock, copy the pointer, check the scroll delta and
    /// decay the glitch scalar.
    pub fn advance(&mut self, pointer_ndc: Vec2, scroll_y: f64, now_ms: f64) {
        self.time += self.time_step;
        self.pointer = pointer_ndc;

        if let Some(prev) = self.prev_scroll_y {
            let delta = (scroll_y - prev).abs();
            if delta > self.scroll_threshold_px {
                let strength = (delta as f32 * self.scroll_gain).min(self.max);
                self.trigger(strength, now_ms);
            }
        }
        self.prev_scroll_y = Some(scroll_y);

        self.decay(now_ms);
    }

    /// Glitch pulse for a mini-game hit.
    pub fn pulse_hit(&mut self, now_ms: f64) {
        self.trigger(self.hit_peak, now_ms);
        self.decay(now_ms);
    }

    fn trigger(&mut self, strength: f32, now_ms: f64) {
        let current = self.current(now_ms);
        if strength > current {
            log::debug!("[glitch] pulse {:.2}", strength);
            self.pulse = Some(GlitchPulse {
                peak: strength.min(self.max),
                started_ms: now_ms,
            });
        }
    }

    fn current(&self, now_ms: f64) -> f32 {
        self.pulse
            .map(|p| p.value(now_ms, self.window_ms))
            .unwrap_or(0.0)
    }

    fn decay(&mut self, now_ms: f64) {
        self.glitch = self.current(now_ms);
        if self.glitch == 0.0 {
            self.pulse = None;
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn glitch(&self) -> f32 {
        self.glitch
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn uniforms(&self) -> SurfaceUniforms {
        SurfaceUniforms {
            pointer: self.pointer.to_array(),
            time: self.time,
            glitch: self.glitch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_advances_by_fixed_step() {
        let t = Tuning::default();
        let mut b = UniformBridge::new(&t);
        for i in 0..10 {
            b.advance(Vec2::ZERO, 0.0, i as f64 * 16.0);
        }
        assert!((b.time() - 10.0 * t.time_step).abs() < 1e-6);
    }

    #[test]
    fn first_frame_never_glitches() {
        let mut b = UniformBridge::new(&Tuning::default());
        b.advance(Vec2::ZERO, 5000.0, 0.0);
        assert_eq!(b.glitch(), 0.0);
    }

    #[test]
    fn uniform_block_is_16_bytes() {
        assert_eq!(std::mem::size_of::<SurfaceUniforms>(), 16);
    }
}
