//! Scene graph: what gets drawn and where it sits this frame.
//!
//! Topology is fixed after construction. Game targets live in
//! [`crate::game::MiniGame`] and are drawn on the `Targets` layer.

use crate::audio::BandIntensities;
use crate::camera::Camera;
use crate::config::Tuning;
use crate::constants::*;
use crate::mesh::{self, MeshData};
use crate::scroll::SceneScroll;
use crate::theme::Theme;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::prelude::*;

/// Outcome of the one-shot hero model fetch.
#[derive(Debug)]
pub enum HeroModel {
    Loaded(MeshData),
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroSource {
    Procedural,
    Loaded,
}

/// Draw order, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Background,
    Hero,
    Particles,
    Targets,
    Ui,
}

pub const LAYER_ORDER: [Layer; 5] = [
    Layer::Background,
    Layer::Hero,
    Layer::Particles,
    Layer::Targets,
    Layer::Ui,
];

#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles applied in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

/// Click feedback: scale ramps 1 -> peak -> 1.
#[derive(Clone, Copy, Debug)]
pub struct ScalePulse {
    started_ms: f64,
}

impl ScalePulse {
    pub fn new(now_ms: f64) -> Self {
        Self { started_ms: now_ms }
    }

    /// `None` once the pulse is over.
    pub fn factor(&self, now_ms: f64) -> Option<f32> {
        let age = (now_ms - self.started_ms).max(0.0);
        let half = HERO_PULSE_HALF_MS;
        if age >= half * 2.0 {
            return None;
        }
        let t = if age < half { age / half } else { 2.0 - age / half };
        Some(1.0 + (HERO_PULSE_PEAK - 1.0) * t as f32)
    }
}

pub struct BackgroundSurface {
    pub mesh: MeshData,
    pub transform: Transform,
}

pub struct HeroObject {
    pub source: HeroSource,
    pub mesh: MeshData,
    pub base_scale: f32,
    pub transform: Transform,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    /// Accumulated idle spin.
    spin: Vec3,
    /// Rotation about Y bound to scroll progress.
    scroll_yaw: f32,
    pulse: Option<ScalePulse>,
}

impl HeroObject {
    fn from_model(model: HeroModel) -> Self {
        let (source, mesh, base_scale) = match model {
            HeroModel::Loaded(mesh) => (HeroSource::Loaded, mesh, LOADED_HERO_SCALE),
            HeroModel::Unavailable => (
                HeroSource::Procedural,
                mesh::torus_knot(
                    KNOT_RADIUS,
                    KNOT_TUBE,
                    KNOT_TUBULAR_SEGMENTS,
                    KNOT_RADIAL_SEGMENTS,
                    KNOT_P,
                    KNOT_Q,
                ),
                1.0,
            ),
        };
        Self {
            source,
            mesh,
            base_scale,
            transform: Transform {
                scale: Vec3::splat(base_scale),
                ..Default::default()
            },
            emissive: Theme::default().accent_color(),
            emissive_intensity: 0.3,
            spin: Vec3::ZERO,
            scroll_yaw: 0.0,
            pulse: None,
        }
    }

    /// Sphere used for click picking, in world units.
    pub fn pick_radius(&self) -> f32 {
        self.mesh.bounding_radius() * self.transform.scale.max_element()
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse.is_some()
    }

    fn sync_rotation(&mut self) {
        self.transform.rotation = self.spin + Vec3::new(0.0, self.scroll_yaw, 0.0);
    }
}

pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub transform: Transform,
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

impl ParticleField {
    fn scatter(count: usize, spread: f32, color: [f32; 3], rng: &mut impl Rng) -> Self {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * spread,
                    (rng.gen::<f32>() - 0.5) * spread,
                    (rng.gen::<f32>() - 0.5) * spread,
                )
            })
            .collect();
        Self {
            positions,
            transform: Transform::default(),
            size: PARTICLE_BASE_SIZE,
            color,
            opacity: 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Light {
    Ambient {
        color: [f32; 3],
        intensity: f32,
    },
    Directional {
        position: Vec3,
        color: [f32; 3],
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: [f32; 3],
        intensity: f32,
        range: f32,
    },
}

fn default_lights() -> Vec<Light> {
    vec![
        Light::Ambient {
            color: [1.0, 1.0, 1.0],
            intensity: 0.4,
        },
        Light::Directional {
            position: Vec3::new(2.0, 5.0, 5.0),
            color: [1.0, 1.0, 1.0],
            intensity: 2.0,
        },
        // rim lights
        Light::Point {
            position: Vec3::new(-5.0, 2.0, 5.0),
            color: [1.0, 0.2, 0.4],
            intensity: 2.0,
            range: 20.0,
        },
        Light::Point {
            position: Vec3::new(5.0, -2.0, 5.0),
            color: [0.0, 0.83, 1.0],
            intensity: 2.0,
            range: 20.0,
        },
    ]
}

pub struct SceneGraph {
    pub background: BackgroundSurface,
    pub hero: HeroObject,
    pub particles: ParticleField,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub theme: Theme,
}

impl SceneGraph {
    /// Build the scene once. The hero source decided here is never revisited.
    pub fn new(hero: HeroModel, tuning: &Tuning, aspect: f32, rng: &mut impl Rng) -> Self {
        let theme = Theme::default();
        let hero = HeroObject::from_model(hero);
        log::info!(
            "[scene] hero={:?} triangles={} particles={}",
            hero.source,
            hero.mesh.triangle_count(),
            tuning.particle_count
        );
        Self {
            background: BackgroundSurface {
                mesh: mesh::plane_grid(PLANE_SIZE, PLANE_SEGMENTS),
                transform: Transform {
                    rotation: Vec3::new(PLANE_TILT_X, 0.0, 0.0),
                    ..Default::default()
                },
            },
            hero,
            particles: ParticleField::scatter(
                tuning.particle_count,
                PARTICLE_SPREAD,
                theme.particle_color(),
                rng,
            ),
            lights: default_lights(),
            camera: Camera::new(aspect),
            theme,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.particles.color = theme.particle_color();
        self.hero.emissive = theme.accent_color();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect.max(1e-3);
    }

    /// Scroll-bound camera dolly and hero orbit.
    pub fn apply_scroll(&mut self, s: &SceneScroll) {
        self.camera.set_z(s.camera_z);
        self.hero.scroll_yaw = s.hero_yaw;
        self.hero.transform.position = Vec3::new(s.hero_offset.x, s.hero_offset.y, 0.0);
        self.hero.sync_rotation();
    }

    pub fn start_hero_pulse(&mut self, now_ms: f64) {
        self.hero.pulse = Some(ScalePulse::new(now_ms));
    }

    /// Hero scale from bass and the click pulse; particle size from treble.
    /// Without analyser data the base values are used.
    pub fn apply_audio(&mut self, bands: Option<BandIntensities>, now_ms: f64) {
        let pulse = match self.hero.pulse.and_then(|p| p.factor(now_ms)) {
            Some(f) => f,
            None => {
                self.hero.pulse = None;
                1.0
            }
        };
        let (bass_gain, size) = match bands {
            Some(b) => (
                1.0 + b.low * HERO_BASS_GAIN,
                PARTICLE_BASE_SIZE + b.high * PARTICLE_TREBLE_GAIN,
            ),
            None => (1.0, PARTICLE_BASE_SIZE),
        };
        self.hero.transform.scale = Vec3::splat(self.hero.base_scale * bass_gain * pulse);
        self.hero.emissive_intensity = 0.3 + bands.map(|b| b.mid * 0.7).unwrap_or(0.0);
        self.particles.size = size;
    }

    /// Constant idle rotation, independent of audio and scroll.
    pub fn apply_ambient_motion(&mut self) {
        self.hero.spin.y += HERO_SPIN_Y;
        self.hero.spin.z += HERO_SPIN_Z;
        self.hero.sync_rotation();
        self.particles.transform.rotation.y += PARTICLE_SPIN_Y;
        self.particles.transform.rotation.x += PARTICLE_SPIN_X;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn scene() -> SceneGraph {
        let mut rng = StdRng::seed_from_u64(7);
        SceneGraph::new(HeroModel::Unavailable, &Tuning::default(), 1.5, &mut rng)
    }

    #[test]
    fn unavailable_model_falls_back_to_knot() {
        let s = scene();
        assert_eq!(s.hero.source, HeroSource::Procedural);
        assert_eq!(s.hero.base_scale, 1.0);
        assert_eq!(s.particles.positions.len(), PARTICLE_COUNT_DESKTOP);
    }

    #[test]
    fn loaded_model_is_adopted() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = SceneGraph::new(
            HeroModel::Loaded(mesh::cube(1.0)),
            &Tuning::default(),
            1.0,
            &mut rng,
        );
        assert_eq!(s.hero.source, HeroSource::Loaded);
        assert_eq!(s.hero.transform.scale, Vec3::splat(LOADED_HERO_SCALE));
    }

    #[test]
    fn layers_are_back_to_front() {
        assert!(LAYER_ORDER.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn pulse_peaks_then_ends() {
        let p = ScalePulse::new(0.0);
        assert_eq!(p.factor(0.0), Some(1.0));
        assert!((p.factor(HERO_PULSE_HALF_MS).unwrap() - HERO_PULSE_PEAK).abs() < 1e-6);
        assert_eq!(p.factor(HERO_PULSE_HALF_MS * 2.0), None);
    }

    #[test]
    fn silent_audio_keeps_base_values() {
        let mut s = scene();
        s.apply_audio(None, 0.0);
        assert_eq!(s.hero.transform.scale, Vec3::ONE);
        assert_eq!(s.particles.size, PARTICLE_BASE_SIZE);
    }

    #[test]
    fn loud_audio_grows_hero_and_particles() {
        let mut s = scene();
        let bands = BandIntensities {
            low: 1.0,
            mid: 0.0,
            high: 1.0,
        };
        s.apply_audio(Some(bands), 0.0);
        assert!((s.hero.transform.scale.x - (1.0 + HERO_BASS_GAIN)).abs() < 1e-6);
        assert!((s.particles.size - (PARTICLE_BASE_SIZE + PARTICLE_TREBLE_GAIN)).abs() < 1e-6);
    }

    #[test]
    fn scroll_and_spin_compose() {
        let mut s = scene();
        s.apply_ambient_motion();
        s.apply_scroll(&SceneScroll {
            camera_z: 10.0,
            hero_yaw: 1.0,
            hero_offset: Vec2::new(2.0, 0.0),
        });
        assert!((s.hero.transform.rotation.y - (1.0 + HERO_SPIN_Y)).abs() < 1e-6);
        assert_eq!(s.hero.transform.position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(s.camera.eye.z, 10.0);
    }

    #[test]
    fn theme_recolours_particles() {
        let mut s = scene();
        s.set_theme(Theme::Matrix);
        assert_eq!(s.particles.color, Theme::Matrix.particle_color());
    }
}
