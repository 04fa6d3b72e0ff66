use crate::constants::{CAMERA_FAR, CAMERA_FOV_Y_DEG, CAMERA_NEAR, CAMERA_Z_START};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Right-handed perspective camera looking down -Z.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z_START),
            target: Vec3::new(0.0, 0.0, CAMERA_Z_START - 1.0),
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOV_Y_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Dolly along Z keeping the forward direction.
    pub fn set_z(&mut self, z: f32) {
        let forward = self.target - self.eye;
        self.eye.z = z;
        self.target = self.eye + forward;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point given in normalized device coordinates.
    ///
    /// Returns `(ray_origin, ray_direction)`; the direction is unit length.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye;
        let rd = (p1 - ro).normalize();
        (ro, rd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_forward() {
        let cam = Camera::new(16.0 / 9.0);
        let (ro, rd) = cam.ray_from_ndc(Vec2::ZERO);
        assert_eq!(ro, cam.eye);
        assert!((rd - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn set_z_keeps_direction() {
        let mut cam = Camera::new(1.0);
        cam.set_z(5.0);
        assert_eq!(cam.eye.z, 5.0);
        assert!(((cam.target - cam.eye).normalize() - Vec3::NEG_Z).length() < 1e-6);
    }
}
