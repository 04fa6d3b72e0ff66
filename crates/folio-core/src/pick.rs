use glam::Vec3;

/// Distance along a unit ray to the first sphere intersection in front of
/// the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Slab test against an axis-aligned box centred at `center`.
///
/// Returns the entry distance, or 0 when the origin is inside the box.
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, half_extent: Vec3) -> Option<f32> {
    let min = center - half_extent;
    let max = center + half_extent;
    let inv = ray_dir.recip();
    let t0 = (min - ray_origin) * inv;
    let t1 = (max - ray_origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    if t_near > t_far || t_far < 0.0 {
        return None;
    }
    Some(t_near.max(0.0))
}

/// Index of the closest hit among `items`, using `hit` to test each one.
pub fn nearest_hit<T>(items: &[T], mut hit: impl FnMut(&T) -> Option<f32>) -> Option<(usize, f32)> {
    let mut best = None::<(usize, f32)>;
    for (i, item) in items.iter().enumerate() {
        if let Some(t) = hit(item) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_hit_and_miss() {
        let he = Vec3::splat(0.5);
        let t = ray_aabb(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), he);
        assert!((t.unwrap() - 4.5).abs() < 1e-5);
        assert!(ray_aabb(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), he).is_none());
    }

    #[test]
    fn aabb_behind_origin_misses() {
        let he = Vec3::splat(0.5);
        assert!(ray_aabb(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), he).is_none());
    }

    #[test]
    fn nearest_hit_prefers_closest() {
        let centers = [Vec3::new(0.0, 0.0, 9.0), Vec3::new(0.0, 0.0, 3.0)];
        let best = nearest_hit(&centers, |c| ray_sphere(Vec3::ZERO, Vec3::Z, *c, 1.0));
        assert_eq!(best.map(|b| b.0), Some(1));
    }
}
