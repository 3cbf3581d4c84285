use glam::Vec3;

use super::AABB;

/// Slab test against an axis-aligned box.
/// Returns the entry distance, or the exit distance when the origin is inside.
pub fn intersect_aabb(ray_origin: Vec3, ray_dir: Vec3, bounds: &AABB) -> Option<f32> {
    const EPSILON: f32 = 1e-8;

    // Near-zero direction components become a huge inverse instead of a division by zero
    let inv = |d: f32| if d.abs() < EPSILON { 1.0 / EPSILON.copysign(d) } else { 1.0 / d };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t_min = (bounds.min - ray_origin) * inv_dir;
    let t_max = (bounds.max - ray_origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.max_element();
    let t_far = t2.min_element();

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    Some(t_near.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(x: f32) -> AABB {
        AABB::new(Vec3::new(x, -1.0, -1.0), Vec3::new(x + 5.0, 1.0, 1.0))
    }

    #[test]
    fn test_intersect_aabb_hit() {
        let t = intersect_aabb(Vec3::ZERO, Vec3::X, &unit_box_at(5.0));
        assert!((t.unwrap() - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_intersect_aabb_miss() {
        let t = intersect_aabb(Vec3::ZERO, Vec3::Y, &unit_box_at(5.0));
        assert!(t.is_none());
    }

    #[test]
    fn test_intersect_aabb_behind() {
        let t = intersect_aabb(Vec3::ZERO, -Vec3::X, &unit_box_at(5.0));
        assert!(t.is_none());
    }

    #[test]
    fn test_intersect_aabb_inside() {
        let t = intersect_aabb(Vec3::new(6.0, 0.0, 0.0), Vec3::X, &unit_box_at(5.0));
        assert_eq!(t, Some(0.0));
    }
}
