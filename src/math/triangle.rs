use glam::{Vec2, Vec3};

/// Result of a ray/triangle test
#[derive(Debug, Clone, Copy)]
pub struct TriangleIntersection {
    pub t: f32, // Distance along ray
    pub u: f32, // Barycentric weight of v1
    pub v: f32, // Barycentric weight of v2
}

impl TriangleIntersection {
    /// Barycentric coordinates (u, v, w) where w = 1 - u - v
    pub fn barycentric(&self) -> (f32, f32, f32) {
        (self.u, self.v, 1.0 - self.u - self.v)
    }

    /// Interpolate per-vertex texture coordinates at the hit point
    pub fn interpolate_uv(&self, uv0: Vec2, uv1: Vec2, uv2: Vec2) -> Vec2 {
        let (u, v, w) = self.barycentric();
        uv0 * w + uv1 * u + uv2 * v
    }
}

/// Möller-Trumbore ray-triangle intersection. Both windings are hit.
pub fn moller_trumbore_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleIntersection> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    // Parallel to the triangle plane
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t < EPSILON {
        return None;
    }

    Some(TriangleIntersection { t, u, v })
}
