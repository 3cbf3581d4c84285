use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::surface::PixelSurface;
use crate::math::{intersect_aabb, moller_trumbore_intersect, Rgba, AABB};

/// Slab-test padding so zero-thickness quads are not culled by the broad phase
const BOUNDS_MARGIN: f32 = 1e-4;

/// Object classification used to decide how the marker reacts to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Whiteboard,
    ColorChanger,
    Untagged,
}

/// Handle of an object inside a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub usize);

/// Planar rectangle with texture coordinates.
///
/// `origin` maps to UV (0, 0), `origin + u_edge` to (1, 0) and
/// `origin + v_edge` to (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub origin: Vec3,
    pub u_edge: Vec3,
    pub v_edge: Vec3,
}

impl Quad {
    pub fn new(origin: Vec3, u_edge: Vec3, v_edge: Vec3) -> Self {
        Self { origin, u_edge, v_edge }
    }

    /// Corners in UV order (0,0), (1,0), (1,1), (0,1)
    pub fn corners(&self) -> [Vec3; 4] {
        [
            self.origin,
            self.origin + self.u_edge,
            self.origin + self.u_edge + self.v_edge,
            self.origin + self.v_edge,
        ]
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_points(&self.corners()).expand(BOUNDS_MARGIN)
    }

    /// World position of a texture coordinate
    pub fn point_at(&self, uv: Vec2) -> Vec3 {
        self.origin + self.u_edge * uv.x + self.v_edge * uv.y
    }

    pub fn normal(&self) -> Vec3 {
        self.u_edge.cross(self.v_edge).normalize_or_zero()
    }

    /// Nearest hit as (distance, uv), tested as two triangles
    pub fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<(f32, Vec2)> {
        let [p00, p10, p11, p01] = self.corners();
        let triangles = [
            ([p00, p10, p11], [Vec2::ZERO, Vec2::X, Vec2::ONE]),
            ([p00, p11, p01], [Vec2::ZERO, Vec2::ONE, Vec2::Y]),
        ];

        triangles
            .iter()
            .filter_map(|([a, b, c], [ua, ub, uc])| {
                moller_trumbore_intersect(origin, dir, *a, *b, *c)
                    .map(|hit| (hit.t, hit.interpolate_uv(*ua, *ub, *uc)))
            })
            .min_by(|x, y| x.0.total_cmp(&y.0))
    }
}

/// Nearest object struck by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub object: SurfaceId,
    pub tag: Tag,
    pub uv: Vec2,
    pub distance: f32,
}

/// Physics contact delivered to a marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub tag: Tag,
    /// Material color of the other object, if it has one
    pub color: Option<Rgba>,
}

/// Scene query substrate consumed by the drawing engine
pub trait SceneQuery {
    /// Nearest object of any tag within `max_distance` along `dir`
    fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RaycastHit>;

    /// Paintable texture attached to an object
    fn surface(&self, id: SurfaceId) -> Option<&PixelSurface>;

    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut PixelSurface>;
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub tag: Tag,
    pub quad: Quad,
    pub surface: Option<PixelSurface>,
    pub color: Option<Rgba>,
}

/// In-memory scene of flat quads
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: SceneObject) -> SurfaceId {
        self.objects.push(object);
        SurfaceId(self.objects.len() - 1)
    }

    /// Add a paintable board
    pub fn add_whiteboard(&mut self, name: impl Into<String>, quad: Quad, surface: PixelSurface) -> SurfaceId {
        self.add_object(SceneObject {
            name: name.into(),
            tag: Tag::Whiteboard,
            quad,
            surface: Some(surface),
            color: None,
        })
    }

    /// Add a pad that recolors markers touching it
    pub fn add_color_pad(&mut self, name: impl Into<String>, quad: Quad, color: Rgba) -> SurfaceId {
        self.add_object(SceneObject {
            name: name.into(),
            tag: Tag::ColorChanger,
            quad,
            surface: None,
            color: Some(color),
        })
    }

    pub fn object(&self, id: SurfaceId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<SurfaceId> {
        self.objects.iter().position(|o| o.name == name).map(SurfaceId)
    }

    /// Ids of every object tagged as a whiteboard
    pub fn whiteboards(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.tag == Tag::Whiteboard)
            .map(|(i, _)| SurfaceId(i))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Contact with the closest color pad whose plane lies within `reach` of `point`
    /// (probing both sides of the pad). Stands in for a physics collision callback.
    pub fn collision_at(&self, point: Vec3, reach: f32) -> Option<CollisionEvent> {
        self.objects
            .iter()
            .filter(|o| o.tag == Tag::ColorChanger)
            .filter_map(|o| {
                let n = o.quad.normal();
                [n, -n]
                    .into_iter()
                    .filter_map(|dir| o.quad.intersect(point, dir))
                    .map(|(t, _)| t)
                    .filter(|&t| t <= reach)
                    .min_by(f32::total_cmp)
                    .map(|t| (t, o))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, o)| CollisionEvent { tag: o.tag, color: o.color })
    }
}

impl SceneQuery for Scene {
    fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let dir = dir.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| intersect_aabb(origin, dir, &o.quad.bounds()).is_some_and(|t| t <= max_distance))
            .filter_map(|(i, o)| {
                let (distance, uv) = o.quad.intersect(origin, dir)?;
                (distance <= max_distance).then_some(RaycastHit {
                    object: SurfaceId(i),
                    tag: o.tag,
                    uv,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn surface(&self, id: SurfaceId) -> Option<&PixelSurface> {
        self.objects.get(id.0)?.surface.as_ref()
    }

    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut PixelSurface> {
        self.objects.get_mut(id.0)?.surface.as_mut()
    }
}
