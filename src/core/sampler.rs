use glam::{UVec2, Vec2, Vec3};

use super::scene::{SceneQuery, SurfaceId, Tag};

/// Outcome of one tip probe. Produced fresh every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResult {
    NoContact,
    Contact { surface: SurfaceId, pixel: UVec2 },
}

impl ContactResult {
    pub fn is_contact(&self) -> bool {
        matches!(self, ContactResult::Contact { .. })
    }
}

/// Map a texture coordinate to a pixel, always inside `[0, size)`.
///
/// Rounds to the nearest pixel, so UV 1.0 lands on the last column rather than
/// one past it.
pub fn uv_to_pixel(uv: Vec2, size: UVec2) -> UVec2 {
    let axis = |t: f32, extent: u32| {
        let last = extent.saturating_sub(1);
        // NaN and negatives saturate to 0 under `as`
        ((t * extent as f32).round() as u32).min(last)
    };
    UVec2::new(axis(uv.x, size.x), axis(uv.y, size.y))
}

/// Casts a short probe from the marker tip and reports whiteboard contact
#[derive(Debug, Clone, Copy)]
pub struct ContactSampler {
    /// Probe length, matched to the tip's physical extent so only real touches count
    ray_length: f32,
}

impl ContactSampler {
    pub fn new(ray_length: f32) -> Self {
        Self { ray_length }
    }

    pub fn ray_length(&self) -> f32 {
        self.ray_length
    }

    /// Probe along `up` from `tip`. Pure query: nothing in the scene changes.
    pub fn sample(&self, tip: Vec3, up: Vec3, scene: &impl SceneQuery) -> ContactResult {
        let Some(hit) = scene.raycast(tip, up, self.ray_length) else {
            return ContactResult::NoContact;
        };
        if hit.tag != Tag::Whiteboard {
            return ContactResult::NoContact;
        }

        let Some(surface) = scene.surface(hit.object) else {
            log::warn!("whiteboard {:?} has no pixel surface", hit.object);
            return ContactResult::NoContact;
        };

        let (width, height) = surface.dimensions();
        ContactResult::Contact {
            surface: hit.object,
            pixel: uv_to_pixel(hit.uv, UVec2::new(width, height)),
        }
    }
}
