mod aabb;
mod color;
mod ray;
mod triangle;

pub use aabb::AABB;
pub use color::{hsv_to_rgb, Rgba};
pub use ray::intersect_aabb;
pub use triangle::{moller_trumbore_intersect, TriangleIntersection};
