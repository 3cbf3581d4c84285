use glam::{UVec2, Vec2, Vec3};
use whiteboard_marker::core::{uv_to_pixel, ContactResult, ContactSampler, PixelSurface, Quad, Scene, SceneObject, Tag};

fn board_scene(width: u32, height: u32) -> Scene {
    let mut scene = Scene::new();
    let quad = Quad::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    scene.add_whiteboard("board", quad, PixelSurface::new(width, height).unwrap());
    scene
}

// ============================================================================
// UV Mapping
// ============================================================================

#[test]
fn test_uv_one_maps_to_last_pixel() {
    assert_eq!(uv_to_pixel(Vec2::new(1.0, 1.0), UVec2::new(2048, 2048)), UVec2::new(2047, 2047));
}

#[test]
fn test_uv_grid_stays_in_range() {
    let size = UVec2::new(37, 11);
    for i in 0..=100 {
        for j in 0..=100 {
            let uv = Vec2::new(i as f32 / 100.0, j as f32 / 100.0);
            let p = uv_to_pixel(uv, size);
            assert!(p.x < size.x && p.y < size.y, "uv {:?} mapped to {:?}", uv, p);
        }
    }
}

// ============================================================================
// Contact Sampling
// ============================================================================

#[test]
fn test_contact_only_within_tip_length() {
    let scene = board_scene(200, 100);
    let sampler = ContactSampler::new(0.05);

    let near = sampler.sample(Vec3::new(1.0, 0.5, 0.049), Vec3::NEG_Z, &scene);
    let far = sampler.sample(Vec3::new(1.0, 0.5, 0.051), Vec3::NEG_Z, &scene);

    assert!(near.is_contact());
    assert_eq!(far, ContactResult::NoContact);
}

#[test]
fn test_contact_pixel_follows_uv() {
    let scene = board_scene(200, 100);
    let sampler = ContactSampler::new(0.05);

    match sampler.sample(Vec3::new(0.5, 0.8, 0.01), Vec3::NEG_Z, &scene) {
        ContactResult::Contact { pixel, .. } => assert_eq!(pixel, UVec2::new(50, 80)),
        ContactResult::NoContact => panic!("expected contact"),
    }
}

#[test]
fn test_probe_direction_matters() {
    let scene = board_scene(200, 100);
    let sampler = ContactSampler::new(0.05);

    // Pointing away from the board
    let result = sampler.sample(Vec3::new(1.0, 0.5, 0.01), Vec3::Z, &scene);
    assert_eq!(result, ContactResult::NoContact);
}

#[test]
fn test_occluder_blocks_contact() {
    let mut scene = board_scene(200, 100);
    scene.add_object(SceneObject {
        name: "cover".into(),
        tag: Tag::Untagged,
        quad: Quad::new(Vec3::new(0.0, 0.0, 0.01), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        surface: None,
        color: None,
    });
    let sampler = ContactSampler::new(0.05);

    let result = sampler.sample(Vec3::new(1.0, 0.5, 0.03), Vec3::NEG_Z, &scene);
    assert_eq!(result, ContactResult::NoContact);
}
