use std::cell::Cell;
use std::rc::Rc;

use glam::{UVec2, Vec3};
use whiteboard_marker::core::{
    AudioSink, CollisionEvent, GateSwitch, Marker, MarkerConfig, PixelSurface, Quad, Scene, SceneQuery, StrokePhase,
    SurfaceId, Tag, TipPose,
};
use whiteboard_marker::math::Rgba;

const DT: f32 = 1.0 / 60.0;
const RED: Rgba = Rgba::rgb(220, 30, 30);

/// Brush sound stand-in that counts plays
struct CountingSink {
    plays: Rc<Cell<u32>>,
    clip_length: f32,
}

impl AudioSink for CountingSink {
    fn play_once(&mut self) {
        self.plays.set(self.plays.get() + 1);
    }

    fn is_playing(&self) -> bool {
        false
    }

    fn clip_length(&self) -> f32 {
        self.clip_length
    }
}

fn board_scene() -> (Scene, SurfaceId) {
    let mut scene = Scene::new();
    let quad = Quad::new(Vec3::ZERO, Vec3::X, Vec3::Y);
    let id = scene.add_whiteboard("board", quad, PixelSurface::new(100, 100).unwrap());
    (scene, id)
}

fn touching(x: f32, y: f32) -> TipPose {
    TipPose::new(Vec3::new(x, y, 0.02), Vec3::NEG_Z)
}

fn lifted() -> TipPose {
    TipPose::new(Vec3::new(0.5, 0.5, 1.0), Vec3::NEG_Z)
}

fn thin_pen() -> MarkerConfig {
    MarkerConfig { pen_size: 1, ..MarkerConfig::default() }
}

fn inked(scene: &Scene, id: SurfaceId, x: u32, y: u32) -> bool {
    scene.surface(id).unwrap().pixel(x, y) != Some(Rgba::WHITE)
}

// ============================================================================
// Stroke Continuity
// ============================================================================

#[test]
fn test_fast_motion_draws_continuous_line() {
    let (mut scene, id) = board_scene();
    let gate = GateSwitch::new(true);
    let mut marker = Marker::new(&thin_pen(), Some(gate.shared()), None).unwrap();

    // 5 pixels per tick, far more than one stamp covers
    for i in 0..=16 {
        let x = 0.1 + 0.05 * i as f32;
        let report = marker.tick(DT, touching(x, 0.5), &mut scene);
        assert_eq!(report.phase, StrokePhase::Touching);
    }

    for x in 11..=89 {
        assert!(inked(&scene, id, x, 50), "gap at x = {}", x);
    }
    assert!(!inked(&scene, id, 50, 49));
    assert!(!inked(&scene, id, 50, 51));
}

#[test]
fn test_gate_toggle_mid_stroke_starts_fresh_dab() {
    let (mut scene, id) = board_scene();
    let gate = GateSwitch::new(true);
    let mut marker = Marker::new(&thin_pen(), Some(gate.shared()), None).unwrap();

    assert_eq!(marker.tick(DT, touching(0.2, 0.5), &mut scene).stamps, 1);

    gate.disable();
    let report = marker.tick(DT, touching(0.5, 0.5), &mut scene);
    assert_eq!(report.stamps, 0);
    assert_eq!(report.phase, StrokePhase::Idle);
    assert!(!inked(&scene, id, 50, 50));

    gate.enable();
    let report = marker.tick(DT, touching(0.8, 0.5), &mut scene);
    assert_eq!(report.stamps, 1, "re-enabled stroke must not bridge the gap");
    assert!(inked(&scene, id, 80, 50));
    assert_eq!(scene.surface(id).unwrap().ink_coverage(Rgba::WHITE), 2);
}

#[test]
fn test_switching_boards_starts_fresh_dab() {
    let mut scene = Scene::new();
    let left = scene.add_whiteboard(
        "left",
        Quad::new(Vec3::ZERO, Vec3::X, Vec3::Y),
        PixelSurface::new(100, 100).unwrap(),
    );
    let right = scene.add_whiteboard(
        "right",
        Quad::new(Vec3::new(2.0, 0.0, 0.0), Vec3::X, Vec3::Y),
        PixelSurface::new(100, 100).unwrap(),
    );
    let gate = GateSwitch::new(true);
    let mut marker = Marker::new(&MarkerConfig::default(), Some(gate.shared()), None).unwrap();

    marker.tick(DT, touching(0.5, 0.5), &mut scene);
    let report = marker.tick(DT, touching(2.1, 0.5), &mut scene);

    assert_eq!(report.stamps, 1);
    assert_eq!(scene.surface(left).unwrap().ink_coverage(Rgba::WHITE), 25);
    assert_eq!(scene.surface(right).unwrap().ink_coverage(Rgba::WHITE), 25);
}

// ============================================================================
// Pen Color
// ============================================================================

#[test]
fn test_color_change_applies_to_later_stamps() {
    let (mut scene, id) = board_scene();
    let gate = GateSwitch::new(true);
    let mut marker = Marker::new(&MarkerConfig::default(), Some(gate.shared()), None).unwrap();

    marker.on_collision(&CollisionEvent { tag: Tag::ColorChanger, color: Some(RED) });
    for i in 0..10 {
        marker.tick(DT, touching(0.2 + 0.06 * i as f32, 0.3), &mut scene);
    }

    let surface = scene.surface(id).unwrap();
    let ink: Vec<_> = surface.pixels().iter().filter(|&&c| c != Rgba::WHITE).collect();
    assert!(!ink.is_empty());
    assert!(ink.iter().all(|&&c| c == RED));
}

#[test]
fn test_color_pad_in_scene_recolors_marker() {
    let (mut scene, _) = board_scene();
    scene.add_color_pad("pad", Quad::new(Vec3::new(3.0, 0.0, 0.0), Vec3::X, Vec3::Y), RED);
    let gate = GateSwitch::new(true);
    let mut marker = Marker::new(&MarkerConfig::default(), Some(gate.shared()), None).unwrap();

    assert!(scene.collision_at(Vec3::new(3.5, 0.5, 0.5), 0.05).is_none());

    let event = scene.collision_at(Vec3::new(3.5, 0.5, 0.01), 0.05).unwrap();
    marker.on_collision(&event);
    assert_eq!(marker.pen_color(), RED);
}

// ============================================================================
// Brush Sound
// ============================================================================

#[test]
fn test_sound_plays_once_per_clip() {
    let (mut scene, _) = board_scene();
    let gate = GateSwitch::new(true);
    let plays = Rc::new(Cell::new(0));
    let sink: Box<dyn AudioSink> = Box::new(CountingSink { plays: plays.clone(), clip_length: 0.1 });
    let mut marker = Marker::new(&MarkerConfig::default(), Some(gate.shared()), Some(sink)).unwrap();

    marker.tick(0.05, touching(0.5, 0.5), &mut scene);
    assert_eq!(plays.get(), 1, "new stroke plays the brush sound");
    assert!(marker.state().sound_playing);

    marker.tick(0.02, touching(0.6, 0.5), &mut scene);
    assert_eq!(plays.get(), 1, "clip still running");

    // Clip ends, but the tip is holding still
    marker.tick(0.2, touching(0.6, 0.5), &mut scene);
    assert!(!marker.state().sound_playing);
    assert_eq!(plays.get(), 1);

    marker.tick(0.05, touching(0.7, 0.5), &mut scene);
    assert_eq!(plays.get(), 2, "movement retriggers after the clip ends");

    marker.tick(0.5, lifted(), &mut scene);
    marker.tick(0.05, touching(0.7, 0.5), &mut scene);
    assert_eq!(plays.get(), 3, "touching down again plays");
}

#[test]
fn test_sound_gated_by_drawing_switch() {
    let (mut scene, _) = board_scene();
    let gate = GateSwitch::new(false);
    let plays = Rc::new(Cell::new(0));
    let sink: Box<dyn AudioSink> = Box::new(CountingSink { plays: plays.clone(), clip_length: 0.1 });
    let mut marker = Marker::new(&MarkerConfig::default(), Some(gate.shared()), Some(sink)).unwrap();

    for _ in 0..5 {
        marker.tick(0.05, touching(0.5, 0.5), &mut scene);
    }
    assert_eq!(plays.get(), 0);
}

// ============================================================================
// Commit Cadence
// ============================================================================

#[test]
fn test_commits_follow_interval() {
    let (mut scene, id) = board_scene();
    let gate = GateSwitch::new(true);
    let mut marker = Marker::new(&MarkerConfig::default(), Some(gate.shared()), None).unwrap();

    let committed: Vec<usize> = (0..8)
        .map(|i| marker.tick(0.03, touching(0.1 + 0.05 * i as f32, 0.5), &mut scene).committed)
        .collect();

    assert_eq!(committed, vec![0, 0, 0, 1, 0, 0, 0, 1]);
    assert_eq!(scene.surface(id).unwrap().commit_count(), 2);
}

#[test]
fn test_commit_flushes_after_lift() {
    let (mut scene, id) = board_scene();
    let gate = GateSwitch::new(true);
    let mut marker = Marker::new(&MarkerConfig::default(), Some(gate.shared()), None).unwrap();

    marker.tick(0.03, touching(0.5, 0.5), &mut scene);
    let mut committed = 0;
    for _ in 0..3 {
        committed += marker.tick(0.03, lifted(), &mut scene).committed;
    }

    assert_eq!(committed, 1);
    assert_eq!(scene.surface(id).unwrap().displayed_pixel(50, 50), Some(Rgba::BLACK));
}

#[test]
fn test_idle_marker_never_commits() {
    let (mut scene, id) = board_scene();
    let gate = GateSwitch::new(true);
    let mut marker = Marker::new(&MarkerConfig::default(), Some(gate.shared()), None).unwrap();

    for _ in 0..20 {
        assert_eq!(marker.tick(0.05, lifted(), &mut scene).committed, 0);
    }
    assert_eq!(scene.surface(id).unwrap().commit_count(), 0);
}

// ============================================================================
// Shared Surfaces
// ============================================================================

#[test]
fn test_two_markers_share_one_board() {
    let (mut scene, id) = board_scene();
    let gate = GateSwitch::new(true);
    let mut black = Marker::new(&MarkerConfig::default(), Some(gate.shared()), None).unwrap();
    let mut red = Marker::new(&MarkerConfig::default(), Some(gate.shared()), None).unwrap();
    red.on_collision(&CollisionEvent { tag: Tag::ColorChanger, color: Some(RED) });

    for _ in 0..3 {
        black.tick(DT, touching(0.2, 0.2), &mut scene);
        red.tick(DT, touching(0.8, 0.8), &mut scene);
    }

    let surface = scene.surface(id).unwrap();
    assert_eq!(surface.pixel(20, 20), Some(Rgba::BLACK));
    assert_eq!(surface.pixel(80, 80), Some(RED));
    assert_eq!(black.state().last_pixel, Some(UVec2::new(20, 20)));
    assert_eq!(red.state().last_pixel, Some(UVec2::new(80, 80)));
}
