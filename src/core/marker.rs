use std::rc::Rc;

use glam::{UVec2, Vec3};
use serde::{Deserialize, Serialize};

use super::audio::AudioSink;
use super::gate::DrawingGate;
use super::rasterizer::rasterize;
use super::sampler::{ContactResult, ContactSampler};
use super::scene::{CollisionEvent, SceneQuery, SurfaceId, Tag};
use super::timer::{Interval, TimerQueue};
use crate::error::DrawError;
use crate::math::Rgba;

// === Defaults ===

pub const DEFAULT_PEN_SIZE: u32 = 5;
pub const DEFAULT_TIP_HEIGHT: f32 = 0.05;
pub const DEFAULT_COMMIT_INTERVAL: f32 = 0.1;
pub const DEFAULT_MIN_MOVE: f32 = 0.001;

/// Tunables for one marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Side of the square stamp, in pixels
    pub pen_size: u32,
    /// Probe length; the tip's physical extent
    pub tip_height: f32,
    /// Seconds between surface commits
    pub commit_interval: f32,
    /// Tip travel (world units) needed to retrigger the brush sound mid-stroke
    pub min_move_threshold: f32,
    pub initial_color: Rgba,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            pen_size: DEFAULT_PEN_SIZE,
            tip_height: DEFAULT_TIP_HEIGHT,
            commit_interval: DEFAULT_COMMIT_INTERVAL,
            min_move_threshold: DEFAULT_MIN_MOVE,
            initial_color: Rgba::BLACK,
        }
    }
}

/// Stroke state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokePhase {
    /// No contact on the previous tick
    #[default]
    Idle,
    /// In contact, the next sample continues the current stroke
    Touching,
}

/// World-space pose of the marker tip for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipPose {
    pub position: Vec3,
    /// Probe direction, the marker's local up axis
    pub up: Vec3,
}

impl TipPose {
    pub fn new(position: Vec3, up: Vec3) -> Self {
        Self { position, up }
    }
}

/// Mutable per-marker state
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    pub pen_color: Rgba,
    pub pen_size: u32,
    /// Pixel of the previous contact, absent outside a stroke
    pub last_pixel: Option<UVec2>,
    pub last_contact: bool,
    pub last_tip_position: Vec3,
    /// Brush sound started and its clip has not run out yet
    pub sound_playing: bool,
}

impl MarkerState {
    pub fn phase(&self) -> StrokePhase {
        if self.last_contact {
            StrokePhase::Touching
        } else {
            StrokePhase::Idle
        }
    }
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub phase: StrokePhase,
    /// Stamps written this tick
    pub stamps: usize,
    /// Surfaces pushed to display this tick
    pub committed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerTimer {
    SoundFinished,
}

/// Texture-painting marker driven by the host tick loop
pub struct Marker {
    sampler: ContactSampler,
    state: MarkerState,
    /// `pen_size * pen_size` cells of the current pen color
    stamp: Vec<Rgba>,
    gate: Option<Rc<dyn DrawingGate>>,
    sound: Option<Box<dyn AudioSink>>,
    timers: TimerQueue<MarkerTimer>,
    commit_timer: Interval,
    min_move_threshold: f32,
    /// Surface under the tip during the current stroke
    active_surface: Option<SurfaceId>,
    /// Surfaces written since the last commit
    painted: Vec<SurfaceId>,
}

impl Marker {
    /// Build a marker. Without a gate the marker reports the misconfiguration
    /// once and never draws.
    pub fn new(
        config: &MarkerConfig,
        gate: Option<Rc<dyn DrawingGate>>,
        sound: Option<Box<dyn AudioSink>>,
    ) -> Result<Self, DrawError> {
        if config.pen_size == 0 {
            return Err(DrawError::InvalidPenSize(config.pen_size));
        }
        if gate.is_none() {
            log::error!("{}; marker drawing stays disabled", DrawError::MissingCollaborator("drawing gate"));
        }
        if sound.is_none() {
            log::debug!("marker has no brush sound");
        }

        let mut marker = Self {
            sampler: ContactSampler::new(config.tip_height),
            state: MarkerState {
                pen_color: config.initial_color,
                pen_size: config.pen_size,
                last_pixel: None,
                last_contact: false,
                last_tip_position: Vec3::ZERO,
                sound_playing: false,
            },
            stamp: Vec::new(),
            gate,
            sound,
            timers: TimerQueue::new(),
            commit_timer: Interval::new(config.commit_interval),
            min_move_threshold: config.min_move_threshold,
            active_surface: None,
            painted: Vec::new(),
        };
        marker.update_pen_color(config.initial_color);
        Ok(marker)
    }

    pub fn state(&self) -> &MarkerState {
        &self.state
    }

    pub fn phase(&self) -> StrokePhase {
        self.state.phase()
    }

    pub fn pen_color(&self) -> Rgba {
        self.state.pen_color
    }

    pub fn stamp(&self) -> &[Rgba] {
        &self.stamp
    }

    pub fn sampler(&self) -> &ContactSampler {
        &self.sampler
    }

    /// Current gate reading; false when no gate was supplied
    pub fn drawing_enabled(&self) -> bool {
        self.gate.as_ref().is_some_and(|g| g.is_drawing_enabled())
    }

    /// Run one frame: timers, gate, contact sampling, stroke writes, periodic commit
    pub fn tick(&mut self, delta: f32, pose: TipPose, scene: &mut impl SceneQuery) -> TickReport {
        self.run_timers(delta);

        let stamps = if self.drawing_enabled() {
            self.draw(pose, scene)
        } else {
            if self.state.last_contact {
                log::debug!("drawing disabled mid-stroke, stroke reset");
            }
            self.end_stroke();
            0
        };

        TickReport {
            phase: self.state.phase(),
            stamps,
            committed: self.commit_if_due(delta, scene),
        }
    }

    /// Physics collision callback. Color pads recolor the pen.
    pub fn on_collision(&mut self, event: &CollisionEvent) {
        if event.tag != Tag::ColorChanger {
            return;
        }
        if let Some(color) = event.color {
            log::debug!("pen color changed to {:?}", color);
            self.update_pen_color(color);
        }
    }

    fn update_pen_color(&mut self, color: Rgba) {
        let cells = self.state.pen_size as usize * self.state.pen_size as usize;
        self.state.pen_color = color;
        self.stamp = vec![color; cells];
    }

    fn draw(&mut self, pose: TipPose, scene: &mut impl SceneQuery) -> usize {
        let ContactResult::Contact { surface: id, pixel } = self.sampler.sample(pose.position, pose.up, &*scene) else {
            if self.state.last_contact {
                log::debug!("contact lost");
            }
            self.end_stroke();
            return 0;
        };

        // A jump to another surface starts a fresh stroke rather than a line across boards
        let continuing = self.state.last_contact && self.active_surface == Some(id);
        let start = match (continuing, self.state.last_pixel) {
            (true, Some(last)) => last,
            _ => pixel,
        };

        let Some(target) = scene.surface_mut(id) else {
            self.end_stroke();
            return 0;
        };

        let (width, height) = target.dimensions();
        let size = self.state.pen_size;
        let mut stamps = 0;
        for origin in rasterize(start, pixel, size, UVec2::new(width, height)) {
            target.blit(origin.x as i32, origin.y as i32, size, size, &self.stamp);
            stamps += 1;
        }

        if !continuing {
            log::debug!("stroke started on {:?} at {}", id, pixel);
            self.play_sound_once();
        } else if pose.position.distance(self.state.last_tip_position) > self.min_move_threshold {
            self.play_sound_once();
        }

        self.state.last_pixel = Some(pixel);
        self.state.last_contact = true;
        self.state.last_tip_position = pose.position;
        self.active_surface = Some(id);
        if !self.painted.contains(&id) {
            self.painted.push(id);
        }

        stamps
    }

    fn end_stroke(&mut self) {
        self.state.last_pixel = None;
        self.state.last_contact = false;
        self.active_surface = None;
    }

    fn play_sound_once(&mut self) {
        let Some(sound) = self.sound.as_mut() else {
            return;
        };
        if sound.is_playing() || self.state.sound_playing {
            return;
        }

        sound.play_once();
        self.state.sound_playing = true;
        self.timers.schedule(sound.clip_length(), MarkerTimer::SoundFinished);
    }

    fn run_timers(&mut self, delta: f32) {
        if let Some(sound) = self.sound.as_mut() {
            sound.update(delta);
        }

        for timer in self.timers.advance(delta) {
            match timer {
                MarkerTimer::SoundFinished => self.state.sound_playing = false,
            }
        }
    }

    /// Commit every painted surface once the interval has elapsed.
    /// The interval keeps running while nothing is pending.
    fn commit_if_due(&mut self, delta: f32, scene: &mut impl SceneQuery) -> usize {
        self.commit_timer.accumulate(delta);
        if !self.commit_timer.is_due() || self.painted.is_empty() {
            return 0;
        }

        self.commit_timer.reset();
        self.painted
            .drain(..)
            .filter(|id| scene.surface_mut(*id).is_some_and(|s| s.commit()))
            .count()
    }
}
