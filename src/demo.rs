use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::config::SessionConfig;
use crate::core::{
    AudioSink, ClipPlayer, DrawingWindow, Marker, PixelSurface, Quad, Scene, SceneQuery, StrokePhase, SurfaceId, TickReport,
    TipPose,
};
use crate::error::DrawError;
use crate::math::Rgba;

/// How far above a surface the tip floats while "lifted"
const LIFT_HEIGHT: f32 = 0.2;

/// One leg of the scripted marker motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Press the tip onto a color pad
    Dip { pad: usize, secs: f32 },
    /// Draw a sine wave across the board
    Wave { secs: f32 },
    /// Draw a circle in the middle of the board
    Circle { secs: f32 },
    /// Hold the tip away from everything
    Lift { secs: f32 },
}

impl Segment {
    fn secs(&self) -> f32 {
        match *self {
            Segment::Dip { secs, .. } | Segment::Wave { secs } | Segment::Circle { secs } | Segment::Lift { secs } => secs,
        }
    }
}

/// Default motion: pick a color, wave, lift, pick another, circle, lift
pub fn default_script() -> Vec<Segment> {
    vec![
        Segment::Dip { pad: 0, secs: 0.3 },
        Segment::Wave { secs: 3.0 },
        Segment::Lift { secs: 0.5 },
        Segment::Dip { pad: 1, secs: 0.3 },
        Segment::Circle { secs: 3.0 },
        Segment::Lift { secs: 0.5 },
    ]
}

/// Totals reported after a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub ticks: u32,
    pub strokes: u32,
    pub stamps: usize,
    pub commits: usize,
    pub ink_coverage: usize,
    /// FNV-1a hash of the committed board texture
    pub display_digest: u64,
    pub pen_color: Rgba,
    pub window_expired: bool,
}

/// Headless scene with one marker following a scripted path
pub struct Session {
    scene: Scene,
    marker: Marker,
    window: DrawingWindow,
    board: SurfaceId,
    pads: Vec<SurfaceId>,
    script: Vec<Segment>,
    tip_height: f32,
    time: f32,
    touching_pad: bool,
    summary: SessionSummary,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self, DrawError> {
        Self::with_script(config, default_script())
    }

    pub fn with_script(config: &SessionConfig, script: Vec<Segment>) -> Result<Self, DrawError> {
        let mut scene = Scene::new();
        let mut boards = Vec::with_capacity(config.boards.len());
        for board in &config.boards {
            let surface = PixelSurface::new(board.width, board.height)?;
            boards.push(scene.add_whiteboard(board.name.clone(), board.quad, surface));
        }
        let pads = config
            .color_pads
            .iter()
            .map(|pad| scene.add_color_pad(pad.name.clone(), pad.quad, pad.color))
            .collect();

        let mut window = match config.drawing_window_secs {
            Some(secs) => DrawingWindow::new(secs),
            None => DrawingWindow::default(),
        };
        match config.drawing_window_secs {
            Some(_) => window.open(),
            None => window.open_unlimited(),
        }

        let board = boards.first().copied().ok_or(DrawError::MissingCollaborator("whiteboard"))?;
        let sound: Box<dyn AudioSink> = Box::new(ClipPlayer::new(config.brush_clip_secs));
        let marker = Marker::new(&config.marker, Some(window.gate().shared()), Some(sound))?;

        Ok(Self {
            scene,
            marker,
            window,
            board,
            pads,
            script,
            tip_height: config.marker.tip_height,
            time: 0.0,
            touching_pad: false,
            summary: SessionSummary {
                ticks: 0,
                strokes: 0,
                stamps: 0,
                commits: 0,
                ink_coverage: 0,
                display_digest: 0,
                pen_color: config.marker.initial_color,
                window_expired: false,
            },
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn window(&self) -> &DrawingWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut DrawingWindow {
        &mut self.window
    }

    /// Advance one tick of `dt` seconds
    pub fn step(&mut self, dt: f32) -> TickReport {
        if self.window.update(dt) {
            self.summary.window_expired = true;
        }

        let pose = self.pose_at(self.time);

        // Collision enter with a pad fires once per touch
        let collision = self.scene.collision_at(pose.position, self.marker.sampler().ray_length());
        if let (Some(event), false) = (collision, self.touching_pad) {
            self.marker.on_collision(&event);
        }
        self.touching_pad = collision.is_some();

        let was_idle = self.marker.phase() == StrokePhase::Idle;
        let report = self.marker.tick(dt, pose, &mut self.scene);
        if was_idle && report.phase == StrokePhase::Touching {
            self.summary.strokes += 1;
        }

        self.summary.ticks += 1;
        self.summary.stamps += report.stamps;
        self.summary.commits += report.committed;
        self.time += dt;
        report
    }

    /// Run `ticks` fixed steps and summarize
    pub fn run(&mut self, ticks: u32, dt: f32) -> SessionSummary {
        for _ in 0..ticks {
            self.step(dt);
        }
        self.summary()
    }

    pub fn summary(&self) -> SessionSummary {
        let mut summary = self.summary.clone();
        summary.pen_color = self.marker.pen_color();
        if let Some(board) = self.scene.surface(self.board) {
            summary.ink_coverage = board.ink_coverage(Rgba::WHITE);
            summary.display_digest = fnv1a(board.display_bytes());
        }
        summary
    }

    /// Scripted tip pose at `time`; the script loops
    fn pose_at(&self, time: f32) -> TipPose {
        let total: f32 = self.script.iter().map(Segment::secs).sum();
        let board_quad = self.quad(self.board);
        if total <= 0.0 {
            return hover(board_quad, Vec2::splat(0.5), LIFT_HEIGHT);
        }

        let mut local = time % total;
        for segment in &self.script {
            let secs = segment.secs();
            if local < secs {
                let t = local / secs;
                // Press a little past contact but stay inside the probe range
                let press = self.tip_height * 0.5;
                return match *segment {
                    Segment::Dip { pad, .. } => match self.pads.get(pad) {
                        Some(&id) => hover(self.quad(id), Vec2::splat(0.5), press),
                        None => hover(board_quad, Vec2::splat(0.5), LIFT_HEIGHT),
                    },
                    Segment::Wave { .. } => {
                        let uv = Vec2::new(0.1 + 0.8 * t, 0.5 + 0.25 * (t * TAU * 2.0).sin());
                        hover(board_quad, uv, press)
                    }
                    Segment::Circle { .. } => {
                        let angle = t * TAU;
                        let uv = Vec2::new(0.5 + 0.2 * angle.cos(), 0.5 + 0.3 * angle.sin());
                        hover(board_quad, uv, press)
                    }
                    Segment::Lift { .. } => hover(board_quad, Vec2::splat(0.5), LIFT_HEIGHT),
                };
            }
            local -= secs;
        }

        hover(board_quad, Vec2::splat(0.5), LIFT_HEIGHT)
    }

    fn quad(&self, id: SurfaceId) -> Quad {
        self.scene
            .object(id)
            .map(|o| o.quad)
            .unwrap_or_else(|| Quad::new(Vec3::ZERO, Vec3::X, Vec3::Y))
    }
}

/// Tip `height` above `uv` on `quad`, probing back toward it
fn hover(quad: Quad, uv: Vec2, height: f32) -> TipPose {
    let normal = quad.normal();
    TipPose::new(quad.point_at(uv) + normal * height, -normal)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}
