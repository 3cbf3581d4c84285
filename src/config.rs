use std::path::Path;

use anyhow::{ensure, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::marker::MarkerConfig;
use crate::core::scene::Quad;
use crate::math::Rgba;

/// A paintable board in the session scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    /// Texture resolution
    pub width: u32,
    pub height: u32,
    pub quad: Quad,
}

/// A color pad that recolors markers touching it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadConfig {
    pub name: String,
    pub color: Rgba,
    pub quad: Quad,
}

/// Everything a headless session needs. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub marker: MarkerConfig,
    pub boards: Vec<BoardConfig>,
    pub color_pads: Vec<PadConfig>,
    /// Timed drawing window; `None` leaves drawing enabled without a limit
    pub drawing_window_secs: Option<f32>,
    /// Length of the brush sound clip
    pub brush_clip_secs: f32,
    pub ticks: u32,
    /// Fixed tick length in seconds
    pub dt: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            marker: MarkerConfig::default(),
            boards: vec![BoardConfig {
                name: "whiteboard".into(),
                width: 1024,
                height: 512,
                quad: Quad::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            }],
            color_pads: vec![
                PadConfig {
                    name: "red-pad".into(),
                    color: Rgba::from_hsv(0.0, 0.85, 0.9),
                    quad: Quad::new(Vec3::new(2.2, 1.0, 0.0), Vec3::new(0.2, 0.0, 0.0), Vec3::new(0.0, 0.2, 0.0)),
                },
                PadConfig {
                    name: "blue-pad".into(),
                    color: Rgba::from_hsv(0.63, 0.85, 0.9),
                    quad: Quad::new(Vec3::new(2.2, 1.4, 0.0), Vec3::new(0.2, 0.0, 0.0), Vec3::new(0.0, 0.2, 0.0)),
                },
            ],
            drawing_window_secs: Some(crate::core::gate::DEFAULT_WINDOW_SECS),
            brush_clip_secs: 0.4,
            ticks: 600,
            dt: 1.0 / 60.0,
        }
    }
}

impl SessionConfig {
    /// Read and validate a JSON session file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session config: {:?}", path))?;
        Self::from_json(&text).with_context(|| format!("Invalid session config: {:?}", path))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("Failed to parse session JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.boards.is_empty(), "session needs at least one board");
        for board in &self.boards {
            ensure!(
                board.width > 0 && board.height > 0,
                "board {:?} has zero-sized texture {}x{}",
                board.name,
                board.width,
                board.height
            );
        }
        ensure!(self.marker.pen_size > 0, "pen size must be at least 1");
        ensure!(self.marker.tip_height > 0.0, "tip height must be positive");
        ensure!(self.dt > 0.0, "tick length must be positive");
        Ok(())
    }
}
