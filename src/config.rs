//! Run configuration.
//!
//! Everything is fixed at startup. Every field has a default matching the
//! stock fly-model sketch, so a config file only needs the values it
//! changes:
//!
//! ```json
//! {
//!     "particles": { "num_particles": 500, "lines_enabled": true }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::render::{Color, RenderStyle};

/// Top-level configuration: scene presentation plus particle behaviour.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sketch: SketchConfig,
    pub particles: ParticleConfig,
}

impl Config {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}

/// Wheel zoom bounds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f32,
    pub max: f32,
    pub initial: f32,
    /// Wheel delta units per 1.0 of zoom.
    pub sensitivity: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 5.0,
            initial: 2.5,
            sensitivity: 1000.0,
        }
    }
}

/// Fixed model rotation in degrees, applied about X, then Y, then Z.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Scene presentation settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SketchConfig {
    /// Window size in logical pixels.
    pub canvas_size: [u32; 2],
    pub zoom: ZoomConfig,
    /// Color of the static point grid.
    pub grid_color: Color,
    /// Sphere radius of each grid point.
    pub point_grid_size: f32,
    /// Minimum spacing between kept mesh vertices.
    pub vertex_distance_threshold: f32,
    pub model_rotation: Rotation,
    /// Degrees per second about the model's Y axis, if set.
    pub auto_rotate: Option<f32>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_size: [800, 800],
            zoom: ZoomConfig::default(),
            grid_color: Color::rgb(0, 255, 255),
            point_grid_size: 0.4,
            vertex_distance_threshold: 10.0,
            model_rotation: Rotation {
                x: 90.0,
                y: 0.0,
                z: 100.0,
            },
            auto_rotate: None,
        }
    }
}

/// Particle swarm settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub num_particles: usize,
    /// Sphere radius of each particle.
    pub size: f32,
    pub line_stroke_size: f32,
    pub lines_enabled: bool,
    /// Trail capacity in positions.
    pub line_lifespan: usize,
    /// Furthest a vertex may be to become the next target.
    pub path_length: f32,
    /// Distance covered per tick.
    pub particle_speed: f32,
    /// Distance from the origin beyond which a particle re-targets.
    pub max_distance: f32,
    pub colors: Vec<Color>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            num_particles: 200,
            size: 0.5,
            line_stroke_size: 0.2,
            lines_enabled: false,
            line_lifespan: 200,
            path_length: 30.0,
            particle_speed: 1.0,
            max_distance: 300.0,
            colors: vec![
                Color::rgb(255, 204, 0),
                Color::rgb(0, 255, 255),
                Color::rgb(255, 105, 180),
            ],
        }
    }
}

impl ParticleConfig {
    /// Drawing parameters derived from this config.
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            particle_size: self.size,
            line_stroke_width: self.line_stroke_size,
            lines_enabled: self.lines_enabled,
        }
    }
}
