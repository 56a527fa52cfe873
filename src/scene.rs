//! Scene driver: ties the filtered grid, the swarm and the camera together.
//!
//! Each call to [`Scene::frame`] advances the simulation one tick and
//! returns a [`Frame`] describing everything to draw. The scene never
//! touches a GPU; a [`DrawSurface`] consumes the frame.

use glam::{Mat4, Vec3};
use std::sync::Arc;

use crate::camera::{ModelTransform, OrbitCamera};
use crate::config::Config;
use crate::dedup::VertexDeduplicator;
use crate::error::ConfigError;
use crate::mesh::VertexSource;
use crate::render::{DrawSurface, RenderCommand, Sphere};
use crate::system::ParticleSystem;

/// One frame's worth of draw data, in model space.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// Zoom and rotation applied to everything below.
    pub model: Mat4,
    /// The static point grid, one sphere per filtered vertex.
    pub grid: &'a [Sphere],
    /// One command per particle, in particle order.
    pub particles: Vec<RenderCommand>,
}

impl Frame<'_> {
    /// Replay the frame: grid first, then particles.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for sphere in self.grid {
            surface.sphere(sphere);
        }
        for cmd in &self.particles {
            cmd.draw(surface);
        }
    }
}

pub struct Scene {
    config: Config,
    vertices: Arc<[Vec3]>,
    grid: Vec<Sphere>,
    system: ParticleSystem,
    model: ModelTransform,
    camera: OrbitCamera,
}

impl Scene {
    /// Filter the source vertices and seed the swarm on them.
    pub fn new<V: VertexSource + ?Sized>(config: Config, source: &V, seed: u64) -> Result<Self, ConfigError> {
        let raw = source.vertices();
        let filtered = VertexDeduplicator::new(config.sketch.vertex_distance_threshold).filter(raw);

        tracing::info!(
            raw = raw.len(),
            filtered = filtered.len(),
            threshold = config.sketch.vertex_distance_threshold,
            "built point grid"
        );

        let vertices: Arc<[Vec3]> = filtered.into();
        let grid = vertices
            .iter()
            .map(|&center| Sphere {
                center,
                radius: config.sketch.point_grid_size,
                color: config.sketch.grid_color,
            })
            .collect();

        let system = ParticleSystem::new(vertices.clone(), config.particles.clone(), seed)?;
        let model = ModelTransform::new(&config.sketch);
        let camera = OrbitCamera::new(config.sketch.canvas_size[1] as f32);

        Ok(Self {
            config,
            vertices,
            grid,
            system,
            model,
            camera,
        })
    }

    /// Advance one tick (plus `dt` seconds of auto rotation) and describe
    /// the result.
    pub fn frame(&mut self, dt: f32) -> Frame<'_> {
        self.model.advance(dt);
        self.system.tick();

        Frame {
            model: self.model.matrix(),
            grid: &self.grid,
            particles: self.system.render_all(),
        }
    }

    /// Feed a mouse wheel delta to the zoom.
    pub fn zoom(&mut self, wheel_delta: f32) {
        self.model.zoom.apply_wheel(wheel_delta);
    }

    /// View * model: model space to camera space.
    pub fn model_view(&self) -> Mat4 {
        self.camera.view_matrix() * self.model.matrix()
    }

    /// Projection * view * model for a viewport of the given aspect ratio.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.camera.projection(aspect) * self.model_view()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The filtered vertex set.
    pub fn vertices(&self) -> &Arc<[Vec3]> {
        &self.vertices
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn model(&self) -> &ModelTransform {
        &self.model
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, RecordingSurface};

    fn line(n: usize, spacing: f32) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::new(i as f32 * spacing, 0.0, 0.0)).collect()
    }

    fn config(count: usize) -> Config {
        let mut config = Config::default();
        config.particles.num_particles = count;
        config
    }

    #[test]
    fn test_grid_is_filtered() {
        // Spacing 4 with threshold 10: every third point survives.
        let scene = Scene::new(config(3), &line(10, 4.0), 1).unwrap();
        assert_eq!(
            &scene.vertices()[..],
            &[Vec3::ZERO, Vec3::new(12.0, 0.0, 0.0), Vec3::new(24.0, 0.0, 0.0), Vec3::new(36.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_empty_mesh_is_config_error() {
        let empty: Vec<Vec3> = Vec::new();
        assert!(matches!(Scene::new(config(3), &empty, 1), Err(ConfigError::NoVertices)));
    }

    #[test]
    fn test_frame_draws_grid_then_particles() {
        let mut scene = Scene::new(config(5), &line(6, 20.0), 3).unwrap();
        let frame = scene.frame(1.0 / 60.0);

        assert_eq!(frame.grid.len(), 6);
        assert_eq!(frame.particles.len(), 5);

        let mut surface = RecordingSurface::default();
        frame.draw(&mut surface);
        assert_eq!(surface.spheres.len(), 11);
        assert!(surface.spheres[..6]
            .iter()
            .all(|s| s.color == Color::rgb(0, 255, 255) && s.radius == 0.4));
        assert!(surface.strips.is_empty());
    }

    #[test]
    fn test_trails_drawn_when_enabled() {
        let mut cfg = config(4);
        cfg.particles.lines_enabled = true;
        let mut scene = Scene::new(cfg, &line(6, 20.0), 3).unwrap();

        scene.frame(0.0);
        let frame = scene.frame(0.0);
        let mut surface = RecordingSurface::default();
        frame.draw(&mut surface);

        // Two ticks leave every particle with a two-point trail.
        assert_eq!(surface.strips.len(), 4);
        for strip in &surface.strips {
            assert_eq!(strip.points.len(), 2);
            assert_eq!(strip.width, 0.2);
        }
    }

    #[test]
    fn test_zoom_changes_view_proj() {
        let mut scene = Scene::new(config(1), &line(3, 20.0), 1).unwrap();
        let before = scene.view_proj(1.0);
        scene.zoom(-1000.0);
        assert_eq!(scene.model().zoom.value(), 3.5);
        assert_ne!(before, scene.view_proj(1.0));
    }
}
