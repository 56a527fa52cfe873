//! Render commands handed to the drawing surface.
//!
//! Nothing in the simulation draws directly. Particles and the scene
//! describe what should appear as plain data ([`RenderCommand`],
//! [`Sphere`], [`LineStrip`]) and a [`DrawSurface`] implementation turns
//! that into pixels. Sizes and widths are passed through as configured.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color, as written in configuration files (`[r, g, b]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color as floats in 0.0-1.0, the form the GPU shaders take.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32) / 255.0
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

/// A filled sphere (or point, at small radii).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,
}

/// An open polyline through `points`, oldest point first.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStrip {
    pub points: Vec<Vec3>,
    pub color: Color,
    pub width: f32,
}

/// Everything needed to draw one particle for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    /// Trail polyline, present only when trails are enabled and the trail
    /// holds at least two points.
    pub trail: Option<LineStrip>,
    /// The particle body.
    pub body: Sphere,
}

impl RenderCommand {
    /// Replay this command: trail first, then the body on top.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        if let Some(trail) = &self.trail {
            surface.line_strip(trail);
        }
        surface.sphere(&self.body);
    }
}

/// Per-run drawing parameters for particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Radius of the particle sphere.
    pub particle_size: f32,
    /// Stroke width of trail polylines.
    pub line_stroke_width: f32,
    /// Whether trails are emitted at all.
    pub lines_enabled: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            particle_size: 0.5,
            line_stroke_width: 0.2,
            lines_enabled: false,
        }
    }
}

/// The rendering boundary: anything that accepts primitive draw calls.
///
/// Coordinates are in model space; the consumer applies the camera and
/// model transforms.
pub trait DrawSurface {
    /// Draw a filled sphere.
    fn sphere(&mut self, sphere: &Sphere);

    /// Draw an open polyline.
    fn line_strip(&mut self, strip: &LineStrip);
}

/// A surface that just records what it was asked to draw.
///
/// Useful for tests and for inspecting a frame without a GPU.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub spheres: Vec<Sphere>,
    pub strips: Vec<LineStrip>,
}

impl DrawSurface for RecordingSurface {
    fn sphere(&mut self, sphere: &Sphere) {
        self.spheres.push(*sphere);
    }

    fn line_strip(&mut self, strip: &LineStrip) {
        self.strips.push(strip.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_vec3() {
        let c = Color::rgb(255, 0, 51).to_vec3();
        assert!((c.x - 1.0).abs() < 0.001);
        assert!(c.y.abs() < 0.001);
        assert!((c.z - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_color_json_is_triplet() {
        let json = serde_json::to_string(&Color::rgb(255, 204, 0)).unwrap();
        assert_eq!(json, "[255,204,0]");
        let back: Color = serde_json::from_str("[0,255,255]").unwrap();
        assert_eq!(back, Color::rgb(0, 255, 255));
    }

    #[test]
    fn test_draw_order_trail_then_body() {
        let cmd = RenderCommand {
            trail: Some(LineStrip {
                points: vec![Vec3::ZERO, Vec3::X],
                color: Color::WHITE,
                width: 0.2,
            }),
            body: Sphere {
                center: Vec3::X,
                radius: 0.5,
                color: Color::WHITE,
            },
        };
        let mut surface = RecordingSurface::default();
        cmd.draw(&mut surface);
        assert_eq!(surface.strips.len(), 1);
        assert_eq!(surface.spheres.len(), 1);
        assert_eq!(surface.spheres[0].center, Vec3::X);
    }
}
