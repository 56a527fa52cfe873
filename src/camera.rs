//! Camera for 3D orbit view, wheel zoom and model orientation.

use glam::{Mat4, Vec3};

use crate::config::{Rotation, SketchConfig, ZoomConfig};

/// Vertical field of view of the default camera.
pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_3;

/// Orbit camera for viewing the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl OrbitCamera {
    /// Radians of orbit per pixel of mouse drag.
    pub const DRAG_SENSITIVITY: f32 = 0.005;
    /// Pitch stays short of the poles so the up vector stays valid.
    pub const PITCH_LIMIT: f32 = 1.5;

    /// Camera looking down -Z at the origin from the distance at which a
    /// `canvas_height`-pixel tall view spans the same number of world units.
    pub fn new(canvas_height: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: (canvas_height / 2.0) / (FOV_Y / 2.0).tan(),
            target: Vec3::ZERO,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Perspective projection with near/far planes scaled to the orbit
    /// distance.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y, aspect, self.distance / 10.0, self.distance * 10.0)
    }

    /// Orbit by a mouse drag of `(dx, dy)` pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * Self::DRAG_SENSITIVITY;
        self.pitch = (self.pitch + dy * Self::DRAG_SENSITIVITY).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(800.0)
    }
}

/// Clamped uniform zoom driven by the mouse wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    value: f32,
    min: f32,
    max: f32,
    sensitivity: f32,
}

impl Zoom {
    pub fn new(config: &ZoomConfig) -> Self {
        Self {
            value: config.initial,
            min: config.min,
            max: config.max,
            sensitivity: config.sensitivity,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Apply a wheel delta (positive = scroll down = zoom out).
    pub fn apply_wheel(&mut self, delta: f32) {
        self.value = (self.value - delta / self.sensitivity).clamp(self.min, self.max);
    }
}

/// Orientation and scale applied to the whole model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    /// Fixed rotation in degrees.
    pub rotation: Rotation,
    /// Extra spin about Y in degrees, accumulated from `auto_rotate`.
    pub spin: f32,
    /// Degrees per second of spin, if any.
    pub auto_rotate: Option<f32>,
    pub zoom: Zoom,
}

impl ModelTransform {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            rotation: config.model_rotation,
            spin: 0.0,
            auto_rotate: config.auto_rotate,
            zoom: Zoom::new(&config.zoom),
        }
    }

    /// Accumulate auto rotation over `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if let Some(rate) = self.auto_rotate {
            self.spin = (self.spin + rate * dt) % 360.0;
        }
    }

    /// Model matrix: scale by zoom, then rotate about X, Y (plus spin)
    /// and Z, in that order as seen from the model's frame.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.zoom.value()))
            * Mat4::from_rotation_y(self.spin.to_radians())
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
    }
}
