//! # pointswarm
//!
//! A point-cloud swarm visualization. A mesh is reduced to a sparse grid of
//! points, and a swarm of particles wanders that grid, each one repeatedly
//! picking a nearby point and flying to it while leaving a short trail.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pointswarm::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     let mesh = ObjMesh::load("model.obj", true)?;
//!     let scene = Scene::new(Config::default(), &mesh, 42)?;
//!     pointswarm::viewer::run(scene)
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`mesh`] supplies raw vertex positions (any [`mesh::VertexSource`]).
//! 2. [`dedup`] drops vertices that sit within a threshold of one already
//!    kept, in input order.
//! 3. [`system::ParticleSystem`] spawns particles on the filtered points.
//!    Each tick every particle either retargets (arrived or wandered too
//!    far) or steps towards its target, appending to its trail.
//! 4. [`scene::Scene`] wraps the grid, the swarm and the camera, and hands
//!    out a [`scene::Frame`] per tick. A [`render::DrawSurface`] turns a
//!    frame into pixels: [`gpu::FrameBatch`] in the viewer,
//!    [`render::RecordingSurface`] in tests.
//!
//! ## Determinism
//!
//! Every random choice flows from the seed passed to [`Scene::new`], so a
//! given mesh, configuration and seed always produce the same swarm. This
//! holds with the `parallel` feature too: each particle owns its own
//! generator.

pub mod camera;
pub mod config;
pub mod dedup;
pub mod error;
pub mod gpu;
pub mod input;
pub mod mesh;
pub mod particle;
pub mod render;
pub mod scene;
pub mod system;
pub mod time;
pub mod viewer;

pub use config::{Config, ParticleConfig, SketchConfig};
pub use dedup::VertexDeduplicator;
pub use error::{ConfigError, GpuError, MeshError, ViewerError};
pub use glam::Vec3;
pub use mesh::{ObjMesh, VertexSource};
pub use particle::{Particle, TickContext};
pub use render::{Color, DrawSurface, RenderCommand};
pub use scene::{Frame, Scene};
pub use system::ParticleSystem;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use pointswarm::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{ModelTransform, OrbitCamera, Zoom};
    pub use crate::config::{Config, ParticleConfig, Rotation, SketchConfig, ZoomConfig};
    pub use crate::dedup::VertexDeduplicator;
    pub use crate::error::{ConfigError, GpuError, MeshError, ViewerError};
    pub use crate::mesh::{ObjMesh, VertexSource};
    pub use crate::particle::{Particle, TickContext};
    pub use crate::render::{Color, DrawSurface, LineStrip, RecordingSurface, RenderCommand, RenderStyle, Sphere};
    pub use crate::scene::{Frame, Scene};
    pub use crate::system::ParticleSystem;
    pub use crate::time::FrameClock;
    pub use crate::Vec3;
}
