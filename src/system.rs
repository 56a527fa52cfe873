//! The particle swarm.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::ParticleConfig;
use crate::error::ConfigError;
use crate::particle::{Particle, TickContext};
use crate::render::RenderCommand;

/// A fixed set of particles wandering over a shared vertex set.
///
/// Particles are created once in [`ParticleSystem::new`] and only change
/// through [`ParticleSystem::tick`]. There is no interaction between
/// particles, so the update order does not matter.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    vertices: Arc<[Vec3]>,
    config: ParticleConfig,
}

impl ParticleSystem {
    /// Seed `config.num_particles` particles on random vertices with random
    /// palette colors.
    ///
    /// The same `seed` always produces the same swarm and the same walk.
    pub fn new(vertices: Arc<[Vec3]>, config: ParticleConfig, seed: u64) -> Result<Self, ConfigError> {
        if vertices.is_empty() {
            return Err(ConfigError::NoVertices);
        }
        if config.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let ctx = TickContext::new(&vertices, &config);

        let particles: Vec<Particle> = (0..config.num_particles)
            .map(|_| {
                let start = vertices[rng.gen_range(0..vertices.len())];
                let color = config.colors[rng.gen_range(0..config.colors.len())];
                let particle_rng = SmallRng::seed_from_u64(rng.gen());
                Particle::new(start, color, particle_rng, &ctx)
            })
            .collect();

        tracing::info!(
            particles = particles.len(),
            vertices = vertices.len(),
            seed,
            "particle system ready"
        );

        Ok(Self {
            particles,
            vertices,
            config,
        })
    }

    /// Advance every particle by one step.
    pub fn tick(&mut self) {
        let ctx = TickContext::new(&self.vertices, &self.config);

        #[cfg(feature = "parallel")]
        self.particles.par_iter_mut().for_each(|p| p.update(&ctx));

        #[cfg(not(feature = "parallel"))]
        self.particles.iter_mut().for_each(|p| p.update(&ctx));
    }

    /// One render command per particle, in creation order.
    pub fn render_all(&self) -> Vec<RenderCommand> {
        let style = self.config.render_style();
        self.particles.iter().map(|p| p.render(&style)).collect()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn vertices(&self) -> &Arc<[Vec3]> {
        &self.vertices
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
