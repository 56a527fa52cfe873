//! A single wandering particle.
//!
//! Each particle walks from vertex to vertex of the filtered grid. When it
//! arrives (or strays too far from the origin) it picks a new target among
//! the vertices within `path_length` of where it stands and heads there at
//! a fixed speed, one step per tick. Past positions are kept in a bounded
//! trail for polyline rendering.
//!
//! Particles own their random source, so stepping them in any order (or in
//! parallel) gives the same result.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use std::collections::VecDeque;

use crate::config::ParticleConfig;
use crate::render::{Color, LineStrip, RenderCommand, RenderStyle, Sphere};

/// A particle closer than this to its target has arrived.
pub const ARRIVAL_DISTANCE: f32 = 1.0;

/// Read-only world state a particle needs to take a step.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Candidate targets (the filtered vertex set).
    pub vertices: &'a [Vec3],
    /// Furthest a vertex may be to become the next target (inclusive).
    pub path_length: f32,
    /// Distance covered per tick.
    pub speed: f32,
    /// Distance from the origin beyond which a particle re-targets.
    pub max_distance: f32,
    /// Maximum number of trail positions kept.
    pub trail_capacity: usize,
}

impl<'a> TickContext<'a> {
    pub fn new(vertices: &'a [Vec3], config: &ParticleConfig) -> Self {
        Self {
            vertices,
            path_length: config.path_length,
            speed: config.particle_speed,
            max_distance: config.max_distance,
            trail_capacity: config.line_lifespan,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec3,
    velocity: Vec3,
    target: Vec3,
    color: Color,
    trail: VecDeque<Vec3>,
    rng: SmallRng,
}

impl Particle {
    /// Spawn at `position` and immediately pick a first target.
    pub fn new(position: Vec3, color: Color, rng: SmallRng, ctx: &TickContext) -> Self {
        let mut particle = Self {
            position,
            velocity: Vec3::ZERO,
            target: position,
            color,
            trail: VecDeque::with_capacity(ctx.trail_capacity.min(1024)),
            rng,
        };
        particle.set_random_target(ctx);
        particle
    }

    /// Spawn at `position` already heading for `target` at `speed`.
    pub fn heading_to(position: Vec3, target: Vec3, speed: f32, color: Color, rng: SmallRng) -> Self {
        Self {
            position,
            velocity: (target - position).normalize_or_zero() * speed,
            target,
            color,
            trail: VecDeque::new(),
            rng,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Past positions, oldest first.
    #[inline]
    pub fn trail(&self) -> &VecDeque<Vec3> {
        &self.trail
    }

    /// Whether the particle is further than `max_distance` from the origin.
    pub fn is_out_of_bounds(&self, max_distance: f32) -> bool {
        self.position.length() > max_distance
    }

    /// Pick a new target uniformly among the vertices within
    /// `ctx.path_length` and aim the velocity at it.
    ///
    /// With no vertex in reach the particle targets its own position and
    /// stops; it stays put until a later re-target finds something.
    pub fn set_random_target(&mut self, ctx: &TickContext) {
        let position = self.position;
        let reach = ctx.path_length;

        self.target = ctx
            .vertices
            .iter()
            .copied()
            .filter(|v| v.distance(position) <= reach)
            .choose(&mut self.rng)
            .unwrap_or(position);

        // Zero when the target is the current position.
        self.velocity = (self.target - position).normalize_or_zero() * ctx.speed;

        if self.target == position {
            tracing::trace!(?position, "no distinct target in reach, particle holds still");
        }
    }

    /// Advance one tick.
    ///
    /// Re-targets first if the target was reached or the particle is out
    /// of bounds, then takes one `speed`-sized step and records the new
    /// position in the trail.
    pub fn update(&mut self, ctx: &TickContext) {
        if self.position.distance(self.target) < ARRIVAL_DISTANCE
            || self.is_out_of_bounds(ctx.max_distance)
        {
            self.set_random_target(ctx);
        }

        self.position += self.velocity;

        self.trail.push_back(self.position);
        while self.trail.len() > ctx.trail_capacity {
            self.trail.pop_front();
        }
    }

    /// Describe this particle for drawing.
    pub fn render(&self, style: &RenderStyle) -> RenderCommand {
        let trail = (style.lines_enabled && self.trail.len() > 1).then(|| LineStrip {
            points: self.trail.iter().copied().collect(),
            color: self.color,
            width: style.line_stroke_width,
        });

        RenderCommand {
            trail,
            body: Sphere {
                center: self.position,
                radius: style.particle_size,
                color: self.color,
            },
        }
    }
}
