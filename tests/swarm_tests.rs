//! End-to-end tests for the swarm pipeline.
//!
//! These go through the public API only: OBJ text in, filtered grid and
//! ticking particles out.

use std::io::Cursor;
use std::sync::Arc;

use pointswarm::dedup;
use pointswarm::prelude::*;

fn line(n: usize, spacing: f32) -> Vec<Vec3> {
    (0..n).map(|i| Vec3::new(i as f32 * spacing, 0.0, 0.0)).collect()
}

fn particle_config(count: usize) -> ParticleConfig {
    ParticleConfig {
        num_particles: count,
        ..ParticleConfig::default()
    }
}

// ============================================================================
// Vertex filtering
// ============================================================================

#[test]
fn test_filter_chained_clusters() {
    let input = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(5.0, 0.0, 0.0),
        Vec3::new(5.5, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
    ];
    let kept = VertexDeduplicator::new(2.0).filter(&input);
    assert_eq!(
        kept,
        vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)]
    );
}

#[test]
fn test_filter_is_idempotent() {
    let once = dedup::filter(&line(50, 3.0), 10.0);
    let twice = dedup::filter(&once, 10.0);
    assert_eq!(once, twice);
}

// ============================================================================
// Particle system
// ============================================================================

#[test]
fn test_trail_never_exceeds_lifespan() {
    let mut config = particle_config(20);
    config.line_lifespan = 7;
    let mut system = ParticleSystem::new(line(40, 5.0).into(), config, 11).unwrap();

    for _ in 0..100 {
        system.tick();
        assert!(system.particles().iter().all(|p| p.trail().len() <= 7));
    }
    assert!(system.particles().iter().all(|p| p.trail().len() == 7));
}

#[test]
fn test_particles_stay_near_the_grid() {
    // A line of vertices from the origin: particles only ever move between
    // grid vertices, never past either end of the line.
    let vertices: Arc<[Vec3]> = line(20, 8.0).into();
    let config = particle_config(30);
    let speed = config.particle_speed;
    let mut system = ParticleSystem::new(vertices.clone(), config, 5).unwrap();

    for _ in 0..500 {
        system.tick();
    }

    for p in system.particles() {
        assert!(vertices.contains(&p.target()));
        assert!(p.position().x >= -speed && p.position().x <= 152.0 + speed, "{:?}", p.position());
    }
}

#[test]
fn test_out_of_bounds_particle_retargets() {
    let vertices = [Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)];
    let config = particle_config(1);
    let ctx = TickContext::new(&vertices, &config);

    // Heading away from everything, already past max_distance.
    let mut p = Particle::heading_to(
        Vec3::new(400.0, 0.0, 0.0),
        Vec3::new(900.0, 0.0, 0.0),
        1.0,
        Color::WHITE,
        rand::SeedableRng::seed_from_u64(3),
    );
    assert!(p.is_out_of_bounds(config.max_distance));

    p.update(&ctx);
    // Nothing within path_length of (400, 0, 0): the particle holds still.
    assert_eq!(p.target(), Vec3::new(400.0, 0.0, 0.0));
    assert_eq!(p.velocity(), Vec3::ZERO);
    assert_eq!(p.position(), Vec3::new(400.0, 0.0, 0.0));
}

#[test]
fn test_isolated_vertices_leave_particles_stationary() {
    // Vertices further apart than path_length: every particle can only pick
    // the vertex it stands on.
    let vertices = vec![Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), Vec3::new(0.0, 100.0, 0.0)];
    let mut system = ParticleSystem::new(vertices.clone().into(), particle_config(10), 9).unwrap();
    let start: Vec<Vec3> = system.particles().iter().map(|p| p.position()).collect();

    for _ in 0..20 {
        system.tick();
    }

    for (p, s) in system.particles().iter().zip(&start) {
        assert_eq!(p.position(), *s);
        assert!(vertices.contains(s));
    }
}

#[test]
fn test_same_seed_same_swarm() {
    let run = |seed| {
        let mut system = ParticleSystem::new(line(30, 6.0).into(), particle_config(25), seed).unwrap();
        for _ in 0..60 {
            system.tick();
        }
        system.particles().iter().map(|p| (p.position(), p.color())).collect::<Vec<_>>()
    };

    assert_eq!(run(123), run(123));
    assert_ne!(run(123), run(124));
}

// ============================================================================
// Scene
// ============================================================================

const TETRA: &str = "\
o tetra
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
v 0.0 0.0 1.0
f 1 2 3
f 1 2 4
f 1 3 4
f 2 3 4
";

#[test]
fn test_obj_to_scene() {
    let mesh = ObjMesh::from_reader(&mut Cursor::new(TETRA), true).unwrap();
    assert_eq!(mesh.vertices().len(), 4);

    let mut config = Config::default();
    config.particles.num_particles = 12;
    config.particles.lines_enabled = true;
    let mut scene = Scene::new(config, &mesh, 1).unwrap();

    // Normalized corners are 200 units apart, well past the threshold.
    assert_eq!(scene.vertices().len(), 4);

    scene.frame(1.0 / 60.0);
    scene.frame(1.0 / 60.0);
    let mut surface = RecordingSurface::default();
    scene.frame(1.0 / 60.0).draw(&mut surface);

    assert_eq!(surface.spheres.len(), 4 + 12);
    assert_eq!(surface.strips.len(), 12);
    assert!(surface.strips.iter().all(|s| s.points.len() == 3));
}

#[test]
fn test_scene_rejects_empty_palette() {
    let mut config = Config::default();
    config.particles.colors.clear();
    let result = Scene::new(config, &line(5, 20.0), 1);
    assert!(matches!(result, Err(ConfigError::EmptyPalette)));
}
