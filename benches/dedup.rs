//! Benchmarks for vertex filtering and the per-tick particle update.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use pointswarm::dedup;
use pointswarm::{ParticleConfig, ParticleSystem};

fn cloud(n: usize) -> Vec<Vec3> {
    let mut rng = SmallRng::seed_from_u64(7);
    (0..n)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
            )
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup_filter");

    for n in [1_000, 5_000, 20_000] {
        let vertices = cloud(n);

        group.bench_with_input(BenchmarkId::new("naive", n), &vertices, |b, v| {
            b.iter(|| black_box(dedup::filter(v, 10.0)))
        });

        group.bench_with_input(BenchmarkId::new("indexed", n), &vertices, |b, v| {
            b.iter(|| black_box(dedup::filter_indexed(v, 10.0)))
        });
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("system_tick");

    let vertices = dedup::filter_indexed(&cloud(20_000), 10.0);

    for count in [200, 2_000] {
        let config = ParticleConfig {
            num_particles: count,
            ..ParticleConfig::default()
        };
        let mut system = ParticleSystem::new(vertices.clone().into(), config, 1)
            .expect("bench cloud is not empty");

        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| {
                system.tick();
                black_box(system.particles().len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_tick);
criterion_main!(benches);
