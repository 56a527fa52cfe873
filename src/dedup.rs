//! Greedy minimum-distance vertex filtering.
//!
//! Reduces a dense mesh vertex list to a sparse point grid. Vertices are
//! visited in input order and a vertex is kept only if it is further than
//! `threshold` from every vertex kept so far. Nothing is ever removed
//! afterwards, so the first vertex seen in a cluster wins. Vertices with a
//! NaN or infinite coordinate are never kept.
//!
//! Two implementations produce the same output:
//!
//! - [`filter`] scans every kept vertex (O(n²) worst case);
//! - [`filter_indexed`] buckets kept vertices in a uniform grid with cell
//!   size `threshold` and only scans the 27 cells around a candidate.

use glam::Vec3;
use std::collections::HashMap;

/// Below this many input vertices the plain scan is used.
const INDEX_MIN_VERTICES: usize = 256;

/// Filter `vertices`, keeping each one whose distance to every already
/// kept vertex is strictly greater than `threshold`.
///
/// With `threshold < 0` every finite vertex is kept; with `threshold == 0`
/// only exact duplicates are dropped.
pub fn filter(vertices: &[Vec3], threshold: f32) -> Vec<Vec3> {
    let mut kept: Vec<Vec3> = Vec::new();
    for &v in vertices {
        if v.is_finite() && kept.iter().all(|k| k.distance(v) > threshold) {
            kept.push(v);
        }
    }
    kept
}

#[derive(Hash, Debug, Copy, Clone, PartialEq, Eq)]
struct CellKey {
    x: i64,
    y: i64,
    z: i64,
}

impl CellKey {
    fn new(cell_size: f32, position: Vec3) -> CellKey {
        let coord = |v: f32| (v / cell_size).floor() as i64;

        CellKey {
            x: coord(position.x),
            y: coord(position.y),
            z: coord(position.z),
        }
    }

    fn relative(&self, x: i64, y: i64, z: i64) -> CellKey {
        CellKey {
            x: self.x.saturating_add(x),
            y: self.y.saturating_add(y),
            z: self.z.saturating_add(z),
        }
    }
}

/// Same result as [`filter`], using a grid hash to find nearby kept
/// vertices.
///
/// Any kept vertex within `threshold` of a candidate lies in the
/// candidate's cell or one of its 26 neighbours, so only those are
/// scanned. Thresholds that are not positive and finite fall back to
/// [`filter`].
pub fn filter_indexed(vertices: &[Vec3], threshold: f32) -> Vec<Vec3> {
    if !(threshold > 0.0 && threshold.is_finite()) {
        return filter(vertices, threshold);
    }

    let mut kept: Vec<Vec3> = Vec::new();
    let mut grid: HashMap<CellKey, Vec<usize>> = HashMap::new();

    for &v in vertices.iter().filter(|v| v.is_finite()) {
        let key = CellKey::new(threshold, v);

        let mut clear = true;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(bucket) = grid.get(&key.relative(dx, dy, dz)) {
                        if bucket.iter().any(|&i| kept[i].distance(v) <= threshold) {
                            clear = false;
                            break 'search;
                        }
                    }
                }
            }
        }

        if clear {
            grid.entry(key).or_default().push(kept.len());
            kept.push(v);
        }
    }

    kept
}

/// Vertex filter bound to a threshold.
///
/// Picks the grid-hashed variant for larger inputs; output is identical
/// to [`filter`] either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexDeduplicator {
    threshold: f32,
}

impl VertexDeduplicator {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn filter(&self, vertices: &[Vec3]) -> Vec<Vec3> {
        let kept = if vertices.len() >= INDEX_MIN_VERTICES {
            filter_indexed(vertices, self.threshold)
        } else {
            filter(vertices, self.threshold)
        };

        tracing::debug!(
            input = vertices.len(),
            kept = kept.len(),
            threshold = self.threshold,
            "filtered vertices"
        );

        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn random_cloud(seed: u64, count: usize, extent: f32) -> Vec<Vec3> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-extent..extent),
                    rng.gen_range(-extent..extent),
                    rng.gen_range(-extent..extent),
                )
            })
            .collect()
    }

    /// True if `sub` appears in `full` in the same relative order.
    fn is_subsequence(sub: &[Vec3], full: &[Vec3]) -> bool {
        let mut it = full.iter();
        sub.iter().all(|s| it.any(|f| f == s))
    }

    #[test]
    fn test_empty_input() {
        assert!(filter(&[], 10.0).is_empty());
        assert!(filter_indexed(&[], 10.0).is_empty());
    }

    #[test]
    fn test_drops_only_the_close_vertex() {
        // v0 and v2 are 1.0 apart; every other pair is at least 10 apart.
        let v = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, -10.0, 0.0),
        ];
        let out = filter(&v, 2.0);
        assert_eq!(out, vec![v[0], v[1], v[3], v[4]]);
        assert_eq!(filter_indexed(&v, 2.0), out);
    }

    #[test]
    fn test_first_seen_wins() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(0.5, 0.0, 0.0);
        assert_eq!(filter(&[a, b], 1.0), vec![a]);
        assert_eq!(filter(&[b, a], 1.0), vec![b]);
    }

    #[test]
    fn test_distance_equal_to_threshold_is_dropped() {
        let a = Vec3::ZERO;
        let b = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(filter(&[a, b], 5.0), vec![a]);
        assert_eq!(filter_indexed(&[a, b], 5.0), vec![a]);
    }

    #[test]
    fn test_non_positive_threshold() {
        let v = [Vec3::ZERO, Vec3::ZERO, Vec3::X, Vec3::new(1e-6, 0.0, 0.0)];
        // Zero only merges exact duplicates.
        assert_eq!(filter(&v, 0.0), vec![v[0], v[2], v[3]]);
        // Negative keeps everything.
        assert_eq!(filter(&v, -1.0), v.to_vec());
        assert_eq!(filter_indexed(&v, -1.0), v.to_vec());
    }

    #[test]
    fn test_pairwise_distance_and_order() {
        let cloud = random_cloud(7, 600, 50.0);
        let threshold = 6.0;
        let out = filter(&cloud, threshold);

        for (i, a) in out.iter().enumerate() {
            for b in &out[i + 1..] {
                assert!(a.distance(*b) > threshold);
            }
        }
        assert!(is_subsequence(&out, &cloud));
    }

    #[test]
    fn test_idempotent() {
        let cloud = random_cloud(11, 400, 40.0);
        let once = filter(&cloud, 5.0);
        let twice = filter(&once, 5.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_indexed_matches_naive() {
        for (seed, threshold) in [(1, 0.5), (2, 3.0), (3, 10.0), (4, 25.0)] {
            let cloud = random_cloud(seed, 800, 30.0);
            assert_eq!(filter_indexed(&cloud, threshold), filter(&cloud, threshold));
        }
    }

    #[test]
    fn test_indexed_handles_negative_coordinates_on_cell_edges() {
        // Points straddling cell boundaries around zero.
        let v = [
            Vec3::new(-0.01, 0.0, 0.0),
            Vec3::new(0.01, 0.0, 0.0),
            Vec3::new(-2.0, -2.0, -2.0),
            Vec3::new(-1.99, -2.0, -2.0),
            Vec3::new(2.0, 2.0, 2.0),
        ];
        assert_eq!(filter_indexed(&v, 2.0), filter(&v, 2.0));
    }

    #[test]
    fn test_deduplicator_switches_variant_transparently() {
        let small = random_cloud(5, 100, 20.0);
        let large = random_cloud(6, 1_000, 20.0);
        let dedup = VertexDeduplicator::new(4.0);
        assert_eq!(dedup.filter(&small), filter(&small, 4.0));
        assert_eq!(dedup.filter(&large), filter(&large, 4.0));
    }

    #[test]
    fn test_non_finite_vertices_are_dropped_by_both_variants() {
        let v = [
            Vec3::new(f32::NAN, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(f32::NAN, 0.0, 0.0),
            Vec3::new(f32::INFINITY, 0.0, 0.0),
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::new(0.0, f32::NEG_INFINITY, 0.0),
        ];
        let expected = vec![Vec3::ZERO, Vec3::new(50.0, 0.0, 0.0)];

        assert_eq!(filter(&v, 10.0), expected);
        assert_eq!(filter_indexed(&v, 10.0), expected);
        // Fallback thresholds go through the plain scan.
        assert_eq!(filter_indexed(&v, -1.0), expected);
    }
}
