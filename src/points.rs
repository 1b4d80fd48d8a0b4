use crate::bounds::BoundingBox;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Generates `count` uniformly distributed points inside `bounds` as a flat buffer.
///
/// The same seed always yields the same cloud.
pub fn random_points(count: usize, bounds: &BoundingBox<3>, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(count * 3);
    for _ in 0..count {
        for axis in 0..3 {
            let (lo, hi) = (bounds.min[axis], bounds.max[axis]);
            points.push(if hi > lo { rng.gen_range(lo..hi) } else { lo });
        }
    }
    points
}

/// Points clumped around a few random centers, the usual shape of scanned vertex data.
pub fn clustered_points(count: usize, clusters: usize, spread: f64, bounds: &BoundingBox<3>, seed: u64) -> Vec<f64> {
    let clusters = clusters.max(1);
    let centers = random_points(clusters, bounds, seed);
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let mut points = Vec::with_capacity(count * 3);
    for i in 0..count {
        let c = (i % clusters) * 3;
        for axis in 0..3 {
            let offset = if spread > 0.0 { rng.gen_range(-spread..spread) } else { 0.0 };
            points.push(centers[c + axis] + offset);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_points_are_seeded_and_bounded() {
        let bounds = BoundingBox::new([0.0, -1.0, 5.0], [1.0, 1.0, 5.0]);
        let a = random_points(100, &bounds, 42);
        let b = random_points(100, &bounds, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 300);
        for p in a.chunks_exact(3) {
            assert!(bounds.contains(&[p[0], p[1], p[2]]));
        }
    }

    #[test]
    fn clustered_points_stay_near_centers() {
        let bounds = BoundingBox::new([0.0; 3], [100.0; 3]);
        let points = clustered_points(90, 3, 0.5, &bounds, 9);
        let centers = random_points(3, &bounds, 9);
        for (i, p) in points.chunks_exact(3).enumerate() {
            let c = &centers[(i % 3) * 3..(i % 3) * 3 + 3];
            for axis in 0..3 {
                assert!((p[axis] - c[axis]).abs() <= 0.5);
            }
        }
    }
}
