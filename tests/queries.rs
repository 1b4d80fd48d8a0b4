use kdquery::batch::{closest_points, k_nearest_points};
use kdquery::points::random_points;
use kdquery::{BoundingBox, Error, KdQuery, KdTree, QueryConfig, TreeConfig};

fn dist_sq(points: &[f64], i: usize, q: &[f64; 3]) -> f64 {
    let dx = points[i * 3] - q[0];
    let dy = points[i * 3 + 1] - q[1];
    let dz = points[i * 3 + 2] - q[2];
    dx * dx + dy * dy + dz * dz
}

fn setup(count: usize, seed: u64) -> (Vec<f64>, KdTree) {
    let bounds = BoundingBox::new([0.0; 3], [100.0; 3]);
    let points = random_points(count, &bounds, seed);
    let tree = KdTree::from_points(&points, TreeConfig::with_leaf_size(8)).unwrap();
    (points, tree)
}

#[test]
fn test_radius_matches_brute_force() {
    let (points, tree) = setup(4000, 1);
    let mut query = KdQuery::default();
    let probes = random_points(50, &BoundingBox::new([-10.0; 3], [110.0; 3]), 2);

    for q in probes.chunks_exact(3) {
        let q = [q[0], q[1], q[2]];
        for &radius in &[0.0, 3.0, 12.5, 40.0] {
            let mut found = Vec::new();
            query.radius(&tree, q, radius, &mut found).unwrap();
            found.sort_unstable();

            let expected: Vec<usize> = (0..tree.len())
                .filter(|&i| dist_sq(&points, i, &q) <= radius * radius)
                .collect();
            assert_eq!(found, expected, "radius {} around {:?}", radius, q);
        }
    }
}

#[test]
fn test_radius_appends_to_existing_output() {
    let (_, tree) = setup(500, 3);
    let mut query = KdQuery::default();
    let mut found = vec![usize::MAX];
    query.radius(&tree, [50.0; 3], 1000.0, &mut found).unwrap();
    assert_eq!(found.len(), 501);
    assert_eq!(found[0], usize::MAX);
}

#[test]
fn test_k_nearest_matches_brute_force() {
    let (points, tree) = setup(3000, 4);
    let mut query = KdQuery::with_capacity(16);
    let probes = random_points(40, &BoundingBox::new([0.0; 3], [100.0; 3]), 5);

    for q in probes.chunks_exact(3) {
        let q = [q[0], q[1], q[2]];
        for &k in &[1, 5, 32] {
            let mut indices = Vec::new();
            let mut distances = Vec::new();
            query.k_nearest(&tree, q, k, &mut indices, Some(&mut distances)).unwrap();

            let mut all: Vec<f64> = (0..tree.len()).map(|i| dist_sq(&points, i, &q)).collect();
            all.sort_by(|a, b| a.partial_cmp(b).unwrap());

            assert_eq!(indices.len(), k);
            assert_eq!(distances, all[..k].to_vec());
            for (&i, &d2) in indices.iter().zip(&distances) {
                assert_eq!(dist_sq(&points, i, &q), d2);
            }
        }
    }
}

#[test]
fn test_k_nearest_first_equals_closest() {
    let (_, tree) = setup(2000, 6);
    let mut query = KdQuery::default();
    let probes = random_points(100, &BoundingBox::new([0.0; 3], [100.0; 3]), 7);

    for q in probes.chunks_exact(3) {
        let q = [q[0], q[1], q[2]];
        let closest = query.closest_point(&tree, q).unwrap();
        let mut indices = Vec::new();
        query.k_nearest(&tree, q, 1, &mut indices, None).unwrap();
        assert_eq!(indices, vec![closest.index]);
    }
}

#[test]
fn test_batch_matches_single_queries() {
    let (_, tree) = setup(5000, 8);
    let positions = random_points(1000, &BoundingBox::new([0.0; 3], [100.0; 3]), 9);

    let batch = closest_points(&tree, &positions, QueryConfig::with_capacity(1)).unwrap();
    assert_eq!(batch.len(), 1000);

    let mut query = KdQuery::default();
    for (i, q) in positions.chunks_exact(3).enumerate() {
        let single = query.closest_point(&tree, [q[0], q[1], q[2]]);
        assert_eq!(batch[i], single);
    }
}

#[test]
fn test_batch_non_finite_position() {
    let (_, tree) = setup(200, 12);
    let positions = [1.0, 2.0, 3.0, f64::NAN, 0.0, 0.0, 4.0, 5.0, 6.0];

    let batch = closest_points(&tree, &positions, QueryConfig::default()).unwrap();
    assert!(batch[0].is_some());
    assert!(batch[1].is_none());
    assert!(batch[2].is_some());

    assert_eq!(k_nearest_points(&tree, &positions, 3, QueryConfig::default()), Err(Error::NonFiniteQuery));
}

#[test]
fn test_batch_k_nearest() {
    let (_, tree) = setup(1000, 10);
    let positions = random_points(64, &BoundingBox::new([0.0; 3], [100.0; 3]), 11);

    let batch = k_nearest_points(&tree, &positions, 4, QueryConfig::default()).unwrap();
    let mut query = KdQuery::default();
    for (i, q) in positions.chunks_exact(3).enumerate() {
        let mut indices = Vec::new();
        query.k_nearest(&tree, [q[0], q[1], q[2]], 4, &mut indices, None).unwrap();
        assert_eq!(batch[i], indices);
    }
}
