use crate::config::QueryConfig;
use crate::error::Error;
use crate::kdtree::KdTree;
use crate::query::{KdQuery, Nearest};
use rayon::prelude::*;

/// Closest point for every position of a flat `[x, y, z, ...]` buffer, in parallel.
///
/// Each rayon worker split gets its own [`KdQuery`]; the tree is shared read-only.
/// Entry `i` of the result answers position `i`, `None` for an empty tree or a
/// non-finite position.
pub fn closest_points(tree: &KdTree, positions: &[f64], config: QueryConfig) -> Result<Vec<Option<Nearest>>, Error> {
    if positions.len() % 3 != 0 {
        return Err(Error::InvalidPointBuffer { len: positions.len() });
    }

    let results = positions
        .par_chunks_exact(3)
        .map_init(
            || KdQuery::new(config),
            |query, p| query.closest_point(tree, [p[0], p[1], p[2]]),
        )
        .collect();
    Ok(results)
}

/// `k` nearest points for every position, in parallel. Entry `i` is nearest first.
pub fn k_nearest_points(
    tree: &KdTree,
    positions: &[f64],
    k: usize,
    config: QueryConfig,
) -> Result<Vec<Vec<usize>>, Error> {
    if positions.len() % 3 != 0 {
        return Err(Error::InvalidPointBuffer { len: positions.len() });
    }
    if tree.is_empty() {
        return Err(Error::EmptyTree);
    }

    positions
        .par_chunks_exact(3)
        .map_init(
            || KdQuery::new(config),
            |query, p| {
                let mut indices = Vec::with_capacity(k.min(tree.len()));
                query.k_nearest(tree, [p[0], p[1], p[2]], k, &mut indices, None)?;
                Ok(indices)
            },
        )
        .collect()
}
