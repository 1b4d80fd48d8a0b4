use super::{is_finite, KdQuery, Nearest};
use crate::bounds::dist_sq;
use crate::error::Error;
use crate::kdtree::{KdNode, KdTree, ROOT};

impl KdQuery {
    /// Finds the point of `tree` nearest to `position`.
    ///
    /// Best-first branch and bound: nodes come off the heap ordered by a lower
    /// bound of the distance to any point inside them, and a node whose bound
    /// already exceeds the best distance found is dropped unvisited.
    ///
    /// Returns `None` when the tree holds no points or `position` has a
    /// non-finite coordinate. Among exactly equidistant points the last one
    /// scanned wins.
    pub fn closest_point(&mut self, tree: &KdTree, position: [f64; 3]) -> Option<Nearest> {
        if !is_finite(&position) {
            return None;
        }
        self.search_closest(tree, &position, true)
    }

    /// Appends the index of the nearest point to `indices`, and its squared
    /// distance to `distances` when given. Appends nothing on error.
    pub fn closest_point_into(
        &mut self,
        tree: &KdTree,
        position: [f64; 3],
        indices: &mut Vec<usize>,
        distances: Option<&mut Vec<f64>>,
    ) -> Result<(), Error> {
        if !is_finite(&position) {
            return Err(Error::NonFiniteQuery);
        }
        let nearest = self.search_closest(tree, &position, true).ok_or(Error::EmptyTree)?;
        indices.push(nearest.index);
        if let Some(distances) = distances {
            distances.push(nearest.distance_sq);
        }
        Ok(())
    }

    pub(crate) fn search_closest(&mut self, tree: &KdTree, position: &[f64; 3], prune: bool) -> Option<Nearest> {
        self.reset();

        let root = tree.root()?;
        self.push_to_heap(ROOT, root.bounds.closest_point(position), position);

        // Smallest squared radius
        let mut ssr = f64::INFINITY;
        let mut best = None;

        while let Some(query_node) = self.pop_from_heap() {
            if prune && query_node.distance > ssr {
                continue;
            }

            let node = tree.node(query_node.node);
            match node.partition {
                Some(split) => self.push_children(tree, &split, &query_node, position),
                None => scan_leaf(tree, node, position, &mut ssr, &mut best),
            }
        }

        best.map(|index| Nearest { index, distance_sq: ssr })
    }
}

fn scan_leaf(tree: &KdTree, node: &KdNode, position: &[f64; 3], ssr: &mut f64, best: &mut Option<usize>) {
    for &index in &tree.permutation()[node.start..node.end] {
        let d2 = dist_sq(&tree.point(index), position);
        if d2 > *ssr {
            continue;
        }
        *ssr = d2;
        *best = Some(index);
    }
}
