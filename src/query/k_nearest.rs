use super::{is_finite, KdQuery};
use crate::bounds::dist_sq;
use crate::error::Error;
use crate::kdtree::{KdTree, ROOT};

impl KdQuery {
    /// Appends the indices of the `k` points nearest to `position`, nearest first.
    ///
    /// Fewer than `k` indices are appended when the tree is smaller than `k`.
    /// Squared distances go to `distances` when given. A position with a
    /// non-finite coordinate is rejected with [`Error::NonFiniteQuery`].
    pub fn k_nearest(
        &mut self,
        tree: &KdTree,
        position: [f64; 3],
        k: usize,
        indices: &mut Vec<usize>,
        distances: Option<&mut Vec<f64>>,
    ) -> Result<(), Error> {
        if !is_finite(&position) {
            return Err(Error::NonFiniteQuery);
        }
        self.reset();

        let root = tree.root().ok_or(Error::EmptyTree)?;
        let k = k.min(tree.len());
        if k == 0 {
            return Ok(());
        }

        self.push_to_heap(ROOT, root.bounds.closest_point(&position), &position);

        while let Some(query_node) = self.pop_from_heap() {
            // Heap order means nothing left can beat a full candidate set
            if self.candidates.count() == k
                && self.candidates.head_priority().is_some_and(|kth| query_node.distance > kth)
            {
                break;
            }

            let node = tree.node(query_node.node);
            let Some(split) = node.partition else {
                for &index in &tree.permutation()[node.start..node.end] {
                    let d2 = dist_sq(&tree.point(index), &position);
                    if self.candidates.count() < k {
                        self.candidates.push(index, d2);
                    } else if self.candidates.head_priority().is_some_and(|kth| d2 < kth) {
                        self.candidates.replace_head(index, d2);
                    }
                }
                continue;
            };
            self.push_children(tree, &split, &query_node, &position);
        }

        self.candidates.drain_ascending(&mut self.sorted);
        indices.extend(self.sorted.iter().map(|&(_, index)| index));
        if let Some(distances) = distances {
            distances.extend(self.sorted.iter().map(|&(d2, _)| d2));
        }
        Ok(())
    }
}
