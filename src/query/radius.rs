use super::{is_finite, near_far, project, KdQuery};
use crate::bounds::dist_sq;
use crate::error::Error;
use crate::kdtree::{KdTree, ROOT};

impl KdQuery {
    /// Appends the index of every point within `radius` of `position` to `indices`.
    ///
    /// Order is unspecified. Uses the pool as a plain FIFO: nodes are expanded in
    /// the order they were reached, since every node in range must be visited anyway.
    pub fn radius(
        &mut self,
        tree: &KdTree,
        position: [f64; 3],
        radius: f64,
        indices: &mut Vec<usize>,
    ) -> Result<(), Error> {
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(Error::InvalidRadius(radius));
        }
        if !is_finite(&position) {
            return Err(Error::NonFiniteQuery);
        }
        self.reset();

        let Some(root) = tree.root() else {
            return Ok(());
        };
        let r2 = radius * radius;

        let d2 = root.bounds.dist_sq(&position);
        if d2 <= r2 {
            self.push_to_queue(ROOT, root.bounds.closest_point(&position), d2);
        }

        while self.left_to_process() > 0 {
            let query_node = self.pop_from_queue();
            let node = tree.node(query_node.node);

            let Some(split) = node.partition else {
                for &index in &tree.permutation()[node.start..node.end] {
                    if dist_sq(&tree.point(index), &position) <= r2 {
                        indices.push(index);
                    }
                }
                continue;
            };

            let (near, far) = near_far(&split, &query_node.temp_closest);
            self.push_to_queue(near, query_node.temp_closest, query_node.distance);

            if tree.node(far).count() == 0 {
                continue;
            }
            let projected = project(&split, query_node.temp_closest);
            let d2 = dist_sq(&projected, &position);
            if d2 <= r2 {
                self.push_to_queue(far, projected, d2);
            }
        }
        Ok(())
    }
}
