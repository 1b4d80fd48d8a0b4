use crate::bounds::BoundingBox;
use crate::config::TreeConfig;
use crate::error::Error;

/// Index of a node inside a [`KdTree`]'s node arena.
pub type NodeId = u32;

/// The root is always the first node pushed during a build.
pub const ROOT: NodeId = 0;

/// Split plane of an internal node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Partition {
    pub axis: usize,
    pub coordinate: f64,
    /// Child covering `coord <= coordinate` along `axis`.
    pub negative: NodeId,
    /// Child covering `coord >= coordinate` along `axis`.
    pub positive: NodeId,
}

#[derive(Clone, Copy, Debug)]
pub struct KdNode {
    /// Region of space this node covers. Children split it at the partition plane.
    pub bounds: BoundingBox<3>,
    // Range into the permutation array: indices[start..end]
    pub start: usize,
    pub end: usize,
    /// `None` for leaves.
    pub partition: Option<Partition>,
}

impl KdNode {
    #[inline]
    pub fn count(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.partition.is_none()
    }
}

/// An immutable-once-built k-d tree over a flat `[x, y, z, ...]` point buffer.
///
/// The points themselves never move: construction only reorders the permutation
/// array so that every leaf owns a contiguous slice of it. Queries borrow the
/// tree immutably, so one tree can be shared by any number of threads each
/// holding its own [`KdQuery`](crate::KdQuery).
#[derive(Clone, Debug)]
pub struct KdTree {
    points: Vec<f64>,
    permutation: Vec<usize>,
    nodes: Vec<KdNode>,
    config: TreeConfig,
    depth: usize,
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

impl KdTree {
    /// Creates an empty tree. Call [`KdTree::build`] to fill it.
    pub fn new(config: TreeConfig) -> Self {
        KdTree {
            points: Vec::new(),
            permutation: Vec::new(),
            nodes: Vec::new(),
            config,
            depth: 0,
        }
    }

    /// Builds a tree over `points` in one step.
    pub fn from_points(points: &[f64], config: TreeConfig) -> Result<Self, Error> {
        let mut tree = Self::new(config);
        tree.build(points)?;
        Ok(tree)
    }

    /// Replaces the point set and rebuilds. On error the tree is left untouched.
    pub fn build(&mut self, points: &[f64]) -> Result<(), Error> {
        validate(points, self.config.max_points_per_leaf)?;
        self.points.clear();
        self.points.extend_from_slice(points);
        self.build_tree();
        Ok(())
    }

    /// Rebuilds over the current points, optionally with a new leaf size.
    pub fn rebuild(&mut self, max_points_per_leaf: Option<usize>) -> Result<(), Error> {
        if let Some(leaf) = max_points_per_leaf {
            if leaf == 0 {
                log::warn!("rejecting rebuild with leaf size 0");
                return Err(Error::InvalidLeafSize);
            }
            self.config.max_points_per_leaf = leaf;
        }
        self.build_tree();
        Ok(())
    }

    /// Number of points in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The flat point buffer, in the order it was supplied.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    #[inline]
    pub fn point(&self, index: usize) -> [f64; 3] {
        let p = &self.points[index * 3..index * 3 + 3];
        [p[0], p[1], p[2]]
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    pub fn nodes(&self) -> &[KdNode] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &KdNode {
        &self.nodes[id as usize]
    }

    /// `None` when the tree holds no points.
    pub fn root(&self) -> Option<&KdNode> {
        self.nodes.first()
    }

    pub fn max_points_per_leaf(&self) -> usize {
        self.config.max_points_per_leaf
    }

    /// Number of levels below the root (0 for a single leaf).
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn build_tree(&mut self) {
        let count = self.len();
        self.permutation.clear();
        self.permutation.extend(0..count);
        self.nodes.clear();
        self.depth = 0;

        let Some(bounds) = BoundingBox::from_flat(&self.points) else {
            log::debug!("built empty kd-tree");
            return;
        };

        // A balanced tree has 2*N/leaf nodes roughly
        self.nodes.reserve(2 * count / self.config.max_points_per_leaf + 1);
        self.nodes.push(KdNode { bounds, start: 0, end: count, partition: None });

        // Explicit stack: clustered inputs can make the tree far deeper than log(N)
        let mut pending: Vec<(NodeId, usize)> = Vec::new();
        if count > self.config.max_points_per_leaf {
            pending.push((ROOT, 0));
        }
        while let Some((id, depth)) = pending.pop() {
            self.depth = self.depth.max(depth);
            let Some((negative, positive)) = self.split_node(id) else {
                continue;
            };
            self.depth = self.depth.max(depth + 1);
            for child in [positive, negative] {
                if self.node(child).count() > self.config.max_points_per_leaf {
                    pending.push((child, depth + 1));
                }
            }
        }

        log::debug!(
            "built kd-tree: {} points, {} nodes, depth {}, leaf size {}",
            count,
            self.nodes.len(),
            self.depth,
            self.config.max_points_per_leaf
        );
    }

    /// Splits a node in two, returning the children, or `None` if every point in it coincides.
    fn split_node(&mut self, id: NodeId) -> Option<(NodeId, NodeId)> {
        let KdNode { bounds, start, end, .. } = *self.node(id);

        // Split along the axis where the points actually spread the most
        let mut spread = BoundingBox::<3>::empty();
        for &idx in &self.permutation[start..end] {
            for axis in 0..3 {
                spread.include_coord(axis, self.points[idx * 3 + axis]);
            }
        }
        let axis = spread.longest_axis();
        let (lo, hi) = (spread.min[axis], spread.max[axis]);
        if lo >= hi {
            return None;
        }

        // Sliding midpoint: cut the region in half unless all points sit on one side,
        // in which case slide the plane onto the nearest point so both halves are used.
        let mid = (bounds.min[axis] + bounds.max[axis]) * 0.5;
        let split = if lo < mid && mid <= hi {
            let at = self.partition(start, end, axis, |v| v < mid);
            (mid, at)
        } else if hi < mid {
            let at = self.partition(start, end, axis, |v| v < hi);
            (hi, at)
        } else {
            let at = self.partition(start, end, axis, |v| v <= lo);
            (lo, at)
        };
        let (coordinate, at) = split;
        debug_assert!(at > start && at < end);

        let mut neg_bounds = bounds;
        neg_bounds.max[axis] = coordinate;
        let mut pos_bounds = bounds;
        pos_bounds.min[axis] = coordinate;

        let negative = self.nodes.len() as NodeId;
        self.nodes.push(KdNode { bounds: neg_bounds, start, end: at, partition: None });
        let positive = self.nodes.len() as NodeId;
        self.nodes.push(KdNode { bounds: pos_bounds, start: at, end, partition: None });

        self.nodes[id as usize].partition = Some(Partition { axis, coordinate, negative, positive });
        Some((negative, positive))
    }

    /// Moves every index whose coordinate satisfies `goes_left` to the front of the range.
    /// Returns the first index of the right half.
    fn partition<F>(&mut self, start: usize, end: usize, axis: usize, goes_left: F) -> usize
    where
        F: Fn(f64) -> bool,
    {
        let mut i = start;
        let mut j = end;
        while i < j {
            let v = self.points[self.permutation[i] * 3 + axis];
            if goes_left(v) {
                i += 1;
            } else {
                j -= 1;
                self.permutation.swap(i, j);
            }
        }
        i
    }
}

fn validate(points: &[f64], max_points_per_leaf: usize) -> Result<(), Error> {
    if max_points_per_leaf == 0 {
        log::warn!("rejecting kd-tree build with leaf size 0");
        return Err(Error::InvalidLeafSize);
    }
    if points.len() % 3 != 0 {
        log::warn!("rejecting point buffer of length {}", points.len());
        return Err(Error::InvalidPointBuffer { len: points.len() });
    }
    if let Some(pos) = points.iter().position(|v| !v.is_finite()) {
        log::warn!("rejecting point {} with non-finite coordinate", pos / 3);
        return Err(Error::NonFiniteCoordinate { index: pos / 3 });
    }
    Ok(())
}
