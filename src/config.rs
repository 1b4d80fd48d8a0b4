/// Default leaf size of a [`KdTree`](crate::KdTree).
pub const DEFAULT_MAX_POINTS_PER_LEAF: usize = 16;

/// Default number of pooled traversal nodes a [`KdQuery`](crate::KdQuery) starts with.
pub const DEFAULT_QUERY_CAPACITY: usize = 2048;

/// Upper bound on [`QueryConfig::initial_capacity`]. Larger requests are
/// clamped; the pool still grows past it on demand.
pub const MAX_INITIAL_QUERY_CAPACITY: usize = 1 << 20;

/// Build parameters of a [`KdTree`](crate::KdTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Nodes holding more points than this are split further.
    pub max_points_per_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { max_points_per_leaf: DEFAULT_MAX_POINTS_PER_LEAF }
    }
}

impl TreeConfig {
    pub fn with_leaf_size(max_points_per_leaf: usize) -> Self {
        Self { max_points_per_leaf }
    }
}

/// Scratch sizing of a [`KdQuery`](crate::KdQuery).
///
/// Only affects how soon the pool stops allocating, never the results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryConfig {
    pub initial_capacity: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { initial_capacity: DEFAULT_QUERY_CAPACITY }
    }
}

impl QueryConfig {
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }
}
