//! Reusable query object for [`KdTree`](crate::KdTree) searches.
//!
//! A [`KdQuery`] owns every piece of scratch memory a search needs: a pool of
//! traversal records, the min-heap that orders them, and the candidate heap of
//! k-nearest searches. Storage only ever grows, and all of it is reset together
//! at the start of each search, so a query object kept alive across frames stops
//! allocating once it is warm.
//!
//! Every search takes `&mut self`: one query object serves one thread at a time.
//! Run concurrent searches with one `KdQuery` per worker against a shared tree.

mod closest;
mod k_nearest;
mod radius;

use crate::bounds::dist_sq;
use crate::config::{QueryConfig, MAX_INITIAL_QUERY_CAPACITY};
use crate::heap::{MaxHeap, MinHeap};
use crate::kdtree::{KdTree, NodeId, Partition};

/// A pooled traversal record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryNode {
    pub node: NodeId,
    /// Point of the node's region closest to the query position.
    pub temp_closest: [f64; 3],
    /// Squared distance from `temp_closest` to the query position.
    pub distance: f64,
}

impl Default for QueryNode {
    fn default() -> Self {
        Self {
            node: 0,
            temp_closest: [0.0; 3],
            distance: f64::INFINITY,
        }
    }
}

/// Result of a closest point search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    /// Index into the tree's original point buffer.
    pub index: usize,
    pub distance_sq: f64,
}

impl Nearest {
    pub fn distance(&self) -> f64 {
        self.distance_sq.sqrt()
    }
}

#[derive(Debug, Clone)]
pub struct KdQuery {
    queue: Vec<QueryNode>,
    count: usize,
    query_index: usize,
    // Pool slots ordered by `QueryNode::distance`
    min_heap: MinHeap<usize>,
    candidates: MaxHeap<usize>,
    sorted: Vec<(f64, usize)>,
}

impl Default for KdQuery {
    fn default() -> Self {
        Self::new(QueryConfig::default())
    }
}

impl KdQuery {
    pub fn new(config: QueryConfig) -> Self {
        let capacity = config.initial_capacity.clamp(1, MAX_INITIAL_QUERY_CAPACITY);
        KdQuery {
            queue: Vec::with_capacity(capacity),
            count: 0,
            query_index: 0,
            min_heap: MinHeap::with_capacity(capacity),
            candidates: MaxHeap::with_capacity(0),
            sorted: Vec::new(),
        }
    }

    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::new(QueryConfig::with_capacity(initial_capacity))
    }

    /// Pool slots handed out during the current search.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Slots handed out but not yet popped.
    pub fn left_to_process(&self) -> usize {
        self.count - self.query_index
    }

    /// Capacity of the traversal heap.
    pub fn capacity(&self) -> usize {
        self.min_heap.capacity()
    }

    /// Number of traversal records the pool can hold without reallocating.
    pub fn pool_capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Forgets the previous search. Keeps every allocation.
    pub fn reset(&mut self) {
        self.count = 0;
        self.query_index = 0;
        self.min_heap.clear();
        self.candidates.clear();
        self.sorted.clear();
    }

    /// Hands out the pool slot at `count`, creating it on first use.
    fn push_get_queue(&mut self) -> usize {
        if self.count == self.queue.len() {
            if self.queue.len() == self.queue.capacity() {
                let grow = self.queue.capacity().max(1);
                log::trace!("query pool full at {}, growing by {}", self.queue.len(), grow);
                self.queue.reserve_exact(grow);
            }
            self.queue.push(QueryNode::default());
        }
        let slot = self.count;
        self.count += 1;
        slot
    }

    /// Appends a record to the FIFO side of the pool without touching the heap.
    pub fn push_to_queue(&mut self, node: NodeId, temp_closest: [f64; 3], distance: f64) {
        let slot = self.push_get_queue();
        self.queue[slot] = QueryNode { node, temp_closest, distance };
    }

    /// Pools a record and orders it on the heap by its squared distance to `position`.
    pub fn push_to_heap(&mut self, node: NodeId, temp_closest: [f64; 3], position: &[f64; 3]) {
        let distance = dist_sq(&temp_closest, position);
        let slot = self.push_get_queue();
        self.queue[slot] = QueryNode { node, temp_closest, distance };
        self.min_heap.push(slot, distance);
    }

    /// Next unprocessed record in push order.
    ///
    /// Callers must check [`KdQuery::left_to_process`] first.
    pub fn pop_from_queue(&mut self) -> QueryNode {
        debug_assert!(self.query_index < self.count, "pop past the end of the query pool");
        let node = self.queue[self.query_index];
        self.query_index += 1;
        node
    }

    /// Record with the smallest distance, `None` once the heap is drained.
    pub fn pop_from_heap(&mut self) -> Option<QueryNode> {
        let slot = self.min_heap.pop()?;
        self.query_index += 1;
        Some(self.queue[slot])
    }

    /// Pushes both children of an internal node onto the heap.
    ///
    /// The near child inherits the parent's closest point. The far child gets it
    /// projected onto the split plane, and is skipped when it holds no points.
    fn push_children(&mut self, tree: &KdTree, split: &Partition, parent: &QueryNode, position: &[f64; 3]) {
        let (near, far) = near_far(split, &parent.temp_closest);
        self.push_to_heap(near, parent.temp_closest, position);

        if tree.node(far).count() == 0 {
            return;
        }
        let projected = project(split, parent.temp_closest);
        self.push_to_heap(far, projected, position);
    }
}

pub(crate) fn is_finite(position: &[f64; 3]) -> bool {
    position.iter().all(|v| v.is_finite())
}

/// Orders a node's children by which side of the split plane `point` lies on.
#[inline]
fn near_far(split: &Partition, point: &[f64; 3]) -> (NodeId, NodeId) {
    if point[split.axis] - split.coordinate < 0.0 {
        (split.negative, split.positive)
    } else {
        (split.positive, split.negative)
    }
}

#[inline]
fn project(split: &Partition, mut point: [f64; 3]) -> [f64; 3] {
    point[split.axis] = split.coordinate;
    point
}
