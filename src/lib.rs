//! # kdquery
//!
//! `kdquery` answers nearest point queries over a static 3D point cloud organized
//! into a k-d tree, designed to run every frame in interactive tools (snapping a
//! pick ray hit to the nearest mesh vertex) and to compile to WebAssembly.
//!
//! ## Features
//!
//! - **Allocation-free queries**: a [`KdQuery`] pools its traversal records and heap
//!   storage; memory only grows and is reused across queries.
//! - **Best-first search**: nodes are expanded in order of a squared distance lower
//!   bound, and subtrees that cannot beat the current best are pruned.
//! - **Sliding midpoint build**: [`KdTree`] splits the widest axis at the region
//!   midpoint, sliding the plane onto the points when they all sit on one side.
//! - **More than closest**: radius and k-nearest searches share the same scratch.
//! - **Parallel batches**: [`batch`] runs one query object per rayon worker.
//!
//! ## Main Interface
//!
//! Build a [`KdTree`] once, keep a [`KdQuery`] per thread and call
//! [`KdQuery::closest_point`]:
//!
//! ```
//! use kdquery::{KdQuery, KdTree, TreeConfig};
//!
//! let points = [0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 5.0, 5.0, 0.0];
//! let tree = KdTree::from_points(&points, TreeConfig::default()).unwrap();
//! let mut query = KdQuery::default();
//!
//! let nearest = query.closest_point(&tree, [4.0, 0.0, 0.0]).unwrap();
//! assert_eq!(nearest.index, 0);
//! assert_eq!(nearest.distance_sq, 16.0);
//! ```

mod bounds;
mod config;
mod error;
mod heap;
mod kdtree;
mod query;
pub mod batch;
pub mod points;
pub mod wasm;

pub use bounds::BoundingBox;
pub use config::QueryConfig;
pub use config::TreeConfig;
pub use config::DEFAULT_MAX_POINTS_PER_LEAF;
pub use config::DEFAULT_QUERY_CAPACITY;
pub use config::MAX_INITIAL_QUERY_CAPACITY;
pub use error::Error;
pub use heap::HeapOrder;
pub use heap::MaxHeap;
pub use heap::MaxOrder;
pub use heap::MinHeap;
pub use heap::MinOrder;
pub use heap::PriorityHeap;
pub use kdtree::KdNode;
pub use kdtree::KdTree;
pub use kdtree::NodeId;
pub use kdtree::Partition;
pub use kdtree::ROOT;
pub use query::KdQuery;
pub use query::Nearest;
pub use query::QueryNode;
