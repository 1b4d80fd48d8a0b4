/// Errors reported by tree construction and queries.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The tree holds no points, so there is no nearest point to report.
    #[error("query against an empty tree")]
    EmptyTree,

    /// A flat point buffer whose length is not a multiple of three.
    #[error("point buffer length {len} is not a multiple of 3")]
    InvalidPointBuffer { len: usize },

    /// NaN or infinite coordinate in the build input.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// NaN or infinite coordinate in a query position.
    #[error("query position has a non-finite coordinate")]
    NonFiniteQuery,

    /// Leaves must be allowed to hold at least one point.
    #[error("max points per leaf must be at least 1")]
    InvalidLeafSize,

    /// Radius queries need a finite, non-negative radius.
    #[error("invalid search radius {0}")]
    InvalidRadius(f64),
}
