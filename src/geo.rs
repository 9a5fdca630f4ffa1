//! Geospatial point-to-nearest-node mapping is a thin wrapper over a
//! third-party spatial index and carries no interesting design of its own,
//! so this crate defines only the interface
//! [`Network::nearest_nodes`](crate::Network::nearest_nodes) consumes.

/// Maps query points to the nearest of a set of reference node points, both
/// in a common projected CRS.
///
/// No implementation ships in this crate; callers bring their own (e.g. a
/// k-d tree or an R-tree over `(f64, f64)` coordinates).
pub trait NearestNodeJoiner {
    /// For each point in `query_points`, returns the index into
    /// `node_points` of its nearest neighbour.
    ///
    /// Implementations MUST return exactly `query_points.len()` indices,
    /// each a valid index into `node_points`, or `None` if `node_points` is
    /// empty.
    fn nearest_nodes(&self, node_points: &[(f64, f64)], query_points: &[(f64, f64)]) -> Vec<Option<usize>>;
}
