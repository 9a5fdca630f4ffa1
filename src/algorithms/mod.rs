/// Decay functions applied to shortest-path distances during aggregation.
pub mod decay;

/// Joins a distance table against observations and reduces per source.
pub mod aggregation;

/// Compute the shortest paths and path lengths between nodes in the graph.
pub mod shortest_path;
