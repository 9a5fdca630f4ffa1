//! Network-decayed aggregation over a weighted directed graph.
//!
//! Given a graph and a cost cutoff, [`algorithms::shortest_path::all_pairs`]
//! computes, for every node, the distances to every other node reachable
//! within the cutoff. [`algorithms::aggregation::aggregate`] then joins that
//! distance table against a multiset of observations located at nodes,
//! applies a [`algorithms::decay::DecayFn`], and reduces per source with a
//! [`algorithms::aggregation::Reducer`]. [`Network`] bundles the two into a
//! stateful façade: `preprocess` once, `aggregate` many times.
//!
//! Typical use is urban accessibility analysis — "average home price per
//! square foot within 1500 m of each street-network node" — but the core is
//! a general graph algorithm with no geospatial dependency.

mod error;
pub use error::{Error, ErrorKind};

mod id_map;
pub use id_map::IdMap;

mod graph;
pub use graph::Graph;

pub mod algorithms;
pub mod generators;
pub mod geo;
pub mod readwrite;

mod network;
pub use network::Network;

#[cfg(feature = "logging")]
mod logging;
#[cfg(feature = "logging")]
pub use logging::init_logging;
