use crate::algorithms::aggregation::{self, Reducer};
use crate::algorithms::decay::DecayFn;
use crate::algorithms::shortest_path::{all_pairs, DistanceTable};
use crate::geo::NearestNodeJoiner;
use crate::readwrite::tables::{read_edges, read_nodes, write_edges, write_nodes, EdgeRecord, NodeRecord};
use crate::{Error, ErrorKind, Graph};
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::path::Path;
use std::str::FromStr;

#[cfg(feature = "logging")]
use std::time::Instant;
#[cfg(feature = "logging")]
use tracing::info;

/// The stateful façade applications see: a graph plus a cached,
/// cutoff-bounded distance table.
///
/// `preprocess` runs the all-pairs driver once; any number of subsequent
/// `aggregate` calls reuse the cached table, at whatever decay and reducer
/// each call specifies, until a `preprocess` call with a different cutoff
/// discards and recomputes it.
pub struct Network<T> {
    graph: Graph<T>,
    cutoff: Option<f64>,
    table: Option<DistanceTable>,
}

impl<T> Network<T>
where
    T: Hash + Eq + Clone + Ord + Debug + Send + Sync,
{
    /// Builds a `Network` from `(from, to, cost)` edge triples. No distance
    /// table is computed yet; call [`Network::preprocess`] before
    /// aggregating.
    pub fn new<I>(edges: I) -> Result<Network<T>, Error>
    where
        I: IntoIterator<Item = (T, T, f64)>,
    {
        Ok(Network {
            graph: Graph::from_edges(edges)?,
            cutoff: None,
            table: None,
        })
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph<T> {
        &self.graph
    }

    /// The cutoff the cached distance table was computed with, or `None`
    /// before the first [`Network::preprocess`] call.
    pub fn cutoff(&self) -> Option<f64> {
        self.cutoff
    }

    /// Runs the all-pairs bounded-Dijkstra driver and caches its result.
    /// Replaces any previously cached table, including one computed with a
    /// different cutoff.
    pub fn preprocess(&mut self, cutoff: f64) {
        #[cfg(feature = "logging")]
        let start = Instant::now();

        self.table = Some(all_pairs(&self.graph, cutoff));
        self.cutoff = Some(cutoff);

        #[cfg(feature = "logging")]
        info!(cutoff, elapsed_ms = start.elapsed().as_millis() as u64, "preprocess complete");
    }

    /// Joins the cached distance table against `observations`, applies
    /// `decay`, and reduces each source's contributions with `reducer`.
    ///
    /// Observation node ids not present in the graph are silently dropped —
    /// this is data-shaped, not a contract violation.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotPreprocessed`] if called before
    /// [`Network::preprocess`]. Returns
    /// [`ErrorKind::DecayCutoffExceedsNetworkCutoff`] if `decay`'s own
    /// cutoff exceeds the cached table's cutoff.
    ///
    /// # Examples
    ///
    /// ```
    /// use decay_graph::Network;
    /// use decay_graph::algorithms::decay::DecayFn;
    /// use decay_graph::algorithms::aggregation::Reducer;
    ///
    /// let mut network = Network::new(vec![("a", "b", 1.0), ("b", "a", 1.0)]).unwrap();
    /// network.preprocess(5.0);
    /// let result = network
    ///     .aggregate(&[("b", 3.0)], &DecayFn::no_decay(2.0), &Reducer::Sum)
    ///     .unwrap();
    /// assert_eq!(result[&"a"], 3.0);
    /// ```
    pub fn aggregate(
        &self,
        observations: &[(T, f64)],
        decay: &DecayFn,
        reducer: &Reducer,
    ) -> Result<HashMap<T, f64>, Error> {
        #[cfg(feature = "logging")]
        let start = Instant::now();

        let table = self.table.as_ref().ok_or_else(|| {
            Error::new(
                ErrorKind::NotPreprocessed,
                "aggregate called before preprocess",
            )
        })?;
        let net_cutoff = self.cutoff.expect("cutoff is set whenever table is");

        if let Some(decay_cutoff) = decay.cutoff() {
            if decay_cutoff > net_cutoff {
                return Err(Error::new(
                    ErrorKind::DecayCutoffExceedsNetworkCutoff,
                    format!(
                        "decay cutoff {} exceeds network cutoff {}",
                        decay_cutoff, net_cutoff
                    ),
                ));
            }
        }

        let indexed_observations: Vec<(u32, f64)> = observations
            .iter()
            .filter_map(|(id, value)| self.graph.node_index(id).map(|ix| (ix, *value)))
            .collect();

        let by_index = aggregation::aggregate(table, &indexed_observations, decay, reducer);
        let by_id = by_index
            .into_iter()
            .filter_map(|(ix, value)| self.graph.node_id(ix).map(|id| (id.clone(), value)))
            .collect();

        #[cfg(feature = "logging")]
        info!(
            observations = observations.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "aggregate complete"
        );

        Ok(by_id)
    }

    /// As [`Network::aggregate`], but takes the reducer by name (`"sum"`,
    /// `"mean"`, `"min"`, `"max"`, `"median"`, `"std"`).
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownReducer`] for any other name, in
    /// addition to the errors [`Network::aggregate`] can return.
    pub fn aggregate_named(
        &self,
        observations: &[(T, f64)],
        decay: &DecayFn,
        reducer_name: &str,
    ) -> Result<HashMap<T, f64>, Error> {
        let reducer = Reducer::from_name(reducer_name)?;
        self.aggregate(observations, decay, &reducer)
    }

    /// Maps each point in `query_points` to the id of its nearest node among
    /// `node_points`, via an external [`NearestNodeJoiner`] — this crate
    /// ships no geospatial implementation of its own, only the call shape.
    pub fn nearest_nodes(
        &self,
        node_points: &[(T, (f64, f64))],
        query_points: &[(f64, f64)],
        joiner: &dyn NearestNodeJoiner,
    ) -> Vec<Option<T>> {
        let coords: Vec<(f64, f64)> = node_points.iter().map(|(_, p)| *p).collect();
        joiner
            .nearest_nodes(&coords, query_points)
            .into_iter()
            .map(|maybe_ix| maybe_ix.map(|ix| node_points[ix].0.clone()))
            .collect()
    }

    /// Writes the node and edge tables to two CSV files. The cached
    /// distance table is never persisted — `preprocess` must be re-run
    /// after [`Network::read`].
    pub fn write(&self, nodes_path: impl AsRef<Path>, edges_path: impl AsRef<Path>) -> Result<(), Error>
    where
        T: Display,
    {
        let nodes: Vec<NodeRecord<T>> = self
            .graph
            .node_ids()
            .map(|id| NodeRecord {
                id: id.clone(),
                geometry: None,
            })
            .collect();
        write_nodes(nodes_path, &nodes)?;

        let mut edges = Vec::new();
        for ix in 0..self.graph.number_of_nodes() as u32 {
            let Some(from_id) = self.graph.node_id(ix) else {
                continue;
            };
            for edge in self.graph.out_edges(ix) {
                let Some(to_id) = self.graph.node_id(edge.to) else {
                    continue;
                };
                edges.push(EdgeRecord {
                    from: from_id.clone(),
                    to: to_id.clone(),
                    cost: edge.cost,
                    geometry: None,
                });
            }
        }
        write_edges(edges_path, &edges)?;
        Ok(())
    }

    /// Reads a `Network` back from the two CSV files [`Network::write`]
    /// produces. No distance table is cached; call [`Network::preprocess`]
    /// before aggregating.
    ///
    /// Nodes present in the node table but with no incident edge are not
    /// representable in the reconstructed graph (the CSR adjacency only
    /// tracks nodes an edge mentions) — the node table's `id`/`geometry`
    /// columns beyond that are informational; only the distance-table
    /// cache is guaranteed excluded from persistence, not every isolated
    /// node's round-trip.
    pub fn read(nodes_path: impl AsRef<Path>, edges_path: impl AsRef<Path>) -> Result<Network<T>, Error>
    where
        T: FromStr,
        T::Err: Display,
    {
        let _nodes: Vec<NodeRecord<T>> = read_nodes(nodes_path)?;
        let edges: Vec<EdgeRecord<T>> = read_edges(edges_path)?;
        let graph = Graph::from_edges(edges.into_iter().map(|e| (e.from, e.to, e.cost)))?;
        Ok(Network {
            graph,
            cutoff: None,
            table: None,
        })
    }
}
