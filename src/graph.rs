use crate::id_map::IdMap;
use crate::{Error, ErrorKind};
use itertools::Itertools;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "logging")]
use tracing::debug;

/// A single out-edge in the CSR adjacency array: the dense index of the
/// target node and the (always positive, finite) edge cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsrEdge {
    pub to: u32,
    pub cost: f64,
}

/// An immutable directed weighted graph stored in compressed-sparse-row
/// form.
///
/// External node ids of type `T` are mapped once, at construction, to dense
/// indices in `[0, N)` via [`IdMap`]; every algorithm in this crate
/// (bounded Dijkstra, the all-pairs driver, the aggregation engine) works
/// exclusively in dense index space so the hot relaxation loop never
/// allocates or hashes.
///
/// `offsets[i]..offsets[i + 1]` indexes into `adj` for node `i`'s out-edges.
/// Self-loops and parallel edges are both permitted; an edge's presence in
/// `adj` is what Dijkstra relaxes, nothing more is assumed about order
/// within a node's block.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph<T> {
    id_map: IdMap<T>,
    offsets: Vec<u32>,
    adj: Vec<CsrEdge>,
}

impl<T> Graph<T>
where
    T: Hash + Eq + Clone + Ord + Debug + Send + Sync,
{
    /// Builds a [`Graph`] from an iterable of `(from, to, cost)` triples.
    ///
    /// Assigns each newly-seen external id the next free dense index,
    /// buckets edges by source index, and concatenates the buckets into a
    /// single contiguous `adj` array with a prefix-summed `offsets` array —
    /// the classic CSR construction, using a sort-then-group-by pass
    /// (`itertools::Itertools::sorted_by_key`/`chunk_by`) so the output is
    /// one allocation instead of a per-node `HashSet`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidEdge`] if any cost is non-positive, NaN,
    /// or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use decay_graph::Graph;
    ///
    /// let graph = Graph::from_edges(vec![
    ///     ("a", "b", 1.0),
    ///     ("b", "c", 2.0),
    /// ]).unwrap();
    /// assert_eq!(graph.number_of_nodes(), 3);
    /// ```
    pub fn from_edges<I>(edges: I) -> Result<Graph<T>, Error>
    where
        I: IntoIterator<Item = (T, T, f64)>,
    {
        let mut id_map = IdMap::new();
        let mut raw: Vec<(u32, CsrEdge)> = Vec::new();

        for (from, to, cost) in edges {
            if !(cost > 0.0) || !cost.is_finite() {
                return Err(Error::new(
                    ErrorKind::InvalidEdge,
                    format!(
                        "edge ({:?}, {:?}) has cost {} which is not a finite positive number",
                        from, to, cost
                    ),
                ));
            }
            let from_ix = id_map.index_of_or_insert(&from);
            let to_ix = id_map.index_of_or_insert(&to);
            raw.push((from_ix, CsrEdge { to: to_ix, cost }));
        }

        let n = id_map.len();
        let mut offsets = vec![0u32; n + 1];
        let mut adj = Vec::with_capacity(raw.len());

        for (from, group) in &raw
            .into_iter()
            .sorted_by_key(|(from, _)| *from)
            .chunk_by(|(from, _)| *from)
        {
            let group: Vec<(u32, CsrEdge)> = group.collect();
            offsets[from as usize + 1] = group.len() as u32;
            for (_, e) in group {
                adj.push(e);
            }
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }

        #[cfg(feature = "logging")]
        debug!(nodes = n, edges = adj.len(), "built CSR graph");

        Ok(Graph {
            id_map,
            offsets,
            adj,
        })
    }

    /// The number of distinct nodes (the union of every edge endpoint seen
    /// by [`Graph::from_edges`]).
    pub fn number_of_nodes(&self) -> usize {
        self.id_map.len()
    }

    /// The number of edges (parallel edges counted individually).
    pub fn number_of_edges(&self) -> usize {
        self.adj.len()
    }

    /// Maps an external node id to its dense index, or `None` if unknown.
    pub fn node_index(&self, id: &T) -> Option<u32> {
        self.id_map.index_of(id)
    }

    /// Maps a dense index back to its external node id, or `None` if out of
    /// range.
    pub fn node_id(&self, index: u32) -> Option<&T> {
        self.id_map.id_of(index)
    }

    /// Iterates every external node id, in dense-index order.
    pub fn node_ids(&self) -> impl Iterator<Item = &T> {
        self.id_map.ids()
    }

    /// The out-edges of `index` as `(target_index, cost)` pairs.
    ///
    /// Panics if `index >= number_of_nodes()` — this is an internal,
    /// index-space-only accessor; callers working with external ids should
    /// go through [`Graph::node_index`] first.
    #[inline]
    pub(crate) fn out_edges(&self, index: u32) -> &[CsrEdge] {
        let start = self.offsets[index as usize] as usize;
        let end = self.offsets[index as usize + 1] as usize;
        &self.adj[start..end]
    }

    /// Whether `index` has at least one out-edge.
    #[inline]
    pub(crate) fn has_out_edges(&self, index: u32) -> bool {
        self.offsets[index as usize] != self.offsets[index as usize + 1]
    }

    pub(crate) fn id_map(&self) -> &IdMap<T> {
        &self.id_map
    }
}
