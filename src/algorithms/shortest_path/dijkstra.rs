use super::distance_table::{DistanceTable, DistanceTriple};
use crate::graph::Graph;
use crate::{Error, ErrorKind};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "logging")]
use tracing::{debug, info_span};

/// A heap entry for bounded Dijkstra, ordered by distance only. Path
/// reconstruction needs an insertion-order tie-break to stay stable; this
/// crate never reconstructs paths, so a plain node-index tie-break is
/// enough to make pop order deterministic.
///
/// `BinaryHeap` is a max-heap, so `Ord` is inverted to pop the smallest
/// distance first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapItem {
    distance: f64,
    node: u32,
}

impl Eq for HeapItem {}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-worker scratch state for bounded Dijkstra, reused across every
/// source a worker is assigned so `dist` is never reallocated and only the
/// nodes actually touched by a run are reset (via a generation counter)
/// rather than cleared in full between sources.
pub struct DijkstraScratch {
    finalized_at: Vec<u32>,
    generation: u32,
    heap: BinaryHeap<HeapItem>,
}

impl DijkstraScratch {
    pub fn new(num_nodes: usize) -> DijkstraScratch {
        DijkstraScratch {
            finalized_at: vec![0; num_nodes],
            generation: 0,
            heap: BinaryHeap::new(),
        }
    }

    fn begin(&mut self) {
        self.generation += 1;
        self.heap.clear();
    }

    #[inline]
    fn is_finalized(&self, node: u32) -> bool {
        self.finalized_at[node as usize] == self.generation
    }

    #[inline]
    fn finalize(&mut self, node: u32) {
        self.finalized_at[node as usize] = self.generation;
    }
}

/// Runs cutoff-bounded Dijkstra from `source`, returning every node `t`
/// (including `source` itself, at distance `0`) with true
/// `d(source, t) <= cutoff`.
///
/// # Errors
///
/// Returns [`ErrorKind::UnknownNode`] if `source` is out of range.
///
/// # Examples
///
/// ```
/// use decay_graph::Graph;
/// use decay_graph::algorithms::shortest_path::shortest_paths;
///
/// let graph = Graph::from_edges(vec![("a", "b", 1.0), ("b", "c", 1.0)]).unwrap();
/// let source = graph.node_index(&"a").unwrap();
/// let distances = shortest_paths(&graph, source, 1.5).unwrap();
/// assert_eq!(distances.get(&graph.node_index(&"b").unwrap()), Some(&1.0));
/// assert_eq!(distances.get(&graph.node_index(&"c").unwrap()), None);
/// ```
pub fn shortest_paths<T>(
    graph: &Graph<T>,
    source: u32,
    cutoff: f64,
) -> Result<std::collections::HashMap<u32, f64>, Error>
where
    T: Hash + Eq + Clone + Ord + Debug + Send + Sync,
{
    if source as usize >= graph.number_of_nodes() {
        return Err(Error::new(
            ErrorKind::UnknownNode,
            format!("node index {} is out of range", source),
        ));
    }
    let mut scratch = DijkstraScratch::new(graph.number_of_nodes());
    let mut out = std::collections::HashMap::new();
    run_bounded_dijkstra(graph, &mut scratch, source, cutoff, |t, d| {
        out.insert(t, d);
    });
    Ok(out)
}

/// The inner loop shared by single-source and all-pairs: classic Dijkstra
/// with a min-heap, a cost cutoff, and lazy (generation-stamped) scratch
/// state. `emit` fires once per finalized node so the all-pairs driver can
/// stream triples straight into its own per-source buffer instead of
/// building an intermediate `HashMap` per source.
fn run_bounded_dijkstra<T>(
    graph: &Graph<T>,
    scratch: &mut DijkstraScratch,
    source: u32,
    cutoff: f64,
    mut emit: impl FnMut(u32, f64),
) where
    T: Hash + Eq + Clone + Ord + Debug + Send + Sync,
{
    scratch.begin();
    scratch.heap.push(HeapItem {
        distance: 0.0,
        node: source,
    });

    while let Some(HeapItem { distance, node }) = scratch.heap.pop() {
        if scratch.is_finalized(node) {
            continue;
        }
        scratch.finalize(node);
        emit(node, distance);

        for edge in graph.out_edges(node) {
            if scratch.is_finalized(edge.to) {
                continue;
            }
            let candidate = distance + edge.cost;
            if candidate > cutoff {
                continue;
            }
            scratch.heap.push(HeapItem {
                distance: candidate,
                node: edge.to,
            });
        }
    }
}

/// Runs bounded Dijkstra from every source node that has at least one
/// out-edge, and flattens the results into a [`DistanceTable`].
///
/// Sources are independent, so this parallelises across them with `rayon`;
/// each worker gets its own [`DijkstraScratch`] via `map_init`, so scratch
/// allocation happens once per worker thread rather than once per source.
/// Output ordering is not guaranteed — only the triple *set* is
/// deterministic for a fixed graph and cutoff — callers needing an
/// ordering should call [`DistanceTable::sort`].
///
/// # Examples
///
/// ```
/// use decay_graph::Graph;
/// use decay_graph::algorithms::shortest_path::all_pairs;
///
/// let graph = Graph::from_edges(vec![("a", "b", 1.0), ("b", "c", 1.0)]).unwrap();
/// let table = all_pairs(&graph, 5.0);
/// assert!(table.len() >= 3);
/// ```
pub fn all_pairs<T>(graph: &Graph<T>, cutoff: f64) -> DistanceTable
where
    T: Hash + Eq + Clone + Ord + Debug + Send + Sync,
{
    #[cfg(feature = "logging")]
    let _span = info_span!("all_pairs", cutoff, nodes = graph.number_of_nodes()).entered();

    let n = graph.number_of_nodes();

    let triples: Vec<DistanceTriple> = (0..n as u32)
        .into_par_iter()
        .filter(|&source| graph.has_out_edges(source))
        .map_init(
            || DijkstraScratch::new(n),
            |scratch, source| {
                let mut local = Vec::new();
                run_bounded_dijkstra(graph, scratch, source, cutoff, |to, weight| {
                    local.push(DistanceTriple {
                        from: source,
                        to,
                        weight,
                    });
                });
                #[cfg(feature = "logging")]
                debug!(source, found = local.len(), "single-source pass complete");
                local
            },
        )
        .flatten()
        .collect();

    DistanceTable::from_triples(triples)
}
