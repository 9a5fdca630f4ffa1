use crate::Graph;
use itertools::Itertools;

/// Generates a "complete" graph on `num_nodes` integer-id nodes — every node
/// connected to every other node — with a uniform edge cost.
///
/// This crate's CSR [`Graph`] always needs a positive `f64` cost per edge
/// and has no create-missing-node mode, so costs are explicit and nodes are
/// implied by the edges alone.
///
/// `directed` selects between all `num_nodes * (num_nodes - 1)` ordered
/// pairs or the `C(num_nodes, 2)` unordered pairs, each emitted once in each
/// direction so the resulting graph is still usable by the bounded
/// all-pairs driver (the graph is directed internally either way).
///
/// # Examples
///
/// ```
/// use decay_graph::generators::classic::complete_graph;
/// let graph = complete_graph(5, true, 1.0).unwrap();
/// assert_eq!(graph.number_of_nodes(), 5);
/// assert_eq!(graph.number_of_edges(), 20);
/// ```
pub fn complete_graph(num_nodes: i32, directed: bool, cost: f64) -> Result<Graph<i32>, crate::Error> {
    let pairs: Vec<Vec<i32>> = if directed {
        (0..num_nodes).permutations(2).collect()
    } else {
        (0..num_nodes).combinations(2).collect()
    };

    let mut edges: Vec<(i32, i32, f64)> = pairs
        .into_iter()
        .map(|pair| (pair[0], pair[1], cost))
        .collect();

    if !directed {
        let reversed: Vec<(i32, i32, f64)> = edges.iter().map(|&(u, v, c)| (v, u, c)).collect();
        edges.extend(reversed);
    }

    Graph::from_edges(edges)
}
