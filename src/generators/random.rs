use crate::{Error, Graph};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Generates an Erdos-Renyi (binomial) random graph on up to `num_nodes`
/// integer-id nodes, each edge cost drawn uniformly from
/// `(0, max_cost]`.
///
/// Uses a "skip-ahead" sampling loop: the gap to the next edge is drawn from
/// a geometric distribution instead of a coin flip per candidate pair, which
/// is `O(num_nodes + num_edges)` instead of `O(num_nodes^2)`. Edges carry a
/// positive `f64` cost — this crate's CSR [`Graph`] has no unweighted mode —
/// and the output is built with [`Graph::from_edges`].
///
/// [`Graph::from_edges`] only ever learns about a node through an edge that
/// mentions it — there is no separate node-declaration API. A node that is
/// sampled into zero edges is therefore absent from the returned graph; at
/// the probabilities this generator is meant for (dense enough to matter
/// for benchmarking) this is exceedingly unlikely but not impossible for
/// small `num_nodes`.
///
/// # Errors
///
/// Returns [`crate::ErrorKind::InvalidEdge`] if `edge_probability` is not in
/// `(0, 1)` or `max_cost` is not a finite positive number (surfaced via
/// [`Graph::from_edges`]'s cost validation rather than a separate check, so
/// the error taxonomy stays in one place).
///
/// # Examples
///
/// ```
/// use decay_graph::generators::random::fast_gnp_random_graph;
/// let graph = fast_gnp_random_graph(250, 0.05, true, 10.0, Some(42)).unwrap();
/// assert!(graph.number_of_nodes() <= 250);
/// assert!(graph.number_of_edges() > 0);
/// ```
pub fn fast_gnp_random_graph(
    num_nodes: i32,
    edge_probability: f64,
    directed: bool,
    max_cost: f64,
    seed: Option<u64>,
) -> Result<Graph<i32>, Error> {
    if !(edge_probability > 0.0 && edge_probability < 1.0) {
        return Err(Error::new(
            crate::ErrorKind::InvalidEdge,
            format!(
                "edge_probability was {} but it must be between 0.0 and 1.0, non-inclusive",
                edge_probability
            ),
        ));
    }
    let mut rng = random_number_generator(seed);
    let pairs = if directed {
        directed_pairs(num_nodes, edge_probability, &mut *rng)
    } else {
        undirected_pairs(num_nodes, edge_probability, &mut *rng)
    };

    let edges: Vec<(i32, i32, f64)> = pairs
        .into_iter()
        .flat_map(|(u, v)| {
            let cost = rng.gen::<f64>() * max_cost + f64::MIN_POSITIVE;
            if directed {
                vec![(u, v, cost)]
            } else {
                let back_cost = rng.gen::<f64>() * max_cost + f64::MIN_POSITIVE;
                vec![(u, v, cost), (v, u, back_cost)]
            }
        })
        .collect();

    Graph::from_edges(edges)
}

fn directed_pairs(num_nodes: i32, edge_probability: f64, rng: &mut dyn RngCore) -> Vec<(i32, i32)> {
    let mut edges = Vec::new();
    let mut w: i32 = -1;
    let lp = (1.0 - edge_probability).ln();
    let mut v = 0;
    while v < num_nodes {
        let lr: f64 = (1.0_f64 - rng.gen::<f64>()).ln();
        w = w + 1 + ((lr / lp) as i32);
        if v == w {
            w += 1;
        }
        while v < num_nodes && num_nodes <= w {
            w -= num_nodes;
            v += 1;
            if v == w {
                w += 1;
            }
        }
        if v < num_nodes {
            edges.push((v, w));
        }
    }
    edges
}

fn undirected_pairs(num_nodes: i32, edge_probability: f64, rng: &mut dyn RngCore) -> Vec<(i32, i32)> {
    let mut edges = Vec::new();
    let mut w: i32 = -1;
    let lp = (1.0 - edge_probability).ln();
    let mut v = 1;
    while v < num_nodes {
        let lr: f64 = (1.0_f64 - rng.gen::<f64>()).ln();
        w = w + 1 + ((lr / lp) as i32);
        while w >= v && v < num_nodes {
            w += v;
            v += 1;
        }
        if v < num_nodes {
            edges.push((v, w));
        }
    }
    edges
}

fn random_number_generator(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        None => Box::new(rand::thread_rng()),
        Some(s) => Box::new(ChaCha20Rng::seed_from_u64(s)),
    }
}
