use super::decay::DecayFn;
use super::shortest_path::DistanceTable;
use crate::{Error, ErrorKind};
use nohash::IntMap;
use std::collections::HashMap;
use std::sync::Arc;

/// A commutative operator collapsing a source's weighted contributions —
/// `(value, weight)` pairs, one per `(observation, reachable target)` — into
/// one scalar.
///
/// `sum`/`mean` are linear in the observation values; `min`/`max`
/// deliberately ignore weight, since scaling every value by the same family
/// of weights would just rescale the extremum, not change which observation
/// it is. `Custom` is the escape hatch for reducers like `count` that need
/// no access to the join/group loop below beyond the contribution slice.
#[derive(Clone)]
pub enum Reducer {
    Sum,
    Mean,
    Min,
    Max,
    Median,
    Std,
    Custom(String, Arc<dyn Fn(&[(f64, f64)]) -> f64 + Send + Sync>),
}

impl Reducer {
    /// Looks up a built-in reducer by name (`"sum"`, `"mean"`, `"min"`,
    /// `"max"`, `"median"`, `"std"`), for call sites that take a reducer
    /// name as a string rather than constructing the enum directly.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownReducer`] for any other name.
    pub fn from_name(name: &str) -> Result<Reducer, Error> {
        match name {
            "sum" => Ok(Reducer::Sum),
            "mean" => Ok(Reducer::Mean),
            "min" => Ok(Reducer::Min),
            "max" => Ok(Reducer::Max),
            "median" => Ok(Reducer::Median),
            "std" => Ok(Reducer::Std),
            other => Err(Error::new(
                ErrorKind::UnknownReducer,
                format!("unknown reducer \"{}\"", other),
            )),
        }
    }

    fn reduce(&self, contributions: &[(f64, f64)]) -> f64 {
        match self {
            Reducer::Sum => {
                if contributions.is_empty() {
                    0.0
                } else {
                    contributions.iter().map(|(v, w)| v * w).sum()
                }
            }
            Reducer::Mean => weighted_mean(contributions).unwrap_or(f64::NAN),
            Reducer::Min => contributions
                .iter()
                .map(|(v, _)| *v)
                .fold(f64::NAN, |acc, v| if acc.is_nan() || v < acc { v } else { acc }),
            Reducer::Max => contributions
                .iter()
                .map(|(v, _)| *v)
                .fold(f64::NAN, |acc, v| if acc.is_nan() || v > acc { v } else { acc }),
            Reducer::Median => weighted_median(contributions).unwrap_or(f64::NAN),
            Reducer::Std => weighted_std(contributions).unwrap_or(f64::NAN),
            Reducer::Custom(_, f) => f(contributions),
        }
    }
}

/// The decay-weighted arithmetic mean: `(sum of w*v) / (sum of w)`.
/// `None` for an empty or zero-total-weight group.
fn weighted_mean(contributions: &[(f64, f64)]) -> Option<f64> {
    if contributions.is_empty() {
        return None;
    }
    let total_weight: f64 = contributions.iter().map(|(_, w)| w).sum();
    if total_weight == 0.0 {
        return None;
    }
    let weighted_sum: f64 = contributions.iter().map(|(v, w)| v * w).sum();
    Some(weighted_sum / total_weight)
}

/// The first value (sorted ascending) whose cumulative weight reaches half
/// the total weight — not an average of the two middle elements.
fn weighted_median(contributions: &[(f64, f64)]) -> Option<f64> {
    if contributions.is_empty() {
        return None;
    }
    let total_weight: f64 = contributions.iter().map(|(_, w)| w).sum();
    if total_weight == 0.0 {
        return None;
    }
    let mut sorted: Vec<(f64, f64)> = contributions.to_vec();
    sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let half = total_weight / 2.0;
    let mut cumulative = 0.0;
    for (value, weight) in &sorted {
        cumulative += weight;
        if cumulative >= half {
            return Some(*value);
        }
    }
    sorted.last().map(|(v, _)| *v)
}

/// `sqrt(weighted variance)`.
fn weighted_std(contributions: &[(f64, f64)]) -> Option<f64> {
    let mean = weighted_mean(contributions)?;
    let total_weight: f64 = contributions.iter().map(|(_, w)| w).sum();
    let weighted_sq_diff: f64 = contributions
        .iter()
        .map(|(v, w)| w * (v - mean).powi(2))
        .sum();
    Some((weighted_sq_diff / total_weight).sqrt())
}

/// Joins a [`DistanceTable`] against a multiset of `(node_index, value)`
/// observations, applies `decay`, and reduces each source's surviving
/// contributions with `reducer`.
///
/// Index-then-stream-and-reduce: observations are indexed once into an
/// `IntMap` (no intermediate merged table), then the distance triples are
/// scanned exactly once, emitting a `(value, weight)` contribution per
/// `(triple, observation-at-target)` pair directly into a per-source
/// accumulator.
///
/// Returns one entry per source present in `table` (i.e. every node that
/// appeared as a distance-table origin), even if its contribution list ends
/// up empty — an all-masked-out or all-unreachable source still gets the
/// empty-group convention (`0` for `sum`, `NaN` otherwise), it is not
/// omitted from the output.
///
/// An observation whose node index never appears as a distance-table target
/// contributes nothing and raises no error — it is silently dropped.
///
/// # Examples
///
/// ```
/// use decay_graph::Graph;
/// use decay_graph::algorithms::shortest_path::all_pairs;
/// use decay_graph::algorithms::decay::DecayFn;
/// use decay_graph::algorithms::aggregation::{aggregate, Reducer};
///
/// let graph = Graph::from_edges(vec![("a", "b", 0.2), ("b", "a", 0.2)]).unwrap();
/// let table = all_pairs(&graph, 1.0);
/// let b = graph.node_index(&"b").unwrap();
/// let result = aggregate(&table, &[(b, 3.0)], &DecayFn::no_decay(0.5), &Reducer::Sum);
/// let a = graph.node_index(&"a").unwrap();
/// assert_eq!(result[&a], 3.0);
/// ```
pub fn aggregate(
    table: &DistanceTable,
    observations: &[(u32, f64)],
    decay: &DecayFn,
    reducer: &Reducer,
) -> HashMap<u32, f64> {
    let mut values_by_node: IntMap<u32, Vec<f64>> = IntMap::default();
    for (node, value) in observations {
        values_by_node.entry(*node).or_default().push(*value);
    }

    let mut contributions_by_source: IntMap<u32, Vec<(f64, f64)>> = IntMap::default();
    let mut sources: Vec<u32> = Vec::new();
    let mut seen_source = IntMap::<u32, ()>::default();

    for triple in table.triples() {
        if seen_source.insert(triple.from, ()).is_none() {
            sources.push(triple.from);
        }
        if !decay.mask(triple.weight) {
            continue;
        }
        let Some(values) = values_by_node.get(&triple.to) else {
            continue;
        };
        let weight = decay.weight(triple.weight);
        let bucket = contributions_by_source.entry(triple.from).or_default();
        for value in values {
            bucket.push((*value, weight));
        }
    }

    sources
        .into_iter()
        .map(|source| {
            let contributions = contributions_by_source
                .get(&source)
                .map(|v| v.as_slice())
                .unwrap_or(&[]);
            let reduced = reducer.reduce(contributions);
            (source, round3(reduced))
        })
        .collect()
}

/// Rounds to three decimal places — a presentation concern applied only at
/// this boundary, never inside the core distance table.
fn round3(value: f64) -> f64 {
    if value.is_nan() {
        return value;
    }
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::shortest_path::all_pairs;
    use crate::Graph;

    fn make_graph() -> Graph<&'static str> {
        Graph::from_edges(vec![
            ("a", "b", 0.6),
            ("b", "a", 0.6),
            ("a", "c", 0.2),
            ("c", "a", 0.2),
            ("c", "d", 0.1),
            ("d", "c", 0.1),
            ("c", "e", 0.7),
            ("e", "c", 0.7),
            ("c", "f", 0.9),
            ("f", "c", 0.9),
            ("a", "d", 0.3),
            ("d", "a", 0.3),
        ])
        .unwrap()
    }

    #[test]
    fn linear_decay_matches_hand_computed_sum() {
        let graph = make_graph();
        let table = all_pairs(&graph, 1.2);
        let ix = |name: &str| graph.node_index(&name).unwrap();
        let observations = vec![(ix("b"), 1.0), (ix("d"), 2.0), (ix("c"), 3.0)];
        let decay = DecayFn::linear(0.5);
        let result = aggregate(&table, &observations, &decay, &Reducer::Sum);

        assert_eq!(result[&ix("a")], 2.6);
        assert_eq!(result[&ix("b")], 1.0);
        assert_eq!(result[&ix("c")], 4.6);
        assert_eq!(result[&ix("d")], 4.4);
        assert_eq!(result[&ix("e")], 0.0);
        assert_eq!(result[&ix("f")], 0.0);
    }

    #[test]
    fn no_decay_matches_hand_computed_sum() {
        let graph = make_graph();
        let table = all_pairs(&graph, 1.2);
        let ix = |name: &str| graph.node_index(&name).unwrap();
        let observations = vec![(ix("b"), 1.0), (ix("d"), 2.0), (ix("c"), 3.0)];
        let decay = DecayFn::no_decay(0.5);
        let result = aggregate(&table, &observations, &decay, &Reducer::Sum);

        assert_eq!(result[&ix("a")], 5.0);
        assert_eq!(result[&ix("b")], 1.0);
        assert_eq!(result[&ix("c")], 5.0);
        assert_eq!(result[&ix("d")], 5.0);
        assert_eq!(result[&ix("e")], 0.0);
        assert_eq!(result[&ix("f")], 0.0);
    }

    #[test]
    fn tight_cutoff_excludes_targets_and_empty_groups_follow_convention() {
        let graph = make_graph();
        let table = all_pairs(&graph, 0.25);
        let ix = |name: &str| graph.node_index(&name).unwrap();
        let a = ix("a");
        assert!(!table.triples().iter().any(|t| t.from == a && t.to == ix("d")));

        let observations = vec![(ix("d"), 2.0)];
        let sum = aggregate(&table, &observations, &DecayFn::no_decay(5.0), &Reducer::Sum);
        assert_eq!(sum[&a], 0.0);
        let mean = aggregate(&table, &observations, &DecayFn::no_decay(5.0), &Reducer::Mean);
        assert!(mean[&a].is_nan());
    }

    #[test]
    fn weighted_mean_across_repeated_observations() {
        let graph = Graph::from_edges(vec![
            ("n1", "n2", 100.0),
            ("n2", "n1", 100.0),
        ])
        .unwrap();
        let table = all_pairs(&graph, 1500.0);
        let ix = |name: &str| graph.node_index(&name).unwrap();
        let observations = vec![(ix("n1"), 100.0), (ix("n1"), 200.0), (ix("n2"), 300.0)];
        let result = aggregate(
            &table,
            &observations,
            &DecayFn::no_decay(1500.0),
            &Reducer::Mean,
        );
        assert_eq!(result[&ix("n1")], 200.0);
    }

    #[test]
    fn unknown_observation_node_is_silently_dropped() {
        let graph = make_graph();
        let table = all_pairs(&graph, 1.2);
        let observations = vec![(9999, 42.0)];
        let result = aggregate(
            &table,
            &observations,
            &DecayFn::no_decay(1.2),
            &Reducer::Sum,
        );
        assert!(result.values().all(|&v| v == 0.0));
    }

    #[test]
    fn min_and_max_ignore_weight() {
        let graph = make_graph();
        let table = all_pairs(&graph, 1.2);
        let ix = |name: &str| graph.node_index(&name).unwrap();
        let observations = vec![(ix("b"), 10.0), (ix("d"), 2.0), (ix("c"), 3.0)];
        let min = aggregate(&table, &observations, &DecayFn::no_decay(1.2), &Reducer::Min);
        let max = aggregate(&table, &observations, &DecayFn::no_decay(1.2), &Reducer::Max);
        assert_eq!(min[&ix("a")], 2.0);
        assert_eq!(max[&ix("a")], 10.0);
    }

    #[test]
    fn reducer_from_name_rejects_unknown() {
        assert_eq!(
            Reducer::from_name("bogus").unwrap_err().kind,
            ErrorKind::UnknownReducer
        );
        assert!(Reducer::from_name("median").is_ok());
    }

    #[test]
    fn custom_reducer_is_invoked() {
        let graph = make_graph();
        let table = all_pairs(&graph, 1.2);
        let ix = |name: &str| graph.node_index(&name).unwrap();
        let observations = vec![(ix("b"), 1.0), (ix("c"), 2.0)];
        let count = Reducer::Custom(
            "count".to_string(),
            Arc::new(|contributions: &[(f64, f64)]| contributions.len() as f64),
        );
        let result = aggregate(&table, &observations, &DecayFn::no_decay(1.2), &count);
        assert_eq!(result[&ix("a")], 2.0);
    }
}
