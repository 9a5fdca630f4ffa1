/// A single `(from, to, weight)` entry of a [`DistanceTable`].
///
/// `from`/`to` are dense node indices (see [`crate::Graph`]); `weight` is the
/// true shortest-path cost, guaranteed `<= cutoff`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceTriple {
    pub from: u32,
    pub to: u32,
    pub weight: f64,
}

/// The flattened result of running bounded Dijkstra from every source that
/// has at least one out-edge.
///
/// Source order and within-source order are not guaranteed — the all-pairs
/// driver parallelises across sources — but the *set* of triples is
/// deterministic for a fixed graph and cutoff. Callers who need an ordering
/// should sort by
/// `(from, to)`.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceTable {
    triples: Vec<DistanceTriple>,
}

impl DistanceTable {
    pub(crate) fn from_triples(triples: Vec<DistanceTriple>) -> DistanceTable {
        DistanceTable { triples }
    }

    pub fn triples(&self) -> &[DistanceTriple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Sorts the table by `(from, to)`, in place. Two tables built from the
    /// same graph and cutoff are byte-equal after this call, regardless of
    /// how many workers the all-pairs driver used.
    pub fn sort(&mut self) {
        self.triples
            .sort_unstable_by_key(|t| (t.from, t.to, t.weight.to_bits()));
    }
}
