use std::collections::HashMap;
use std::hash::Hash;

/// A bijection between external node ids and dense `u32` indices in
/// `[0, N)`, built once by [`crate::Graph::from_edges`].
///
/// Every algorithm downstream of the builder (Dijkstra, the all-pairs
/// driver, the aggregation engine) works entirely in dense index space;
/// `IdMap` is only consulted at the façade boundary when translating a
/// caller-supplied id to an index or an index back to the id the caller
/// recognizes.
#[derive(Debug, Clone)]
pub struct IdMap<T> {
    to_index: HashMap<T, u32>,
    to_id: Vec<T>,
}

impl<T> IdMap<T>
where
    T: Hash + Eq + Clone,
{
    pub(crate) fn new() -> IdMap<T> {
        IdMap {
            to_index: HashMap::new(),
            to_id: Vec::new(),
        }
    }

    /// Returns the dense index for `id`, assigning the next free index if
    /// `id` hasn't been seen before.
    pub(crate) fn index_of_or_insert(&mut self, id: &T) -> u32 {
        if let Some(&ix) = self.to_index.get(id) {
            return ix;
        }
        let ix = self.to_id.len() as u32;
        self.to_id.push(id.clone());
        self.to_index.insert(id.clone(), ix);
        ix
    }

    /// Returns the dense index for `id`, or `None` if `id` is unknown.
    pub fn index_of(&self, id: &T) -> Option<u32> {
        self.to_index.get(id).copied()
    }

    /// Returns the external id for a dense `index`, or `None` if out of range.
    pub fn id_of(&self, index: u32) -> Option<&T> {
        self.to_id.get(index as usize)
    }

    /// The number of distinct ids registered.
    pub fn len(&self) -> usize {
        self.to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_id.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &T> {
        self.to_id.iter()
    }
}
