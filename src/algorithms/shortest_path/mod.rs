/// Cutoff-bounded single-source Dijkstra and the rayon-parallel all-pairs
/// driver built on top of it.
pub mod dijkstra;

mod distance_table;
pub use distance_table::{DistanceTable, DistanceTriple};

pub use dijkstra::{all_pairs, shortest_paths};
