/// Generators for some classic graphs.
pub mod classic;

/// Random graphs
pub mod random;
