/// Columnar node/edge table persistence, read and write.
pub mod tables;
