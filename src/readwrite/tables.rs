//! Columnar node/edge table persistence.
//!
//! Two CSV files — readable by common GIS tooling without pulling in a real
//! geospatial stack — hold the node table (`id`, `geometry`) and the edge
//! table (`from`, `to`, `cost`, `geometry`). The distance-table cache is
//! never persisted; callers must call [`crate::Network::preprocess`] again
//! after a read.

use crate::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize)]
struct NodeRow {
    id: String,
    geometry: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeRow {
    from: String,
    to: String,
    cost: f64,
    geometry: String,
}

/// One row of the edge table: external `from`/`to` ids, a positive `cost`,
/// and an optional WKT `geometry` string (empty if absent).
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord<T> {
    pub from: T,
    pub to: T,
    pub cost: f64,
    pub geometry: Option<String>,
}

/// One row of the node table: the external `id` and an optional WKT
/// `geometry` string.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord<T> {
    pub id: T,
    pub geometry: Option<String>,
}

fn io_err(context: &str, e: impl std::fmt::Display) -> Error {
    Error::new(ErrorKind::Io, format!("{}: {}", context, e))
}

/// Writes the node table to `path` as CSV, columns `id`, `geometry`.
pub fn write_nodes<T: Display>(path: impl AsRef<Path>, nodes: &[NodeRecord<T>]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path.as_ref())
        .map_err(|e| io_err("opening node table for write", e))?;
    for node in nodes {
        writer
            .serialize(NodeRow {
                id: node.id.to_string(),
                geometry: node.geometry.clone().unwrap_or_default(),
            })
            .map_err(|e| io_err("writing node row", e))?;
    }
    writer.flush().map_err(|e| io_err("flushing node table", e))?;
    Ok(())
}

/// Writes the edge table to `path` as CSV, columns `from`, `to`, `cost`,
/// `geometry`.
pub fn write_edges<T: Display>(path: impl AsRef<Path>, edges: &[EdgeRecord<T>]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path.as_ref())
        .map_err(|e| io_err("opening edge table for write", e))?;
    for edge in edges {
        writer
            .serialize(EdgeRow {
                from: edge.from.to_string(),
                to: edge.to.to_string(),
                cost: edge.cost,
                geometry: edge.geometry.clone().unwrap_or_default(),
            })
            .map_err(|e| io_err("writing edge row", e))?;
    }
    writer.flush().map_err(|e| io_err("flushing edge table", e))?;
    Ok(())
}

/// Reads the node table from `path`.
///
/// # Errors
///
/// Returns [`ErrorKind::Io`] if the file can't be opened/parsed, or if an
/// `id` field can't be parsed as `T`.
pub fn read_nodes<T>(path: impl AsRef<Path>) -> Result<Vec<NodeRecord<T>>, Error>
where
    T: FromStr,
    T::Err: Display,
{
    let mut reader =
        csv::Reader::from_path(path.as_ref()).map_err(|e| io_err("opening node table for read", e))?;
    let mut out = Vec::new();
    for result in reader.deserialize::<NodeRow>() {
        let row = result.map_err(|e| io_err("reading node row", e))?;
        let id = row
            .id
            .parse::<T>()
            .map_err(|e| io_err("parsing node id", e))?;
        out.push(NodeRecord {
            id,
            geometry: if row.geometry.is_empty() {
                None
            } else {
                Some(row.geometry)
            },
        });
    }
    Ok(out)
}

/// Reads the edge table from `path`.
///
/// # Errors
///
/// Returns [`ErrorKind::Io`] if the file can't be opened/parsed, or if a
/// `from`/`to` field can't be parsed as `T`.
pub fn read_edges<T>(path: impl AsRef<Path>) -> Result<Vec<EdgeRecord<T>>, Error>
where
    T: FromStr,
    T::Err: Display,
{
    let mut reader =
        csv::Reader::from_path(path.as_ref()).map_err(|e| io_err("opening edge table for read", e))?;
    let mut out = Vec::new();
    for result in reader.deserialize::<EdgeRow>() {
        let row = result.map_err(|e| io_err("reading edge row", e))?;
        let from = row
            .from
            .parse::<T>()
            .map_err(|e| io_err("parsing edge from-id", e))?;
        let to = row
            .to
            .parse::<T>()
            .map_err(|e| io_err("parsing edge to-id", e))?;
        out.push(EdgeRecord {
            from,
            to,
            cost: row.cost,
            geometry: if row.geometry.is_empty() {
                None
            } else {
                Some(row.geometry)
            },
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn edges_round_trip_through_csv() {
        let file = NamedTempFile::new().unwrap();
        let edges = vec![
            EdgeRecord {
                from: "a".to_string(),
                to: "b".to_string(),
                cost: 1.5,
                geometry: None,
            },
            EdgeRecord {
                from: "b".to_string(),
                to: "c".to_string(),
                cost: 2.25,
                geometry: Some("LINESTRING (0 0, 1 1)".to_string()),
            },
        ];
        write_edges(file.path(), &edges).unwrap();
        let read_back: Vec<EdgeRecord<String>> = read_edges(file.path()).unwrap();
        assert_eq!(read_back, edges);
    }

    #[test]
    fn nodes_round_trip_through_csv() {
        let file = NamedTempFile::new().unwrap();
        let nodes = vec![
            NodeRecord {
                id: "a".to_string(),
                geometry: Some("POINT (0 0)".to_string()),
            },
            NodeRecord {
                id: "b".to_string(),
                geometry: None,
            },
        ];
        write_nodes(file.path(), &nodes).unwrap();
        let read_back: Vec<NodeRecord<String>> = read_nodes(file.path()).unwrap();
        assert_eq!(read_back, nodes);
    }

    #[test]
    fn unparseable_id_is_an_io_error() {
        let file = NamedTempFile::new().unwrap();
        write_nodes(
            file.path(),
            &[NodeRecord {
                id: "not-a-number".to_string(),
                geometry: None,
            }],
        )
        .unwrap();
        let result: Result<Vec<NodeRecord<u64>>, Error> = read_nodes(file.path());
        assert_eq!(result.unwrap_err().kind, ErrorKind::Io);
    }
}
