//! Graph export — Graphviz DOT for visualizers, JSON for snapshots.
//!
//! ```text
//! SpatialGraph → write_dot()  → `neato -n` renders points at their lon/lat
//! SpatialGraph → write_json() → read_json() → SpatialGraph
//! ```
//!
//! JSON cannot express infinity, so unreachable distances are written as
//! `null` and read back as `f64::INFINITY`.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::model::matrix::MatrixRepr;
use crate::model::{DistanceMatrix, GeoPoint, NeighborSet};
use crate::{Error, Result, SpatialGraph};

/// Write the neighbor graph as an undirected Graphviz graph.
///
/// One node per point, pinned at `pos="lon,lat!"`, and one edge per
/// neighbor pair labelled with its direct distance.
pub fn write_dot(graph: &SpatialGraph, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "graph gabriel {{")?;
    writeln!(writer, "  // points: {}", graph.len())?;
    writeln!(writer, "  // neighbor pairs: {}", graph.edge_count())?;

    for (i, p) in graph.points().iter().enumerate() {
        writeln!(writer, "  {i} [pos=\"{},{}!\"];", p.lon, p.lat)?;
    }
    for (a, b, d) in graph.neighbor_pairs() {
        writeln!(writer, "  {a} -- {b} [label=\"{}\"];", format_distance(d))?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}

/// Write a full snapshot (points, neighbors, distances) as JSON.
pub fn write_json(graph: &SpatialGraph, writer: &mut dyn Write) -> Result<()> {
    let snapshot = SnapshotRef {
        points: graph.points(),
        neighbors: graph.neighbor_set(),
        distances: graph.distances(),
    };
    serde_json::to_writer_pretty(writer, &snapshot)?;
    Ok(())
}

/// Read a snapshot written by [`write_json`].
///
/// Fails with [`Error::Json`] if the text is not a snapshot at all, and with
/// [`Error::InvalidSnapshot`] if the matrix has the wrong number of entries
/// or a negative entry, if the parts disagree on the point count, if a
/// neighbor link is dangling or one-sided, or if a neighbor pair has no
/// finite distance.
pub fn read_json(reader: &mut dyn Read) -> Result<SpatialGraph> {
    let Snapshot { points, neighbors, distances } = serde_json::from_reader::<_, Snapshot>(reader)?;
    let distances = DistanceMatrix::try_from(distances).map_err(Error::InvalidSnapshot)?;

    let n = points.len();
    if neighbors.len() != n || distances.len() != n {
        return Err(Error::InvalidSnapshot(format!(
            "{n} points but {} neighbor lists and a {}-point matrix",
            neighbors.len(),
            distances.len()
        )));
    }
    if !neighbors.is_consistent() {
        return Err(Error::InvalidSnapshot("neighbor lists are not symmetric".into()));
    }
    if let Some((a, b)) = neighbors.pairs().find(|&(a, b)| !distances.is_reachable(a, b)) {
        return Err(Error::InvalidSnapshot(format!(
            "neighbors {a} and {b} have no finite distance"
        )));
    }

    Ok(SpatialGraph::from_parts(points, neighbors, distances))
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    points: &'a [GeoPoint],
    neighbors: &'a NeighborSet,
    distances: &'a DistanceMatrix,
}

#[derive(Deserialize)]
struct Snapshot {
    points: Vec<GeoPoint>,
    neighbors: NeighborSet,
    distances: MatrixRepr,
}

/// Distance label: at most three decimals, trailing zeros trimmed.
fn format_distance(d: f64) -> String {
    let s = format!("{d:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(1.0), "1");
        assert_eq!(format_distance(2.5), "2.5");
        assert_eq!(format_distance(1.41421356), "1.414");
        assert_eq!(format_distance(0.0), "0");
    }

    #[test]
    fn test_read_rejects_mismatched_sizes() {
        let json = r#"{
            "points": [{"lat": 0.0, "lon": 0.0}],
            "neighbors": {"lists": [[], []]},
            "distances": {"n": 2, "entries": [null]}
        }"#;
        let err = read_json(&mut json.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidSnapshot(_)));
    }

    #[test]
    fn test_read_rejects_wrong_triangle_length() {
        let json = r#"{
            "points": [{"lat": 0.0, "lon": 0.0}, {"lat": 0.0, "lon": 1.0}],
            "neighbors": {"lists": [[1], [0]]},
            "distances": {"n": 2, "entries": [1.0, 2.0]}
        }"#;
        let err = read_json(&mut json.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidSnapshot(ref msg) if msg.contains("needs 1 entries")));
    }

    #[test]
    fn test_read_rejects_negative_distance() {
        let json = r#"{
            "points": [{"lat": 0.0, "lon": 0.0}, {"lat": 0.0, "lon": 1.0}],
            "neighbors": {"lists": [[1], [0]]},
            "distances": {"n": 2, "entries": [-1.0]}
        }"#;
        let err = read_json(&mut json.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidSnapshot(_)));
    }

    #[test]
    fn test_read_rejects_one_sided_links() {
        let json = r#"{
            "points": [{"lat": 0.0, "lon": 0.0}, {"lat": 0.0, "lon": 1.0}],
            "neighbors": {"lists": [[1], []]},
            "distances": {"n": 2, "entries": [1.0]}
        }"#;
        let err = read_json(&mut json.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidSnapshot(_)));
    }

    #[test]
    fn test_read_rejects_neighbors_without_distance() {
        let json = r#"{
            "points": [{"lat": 0.0, "lon": 0.0}, {"lat": 0.0, "lon": 1.0}],
            "neighbors": {"lists": [[1], [0]]},
            "distances": {"n": 2, "entries": [null]}
        }"#;
        let err = read_json(&mut json.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidSnapshot(_)));
    }

    #[test]
    fn test_malformed_json_is_a_json_error() {
        let err = read_json(&mut "{ not json".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
