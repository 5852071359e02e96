//! End-to-end tests for DOT and JSON export.

use gabriel_rs::export::{read_json, write_dot, write_json};
use gabriel_rs::{DistanceUnit, EngineConfig, GeoPoint, NoProgress, Region, SpatialGraph};
use pretty_assertions::assert_eq;

fn chain() -> SpatialGraph {
    let points = [
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 1.0),
        GeoPoint::new(0.0, 2.5),
    ];
    SpatialGraph::build(&points).unwrap()
}

#[test]
fn test_dot_lists_points_and_neighbor_pairs() {
    let mut out = Vec::new();
    write_dot(&chain(), &mut out).unwrap();
    let dot = String::from_utf8(out).unwrap();

    let expected = "\
graph gabriel {
  // points: 3
  // neighbor pairs: 2
  0 [pos=\"0,0!\"];
  1 [pos=\"1,0!\"];
  2 [pos=\"2.5,0!\"];
  0 -- 1 [label=\"1\"];
  1 -- 2 [label=\"1.5\"];
}
";
    assert_eq!(dot, expected);
}

#[test]
fn test_dot_for_empty_graph() {
    let graph = SpatialGraph::build::<GeoPoint>(&[]).unwrap();
    let mut out = Vec::new();
    write_dot(&graph, &mut out).unwrap();
    let dot = String::from_utf8(out).unwrap();
    assert!(dot.starts_with("graph gabriel {"));
    assert!(!dot.contains("--"));
}

#[test]
fn test_json_roundtrip() {
    let graph = chain();
    let mut buf = Vec::new();
    write_json(&graph, &mut buf).unwrap();

    let restored = read_json(&mut buf.as_slice()).unwrap();
    assert_eq!(restored, graph);
    assert_eq!(restored.distance(0, 2), 2.5);
}

#[test]
fn test_json_roundtrip_keeps_unreachable_pairs() {
    let regions = [
        Region::new("harbor", 0.0, 0.0),
        Region::new("mill", 0.0, 0.5),
        Region::new("outpost", 30.0, 30.0),
    ];
    let cfg = EngineConfig::default()
        .with_unit(DistanceUnit::Kilometres)
        .with_max_edge_length(100.0);
    let graph = SpatialGraph::build_with(&regions, &cfg, &mut NoProgress).unwrap();
    assert!(graph.distance(0, 2).is_infinite());

    let mut buf = Vec::new();
    write_json(&graph, &mut buf).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.contains("null"));

    let restored = read_json(&mut buf.as_slice()).unwrap();
    assert!(restored.distance(2, 0).is_infinite());
    assert_eq!(restored.distance(0, 1), 0.5 * DistanceUnit::KM_PER_DEGREE);
    assert_eq!(restored, graph);
}
