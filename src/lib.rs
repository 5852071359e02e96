//! # gabriel-rs — Spatial Neighbor Graphs and Shortest-Path Distances
//!
//! Given an ordered set of geographic points, infer the sparse Gabriel
//! neighbor graph and complete it into a dense all-pairs shortest-path
//! distance matrix.
//!
//! ## Design Principles
//!
//! 1. **Index identity**: a point *is* its position in the input slice
//! 2. **Half-stored matrix**: `DistanceMatrix` keeps only `i < j`, `∞` means unknown
//! 3. **Injected progress**: the host supplies a `ProgressMonitor`; the engine has no UI
//! 4. **All or nothing**: a cancelled build returns an error, never a partial matrix
//!
//! ## Quick Start
//!
//! ```rust
//! use gabriel_rs::{GeoPoint, SpatialGraph};
//!
//! # fn example() -> gabriel_rs::Result<()> {
//! let points = [
//!     GeoPoint::new(0.0, 0.0),
//!     GeoPoint::new(0.0, 1.0),
//!     GeoPoint::new(0.0, 2.0),
//! ];
//! let graph = SpatialGraph::build(&points)?;
//!
//! assert!(graph.are_neighbors(0, 1));
//! assert!(!graph.are_neighbors(0, 2));
//! assert_eq!(graph.distance(0, 2), 2.0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Pipeline
//!
//! | Phase | Module | Cost | Progress units |
//! |-------|--------|------|----------------|
//! | Validate input | crate root | O(n) | — |
//! | Gabriel neighbors | `gabriel` | O(n³) | n |
//! | Floyd–Warshall | `paths` | O(n³) | n |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod gabriel;
pub mod paths;
pub mod progress;
pub mod config;
pub mod export;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{DistanceMatrix, GeoPoint, Located, NeighborSet, Region};
pub use progress::{CancelFlag, NoProgress, Phase, ProgressMonitor};
pub use config::{DistanceUnit, EngineConfig};

use std::collections::VecDeque;

use tracing::{debug, info, warn};

// ============================================================================
// SpatialGraph
// ============================================================================

/// Output of one build: the input coordinates, their Gabriel neighbor
/// relation, and the completed shortest-path distance matrix.
///
/// Immutable. A new point set means a new build.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGraph {
    points: Vec<GeoPoint>,
    neighbors: NeighborSet,
    distances: DistanceMatrix,
}

impl SpatialGraph {
    /// Build with the default configuration and no progress reporting.
    pub fn build<P: Located>(points: &[P]) -> Result<Self> {
        Self::build_with(points, &EngineConfig::default(), &mut NoProgress)
    }

    /// Build, reporting to `monitor` and honouring its cancellation requests.
    ///
    /// The monitor sees `begin_task(2n)`, then one `worked(1)` per point in
    /// each phase, then `done()`. Input is validated before `begin_task`.
    pub fn build_with<P, M>(points: &[P], config: &EngineConfig, monitor: &mut M) -> Result<Self>
    where
        P: Located,
        M: ProgressMonitor + ?Sized,
    {
        config.validate()?;
        let points = validate_points(points, config)?;
        let n = points.len();

        info!(points = n, unit = ?config.unit, "building spatial graph");
        monitor.begin_task(2 * n);

        debug!(phase = %Phase::Neighbors, units = n, "phase start");
        let gabriel::Detection { neighbors, seeded } = gabriel::detect(&points, config, monitor)?;

        debug!(phase = %Phase::ShortestPaths, units = n, edges = neighbors.edge_count(), "phase start");
        let mut distances = seeded;
        paths::complete_phase(&mut distances, monitor)?;

        monitor.done();

        let graph = Self { points, neighbors, distances };
        info!(
            points = n,
            edges = graph.edge_count(),
            reachable_pairs = graph.distances.reachable_pair_count(),
            "spatial graph built"
        );
        if config.max_edge_length.is_some() && n > 1 {
            let components = graph.components().len();
            if components > 1 {
                warn!(components, "edge-length cutoff split the graph");
            }
        }
        Ok(graph)
    }

    /// Reassemble a graph from parts already checked for consistency.
    pub(crate) fn from_parts(
        points: Vec<GeoPoint>,
        neighbors: NeighborSet,
        distances: DistanceMatrix,
    ) -> Self {
        Self { points, neighbors, distances }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn point(&self, i: usize) -> Option<&GeoPoint> {
        self.points.get(i)
    }

    /// Shortest-path distance, `f64::INFINITY` if unreachable.
    ///
    /// # Panics
    ///
    /// If either index is `>= len()`.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances.get(i, j)
    }

    pub fn is_reachable(&self, i: usize, j: usize) -> bool {
        self.distances.is_reachable(i, j)
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn neighbor_set(&self) -> &NeighborSet {
        &self.neighbors
    }

    /// Direct Gabriel neighbors of `i`, ascending.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        self.neighbors.of(i)
    }

    pub fn are_neighbors(&self, i: usize, j: usize) -> bool {
        self.neighbors.contains(i, j)
    }

    /// Every neighbor pair once as `(a, b, direct distance)` with `a < b`.
    pub fn neighbor_pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.neighbors.pairs().map(|(a, b)| (a, b, self.distances.get(a, b)))
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.edge_count()
    }

    /// Connected components of the neighbor graph. Each component is sorted
    /// and components are ordered by their smallest member.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut seen = vec![false; n];
        let mut components = Vec::new();

        for start in 0..n {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut component = vec![start];
            let mut queue = VecDeque::from([start]);

            while let Some(current) = queue.pop_front() {
                for &next in self.neighbors.of(current) {
                    if !seen[next] {
                        seen[next] = true;
                        component.push(next);
                        queue.push_back(next);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// Closest other reachable point by shortest-path distance.
    /// Ties go to the lower index.
    pub fn nearest(&self, i: usize) -> Option<(usize, f64)> {
        if i >= self.len() {
            return None;
        }
        (0..self.len())
            .filter(|&j| j != i)
            .map(|j| (j, self.distances.get(i, j)))
            .filter(|(_, d)| d.is_finite())
            .fold(None, |best, (j, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((j, d)),
            })
    }

    /// Split into the neighbor relation and the distance matrix.
    pub fn into_parts(self) -> (Vec<GeoPoint>, NeighborSet, DistanceMatrix) {
        (self.points, self.neighbors, self.distances)
    }
}

/// Check every coordinate, then check that the whole set spans a finite
/// distance so no pair distance or midpoint can overflow.
fn validate_points<P: Located>(points: &[P], config: &EngineConfig) -> Result<Vec<GeoPoint>> {
    let mut located = Vec::with_capacity(points.len());
    let mut low = GeoPoint::new(f64::INFINITY, f64::INFINITY);
    let mut high = GeoPoint::new(f64::NEG_INFINITY, f64::NEG_INFINITY);

    for (index, p) in points.iter().enumerate() {
        let location = p.location();
        if !location.is_finite() {
            return Err(Error::InvalidInput {
                index,
                reason: format!("non-finite coordinate {location}"),
            });
        }
        if config.check_ranges && !location.in_geographic_range() {
            return Err(Error::InvalidInput {
                index,
                reason: format!("coordinate {location} outside geographic range"),
            });
        }

        low = GeoPoint::new(low.lat.min(location.lat), low.lon.min(location.lon));
        high = GeoPoint::new(high.lat.max(location.lat), high.lon.max(location.lon));
        if !(low.distance(&high) * config.unit.scale()).is_finite() {
            return Err(Error::InvalidInput {
                index,
                reason: format!("coordinate {location} puts the point set beyond a finite extent"),
            });
        }
        located.push(location);
    }
    Ok(located)
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input at point {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cancelled during {phase}")]
    Cancelled { phase: Phase },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
