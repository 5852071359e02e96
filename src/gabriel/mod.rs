//! # Gabriel Neighbor Detection
//!
//! Two points `A` and `B` are Gabriel neighbors iff no other point lies
//! strictly inside the circle whose diameter is the segment `AB`:
//!
//! ```text
//!            .-'''-.
//!          /    C?   \        M = midpoint(A, B)
//!     A  *------M------*  B   r = d(A, B) / 2
//!          \         /        reject iff ∃ C ≠ A, B : d(C, M) < r
//!            '-...-'
//! ```
//!
//! A point exactly on the circle does not disqualify the pair, and two
//! coincident points are always neighbors (`r = 0` admits nothing strictly
//! inside). The test is exhaustive: O(n) per pair, O(n³) overall.

use tracing::trace;

use crate::config::EngineConfig;
use crate::model::{DistanceMatrix, GeoPoint, NeighborSet};
use crate::progress::{self, Phase, ProgressMonitor};
use crate::{Error, Result};

/// True if no point other than `a` and `b` lies strictly inside the
/// circle with diameter `points[a] → points[b]`.
///
/// # Panics
///
/// If `a` or `b` is out of range.
pub fn is_gabriel_pair(points: &[GeoPoint], a: usize, b: usize) -> bool {
    let (pa, pb) = (points[a], points[b]);
    let center = pa.midpoint(&pb);
    let radius = pa.distance(&pb) / 2.0;

    !points
        .iter()
        .enumerate()
        .any(|(c, pc)| c != a && c != b && pc.distance(&center) < radius)
}

/// Neighbor relation and seeded distance matrix.
///
/// The matrix holds `0` on the diagonal, the direct (unit-scaled) distance
/// for every neighbor pair and `∞` everywhere else.
#[derive(Debug, Clone)]
pub struct Detection {
    pub neighbors: NeighborSet,
    pub seeded: DistanceMatrix,
}

/// Run the empty-circle test over every unordered pair.
///
/// One outer iteration per point: the monitor is polled before it and
/// credited one unit after it. This does not call `begin_task` or `done`;
/// the caller owns the task boundaries.
///
/// Fails with [`Error::InvalidInput`] if a neighbor distance overflows.
pub fn detect<M: ProgressMonitor + ?Sized>(
    points: &[GeoPoint],
    config: &EngineConfig,
    monitor: &mut M,
) -> Result<Detection> {
    let n = points.len();
    let scale = config.unit.scale();
    let mut neighbors = NeighborSet::new(n);
    let mut seeded = DistanceMatrix::new(n);

    for a in 0..n {
        progress::checkpoint(monitor, Phase::Neighbors, a)?;

        for b in (a + 1)..n {
            if !is_gabriel_pair(points, a, b) {
                continue;
            }
            let direct = points[a].distance(&points[b]) * scale;
            if !direct.is_finite() {
                return Err(Error::InvalidInput {
                    index: b,
                    reason: format!("distance to point {a} overflows"),
                });
            }
            if config.max_edge_length.is_some_and(|limit| direct > limit) {
                trace!(a, b, direct, "gabriel pair beyond cutoff");
                continue;
            }
            trace!(a, b, direct, "gabriel pair");
            neighbors.link(a, b);
            seeded.put(a, b, direct);
        }

        monitor.worked(1);
    }

    Ok(Detection { neighbors, seeded })
}
