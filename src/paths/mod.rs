//! # Shortest-Path Completion (Floyd–Warshall)
//!
//! Turns a matrix seeded with direct neighbor distances into all-pairs
//! shortest-path distances, in place:
//!
//! ```text
//! for k in 0..n:                      // one outer iteration per pivot
//!     for i < j:
//!         d[i][j] = min(d[i][j], d[i][k] + d[k][j])
//! ```
//!
//! For a fixed pivot `k` the cells `d[i][k]` and `d[k][j]` cannot improve
//! (`d[k][k] = 0`), so the inner loop reads a stable row and the pair order
//! within one pivot does not affect the result. Pivots must run in order.
//! Unknown entries are `∞`; `∞ + x` stays `∞` and never wins a comparison,
//! so unreachable pairs stay unreachable.
//!
//! A detour only replaces a known distance when it is shorter by more than
//! [`RELAX_TOLERANCE`] (relative), so completing an already complete matrix
//! leaves every entry bit-for-bit unchanged.

use tracing::debug;

use crate::model::DistanceMatrix;
use crate::progress::{self, Phase, ProgressMonitor};
use crate::Result;

/// Relative margin a detour must beat before it replaces a known distance.
pub const RELAX_TOLERANCE: f64 = 1e-12;

/// Relax every pair through pivot `k`. Returns how many entries improved.
///
/// Entries only ever decrease. Unknown (`∞`) entries take any finite detour.
///
/// # Panics
///
/// If `k >= matrix.len()`.
pub fn relax_through(matrix: &mut DistanceMatrix, k: usize) -> usize {
    let n = matrix.len();
    assert!(k < n, "pivot {k} out of bounds for {n} points");

    let mut improved = 0;
    for i in 0..n {
        if i == k {
            continue;
        }
        let ik = matrix.get(i, k);
        if ik.is_infinite() {
            continue;
        }
        for j in (i + 1)..n {
            if j == k {
                continue;
            }
            let via = ik + matrix.get(k, j);
            if shortens(via, matrix.get(i, j)) {
                matrix.put(i, j, via);
                improved += 1;
            }
        }
    }
    improved
}

#[inline]
fn shortens(via: f64, current: f64) -> bool {
    if current.is_infinite() {
        return via.is_finite();
    }
    via < current && current - via > RELAX_TOLERANCE * current
}

/// Complete `matrix` in place as a standalone task.
///
/// Calls `begin_task(n)`, one `worked(1)` per pivot and `done()` at the end.
/// On cancellation the matrix is left half-relaxed and must be discarded;
/// that is why it is taken by value and only handed back on success.
pub fn complete<M: ProgressMonitor + ?Sized>(
    mut matrix: DistanceMatrix,
    monitor: &mut M,
) -> Result<DistanceMatrix> {
    monitor.begin_task(matrix.len());
    complete_phase(&mut matrix, monitor)?;
    monitor.done();
    Ok(matrix)
}

/// Pivot loop without task boundaries, for callers that own the task.
pub(crate) fn complete_phase<M: ProgressMonitor + ?Sized>(
    matrix: &mut DistanceMatrix,
    monitor: &mut M,
) -> Result<()> {
    let mut total_improved = 0;
    for k in 0..matrix.len() {
        progress::checkpoint(monitor, Phase::ShortestPaths, k)?;
        total_improved += relax_through(matrix, k);
        monitor.worked(1);
    }
    debug!(points = matrix.len(), improved = total_improved, "shortest paths complete");
    Ok(())
}
