//! Progress reporting and cooperative cancellation.
//!
//! The engine never owns a UI. The host hands in a [`ProgressMonitor`] and
//! the engine reports coarse units of work to it and polls it for a stop
//! request between outer iterations. Every method has a no-op default, so a
//! host implements only what it cares about.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Capability the engine consumes to report progress and observe cancellation.
pub trait ProgressMonitor {
    /// Called once before any work with the total number of units.
    fn begin_task(&mut self, _total_units: usize) {}

    /// Called after each completed unit of work.
    fn worked(&mut self, _units: usize) {}

    /// Called once when the computation finished successfully.
    /// Never called after a cancellation.
    fn done(&mut self) {}

    /// Polled at the top of every outer iteration.
    fn is_cancellation_requested(&self) -> bool {
        false
    }
}

impl<M: ProgressMonitor + ?Sized> ProgressMonitor for &mut M {
    fn begin_task(&mut self, total_units: usize) {
        (**self).begin_task(total_units)
    }

    fn worked(&mut self, units: usize) {
        (**self).worked(units)
    }

    fn done(&mut self) {
        (**self).done()
    }

    fn is_cancellation_requested(&self) -> bool {
        (**self).is_cancellation_requested()
    }
}

/// Monitor that ignores everything and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressMonitor for NoProgress {}

/// Shared stop flag. Clone it, hand one copy to the engine, and call
/// [`cancel`](CancelFlag::cancel) from anywhere else.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    requested: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

impl ProgressMonitor for CancelFlag {
    fn is_cancellation_requested(&self) -> bool {
        self.is_cancelled()
    }
}

/// The two phases of a build, as reported in logs and in
/// [`Error::Cancelled`](crate::Error::Cancelled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Gabriel empty-circle neighbor detection.
    Neighbors,
    /// Floyd–Warshall completion.
    ShortestPaths,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Neighbors => write!(f, "neighbor detection"),
            Phase::ShortestPaths => write!(f, "shortest-path completion"),
        }
    }
}

/// Polls the monitor and turns a stop request into [`Error::Cancelled`](crate::Error::Cancelled).
pub(crate) fn checkpoint<M: ProgressMonitor + ?Sized>(
    monitor: &M,
    phase: Phase,
    iteration: usize,
) -> crate::Result<()> {
    if monitor.is_cancellation_requested() {
        tracing::info!(%phase, iteration, "cancellation observed");
        return Err(crate::Error::Cancelled { phase });
    }
    Ok(())
}
