//! Errors raised by the synchronization engine.

use thiserror::Error;

use crate::tracker::TrackerError;

/// Errors from running a synchronization.
///
/// Per-issue timeline failures are deliberately absent: the worker pool
/// degrades those to zero-count reports instead of failing the run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The issue listing could not be fetched; the run is aborted
    /// before any work is queued
    #[error("issue listing failed: {0}")]
    Fetch(#[from] TrackerError),

    /// The result channel closed before every queued job reported back
    #[error("result channel closed prematurely for issue #{number}")]
    Collection {
        /// Issue whose result was still outstanding
        number: u64,
    },

    /// The collected reports could not be serialized
    #[error("failed to serialize reports: {0}")]
    Serialize(#[from] serde_json::Error),
}
