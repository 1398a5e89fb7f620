//! Work items flowing from the controller to the worker pool.

use crate::tracker::Issue;

/// One unit of enrichment work.
///
/// Pairs an issue with its position in the fetch order so worker logs
/// can say "job 12/40". Jobs exist only between enqueue and pickup;
/// exactly one worker consumes each.
#[derive(Debug, Clone)]
pub struct SyncJob {
    /// Position in the fetch order, starting at 1
    pub seq: usize,
    /// The issue to enrich
    pub issue: Issue,
}
