//! Enrichment workers.
//!
//! Workers drain a shared job queue, fetch each issue's timeline under
//! the pool-wide rate limiter, and emit one report per job. A timeline
//! failure is not fatal: the worker logs it and reports the issue with
//! nothing counted, so every queued job still yields exactly one
//! result.
//!
//! The queue is a single receiver wrapped in `Arc<Mutex<..>>`. Each
//! worker locks it just long enough to pull one job, then releases it
//! before doing any network work, so the pool stays busy even when one
//! timeline fetch is slow.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::pacing::RateLimiter;
use crate::tracker::IssueTracker;

use super::job::SyncJob;
use super::report::IssueReport;

/// Shared handle to the job queue drained by the pool.
pub(crate) type JobQueue = Arc<Mutex<mpsc::Receiver<SyncJob>>>;

/// Run one enrichment worker until the job queue is closed and drained.
///
/// Each job costs one rate-limiter slot, taken after the job has been
/// pulled so a waiting worker never blocks the queue for its siblings.
pub(crate) async fn run_worker<T: IssueTracker>(
    id: usize,
    total: usize,
    tracker: Arc<T>,
    limiter: Arc<RateLimiter>,
    queue: JobQueue,
    results: mpsc::Sender<IssueReport>,
) {
    let mut last_slot: Option<Instant> = None;

    loop {
        // Hold the queue lock only while receiving, never while working
        let job = { queue.lock().await.recv().await };
        let Some(job) = job else {
            break;
        };

        let slot = limiter.acquire().await;
        let spacing = last_slot.map(|previous| slot - previous);
        last_slot = Some(slot);

        debug!(
            worker = id,
            job = job.seq,
            total,
            issue = job.issue.number,
            spacing = ?spacing,
            "fetching timeline"
        );

        let report = match tracker.list_timeline(job.issue.number, 1).await {
            Ok(page) => IssueReport::from_timeline(&job.issue, &page.items),
            Err(error) => {
                warn!(
                    worker = id,
                    issue = job.issue.number,
                    error = %error,
                    "timeline fetch failed, reporting zero references"
                );
                IssueReport::new(&job.issue)
            }
        };

        debug!(
            worker = id,
            job = job.seq,
            total,
            issue = report.number,
            references = report.reference_count,
            "collected result"
        );

        if results.send(report).await.is_err() {
            // Collector gone, no one left to report to
            break;
        }
    }

    debug!(worker = id, "worker quit");
}
