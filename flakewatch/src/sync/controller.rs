//! Sync orchestration.
//!
//! [`SyncController`] drives one synchronization end to end: fetch the
//! complete issue listing, enqueue one job per issue, let the worker
//! pool enrich them under the shared rate limiter, and collect exactly
//! one report per job. Finished runs expose three views of the same
//! collection: raw, count-sorted, and JSON.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use flakewatch::config::SyncSettings;
//! use flakewatch::sync::SyncController;
//! use flakewatch::tracker::{GitHubClient, GitHubConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new(GitHubConfig::new())?;
//! let mut controller = SyncController::new(Arc::new(client), SyncSettings::new());
//!
//! controller.run().await?;
//! println!("{}", controller.json_results()?);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use crate::config::SyncSettings;
use crate::pacing::RateLimiter;
use crate::tracker::{IssueSource, IssueTracker};

use super::error::SyncError;
use super::job::SyncJob;
use super::report::{sorted_by_reference_count, IssueReport, ReportList};
use super::worker::run_worker;

/// Orchestrates a synchronization run against one issue tracker.
pub struct SyncController<T: IssueTracker> {
    tracker: Arc<T>,
    settings: SyncSettings,
    results: Vec<IssueReport>,
}

impl<T: IssueTracker> SyncController<T> {
    /// Create a controller for the given tracker and settings.
    ///
    /// # Panics
    ///
    /// Panics if the settings ask for zero workers.
    pub fn new(tracker: Arc<T>, settings: SyncSettings) -> Self {
        assert!(settings.worker_count() > 0, "worker_count must be > 0");

        Self {
            tracker,
            settings,
            results: Vec::new(),
        }
    }

    /// Run one synchronization, replacing any previously collected
    /// results.
    ///
    /// Blocks until every queued job has reported back and every worker
    /// has exited.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Fetch`] if the issue listing fails; nothing is
    ///   queued and no results are kept
    /// - [`SyncError::Collection`] if a worker stops reporting before
    ///   the pool has drained the queue
    pub async fn run(&mut self) -> Result<(), SyncError> {
        let issues = IssueSource::new(Arc::clone(&self.tracker))
            .fetch_all()
            .await?;
        info!(count = issues.len(), "flake issues fetched");

        let limiter = Arc::new(RateLimiter::new(self.settings.requests_per_second()));

        // Buffered to hold the whole run, so enqueueing below never
        // waits on pool progress
        let capacity = issues.len().max(1);
        let (job_sender, job_receiver) = mpsc::channel(capacity);
        let (result_sender, mut result_receiver) = mpsc::channel(capacity);
        let queue = Arc::new(Mutex::new(job_receiver));

        let mut workers = Vec::with_capacity(self.settings.worker_count());
        for id in 1..=self.settings.worker_count() {
            workers.push(tokio::spawn(run_worker(
                id,
                issues.len(),
                Arc::clone(&self.tracker),
                Arc::clone(&limiter),
                Arc::clone(&queue),
                result_sender.clone(),
            )));
        }
        // Workers now hold the only result senders
        drop(result_sender);

        for (index, issue) in issues.iter().enumerate() {
            let job = SyncJob {
                seq: index + 1,
                issue: issue.clone(),
            };
            if job_sender.send(job).await.is_err() {
                // Pool gone; the collection loop reports the shortfall
                break;
            }
        }
        // Closing the queue lets workers exit once it drains
        drop(job_sender);

        self.results = Vec::with_capacity(issues.len());
        for issue in &issues {
            match result_receiver.recv().await {
                Some(report) => self.results.push(report),
                None => return Err(SyncError::Collection {
                    number: issue.number,
                }),
            }
        }

        for worker in workers {
            let _ = worker.await;
        }

        debug!(
            requests = limiter.granted(),
            results = self.results.len(),
            "sync complete"
        );
        Ok(())
    }

    /// Get the collected reports in collection order.
    ///
    /// Collection order depends on worker scheduling and is not
    /// meaningful across runs.
    pub fn results(&self) -> &[IssueReport] {
        &self.results
    }

    /// Get the collected reports ordered by ascending reference count.
    ///
    /// Returns a sorted copy; the underlying collection keeps its
    /// order, so repeated calls after one run are equivalent.
    pub fn sorted_results(&self) -> Vec<IssueReport> {
        sorted_by_reference_count(&self.results)
    }

    /// Serialize the collected reports to JSON, in collection order.
    ///
    /// The output is an object with a single `items` field. Note the
    /// asymmetry with [`sorted_results`](Self::sorted_results): callers
    /// wanting sorted JSON must sort first and serialize themselves.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Serialize`] if serialization fails.
    pub fn json_results(&self) -> Result<String, SyncError> {
        let list = ReportList {
            items: self.results.clone(),
        };
        Ok(serde_json::to_string(&list)?)
    }
}
