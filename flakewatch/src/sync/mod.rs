//! Synchronization engine.
//!
//! Turns the tracker's raw issue listing into recurrence reports:
//!
//! 1. [`SyncController::run`] fetches every open flaky-test issue
//! 2. One [`SyncJob`] per issue lands on a shared queue
//! 3. A small worker pool drains the queue, fetching timelines under
//!    the pool-wide rate limiter
//! 4. The controller collects exactly one [`IssueReport`] per job
//!
//! Per-issue timeline failures degrade to zero-count reports; only a
//! failed listing or a broken collection channel fails the run.

mod controller;
mod error;
mod job;
mod report;
mod worker;

pub use controller::SyncController;
pub use error::SyncError;
pub use job::SyncJob;
pub use report::{sorted_by_reference_count, IssueReport, ReportList};
