//! Full ingestion of the flaky-test issue listing.
//!
//! [`IssueSource`] walks the tracker's paginated listing until no next
//! page is advertised and hands the complete set to the caller. Paging
//! is sequential: each page's successor is only known once the page
//! itself has been fetched.

use std::sync::Arc;

use tracing::debug;

use super::github::IssueTracker;
use super::types::{Issue, TrackerError};

/// Fetches the complete set of open flaky-test issues.
pub struct IssueSource<T: IssueTracker> {
    tracker: Arc<T>,
}

impl<T: IssueTracker> IssueSource<T> {
    /// Create a source reading from the given tracker.
    pub fn new(tracker: Arc<T>) -> Self {
        Self { tracker }
    }

    /// Fetch every open flaky-test issue across all listing pages.
    ///
    /// Issues are returned in listing order, pages concatenated first
    /// to last.
    ///
    /// # Errors
    ///
    /// Returns the first [`TrackerError`] encountered. A failed page
    /// aborts the whole fetch; no partial listing is returned.
    pub async fn fetch_all(&self) -> Result<Vec<Issue>, TrackerError> {
        let mut issues = Vec::new();
        let mut pages = 0u32;
        let mut page = 1;

        loop {
            let batch = self.tracker.list_flake_issues(page).await?;
            pages += 1;
            issues.extend(batch.items);

            match batch.next_page {
                Some(next) => page = next,
                None => break,
            }
        }

        debug!(pages, issues = issues.len(), "issue listing complete");
        Ok(issues)
    }
}
