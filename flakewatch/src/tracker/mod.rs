//! Issue-tracker access.
//!
//! Everything the sync engine knows about the remote tracker lives
//! here: the [`IssueTracker`] trait it depends on, the GitHub REST
//! implementation, the wire types, and the paginated issue ingestion.
//!
//! # Architecture
//!
//! - [`Issue`], [`TimelineEvent`], [`Page`], [`TrackerError`] - wire types
//! - [`GitHubClient`] - production REST client with `Link` pagination
//! - [`IssueSource`] - walks the full issue listing page by page
//!
//! The trait seam keeps the engine testable: unit and integration
//! tests drive it with in-memory trackers instead of the live API.

mod github;
mod source;
mod types;

pub use github::{
    GitHubClient, GitHubConfig, IssueTracker, DEFAULT_FLAKE_LABEL, DEFAULT_OWNER,
    DEFAULT_PAGE_SIZE, DEFAULT_REPO, DEFAULT_TIMEOUT_SECS, GITHUB_API_ROOT,
};
pub use source::IssueSource;
pub use types::{Issue, Page, TimelineEvent, TrackerError, CROSS_REFERENCED};

#[cfg(test)]
pub use github::tests::{
    cross_reference, issue, other_event, sourceless_event, timestamp, MockTracker,
};
