//! Wire types and errors for issue-tracker access.
//!
//! These mirror the subset of the GitHub REST payloads the sync engine
//! cares about. Unknown fields are ignored during deserialization, and
//! the timeline fields the API marks optional really are optional here:
//! GitHub emits timeline entries of many shapes, and only some carry a
//! source or an event kind.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Timeline event kind that counts toward an issue's reference total.
pub const CROSS_REFERENCED: &str = "cross-referenced";

/// An open issue as listed by the tracker.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Issue number within its repository
    pub number: u64,
    /// Issue title
    pub title: String,
    /// When the issue was opened
    pub created_at: DateTime<Utc>,
}

/// One entry of an issue's timeline.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEvent {
    /// Event kind, e.g. `cross-referenced`, `labeled`, `commented`
    #[serde(default)]
    pub event: Option<String>,
    /// When the event occurred
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// The issue or pull request the event originated from
    #[serde(default)]
    pub source: Option<serde_json::Value>,
}

impl TimelineEvent {
    /// Whether the entry carries both a source and an event kind.
    ///
    /// Entries missing either field are untrustworthy and are skipped
    /// by the sync pass regardless of what the present field says.
    pub fn is_well_formed(&self) -> bool {
        self.source.is_some() && self.event.is_some()
    }

    /// Whether this is a well-formed cross-reference event.
    pub fn is_cross_reference(&self) -> bool {
        self.is_well_formed() && self.event.as_deref() == Some(CROSS_REFERENCED)
    }
}

/// One page of tracker results plus the pointer to the next page.
///
/// `next_page` is `None` on the final page. The page size is chosen by
/// the client issuing the request, so `items` may hold anywhere from
/// zero entries up to that size.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Entries on this page, in the order the tracker returned them
    pub items: Vec<T>,
    /// Number of the next page, if the tracker reported one
    pub next_page: Option<u32>,
}

impl<T> Page<T> {
    /// Create a final page with no successor.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page: None,
        }
    }
}

/// Errors from talking to the issue tracker.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The request could not be sent or the transport failed mid-flight
    #[error("request to {url} failed: {message}")]
    Http {
        /// URL the request targeted
        url: String,
        /// Transport-level failure description
        message: String,
    },

    /// The tracker answered with a non-success status code
    #[error("HTTP {status} from {url}")]
    Status {
        /// Status code returned by the tracker
        status: u16,
        /// URL the request targeted
        url: String,
    },

    /// The response body could not be decoded
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// URL the request targeted
        url: String,
        /// Deserialization failure description
        message: String,
    },
}
