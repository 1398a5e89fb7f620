//! FlakeWatch - flaky-test issue tracking
//!
//! Synchronizes the open flaky-test issues of a GitHub repository and
//! derives a recurrence report for each one by counting how often the
//! rest of the project cross-references it.
//!
//! # Architecture
//!
//! The library is organized into focused modules:
//!
//! - [`tracker`] - Issue-tracker access (REST client, pagination, wire types)
//! - [`sync`] - Synchronization engine (worker pool, enrichment, reports)
//! - [`pacing`] - Request pacing shared by every worker
//! - [`report`] - Text and HTML renderings of a finished sync
//! - [`config`] - Run settings with sensible defaults
//! - [`logging`] - File and stderr logging setup

pub mod config;
pub mod logging;
pub mod pacing;
pub mod report;
pub mod sync;
pub mod tracker;

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
