//! Run settings for the synchronization engine.
//!
//! Provides [`SyncSettings`] with builder-style configuration and
//! sensible defaults. The defaults mirror how the hosted GitHub API
//! wants to be treated: a small worker pool and a request rate that
//! stays well inside secondary rate limits.
//!
//! # Example
//!
//! ```
//! use flakewatch::config::SyncSettings;
//!
//! let settings = SyncSettings::new()
//!     .with_worker_count(5)
//!     .with_requests_per_second(10);
//!
//! assert_eq!(settings.worker_count(), 5);
//! assert_eq!(settings.requests_per_second(), 10);
//! ```

/// Default number of enrichment workers.
pub const DEFAULT_WORKER_COUNT: usize = 3;

/// Default number of tracker requests granted per second across the pool.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 3;

/// Settings for a synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Number of concurrent enrichment workers
    worker_count: usize,
    /// Requests per second granted across all workers
    requests_per_second: u32,
}

impl SyncSettings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
        }
    }

    /// Set the number of enrichment workers.
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    /// Set the pooled request rate in requests per second.
    pub fn with_requests_per_second(mut self, rate: u32) -> Self {
        self.requests_per_second = rate;
        self
    }

    /// Get the number of enrichment workers.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Get the pooled request rate in requests per second.
    pub fn requests_per_second(&self) -> u32 {
        self.requests_per_second
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SyncSettings::new();
        assert_eq!(settings.worker_count(), DEFAULT_WORKER_COUNT);
        assert_eq!(settings.requests_per_second(), DEFAULT_REQUESTS_PER_SECOND);
    }

    #[test]
    fn test_default_trait_matches_new() {
        assert_eq!(SyncSettings::default(), SyncSettings::new());
    }

    #[test]
    fn test_with_worker_count() {
        let settings = SyncSettings::new().with_worker_count(8);
        assert_eq!(settings.worker_count(), 8);
        // Other settings keep their defaults
        assert_eq!(settings.requests_per_second(), DEFAULT_REQUESTS_PER_SECOND);
    }

    #[test]
    fn test_with_requests_per_second() {
        let settings = SyncSettings::new().with_requests_per_second(20);
        assert_eq!(settings.requests_per_second(), 20);
        assert_eq!(settings.worker_count(), DEFAULT_WORKER_COUNT);
    }

    #[test]
    fn test_builder_chaining() {
        let settings = SyncSettings::new()
            .with_worker_count(1)
            .with_requests_per_second(1);
        assert_eq!(settings.worker_count(), 1);
        assert_eq!(settings.requests_per_second(), 1);
    }
}
