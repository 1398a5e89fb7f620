//! Request pacing for tracker traffic.
//!
//! Provides [`RateLimiter`], which spreads requests evenly across time
//! instead of granting bursts. With a rate of 3 per second, callers are
//! released roughly 333ms apart no matter how many workers are waiting.
//! Idle time is not banked: after a quiet stretch the next caller goes
//! immediately, but the one after it still waits a full interval.
//!
//! The limiter is shared across the worker pool behind an `Arc`, so the
//! configured rate bounds the pool's combined request traffic rather
//! than each worker's.
//!
//! # Example
//!
//! ```no_run
//! use flakewatch::pacing::RateLimiter;
//!
//! # async fn example() {
//! let limiter = RateLimiter::new(3);
//!
//! // Waits until the next free slot, then returns the slot time.
//! let slot = limiter.acquire().await;
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Evenly paced rate limiter shared by all enrichment workers.
pub struct RateLimiter {
    /// Minimum gap between consecutive grants
    interval: Duration,
    /// Earliest instant the next grant may fire (None until first use)
    next_slot: Mutex<Option<Instant>>,
    /// Total number of grants handed out
    granted: AtomicU64,
}

impl RateLimiter {
    /// Create a limiter granting `requests_per_second` slots per second.
    ///
    /// # Panics
    ///
    /// Panics if `requests_per_second` is 0.
    pub fn new(requests_per_second: u32) -> Self {
        assert!(
            requests_per_second > 0,
            "requests_per_second must be > 0"
        );

        Self {
            interval: Duration::from_secs(1) / requests_per_second,
            next_slot: Mutex::new(None),
            granted: AtomicU64::new(0),
        }
    }

    /// Wait for the next free slot, then return the instant it fired.
    ///
    /// Slots are handed out in arrival order and never closer together
    /// than the configured interval. The returned instant is the slot
    /// time rather than the wakeup time, so callers can log the spacing
    /// between consecutive grants.
    pub async fn acquire(&self) -> Instant {
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(at) if at > now => at,
                // First caller, or the schedule fell behind: go now.
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };

        tokio::time::sleep_until(slot).await;
        self.granted.fetch_add(1, Ordering::Relaxed);
        slot
    }

    /// Get the minimum gap between consecutive grants.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Get the total number of grants handed out so far.
    pub fn granted(&self) -> u64 {
        self.granted.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("interval", &self.interval)
            .field("granted", &self.granted())
            .finish()
    }
}
