//! Fixed-window rate limiter keyed by client identity.
//!
//! Each key gets a window that opens on its first request. Requests inside
//! the window are counted up to the configured maximum; once the window has
//! ended the next request opens a fresh one. State lives in an injected
//! [`RateLimitStore`] and time comes from an injected [`Clock`], so the
//! in-memory defaults can be swapped for a shared store.

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{InMemoryRateLimitStore, RateLimitRecord, RateLimitStore};

use std::sync::Arc;
use std::time::Duration;

use log::debug;

/// Default maximum number of requests per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 10;

/// Default window length: one minute.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(60_000);

/// Rate limiter configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests accepted per window.
    pub max_requests: u32,
    /// Window length.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// In-memory limiter on wall-clock time.
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_parts(
            Arc::new(InMemoryRateLimitStore::new()),
            Arc::new(SystemClock),
            config,
        )
    }

    pub fn with_parts(
        store: Arc<dyn RateLimitStore>,
        clock: Arc<dyn Clock>,
        config: RateLimitConfig,
    ) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Records a request for `key` against the configured limits.
    ///
    /// Returns true if the request is allowed.
    pub fn check(&self, key: &str) -> bool {
        self.check_with(key, self.config.max_requests, self.config.window)
    }

    /// Records a request for `key` against explicit limits.
    ///
    /// A denied request does not touch the stored count.
    pub fn check_with(&self, key: &str, max_requests: u32, window: Duration) -> bool {
        let now = self.clock.now_millis();
        let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX);

        let mut apply = |slot: &mut Option<RateLimitRecord>| match slot {
            Some(record) if !record.is_expired(now) => {
                if record.count >= max_requests {
                    false
                } else {
                    record.count += 1;
                    true
                }
            }
            _ => {
                *slot = Some(RateLimitRecord {
                    count: 1,
                    reset_time_ms: now.saturating_add(window_ms),
                });
                true
            }
        };
        let allowed = self.store.update(key, &mut apply);

        if !allowed {
            debug!("Rate limiter: rejected request for '{}'", key);
        }
        allowed
    }

    /// Drops every record whose window has ended. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let removed = self.store.evict_expired(self.clock.now_millis());
        if removed > 0 {
            debug!("Rate limiter: evicted {} expired windows", removed);
        }
        removed
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.store.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
