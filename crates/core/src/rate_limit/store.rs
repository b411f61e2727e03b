//! Storage for rate-limit windows.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use log::warn;

/// Request count for one client inside the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRecord {
    pub count: u32,
    /// Epoch milliseconds after which the window is over.
    pub reset_time_ms: i64,
}

impl RateLimitRecord {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.reset_time_ms
    }
}

/// Backing store for [`super::RateLimiter`].
///
/// `update` must run `apply` atomically with respect to other callers for
/// the same key; the in-memory store serializes on a mutex, a shared cache
/// implementation would use its own compare-and-set.
pub trait RateLimitStore: Send + Sync {
    /// Runs `apply` against the record for `key` and persists the result.
    /// Leaving the slot `None` removes the record.
    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(&mut Option<RateLimitRecord>) -> bool,
    ) -> bool;

    /// Removes every record whose window ended before `now_ms`.
    fn evict_expired(&self, now_ms: i64) -> usize;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store behind a mutex.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    records: Mutex<HashMap<String, RateLimitRecord>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock only means a panic mid-update; the map is still usable.
    fn lock_records(&self) -> MutexGuard<'_, HashMap<String, RateLimitRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limit store mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(&mut Option<RateLimitRecord>) -> bool,
    ) -> bool {
        let mut records = self.lock_records();
        let mut slot = records.get(key).copied();
        let outcome = apply(&mut slot);

        match slot {
            Some(record) => {
                records.insert(key.to_string(), record);
            }
            None => {
                records.remove(key);
            }
        }
        outcome
    }

    fn evict_expired(&self, now_ms: i64) -> usize {
        let mut records = self.lock_records();
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now_ms));
        before - records.len()
    }

    fn len(&self) -> usize {
        self.lock_records().len()
    }
}
