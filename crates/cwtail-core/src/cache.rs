//! Time-bounded cache of already-emitted event ids.
//!
//! The remote filter API is polled with overlapping windows, so the same
//! event id can legitimately come back on consecutive fetches. The cache
//! absorbs those resightings: an id present here was emitted exactly once
//! and any later sighting is suppressed.
//!
//! There is deliberately no size-based eviction. An entry may only leave
//! the cache through an explicit sweep decision, and entries carrying the
//! most-recently-seen timestamp are exempt even from that: boundary
//! records at the newest timestamp can reappear in the next overlapping
//! poll regardless of their age.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Default time-to-live for a cache entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Default period of the background sweep.
pub const DEFAULT_SWEEP_PERIOD: Duration = Duration::from_secs(10);

#[derive(Debug, Default)]
struct Inner {
    /// event id -> timestamp (epoch ms) of its last occurrence.
    seen: HashMap<String, i64>,
    /// Timestamp of the most recently added entry.
    most_recent_ts: i64,
}

/// Dedup cache shared between one poll loop and its sweeper task.
///
/// All operations are short critical sections under one exclusive lock;
/// the lock is never held across an await point.
#[derive(Debug)]
pub struct EventCache {
    inner: Mutex<Inner>,
    ttl: Duration,
}

impl EventCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            ttl,
        }
    }

    /// True if `id` was already emitted.
    pub fn has(&self, id: &str) -> bool {
        let inner = self.inner.lock().expect("cache lock poisoned");
        inner.seen.contains_key(id)
    }

    /// Record a first sighting.
    pub fn add(&self, id: &str, timestamp_ms: i64) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.seen.insert(id.to_string(), timestamp_ms);
        inner.most_recent_ts = timestamp_ms;
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        let inner = self.inner.lock().expect("cache lock poisoned");
        inner.seen.len()
    }

    /// One sweep cycle: drop every entry older than the TTL, keeping any
    /// entry whose timestamp equals the tracked most-recent timestamp.
    /// Returns the number of entries purged.
    pub fn purge(&self, now_ms: i64) -> usize {
        let ttl_ms = self.ttl.as_millis() as i64;
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        let most_recent = inner.most_recent_ts;
        let before = inner.seen.len();
        inner
            .seen
            .retain(|_, ts| *ts == most_recent || now_ms - *ts < ttl_ms);
        let purged = before - inner.seen.len();
        if purged > 0 {
            tracing::debug!(purged, remaining = inner.seen.len(), "cache sweep");
        }
        purged
    }
}

impl Default for EventCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
