//! Bounded, time-expiring cache for upstream feature lookups.
//!
//! The external feature-lookup service is slow and rate-limited, so
//! responses are memoized under a deterministic request fingerprint. The
//! cache is purely in-memory and cleared on restart: it is a performance
//! optimization, never a source of truth.
//!
//! Capacity controls are best-effort:
//!
//! - Entries older than the TTL are invisible to `get` even before a
//!   sweep physically removes them.
//! - Every insert runs a cleanup pass, so the live count never exceeds
//!   the ceiling for longer than one insertion.
//! - A periodic sweep (driven by the server) reclaims memory between
//!   inserts.

pub mod fingerprint;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

pub use fingerprint::feature_fingerprint;

/// Default entry lifetime (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default ceiling on live entries.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// One memoized upstream response.
///
/// Entries are never updated in place; a re-fetch replaces the whole
/// entry under the same key.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// In-memory key/value cache bounded by entry count and age.
///
/// Handles are cheap to clone and share one underlying map; request
/// handlers and the periodic sweep all serialize through the same lock.
/// Construct one instance at startup and inject it where needed.
#[derive(Debug, Clone)]
pub struct BoundedCache<V> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
    ttl: Duration,
    max_entries: usize,
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl, max_entries }
    }

    /// Look up a fingerprint.
    ///
    /// An expired entry behaves exactly like an absent one, whether or
    /// not a sweep has physically removed it yet. Callers get a clone of
    /// the stored value, never a view into cache storage.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// Insert or overwrite the entry for `key`, then run a cleanup pass.
    pub async fn put(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(key.into(), CacheEntry { value, stored_at: Instant::now() });
        Self::sweep(&mut entries, self.ttl, self.max_entries);
    }

    /// Two-phase sweep: drop expired entries, then evict oldest-first
    /// until the live count is back at the ceiling.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup(&self) -> usize {
        let mut entries = self.entries.write().await;
        Self::sweep(&mut entries, self.ttl, self.max_entries)
    }

    /// Current live entry count, including not-yet-swept expired entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn sweep(entries: &mut HashMap<String, CacheEntry<V>>, ttl: Duration, max_entries: usize) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(ttl));

        if entries.len() > max_entries {
            let excess = entries.len() - max_entries;
            let mut by_age: Vec<(String, Instant)> = entries
                .iter()
                .map(|(key, entry)| (key.clone(), entry.stored_at))
                .collect();
            by_age.sort_by_key(|&(_, stored_at)| stored_at);
            for (key, _) in by_age.into_iter().take(excess) {
                entries.remove(&key);
            }
        }

        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = entries.len(), "cache sweep");
        }
        removed
    }
}
