//! Bounded, TTL'd in-process cache for search results.
//!
//! Owned exclusively by the orchestrator. Values are immutable, freshly
//! constructed record lists, and insertion overwrites the key wholesale, so
//! duplicate concurrent fills for the same key are idempotent and a reader
//! can never observe a partial entry.

use crate::registry::{CompanyRecord, Jurisdiction};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Cache key: jurisdiction code plus the lower-cased query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    jurisdiction: Jurisdiction,
    query: String,
}

impl CacheKey {
    fn new(jurisdiction: Jurisdiction, query: &str) -> Self {
        Self {
            jurisdiction,
            query: query.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    records: Vec<CompanyRecord>,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// Hit/miss counters for logging and the health probe.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheStats {
    /// Hit rate as a percentage.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Bounded search-result cache.
#[derive(Debug)]
pub struct SearchCache {
    entries: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
    stats: Arc<RwLock<CacheStats>>,
    capacity: usize,
    ttl: Duration,
}

impl SearchCache {
    /// Create a cache with the given capacity (entries) and TTL.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            stats: Arc::new(RwLock::new(CacheStats::default())),
            capacity,
            ttl,
        }
    }

    /// Look up a stored result list. Expired entries are removed on read and
    /// count as misses.
    pub async fn get(&self, jurisdiction: Jurisdiction, query: &str) -> Option<Vec<CompanyRecord>> {
        let key = CacheKey::new(jurisdiction, query);

        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                if !entry.is_expired(self.ttl) {
                    let mut stats = self.stats.write().await;
                    stats.hits += 1;
                    debug!("Cache hit for {}:{}", jurisdiction, key.query);
                    return Some(entry.records.clone());
                }
            } else {
                let mut stats = self.stats.write().await;
                stats.misses += 1;
                return None;
            }
        }

        // Present but expired: drop it under the write lock.
        let mut entries = self.entries.write().await;
        let mut stats = self.stats.write().await;
        if let Some(entry) = entries.get(&key) {
            if entry.is_expired(self.ttl) {
                entries.remove(&key);
                stats.expirations += 1;
                stats.misses += 1;
                debug!("Cache entry expired: {}:{}", jurisdiction, key.query);
                return None;
            }
            // A concurrent writer refreshed it between the locks.
            stats.hits += 1;
            return Some(entry.records.clone());
        }
        stats.misses += 1;
        None
    }

    /// Store a result list, overwriting any previous entry for the key.
    ///
    /// Callers only insert non-empty lists; empty results are deliberately
    /// not cached so a later identical query retries the upstream.
    pub async fn insert(
        &self,
        jurisdiction: Jurisdiction,
        query: &str,
        records: Vec<CompanyRecord>,
    ) {
        let key = CacheKey::new(jurisdiction, query);

        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                records,
                inserted_at: Instant::now(),
            },
        );

        if self.capacity > 0 && entries.len() > self.capacity {
            let excess = entries.len() - self.capacity;
            let mut oldest: Vec<(CacheKey, Instant)> = entries
                .iter()
                .map(|(k, e)| (k.clone(), e.inserted_at))
                .collect();
            oldest.sort_by_key(|(_, inserted_at)| *inserted_at);

            let mut stats = self.stats.write().await;
            for (key, _) in oldest.into_iter().take(excess) {
                entries.remove(&key);
                stats.evictions += 1;
            }
            info!("Evicted {} cache entries over capacity", excess);
        }
    }

    /// Number of live (non-expired) entries.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|e| !e.is_expired(self.ttl)).count()
    }

    /// Whether the cache currently holds no live entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Snapshot of the hit/miss counters.
    pub async fn stats(&self) -> CacheStats {
        *self.stats.read().await
    }
}
