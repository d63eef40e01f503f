//! LRU caching wrapper for any fetcher.
//!
//! Both successful pages and failures are cached, so a repeated URL never
//! triggers a second network call while it stays resident.

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::debug;

use crate::error::FetchResult;
use crate::traits::fetcher::Fetcher;

/// Default number of URLs kept in the cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Statistics about fetch cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that required a fetch
    pub misses: u64,
    /// Entries evicted due to LRU policy
    pub evictions: u64,
    /// Current number of entries in cache
    pub current_size: usize,
    /// Maximum cache size (capacity)
    pub max_size: usize,
}

impl CacheStats {
    /// Cache hit rate as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

struct CacheInner {
    entries: LruCache<String, FetchResult<String>>,
    stats: CacheStats,
}

/// A fetcher that memoizes another fetcher's results by URL.
///
/// The cache is safe to share between concurrent evaluations: lookups and
/// inserts hold one mutex, so the recency order is never corrupted. The
/// lock is not held across the inner fetch; two concurrent misses for the
/// same URL may both reach the network, and the second insert wins.
pub struct CachedFetcher<F: Fetcher> {
    inner: F,
    cache: Mutex<CacheInner>,
}

impl<F: Fetcher> CachedFetcher<F> {
    /// Wrap a fetcher with an LRU cache of `capacity` entries (0 falls back to the default).
    pub fn new(inner: F, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN));

        Self {
            inner,
            cache: Mutex::new(CacheInner {
                entries: LruCache::new(capacity),
                stats: CacheStats {
                    max_size: capacity.get(),
                    ..CacheStats::default()
                },
            }),
        }
    }

    /// Wrap a fetcher with the default capacity.
    pub fn with_default_capacity(inner: F) -> Self {
        Self::new(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// Current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        CacheStats {
            current_size: cache.entries.len(),
            ..cache.stats.clone()
        }
    }

    /// Whether a URL is currently cached (does not touch recency).
    pub fn contains(&self, url: &str) -> bool {
        self.cache.lock().entries.contains(url)
    }

    /// Drop every entry and reset statistics.
    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        cache.entries.clear();
        let max_size = cache.stats.max_size;
        cache.stats = CacheStats {
            max_size,
            ..CacheStats::default()
        };
    }

    /// Access the wrapped fetcher.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for CachedFetcher<F> {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        {
            let mut cache = self.cache.lock();
            if let Some(cached) = cache.entries.get(url).cloned() {
                cache.stats.hits += 1;
                debug!(url = %url, "Fetch cache hit");
                return cached;
            }
            cache.stats.misses += 1;
        }

        debug!(url = %url, fetcher = self.inner.name(), "Fetch cache miss");
        let result = self.inner.fetch(url).await;

        let mut cache = self.cache.lock();
        if let Some((evicted, _)) = cache.entries.push(url.to_string(), result.clone()) {
            if evicted != url {
                cache.stats.evictions += 1;
                debug!(evicted = %evicted, "Fetch cache eviction");
            }
        }

        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
