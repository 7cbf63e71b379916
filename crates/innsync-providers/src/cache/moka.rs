//! Moka in-memory cache provider
//!
//! Concurrent in-memory cache using Moka. Eviction is size-bounded with
//! TinyLFU admission rather than strict insertion order, so prefer
//! [`MemoryCacheProvider`](super::MemoryCacheProvider) where the pruning
//! order matters.
//!
//! Expiry follows the other providers: `set_json` starts a fresh TTL (the
//! per-entry override or the provider default) and `replace_json` keeps
//! whatever time the entry had left.
//!
//! ## Example
//!
//! ```ignore
//! use innsync_providers::cache::MokaCacheProvider;
//! use std::time::Duration;
//!
//! let provider = MokaCacheProvider::with_config(1000, Duration::from_secs(30));
//! ```

use crate::constants::{CACHE_DEFAULT_MAX_SIZE, CACHE_DEFAULT_TTL};
use async_trait::async_trait;
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::{CacheEntryConfig, CacheProvider, CacheStats};
use moka::Expiry;
use moka::future::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Clone)]
struct CachedJson {
    json: String,
    /// `Some` restarts the expiry clock, `None` keeps the remaining time
    ttl: Option<Duration>,
}

struct EntryExpiry {
    default_ttl: Duration,
}

impl Expiry<String, CachedJson> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedJson,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl.unwrap_or(self.default_ttl))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedJson,
        _updated_at: Instant,
        duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl.or(duration_until_expiry)
    }
}

/// Moka-based in-memory cache provider
#[derive(Clone)]
pub struct MokaCacheProvider {
    cache: Cache<String, CachedJson>,
    max_size: usize,
    ttl: Duration,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Default for MokaCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheProvider {
    /// Create a new Moka cache provider with default settings
    pub fn new() -> Self {
        Self::with_config(CACHE_DEFAULT_MAX_SIZE, CACHE_DEFAULT_TTL)
    }

    /// Create a provider holding up to `max_size` entries, each expiring
    /// `time_to_live` after it was written with `set_json`
    pub fn with_config(max_size: usize, time_to_live: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_size as u64)
            .expire_after(EntryExpiry {
                default_ttl: time_to_live,
            })
            .build();

        Self {
            cache,
            max_size,
            ttl: time_to_live,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get the maximum capacity of the cache
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

#[async_trait]
impl CacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let value = self.cache.get(key).await.map(|entry| entry.json);
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(value)
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let entry = CachedJson {
            json: value.to_string(),
            ttl: Some(config.effective_ttl(self.ttl)),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn replace_json(&self, key: &str, value: &str) -> Result<()> {
        if !self.cache.contains_key(key) {
            return Err(Error::not_found(format!("cache key {key}")));
        }
        let entry = CachedJson {
            json: value.to_string(),
            ttl: None,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        // entry_count lags until pending maintenance has run
        self.cache.run_pending_tasks().await;

        Ok(CacheStats::from_counts(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.cache.entry_count(),
        ))
    }

    async fn size(&self) -> Result<usize> {
        self.cache.run_pending_tasks().await;
        usize::try_from(self.cache.entry_count())
            .map_err(|e| Error::infrastructure_with_source("Moka entry count overflow", e))
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("max_size", &self.max_size)
            .field("ttl", &self.ttl)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
