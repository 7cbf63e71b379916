//! Key/value cache port
//!
//! Cache backends store opaque JSON strings. Typed records are layered on
//! top by [`CacheTier`](super::CacheTier) adapters, so a backend never needs
//! to know about hotels or users.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-write options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheEntryConfig {
    /// Expiry for this entry; `None` uses the backend's configured TTL
    pub ttl: Option<Duration>,
}

impl CacheEntryConfig {
    /// Options that keep the backend defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Expire this entry after `ttl` instead of the backend TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// TTL to apply when the backend's own default is `default`
    pub fn effective_ttl(&self, default: Duration) -> Duration {
        self.ttl.unwrap_or(default)
    }
}

/// Counters reported by a cache backend
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Resident entries at the time of the snapshot
    pub entries: u64,
    /// Entries dropped to stay under the capacity bound
    pub evictions: u64,
    /// `hits / (hits + misses)`, 0.0 before the first lookup
    pub hit_rate: f64,
}

impl CacheStats {
    /// Snapshot built from raw lookup counters
    pub fn from_counts(hits: u64, misses: u64, entries: u64) -> Self {
        let mut stats = Self {
            hits,
            misses,
            entries,
            ..Self::default()
        };
        stats.refresh_hit_rate();
        stats
    }

    /// Count one lookup
    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.refresh_hit_rate();
    }

    #[allow(clippy::cast_precision_loss)]
    fn refresh_hit_rate(&mut self) {
        let lookups = self.hits + self.misses;
        self.hit_rate = if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        };
    }
}

/// JSON key/value cache backend
///
/// ```ignore
/// cache.set_json("hotel:42", &json, CacheEntryConfig::default()).await?;
/// let cached = cache.get_json("hotel:42").await?;
/// ```
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Value stored under `key`; expired entries read as `None`
    async fn get_json(&self, key: &str) -> Result<Option<String>>;

    /// Insert `value`, replacing any previous entry and restarting its expiry
    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()>;

    /// Overwrite the value of a live entry
    ///
    /// # Errors
    /// `NotFound` when `key` is absent or already expired.
    async fn replace_json(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; returns whether an entry was removed
    async fn delete(&self, key: &str) -> Result<bool>;

    async fn exists(&self, key: &str) -> Result<bool>;

    /// Drop every entry owned by this backend
    async fn clear(&self) -> Result<()>;

    async fn stats(&self) -> Result<CacheStats>;

    /// Resident entry count
    async fn size(&self) -> Result<usize>;

    /// Short backend name used in logs ("memory", "moka", "redis")
    fn provider_name(&self) -> &str;
}
