//! Bounded in-memory cache provider
//!
//! Entries expire a fixed duration after insertion. When an insert pushes
//! the entry count above `max_size`, the oldest-inserted entries are pruned
//! in one batch of `items_to_prune`, so eviction cost is paid once per batch
//! rather than on every insert.
//!
//! Every operation runs under a single mutex; no caller can observe a
//! partially pruned state.
//!
//! ## Example
//!
//! ```ignore
//! use innsync_providers::cache::MemoryCacheProvider;
//! use std::time::Duration;
//!
//! let provider = MemoryCacheProvider::with_config(100_000, 100, Duration::from_secs(30));
//! ```

use crate::constants::{CACHE_DEFAULT_ITEMS_TO_PRUNE, CACHE_DEFAULT_MAX_SIZE, CACHE_DEFAULT_TTL};
use async_trait::async_trait;
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::{CacheEntryConfig, CacheProvider, CacheStats};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Instant,
    /// Position in the insertion order; stale order slots carry older values
    seq: u64,
}

#[derive(Default)]
struct State {
    entries: HashMap<String, Entry>,
    order: VecDeque<(String, u64)>,
    next_seq: u64,
    stats: CacheStats,
}

impl State {
    fn remove_if_expired(&mut self, key: &str, now: Instant) -> bool {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= now);
        if expired {
            self.entries.remove(key);
        }
        expired
    }

    /// Remove up to `batch` of the oldest-inserted live entries
    fn prune_oldest(&mut self, batch: usize) -> usize {
        let mut pruned = 0;
        while pruned < batch {
            let Some((key, seq)) = self.order.pop_front() else {
                break;
            };
            if self.entries.get(&key).is_some_and(|entry| entry.seq == seq) {
                self.entries.remove(&key);
                pruned += 1;
            }
        }
        pruned
    }

    /// Drop order slots that no longer point at a live entry
    fn compact_order(&mut self) {
        let entries = &self.entries;
        self.order
            .retain(|(key, seq)| entries.get(key).is_some_and(|entry| entry.seq == *seq));
    }
}

/// Bounded, insertion-ordered in-memory cache
pub struct MemoryCacheProvider {
    state: Mutex<State>,
    max_size: usize,
    items_to_prune: usize,
    ttl: Duration,
}

impl Default for MemoryCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCacheProvider {
    /// Create a provider with default limits (100000 entries, prune 100, 30s)
    pub fn new() -> Self {
        Self::with_config(
            CACHE_DEFAULT_MAX_SIZE,
            CACHE_DEFAULT_ITEMS_TO_PRUNE,
            CACHE_DEFAULT_TTL,
        )
    }

    /// Create a provider with custom limits
    ///
    /// # Arguments
    ///
    /// * `max_size` - Entry count above which pruning starts
    /// * `items_to_prune` - Entries removed per pruning pass (at least 1)
    /// * `ttl` - Expiry measured from insertion
    pub fn with_config(max_size: usize, items_to_prune: usize, ttl: Duration) -> Self {
        Self {
            state: Mutex::new(State::default()),
            max_size,
            items_to_prune: items_to_prune.max(1),
            ttl,
        }
    }

    /// Get the configured maximum entry count
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| Error::cache("memory cache lock poisoned"))
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut state = self.lock()?;
        state.remove_if_expired(key, Instant::now());
        let value = state.entries.get(key).map(|entry| entry.value.clone());
        state.stats.record_lookup(value.is_some());
        Ok(value)
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let mut state = self.lock()?;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + config.effective_ttl(self.ttl),
                seq,
            },
        );
        state.order.push_back((key.to_string(), seq));

        if state.entries.len() > self.max_size {
            let pruned = state.prune_oldest(self.items_to_prune);
            state.stats.evictions += pruned as u64;
            debug!(pruned, remaining = state.entries.len(), "memory cache pruned");
        }
        if state.order.len() > state.entries.len().saturating_mul(2) + self.items_to_prune {
            state.compact_order();
        }
        Ok(())
    }

    async fn replace_json(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.lock()?;
        state.remove_if_expired(key, Instant::now());
        match state.entries.get_mut(key) {
            Some(entry) => {
                value.clone_into(&mut entry.value);
                Ok(())
            }
            None => Err(Error::not_found(format!("cache key {key}"))),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.entries.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut state = self.lock()?;
        state.remove_if_expired(key, Instant::now());
        Ok(state.entries.contains_key(key))
    }

    async fn clear(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.entries.clear();
        state.order.clear();
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        let state = self.lock()?;
        let mut stats = state.stats.clone();
        stats.entries = state.entries.len() as u64;
        Ok(stats)
    }

    async fn size(&self) -> Result<usize> {
        Ok(self.lock()?.entries.len())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

impl std::fmt::Debug for MemoryCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheProvider")
            .field("max_size", &self.max_size)
            .field("items_to_prune", &self.items_to_prune)
            .field("ttl", &self.ttl)
            .finish()
    }
}
