//! Cache tier configuration types

use crate::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_REDIS_URL, DEFAULT_SECONDARY_NAMESPACE};
use innsync_providers::constants::{CACHE_DEFAULT_ITEMS_TO_PRUNE, CACHE_DEFAULT_MAX_SIZE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Primary cache implementations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryCacheProvider {
    /// Bounded map pruned oldest-first in batches
    #[default]
    Memory,
    /// Moka concurrent cache
    Moka,
}

/// Secondary cache implementations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryCacheProvider {
    /// Process-local map, for single-instance runs
    #[default]
    Memory,
    /// Redis shared between instances (feature `cache-redis`)
    Redis,
}

/// Primary (in-process) cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryCacheConfig {
    /// Implementation to use
    pub provider: PrimaryCacheProvider,

    /// Entry count above which the cache prunes
    pub max_size: usize,

    /// Entries removed per prune (memory provider only)
    pub items_to_prune: usize,

    /// Entry expiry in seconds
    pub ttl_secs: u64,
}

impl Default for PrimaryCacheConfig {
    fn default() -> Self {
        Self {
            provider: PrimaryCacheProvider::Memory,
            max_size: CACHE_DEFAULT_MAX_SIZE,
            items_to_prune: CACHE_DEFAULT_ITEMS_TO_PRUNE,
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl PrimaryCacheConfig {
    /// Entry expiry
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Secondary (shared) cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryCacheConfig {
    /// Implementation to use
    pub provider: SecondaryCacheProvider,

    /// Redis connection URL
    pub redis_url: String,

    /// Entry expiry in seconds
    pub ttl_secs: u64,

    /// Prefix of every key written
    pub namespace: String,
}

impl Default for SecondaryCacheConfig {
    fn default() -> Self {
        Self {
            provider: SecondaryCacheProvider::Memory,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            namespace: DEFAULT_SECONDARY_NAMESPACE.to_string(),
        }
    }
}

impl SecondaryCacheConfig {
    /// Entry expiry
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Cache tiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub primary: PrimaryCacheConfig,
    pub secondary: SecondaryCacheConfig,
}
