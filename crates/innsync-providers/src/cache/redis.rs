//! Redis cache provider
//!
//! Secondary cache tier reached over the network. Keys are prefixed with a
//! namespace so several services can share one Redis database. Writes set
//! `EX` from the entry TTL; updates keep the remaining TTL.
//!
//! ## Example
//!
//! ```ignore
//! use innsync_providers::cache::RedisCacheProvider;
//! use std::time::Duration;
//!
//! let provider = RedisCacheProvider::new("redis://localhost:6379")?
//!     .with_namespace("users")
//!     .with_ttl(Duration::from_secs(30));
//! ```

use crate::constants::CACHE_DEFAULT_TTL;
use async_trait::async_trait;
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::{CacheEntryConfig, CacheProvider, CacheStats};
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Redis cache provider
///
/// Uses multiplexed connections for efficient connection reuse.
#[derive(Clone)]
pub struct RedisCacheProvider {
    client: Client,
    namespace: String,
    ttl: Duration,
    stats: Arc<RwLock<CacheStats>>,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider with connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::infrastructure_with_source(format!("Failed to create Redis client: {e}"), e)
        })?;

        Ok(Self {
            client,
            namespace: "innsync".to_string(),
            ttl: CACHE_DEFAULT_TTL,
            stats: Arc::new(RwLock::new(CacheStats::default())),
        })
    }

    /// Prefix every key with `namespace:`
    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Default expiry of written entries
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    /// Get a connection from the pool
    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                Error::infrastructure_with_source(format!("Failed to get Redis connection: {e}"), e)
            })
    }

    fn record(&self, hit: bool) {
        if let Ok(mut stats) = self.stats.write() {
            stats.record_lookup(hit);
        }
    }

    async fn namespace_keys(&self, conn: &mut MultiplexedConnection) -> Result<Vec<String>> {
        conn.keys(format!("{}:*", self.namespace))
            .await
            .map_err(|e| Error::infrastructure_with_source(format!("Redis KEYS failed: {e}"), e))
    }
}

/// `SET key value XX KEEPTTL`
///
/// Writes only when the key exists (nil reply otherwise) and leaves its
/// remaining expiry untouched. Requires Redis 6.0 or later.
fn replace_command(key: &str, value: &str) -> redis::Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(value).arg("XX").arg("KEEPTTL");
    cmd
}

fn redis_error(command: &str, e: redis::RedisError) -> Error {
    Error::infrastructure_with_source(format!("Redis {command} failed: {e}"), e)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;

        let value: Option<String> = conn
            .get(self.namespaced(key))
            .await
            .map_err(|e| redis_error("GET", e))?;
        self.record(value.is_some());
        Ok(value)
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let mut conn = self.get_connection().await?;

        let ttl_seconds = config.effective_ttl(self.ttl).as_secs();
        let key = self.namespaced(key);
        let result: redis::RedisResult<()> = if ttl_seconds > 0 {
            conn.set_ex(key, value, ttl_seconds).await
        } else {
            conn.set(key, value).await
        };
        result.map_err(|e| redis_error("SET", e))
    }

    async fn replace_json(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.get_connection().await?;

        let reply: Option<String> = replace_command(&self.namespaced(key), value)
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_error("SET XX", e))?;

        match reply {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("cache key {key}"))),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let count: i32 = conn
            .del(self.namespaced(key))
            .await
            .map_err(|e| redis_error("DEL", e))?;
        Ok(count > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let count: i32 = conn
            .exists(self.namespaced(key))
            .await
            .map_err(|e| redis_error("EXISTS", e))?;
        Ok(count > 0)
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;

        let keys = self.namespace_keys(&mut conn).await?;
        if keys.is_empty() {
            return Ok(());
        }
        let _: i64 = conn.del(keys).await.map_err(|e| redis_error("DEL", e))?;
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        let mut conn = self.get_connection().await?;
        let entries = self.namespace_keys(&mut conn).await?.len();

        let mut stats = self
            .stats
            .read()
            .map_err(|_| Error::infrastructure("Failed to read cache stats"))?
            .clone();
        stats.entries = entries as u64;
        Ok(stats)
    }

    async fn size(&self) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        Ok(self.namespace_keys(&mut conn).await?.len())
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("namespace", &self.namespace)
            .field("ttl", &self.ttl)
            .finish()
    }
}
