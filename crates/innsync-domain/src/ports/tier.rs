//! Typed cache tier port

use crate::entities::CacheableRecord;
use crate::error::Result;
use async_trait::async_trait;

/// One cache tier of a tier chain, holding records of type `T`
///
/// Records are stored under all of their [`CacheableRecord::cache_keys`].
#[async_trait]
pub trait CacheTier<T: CacheableRecord>: Send + Sync {
    /// Name used in logs and tier failures
    fn tier_name(&self) -> &str;

    /// Look a record up by any of its keys
    async fn get(&self, key: &str) -> Result<Option<T>>;

    /// Insert or replace a record under all of its keys
    async fn create(&self, record: &T) -> Result<()>;

    /// Replace a resident record
    ///
    /// # Errors
    /// `NotFound` when the primary key is not resident.
    async fn update(&self, record: &T) -> Result<()>;

    /// Remove the record reachable under `key`, including its other keys
    ///
    /// Idempotent: removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}
