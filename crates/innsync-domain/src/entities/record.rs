//! Cache addressing for records stored in cache tiers

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record that can be stored in a cache tier
///
/// A record is stored under every key returned by [`cache_keys`](Self::cache_keys).
/// The first key is the primary one; the others are alternate lookups (users
/// are reachable by id and by username).
pub trait CacheableRecord:
    Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + 'static
{
    /// Human-readable kind, used in error messages and logs
    const KIND: &'static str;

    /// Every key this record is reachable under, primary key first
    fn cache_keys(&self) -> Vec<String>;
}
