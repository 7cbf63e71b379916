//! Typed cache tier backed by a cache provider

use async_trait::async_trait;
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::{CacheEntryConfig, CacheProvider, CacheTier};
use innsync_domain::CacheableRecord;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Cache tier storing records of type `T` as JSON in a [`CacheProvider`]
///
/// A record is written under every one of its cache keys. Update and delete
/// read the resident value first so that keys the record is no longer
/// reachable under (a renamed user) are removed as well.
pub struct ProviderTier<T> {
    name: String,
    provider: Arc<dyn CacheProvider>,
    _record: PhantomData<fn() -> T>,
}

impl<T: CacheableRecord> ProviderTier<T> {
    /// Create a tier named `name` over `provider`
    pub fn new<S: Into<String>>(name: S, provider: Arc<dyn CacheProvider>) -> Self {
        Self {
            name: name.into(),
            provider,
            _record: PhantomData,
        }
    }

    /// Wrap in an `Arc<dyn CacheTier<T>>`
    pub fn shared(self) -> Arc<dyn CacheTier<T>> {
        Arc::new(self)
    }

    /// The underlying provider
    pub fn provider(&self) -> &Arc<dyn CacheProvider> {
        &self.provider
    }

    async fn resident(&self, key: &str) -> Result<Option<T>> {
        match self.provider.get_json(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn remove_stale_keys(&self, previous: &T, current: &[String]) -> Result<()> {
        for key in previous.cache_keys() {
            if !current.contains(&key) {
                self.provider.delete(&key).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<T: CacheableRecord> CacheTier<T> for ProviderTier<T> {
    fn tier_name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> Result<Option<T>> {
        self.resident(key).await
    }

    async fn create(&self, record: &T) -> Result<()> {
        let json = serde_json::to_string(record)?;
        for key in record.cache_keys() {
            self.provider
                .set_json(&key, &json, CacheEntryConfig::default())
                .await?;
        }
        debug!(tier = %self.name, kind = T::KIND, "cached record");
        Ok(())
    }

    async fn update(&self, record: &T) -> Result<()> {
        let keys = record.cache_keys();
        let Some(primary) = keys.first() else {
            return Err(Error::internal(format!("{} has no cache key", T::KIND)));
        };

        let previous = self
            .resident(primary)
            .await?
            .ok_or_else(|| Error::not_found(format!("{primary} in {} cache", self.name)))?;

        let json = serde_json::to_string(record)?;
        self.provider.replace_json(primary, &json).await?;
        for key in &keys[1..] {
            self.provider
                .set_json(key, &json, CacheEntryConfig::default())
                .await?;
        }
        self.remove_stale_keys(&previous, &keys).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // An undecodable value still gets its own key removed.
        if let Ok(Some(previous)) = self.resident(key).await {
            for alternate in previous.cache_keys() {
                self.provider.delete(&alternate).await?;
            }
        }
        self.provider.delete(key).await?;
        Ok(())
    }
}

impl<T> std::fmt::Debug for ProviderTier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderTier")
            .field("name", &self.name)
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}
