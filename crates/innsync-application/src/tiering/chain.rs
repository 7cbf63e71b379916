//! Ordered cache tiers of one entity family
//!
//! The chain holds cache tiers fastest first. The durable store is not a
//! member: it is always the last tier, and services pass the durable step in
//! explicitly because durable errors propagate unchanged while tier errors
//! are wrapped in `TierFailure`.
//!
//! | Operation | Cache tier failure |
//! |-----------|--------------------|
//! | `read_through` get | treated as a miss |
//! | `read_through` backfill | fatal or ignored, per [`BackfillPolicy`] |
//! | `create_all` | fatal |
//! | `update_all` | fatal; `NotFound` may fall back to create per [`UpdateFallback`] |
//! | `delete_all` | collected, every tier attempted |

use futures::future::join_all;
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::CacheTier;
use innsync_domain::CacheableRecord;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// What happens when populating a faster tier after a hit fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillPolicy {
    /// The read fails with a `TierFailure` naming the tier
    Fatal,
    /// The failure is logged and the read succeeds
    BestEffort,
}

/// What happens when a tier reports `NotFound` on update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateFallback {
    /// `NotFound` is a tier failure like any other
    Strict,
    /// The record is created in that tier instead
    CreateWhenMissing,
}

/// Cache tiers in lookup order
pub struct TierChain<T: CacheableRecord> {
    tiers: Vec<Arc<dyn CacheTier<T>>>,
}

impl<T: CacheableRecord> TierChain<T> {
    /// Create a chain from tiers ordered fastest first
    pub fn new(tiers: Vec<Arc<dyn CacheTier<T>>>) -> Self {
        Self { tiers }
    }

    /// Tiers in lookup order
    pub fn tiers(&self) -> &[Arc<dyn CacheTier<T>>] {
        &self.tiers
    }

    /// Names of the tiers in lookup order
    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.iter().map(|tier| tier.tier_name()).collect()
    }

    /// Probe the tiers for `key`, falling back to `durable`
    ///
    /// The first hit wins. Tiers checked before the hit are backfilled with
    /// `create`; a durable hit backfills every tier. `durable` is only
    /// awaited when every cache tier missed.
    pub async fn read_through<F>(
        &self,
        operation: &str,
        key: &str,
        policy: BackfillPolicy,
        durable: F,
    ) -> Result<Option<T>>
    where
        F: Future<Output = Result<Option<T>>> + Send,
    {
        for (index, tier) in self.tiers.iter().enumerate() {
            match tier.get(key).await {
                Ok(Some(record)) => {
                    debug!(tier = tier.tier_name(), key, "cache hit");
                    self.backfill(&self.tiers[..index], &record, operation, policy)
                        .await?;
                    return Ok(Some(record));
                }
                Ok(None) => debug!(tier = tier.tier_name(), key, "cache miss"),
                Err(e) => warn!(
                    tier = tier.tier_name(),
                    key,
                    error = %e,
                    "cache read failed, treating as miss"
                ),
            }
        }

        let record = durable.await?;
        if let Some(record) = &record {
            debug!(key, "durable hit");
            self.backfill(&self.tiers, record, operation, policy).await?;
        }
        Ok(record)
    }

    async fn backfill(
        &self,
        tiers: &[Arc<dyn CacheTier<T>>],
        record: &T,
        operation: &str,
        policy: BackfillPolicy,
    ) -> Result<()> {
        for tier in tiers {
            if let Err(e) = tier.create(record).await {
                match policy {
                    BackfillPolicy::Fatal => {
                        return Err(Error::tier_failure(operation, tier.tier_name(), e));
                    }
                    BackfillPolicy::BestEffort => warn!(
                        tier = tier.tier_name(),
                        operation,
                        error = %e,
                        "backfill failed, ignoring"
                    ),
                }
            } else {
                debug!(tier = tier.tier_name(), operation, "backfilled");
            }
        }
        Ok(())
    }

    /// Create `record` in every tier, stopping at the first failure
    pub async fn create_all(&self, operation: &str, record: &T) -> Result<()> {
        for tier in &self.tiers {
            tier.create(record)
                .await
                .map_err(|e| Error::tier_failure(operation, tier.tier_name(), e))?;
        }
        Ok(())
    }

    /// Update `record` in every tier, stopping at the first failure
    pub async fn update_all(
        &self,
        operation: &str,
        record: &T,
        fallback: UpdateFallback,
    ) -> Result<()> {
        for tier in &self.tiers {
            let result = match tier.update(record).await {
                Err(e) if e.is_not_found() && fallback == UpdateFallback::CreateWhenMissing => {
                    debug!(tier = tier.tier_name(), operation, "not resident, creating");
                    tier.create(record).await
                }
                other => other,
            };
            result.map_err(|e| Error::tier_failure(operation, tier.tier_name(), e))?;
        }
        Ok(())
    }

    /// Delete `keys` from every tier, tiers running concurrently
    ///
    /// Every key is attempted in every tier; the returned list holds one
    /// `TierFailure` per tier that failed, carrying its first error.
    pub async fn delete_all(&self, operation: &str, keys: &[String]) -> Vec<Error> {
        let attempts = self.tiers.iter().map(|tier| async move {
            let mut first_error = None;
            for key in keys {
                if let Err(e) = tier.delete(key).await {
                    first_error.get_or_insert(e);
                }
            }
            match first_error {
                Some(e) => Err(Error::tier_failure(operation, tier.tier_name(), e)),
                None => Ok(()),
            }
        });

        join_all(attempts)
            .await
            .into_iter()
            .filter_map(std::result::Result::err)
            .inspect(|e| warn!(operation, error = %e, "tier delete failed"))
            .collect()
    }
}

impl<T: CacheableRecord> std::fmt::Debug for TierChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TierChain")
            .field("tiers", &self.tier_names())
            .finish()
    }
}
