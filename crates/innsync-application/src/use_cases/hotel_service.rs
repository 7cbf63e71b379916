//! Hotel access service
//!
//! Reads go through the cache tiers before the durable store. Writes go to
//! the durable store first, then to every cache tier, then a change event
//! is published for the reindexer.
//!
//! ## Failure handling
//!
//! - Durable errors abort the operation and are returned unchanged.
//! - Create and update stop at the first cache or publish failure and
//!   return a `TierFailure`; the durable write is kept.
//! - Delete attempts every cache tier and the publish, then returns an
//!   `AggregatedTierFailure` if any of them failed.

use crate::tiering::{BackfillPolicy, TierChain, UpdateFallback};
use innsync_domain::constants::EVENT_TIER;
use innsync_domain::error::{Error, Result};
use innsync_domain::ports::{CacheTier, EventPublisher, HotelRepository};
use innsync_domain::{ChangeEvent, Hotel, HotelDraft, HotelPatch};
use std::sync::Arc;
use tracing::{debug, info};

/// Tiered access to hotels
pub struct HotelService {
    chain: TierChain<Hotel>,
    durable: Arc<dyn HotelRepository>,
    events: Arc<dyn EventPublisher>,
}

impl HotelService {
    /// Create a new hotel service
    ///
    /// # Arguments
    ///
    /// * `caches` - Cache tiers, fastest first
    /// * `durable` - Source-of-truth store
    /// * `events` - Change-event publisher
    pub fn new(
        caches: Vec<Arc<dyn CacheTier<Hotel>>>,
        durable: Arc<dyn HotelRepository>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            chain: TierChain::new(caches),
            durable,
            events,
        }
    }

    /// Cache tiers in lookup order
    pub fn chain(&self) -> &TierChain<Hotel> {
        &self.chain
    }

    /// Read a hotel, backfilling faster tiers that missed
    ///
    /// # Errors
    ///
    /// `NotFound` when no tier has the hotel; `TierFailure` when a backfill
    /// failed.
    pub async fn get_by_id(&self, id: &str) -> Result<Hotel> {
        require_id(id)?;
        self.chain
            .read_through(
                "get",
                &Hotel::cache_key(id),
                BackfillPolicy::Fatal,
                self.durable.get_by_id(id),
            )
            .await?
            .ok_or_else(|| Error::not_found(format!("hotel {id}")))
    }

    /// Store a new hotel and announce it
    pub async fn create(&self, draft: HotelDraft) -> Result<Hotel> {
        let id = self.durable.create(&draft).await?;
        let hotel = draft.into_hotel(id);

        self.chain.create_all("create", &hotel).await?;
        self.publish("create", ChangeEvent::created(&hotel.id))
            .await?;

        info!(hotel_id = %hotel.id, "hotel created");
        Ok(hotel)
    }

    /// Merge `patch` into a stored hotel and propagate the merged record
    ///
    /// Cache tiers that do not hold the hotel are populated instead.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty id or a patch without fields, before any
    /// tier is touched.
    pub async fn update(&self, id: &str, patch: HotelPatch) -> Result<Hotel> {
        require_id(id)?;
        if patch.is_empty() {
            return Err(Error::validation("no fields to update"));
        }

        let merged = self.durable.update(id, &patch).await?;

        self.chain
            .update_all("update", &merged, UpdateFallback::CreateWhenMissing)
            .await?;
        self.publish("update", ChangeEvent::updated(id)).await?;

        info!(hotel_id = %id, "hotel updated");
        Ok(merged)
    }

    /// Remove a hotel from every tier
    ///
    /// Once the durable delete succeeded the hotel is gone, even when the
    /// returned error reports cache tiers or the publish as failed.
    pub async fn delete(&self, id: &str) -> Result<()> {
        require_id(id)?;
        self.durable.delete(id).await?;

        let mut failures = self.chain.delete_all("delete", &[Hotel::cache_key(id)]).await;
        if let Err(e) = self.publish("delete", ChangeEvent::deleted(id)).await {
            failures.push(e);
        }

        info!(hotel_id = %id, failures = failures.len(), "hotel deleted");
        Error::aggregate("delete", failures)
    }

    async fn publish(&self, operation: &str, event: ChangeEvent) -> Result<()> {
        self.events
            .publish(&event)
            .await
            .map_err(|e| Error::tier_failure(operation, EVENT_TIER, e))?;
        debug!(operation = %event.operation, entity_id = %event.entity_id, "change event published");
        Ok(())
    }
}

fn require_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::validation("hotel id is required"));
    }
    Ok(())
}

impl std::fmt::Debug for HotelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotelService")
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}
