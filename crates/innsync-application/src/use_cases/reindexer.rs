//! Search index reconciliation
//!
//! The reindexer never applies event contents. For every event it fetches
//! the current hotel and makes the index match: upsert when the hotel
//! exists, delete when it does not. Duplicate or reordered events therefore
//! converge to the same index state.

use crate::ports::ChangeEventHandler;
use async_trait::async_trait;
use dashmap::DashMap;
use innsync_domain::error::Result;
use innsync_domain::ports::{HotelSource, SearchIndex};
use innsync_domain::ChangeEvent;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Index action taken for one reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The hotel exists and was written to the index
    Indexed,
    /// The hotel is gone and was removed from the index
    Removed,
}

/// Converges the search index toward the hotel source
///
/// Reconciliations of the same id are serialized; different ids proceed
/// concurrently.
pub struct Reindexer {
    source: Arc<dyn HotelSource>,
    index: Arc<dyn SearchIndex>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Reindexer {
    /// Create a new reindexer
    pub fn new(source: Arc<dyn HotelSource>, index: Arc<dyn SearchIndex>) -> Self {
        Self {
            source,
            index,
            locks: DashMap::new(),
        }
    }

    /// Fetch hotel `id` and bring the index in line with it
    ///
    /// # Errors
    ///
    /// Fetch and index failures are returned so the event is redelivered.
    pub async fn reconcile(&self, id: &str) -> Result<ReconcileOutcome> {
        let lock = Arc::clone(self.locks.entry(id.to_string()).or_default().value());
        let outcome = {
            let _guard = lock.lock().await;
            self.reconcile_locked(id).await
        };
        drop(lock);

        // Only the map's own reference left: nobody else is waiting on this id.
        // Clones are taken under the same shard lock `remove_if` holds.
        self.locks
            .remove_if(id, |_, entry| Arc::strong_count(entry) == 1);
        outcome
    }

    async fn reconcile_locked(&self, id: &str) -> Result<ReconcileOutcome> {
        match self.source.fetch(id).await? {
            Some(hotel) => {
                self.index.upsert(&hotel).await?;
                debug!(hotel_id = id, "hotel indexed");
                Ok(ReconcileOutcome::Indexed)
            }
            None => {
                self.index.delete(id).await?;
                debug!(hotel_id = id, "hotel removed from index");
                Ok(ReconcileOutcome::Removed)
            }
        }
    }

    /// Number of ids with a reconciliation in flight
    pub fn in_flight(&self) -> usize {
        self.locks.len()
    }
}

#[async_trait]
impl ChangeEventHandler for Reindexer {
    async fn handle(&self, event: &ChangeEvent) -> Result<()> {
        if event.entity_id.trim().is_empty() {
            warn!(operation = %event.operation, "change event without entity id, skipping");
            return Ok(());
        }
        debug!(operation = %event.operation, entity_id = %event.entity_id, "reconciling");
        self.reconcile(&event.entity_id).await.map(|_| ())
    }
}

impl std::fmt::Debug for Reindexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reindexer")
            .field("in_flight", &self.locks.len())
            .finish_non_exhaustive()
    }
}
