//! Change-event publishing port

use crate::entities::ChangeEvent;
use crate::error::Result;
use async_trait::async_trait;

/// Publishes change events to the channel consumed by the reindexer
///
/// `publish` returns only once the channel has accepted the event.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Hand an event to the channel
    async fn publish(&self, event: &ChangeEvent) -> Result<()>;
}
