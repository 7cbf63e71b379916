//! Change-event consumer ports
//!
//! The publishing side lives in the domain crate
//! ([`innsync_domain::ports::EventPublisher`]); the consuming side needs a
//! cancellation token and therefore lives here.

use async_trait::async_trait;
use innsync_domain::error::Result;
use innsync_domain::ChangeEvent;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Processes one delivered change event
///
/// Returning an error asks the channel to redeliver the event.
#[async_trait]
pub trait ChangeEventHandler: Send + Sync {
    async fn handle(&self, event: &ChangeEvent) -> Result<()>;
}

/// Delivers change events to a handler until shut down
///
/// Each accepted event is delivered at least once to exactly one running
/// consumer.
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// Run the consumer loop until `shutdown` is cancelled
    async fn run(
        &self,
        handler: Arc<dyn ChangeEventHandler>,
        shutdown: CancellationToken,
    ) -> Result<()>;
}
